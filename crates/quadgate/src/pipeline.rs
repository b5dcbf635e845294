//! Request handling.
//!
//! [`GateHost`] turns one [`HookInput`] into one [`HookOutput`],
//! auditing the decision along the way. The review itself runs on a
//! blocking thread under a time budget; if the budget elapses or the
//! review panics, the gate fails open and approves.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use metrics::{counter, histogram};
use serde_json::json;

use quadgate_audit::{AuditEvent, AuditLogger, AuditRecord, Decision};
use quadgate_core::{Verdict, Violation};
use quadgate_engine::{GatePolicy, review};
use quadgate_settings::GateSettings;

use crate::extract::{Payload, extract_payload};
use crate::protocol::{HookEvent, HookInput, HookOutput};
use crate::stop::{sweep_reason, sweep_research};

/// Banner prepended to every pre-tool denial reason.
const BLOCK_BANNER: &str = "Quadgate blocked this operation:";

/// One gate host, configured for a single hook invocation.
pub struct GateHost {
    settings: GateSettings,
    logger: AuditLogger,
    project_root: PathBuf,
    timeout: Duration,
}

impl GateHost {
    /// Build a host from loaded settings.
    pub fn new(settings: GateSettings, logger: AuditLogger, project_root: PathBuf) -> Self {
        let timeout = Duration::from_millis(settings.hook.timeout_ms);
        Self {
            settings,
            logger,
            project_root,
            timeout,
        }
    }

    /// Override the review time budget (CLI flag).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn policy(&self) -> GatePolicy {
        GatePolicy {
            quality: self.settings.quality.enabled,
            security: self.settings.security.enabled,
            research: self.settings.research.enabled,
            disabled: self.settings.disabled_set(),
        }
    }

    /// Handle one request end to end.
    pub async fn handle(&self, input: &HookInput) -> HookOutput {
        let start = Instant::now();
        let Some(event) = HookEvent::parse(&input.hook_event_name) else {
            tracing::debug!(event = %input.hook_event_name, "unknown hook event, approving");
            return HookOutput::approve();
        };

        let output = match event {
            HookEvent::PreToolUse => self.handle_pre_tool(input).await,
            HookEvent::PostToolUse => self.handle_post_tool(input).await,
            HookEvent::Stop => self.handle_stop(),
        };

        let decision = if output.is_deny() { "block" } else { "approve" };
        counter!("quadgate_requests_total", "event" => event.as_str(), "decision" => decision)
            .increment(1);
        histogram!("quadgate_request_duration_seconds", "event" => event.as_str())
            .record(start.elapsed().as_secs_f64());
        output
    }

    async fn handle_pre_tool(&self, input: &HookInput) -> HookOutput {
        let Some(payload) = extract_payload(&input.tool_name, &input.tool_input) else {
            self.audit(
                AuditEvent::PreTool,
                Some(input.tool_name.clone()),
                Decision::Approve,
                Vec::new(),
                json!({"reason": "no-content"}),
            );
            return HookOutput::approve();
        };

        match self.review_within_budget(payload.clone()).await {
            Some(verdict) => {
                let metadata =
                    json!({"filePath": payload.file_path, "context": payload.context.as_str()});
                if let Some(detail) = verdict.reason() {
                    let reason =
                        format!("{BLOCK_BANNER}\n\n{detail}\n\nFix these issues and try again.");
                    self.audit(
                        AuditEvent::PreTool,
                        Some(input.tool_name.clone()),
                        Decision::Block,
                        verdict.violations().to_vec(),
                        metadata,
                    );
                    HookOutput::deny(HookEvent::PreToolUse, reason)
                } else {
                    self.audit(
                        AuditEvent::PreTool,
                        Some(input.tool_name.clone()),
                        Decision::Approve,
                        Vec::new(),
                        metadata,
                    );
                    HookOutput::approve()
                }
            }
            None => {
                // Budget elapsed or the review panicked: fail open.
                self.audit(
                    AuditEvent::PreTool,
                    Some(input.tool_name.clone()),
                    Decision::Approve,
                    Vec::new(),
                    json!({"reason": "fail-open"}),
                );
                HookOutput::approve()
            }
        }
    }

    async fn handle_post_tool(&self, input: &HookInput) -> HookOutput {
        // Post-tool is observational: the call already ran, so
        // violations are recorded but never denied.
        let violations = match extract_payload(&input.tool_name, &input.tool_input) {
            Some(payload) => match self.review_within_budget(payload).await {
                Some(Verdict::Block(violations)) => violations,
                _ => Vec::new(),
            },
            None => Vec::new(),
        };
        let decision = if violations.is_empty() {
            Decision::Approve
        } else {
            Decision::LogOnly
        };
        self.audit(
            AuditEvent::PostTool,
            Some(input.tool_name.clone()),
            decision,
            violations,
            serde_json::Value::Null,
        );
        HookOutput::approve()
    }

    fn handle_stop(&self) -> HookOutput {
        if !self.settings.research.enabled {
            self.audit(
                AuditEvent::Stop,
                None,
                Decision::Approve,
                Vec::new(),
                json!({"reason": "research-disabled"}),
            );
            return HookOutput::approve();
        }
        let findings = sweep_research(&self.project_root, &self.settings.disabled_set());
        if findings.is_empty() {
            self.audit(
                AuditEvent::Stop,
                None,
                Decision::Approve,
                Vec::new(),
                serde_json::Value::Null,
            );
            return HookOutput::approve();
        }
        let reason = sweep_reason(&findings);
        let files: Vec<String> = findings
            .iter()
            .map(|f| f.path.display().to_string())
            .collect();
        let violations: Vec<Violation> = findings.into_iter().flat_map(|f| f.violations).collect();
        self.audit(
            AuditEvent::Stop,
            None,
            Decision::Block,
            violations,
            json!({"files": files}),
        );
        HookOutput::deny(HookEvent::Stop, reason)
    }

    /// Run the synchronous review off the async thread, bounded by the
    /// configured budget. `None` means the verdict never arrived.
    async fn review_within_budget(&self, payload: Payload) -> Option<Verdict> {
        let policy = self.policy();
        let task = tokio::task::spawn_blocking(move || {
            review(&payload.content, &payload.file_path, payload.context, &policy)
        });
        match tokio::time::timeout(self.timeout, task).await {
            Ok(Ok(verdict)) => Some(verdict),
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "review task failed, failing open");
                None
            }
            Err(_) => {
                tracing::warn!(budget_ms = self.timeout.as_millis() as u64, "review timed out, failing open");
                None
            }
        }
    }

    fn audit(
        &self,
        event: AuditEvent,
        tool: Option<String>,
        decision: Decision,
        violations: Vec<Violation>,
        metadata: serde_json::Value,
    ) {
        self.logger.log(&AuditRecord::now(
            self.logger.session_id(),
            event,
            tool,
            decision,
            violations,
            metadata,
        ));
    }
}

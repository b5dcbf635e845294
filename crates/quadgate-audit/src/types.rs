//! Audit record types.
//!
//! One [`AuditRecord`] is appended per gate decision, serialized as a
//! single JSON line. Field names are camelCase on the wire so the logs
//! read the same as the hook protocol they describe.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use quadgate_core::Violation;

/// Which hook produced the decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditEvent {
    /// Gate ran before a tool call.
    #[serde(rename = "pre-tool")]
    PreTool,
    /// Gate observed a completed tool call.
    #[serde(rename = "post-tool")]
    PostTool,
    /// Gate swept research documents at session end.
    #[serde(rename = "stop")]
    Stop,
}

/// The outcome recorded for a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    /// Content passed, or the gate failed open.
    #[serde(rename = "approve")]
    Approve,
    /// Content was rejected.
    #[serde(rename = "block")]
    Block,
    /// Violations were recorded without affecting the tool call.
    #[serde(rename = "log-only")]
    LogOnly,
}

/// One line of the audit trail.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRecord {
    /// ISO 8601 timestamp (UTC).
    pub timestamp: String,
    /// Session the decision belongs to.
    pub session_id: String,
    /// Hook that produced the decision.
    pub event: AuditEvent,
    /// Tool name as reported by the host, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool: Option<String>,
    /// Outcome.
    pub decision: Decision,
    /// Violations behind a block or log-only decision.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub violations: Vec<Violation>,
    /// Free-form context (file path, timing, fail-open reason).
    #[serde(skip_serializing_if = "Value::is_null", default)]
    pub metadata: Value,
}

impl AuditRecord {
    /// Build a record stamped with the current UTC time.
    pub fn now(
        session_id: impl Into<String>,
        event: AuditEvent,
        tool: Option<String>,
        decision: Decision,
        violations: Vec<Violation>,
        metadata: Value,
    ) -> Self {
        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            session_id: session_id.into(),
            event,
            tool,
            decision,
            violations,
            metadata,
        }
    }
}

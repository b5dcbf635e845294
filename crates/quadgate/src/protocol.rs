//! Hook wire protocol.
//!
//! The host process speaks JSON over stdin/stdout: one request object
//! in, one response object out. Input fields are snake_case (the
//! calling agent's convention); the response envelope is camelCase.
//!
//! An approval is the empty object `{}`. Anything the host cannot make
//! sense of (unknown event, unparsable input) also answers `{}` — the
//! gate fails open, never closed.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Hook events the host understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HookEvent {
    /// Review content before the tool runs; may deny.
    PreToolUse,
    /// Observe a completed tool call; log only.
    PostToolUse,
    /// Sweep research documents before the session ends; may deny.
    Stop,
}

impl HookEvent {
    /// Parse the `hook_event_name` field. Unknown names are `None`.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "PreToolUse" => Some(Self::PreToolUse),
            "PostToolUse" => Some(Self::PostToolUse),
            "Stop" => Some(Self::Stop),
            _ => None,
        }
    }

    /// The wire name of this event.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PreToolUse => "PreToolUse",
            Self::PostToolUse => "PostToolUse",
            Self::Stop => "Stop",
        }
    }
}

/// One hook request as read from stdin.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct HookInput {
    /// Which hook fired. Empty when absent.
    #[serde(default)]
    pub hook_event_name: String,
    /// Session id supplied by the caller, if any.
    #[serde(default)]
    pub session_id: Option<String>,
    /// Tool about to run (or just run). Empty for `Stop`.
    #[serde(default)]
    pub tool_name: String,
    /// Tool arguments as opaque JSON.
    #[serde(default)]
    pub tool_input: Value,
    /// Project directory the session operates in, if supplied.
    #[serde(default)]
    pub cwd: Option<String>,
}

/// The response envelope written to stdout.
///
/// Serializes to `{}` for approvals. Denials carry the nested
/// `hookSpecificOutput` object the calling agent expects.
#[derive(Clone, Debug, Serialize)]
pub struct HookOutput {
    /// Present only on denial.
    #[serde(rename = "hookSpecificOutput", skip_serializing_if = "Option::is_none")]
    pub hook_specific_output: Option<HookSpecificOutput>,
}

/// Denial payload.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HookSpecificOutput {
    /// Echo of the event being answered.
    pub hook_event_name: String,
    /// Always `"deny"`; approvals omit the envelope entirely.
    pub permission_decision: String,
    /// Human-readable explanation shown to the agent.
    pub permission_decision_reason: String,
}

impl HookOutput {
    /// The empty approval object.
    pub fn approve() -> Self {
        Self {
            hook_specific_output: None,
        }
    }

    /// A denial for `event` with the given reason text.
    pub fn deny(event: HookEvent, reason: impl Into<String>) -> Self {
        Self {
            hook_specific_output: Some(HookSpecificOutput {
                hook_event_name: event.as_str().to_owned(),
                permission_decision: "deny".to_owned(),
                permission_decision_reason: reason.into(),
            }),
        }
    }

    /// True when this output denies the request.
    pub fn is_deny(&self) -> bool {
        self.hook_specific_output.is_some()
    }
}

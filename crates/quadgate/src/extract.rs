//! Tool payload extraction.
//!
//! Maps a hook request's tool name and arguments to the piece of text
//! the gate should review, plus the context that decides which rules
//! apply. Tools with nothing reviewable (reads, globs, unknown tools)
//! yield no payload and are approved without running any rules.

use quadgate_core::ToolContext;
use serde_json::Value;

/// Tool operations the gate knows how to review.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToolOperation {
    /// File creation: review the full new content.
    Write,
    /// File modification: review the replacement text only.
    Edit,
    /// Shell execution: review the command line.
    Bash,
    /// Web access: review the URL (or the search query).
    WebAccess,
    /// MCP tool call: review all string arguments.
    Mcp,
    /// Anything else. Never reviewed.
    Unrecognized,
}

impl ToolOperation {
    /// Classify a tool by name, case-insensitively. MCP tools are
    /// recognized by their `mcp__` / `mcp_` name prefix.
    pub fn from_tool_name(name: &str) -> Self {
        let lower = name.to_lowercase();
        match lower.as_str() {
            "write" => Self::Write,
            "edit" => Self::Edit,
            "bash" => Self::Bash,
            "webfetch" | "websearch" => Self::WebAccess,
            _ if lower.starts_with("mcp__") || lower.starts_with("mcp_") => Self::Mcp,
            _ => Self::Unrecognized,
        }
    }
}

/// What the gate reviews for one request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Payload {
    /// The text under review.
    pub content: String,
    /// Rule context derived from the operation.
    pub context: ToolContext,
    /// Target path for file operations; empty otherwise.
    pub file_path: String,
}

fn string_field(input: &Value, key: &str) -> Option<String> {
    input.get(key).and_then(Value::as_str).map(str::to_owned)
}

/// Pull the reviewable payload out of `tool_input` for `tool_name`.
///
/// Returns `None` when the tool has nothing to review, including when
/// a recognized tool is missing its expected field.
pub fn extract_payload(tool_name: &str, tool_input: &Value) -> Option<Payload> {
    let file_path = string_field(tool_input, "file_path").unwrap_or_default();
    match ToolOperation::from_tool_name(tool_name) {
        ToolOperation::Write => Some(Payload {
            content: string_field(tool_input, "content")?,
            context: ToolContext::FileWrite,
            file_path,
        }),
        ToolOperation::Edit => Some(Payload {
            content: string_field(tool_input, "new_string")?,
            context: ToolContext::FileWrite,
            file_path,
        }),
        ToolOperation::Bash => Some(Payload {
            content: string_field(tool_input, "command")?,
            context: ToolContext::Shell,
            file_path: String::new(),
        }),
        ToolOperation::WebAccess => {
            let content =
                string_field(tool_input, "url").or_else(|| string_field(tool_input, "query"))?;
            Some(Payload {
                content,
                context: ToolContext::Web,
                file_path: String::new(),
            })
        }
        ToolOperation::Mcp => {
            let Value::Object(map) = tool_input else {
                return None;
            };
            let joined: Vec<&str> = map.values().filter_map(Value::as_str).collect();
            if joined.is_empty() {
                return None;
            }
            Some(Payload {
                content: joined.join("\n"),
                context: ToolContext::Integration,
                file_path: String::new(),
            })
        }
        ToolOperation::Unrecognized => None,
    }
}

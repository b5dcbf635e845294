//! The closed set of operation contexts rules can apply to.

use serde::{Deserialize, Serialize};

/// The context a piece of content was produced under.
///
/// Rules are scoped to a context: a shell-command rule never fires against
/// a file write, regardless of content. The set is closed — unrecognized
/// tool kinds map to [`ToolContext::Unknown`], which no catalog rule
/// targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolContext {
    /// File create/edit body.
    FileWrite,
    /// Shell command string.
    #[serde(rename = "shell-command")]
    Shell,
    /// URL or search query for a web fetch.
    Web,
    /// Concatenated string fields of a free-form integration call.
    Integration,
    /// No extraction contract exists for the operation kind.
    Unknown,
}

impl ToolContext {
    /// Stable wire/log label for this context.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FileWrite => "file-write",
            Self::Shell => "shell-command",
            Self::Web => "web",
            Self::Integration => "integration",
            Self::Unknown => "unknown",
        }
    }
}

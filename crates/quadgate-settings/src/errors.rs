//! Settings error types.

use std::path::PathBuf;

/// Errors produced while reading or parsing a settings layer.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// A settings file exists but could not be read.
    #[error("failed to read settings file {path}: {source}")]
    Read {
        /// Path of the unreadable file.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// A settings file was read but is not valid JSON.
    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        /// Path of the malformed file.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// The merged settings document does not deserialize into the schema.
    #[error("settings document has an invalid shape: {0}")]
    Shape(#[from] serde_json::Error),
}

/// Convenience alias for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;

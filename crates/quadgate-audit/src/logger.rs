//! Append-only JSONL writer.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::types::AuditRecord;

/// Errors from the underlying filesystem writes. Internal to the crate:
/// [`AuditLogger::log`] swallows them by design, since a broken audit
/// trail must not break the gate.
#[derive(Debug, thiserror::Error)]
enum AuditError {
    #[error("failed to create audit directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to append to audit log {path}: {source}")]
    Append {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to serialize audit record: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Environment variable consulted for an explicit session id.
pub const SESSION_ID_ENV: &str = "QUADGATE_SESSION_ID";

/// Resolve the session id for this request.
///
/// Priority: the id supplied on the request, then the
/// `QUADGATE_SESSION_ID` environment variable, then a fresh
/// `session-<uuid>` generated for this request alone.
pub fn resolve_session_id(explicit: Option<&str>) -> String {
    if let Some(id) = explicit {
        if !id.is_empty() {
            return id.to_owned();
        }
    }
    if let Some(id) = std::env::var_os(SESSION_ID_ENV) {
        let id = id.to_string_lossy();
        if !id.is_empty() {
            return id.into_owned();
        }
    }
    format!("session-{}", uuid::Uuid::now_v7())
}

/// Default audit directory under a project root.
pub fn default_audit_dir(project_root: &Path) -> PathBuf {
    project_root.join(".quadgate").join("audit")
}

/// Appends gate decisions to `<dir>/<session_id>.jsonl`.
///
/// All write failures are logged and swallowed: the audit trail is an
/// observability aid, never a gate dependency.
#[derive(Debug, Clone)]
pub struct AuditLogger {
    enabled: bool,
    dir: PathBuf,
    session_id: String,
}

impl AuditLogger {
    /// Create a logger writing into `dir` under `session_id`.
    pub fn new(enabled: bool, dir: PathBuf, session_id: String) -> Self {
        Self {
            enabled,
            dir,
            session_id,
        }
    }

    /// A logger that records nothing.
    pub fn disabled() -> Self {
        Self::new(false, PathBuf::new(), String::new())
    }

    /// The session id this logger stamps on its file name.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Path of the log file this logger appends to.
    pub fn log_path(&self) -> PathBuf {
        self.dir.join(format!("{}.jsonl", self.session_id))
    }

    /// Append one record. Never fails; failures are traced at warn.
    pub fn log(&self, record: &AuditRecord) {
        if !self.enabled {
            return;
        }
        if let Err(e) = self.try_log(record) {
            tracing::warn!(error = %e, "audit write failed");
        }
    }

    fn try_log(&self, record: &AuditRecord) -> Result<(), AuditError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| AuditError::CreateDir {
            path: self.dir.clone(),
            source,
        })?;
        let line = serde_json::to_string(record)?;
        let path = self.log_path();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| AuditError::Append {
                path: path.clone(),
                source,
            })?;
        writeln!(file, "{line}").map_err(|source| AuditError::Append { path, source })?;
        Ok(())
    }
}

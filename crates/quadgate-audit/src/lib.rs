//! # quadgate-audit
//!
//! Append-only JSONL audit trail for gate decisions.
//!
//! Every hook request produces one [`AuditRecord`], written as a single
//! JSON line to `<audit dir>/<session_id>.jsonl`. Approvals are logged
//! alongside blocks so the trail answers "what did the gate see" rather
//! than only "what did it reject".
//!
//! Writes never fail upward. The gate sits on the critical path of
//! every tool call, and a full disk is not a reason to stop approving
//! content.
//!
//! # Crate Position
//!
//! Depends on `quadgate-core` for the [`Violation`] type that records
//! carry. Consumed by the `quadgate` host binary.
//!
//! [`Violation`]: quadgate_core::Violation

#![deny(unsafe_code)]

pub mod logger;
pub mod types;

pub use logger::{AuditLogger, SESSION_ID_ENV, default_audit_dir, resolve_session_id};
pub use types::{AuditEvent, AuditRecord, Decision};

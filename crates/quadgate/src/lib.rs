//! # quadgate
//!
//! Hook host for the Quadgate content gate.
//!
//! The binary reads one JSON hook request from stdin, reviews the
//! content it carries, and writes one JSON response to stdout. Three
//! hook events are handled:
//!
//! | Event | Behavior |
//! |-------|----------|
//! | `PreToolUse` | Review the tool payload; deny on violations |
//! | `PostToolUse` | Review and audit, never deny |
//! | `Stop` | Sweep research documents; deny on failing claims |
//!
//! Every failure mode inside the host — unparsable input, a panicking
//! review, an elapsed time budget — resolves to an approval. The gate
//! is advisory infrastructure and must never strand the caller.
//!
//! # Crate Position
//!
//! Top of the workspace: wires `quadgate-settings`, `quadgate-engine`,
//! and `quadgate-audit` together behind the stdin/stdout protocol.

#![deny(unsafe_code)]

pub mod extract;
pub mod pipeline;
pub mod protocol;
pub mod stop;

pub use extract::{Payload, ToolOperation, extract_payload};
pub use pipeline::GateHost;
pub use protocol::{HookEvent, HookInput, HookOutput};

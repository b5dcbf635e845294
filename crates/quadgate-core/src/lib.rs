//! # quadgate-core
//!
//! Foundation types for the quadgate verification engine.
//!
//! This crate provides the shared vocabulary the other quadgate crates
//! depend on:
//!
//! - **Contexts**: [`context::ToolContext`] — the closed set of operation
//!   contexts a rule can apply to
//! - **Categories**: [`verdict::RuleCategory`] — quality, security,
//!   research-claims, with their stable cycle numbers
//! - **Violations and verdicts**: [`verdict::Violation`],
//!   [`verdict::Verdict`] — the evaluation output consumed by the host
//! - **Classification**: [`research::is_research_target`],
//!   [`research::file_extension`] — path predicates used for dispatch
//! - **Text**: [`text`] — char-boundary helpers for byte-window slicing
//!
//! ## Crate Position
//!
//! Foundation crate. No I/O, no regex. Depended on by all other quadgate
//! crates.

#![deny(unsafe_code)]

pub mod context;
pub mod research;
pub mod text;
pub mod verdict;

pub use context::ToolContext;
pub use verdict::{RuleCategory, Verdict, Violation};

//! # quadgate-engine
//!
//! The quadgate verification core: an ordered catalog of pattern rules
//! (code quality and security), a two-pass research claim verifier, and
//! the dispatch policy that merges their outputs into a single verdict.
//!
//! The engine is pure, synchronous, and stateless across calls: a fixed
//! `(content, context, policy)` triple maps deterministically to one
//! verdict. All functions are total on their input domain — malformed or
//! empty content yields an empty violation list, never an error. It is
//! safe to call concurrently without coordination; the only shared state
//! is the immutable rule catalog.
//!
//! ## Crate Position
//!
//! Decision logic only. No I/O, no configuration files, no clock. The
//! host assembles configuration and turns verdicts into protocol
//! responses.

#![deny(unsafe_code)]

pub mod catalog;
pub mod evaluator;
pub mod gate;
pub mod research;

pub use evaluator::evaluate;
pub use gate::{GatePolicy, review};
pub use research::verify_research;

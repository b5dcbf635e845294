//! # quadgate-settings
//!
//! Layered configuration for the Quadgate content gate.
//!
//! Settings come from three layers (in priority order):
//! 1. **Compiled defaults** — [`GateSettings::default()`]
//! 2. **User file** — `~/.quadgate/settings.json` (deep-merged over defaults)
//! 3. **Project file** — `<project>/.quadgate/settings.json` (highest priority)
//!
//! A missing or broken file layer degrades to nothing rather than an
//! error. The gate runs on every tool call in the host workflow, so a
//! typo in a config file must never take the gate down with it.
//!
//! # Crate Position
//!
//! Has no dependency on the engine. Consumed by the `quadgate` host
//! binary, which
//! translates [`GateSettings`] into an engine policy per request.

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{
    deep_merge, load_settings, load_settings_from, project_settings_path, user_settings_path,
};
pub use types::*;

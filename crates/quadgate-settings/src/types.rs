//! Settings type definitions.
//!
//! All types use `#[serde(rename_all = "camelCase")]` and `#[serde(default)]`
//! so partial JSON layers deserialize cleanly, with missing fields taking
//! their production default.

use std::collections::HashSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root settings type for the gate.
///
/// Loaded from `~/.quadgate/settings.json` deep-merged with
/// `<project>/.quadgate/settings.json`. Example:
///
/// ```json
/// {
///   "version": "0.1.0",
///   "disabledRules": ["no-todo"],
///   "security": { "enabled": true },
///   "hook": { "timeoutMs": 5000 }
/// }
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GateSettings {
    /// Settings schema version.
    pub version: String,
    /// Rule ids excluded from every cycle.
    pub disabled_rules: Vec<String>,
    /// Quality cycle toggle.
    pub quality: CycleToggle,
    /// Security cycle toggle.
    pub security: CycleToggle,
    /// Research claim-verification toggle.
    pub research: CycleToggle,
    /// Audit trail configuration.
    pub audit: AuditSettings,
    /// Hook host behavior.
    pub hook: HookSettings,
}

impl Default for GateSettings {
    fn default() -> Self {
        Self {
            version: "0.1.0".to_string(),
            disabled_rules: Vec::new(),
            quality: CycleToggle::default(),
            security: CycleToggle::default(),
            research: CycleToggle::default(),
            audit: AuditSettings::default(),
            hook: HookSettings::default(),
        }
    }
}

impl GateSettings {
    /// Disabled rule ids as a set for O(1) lookups during evaluation.
    pub fn disabled_set(&self) -> HashSet<String> {
        self.disabled_rules.iter().cloned().collect()
    }
}

/// On/off switch for a review cycle.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CycleToggle {
    /// Whether the cycle runs at all.
    pub enabled: bool,
}

impl Default for CycleToggle {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Audit trail configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuditSettings {
    /// Whether decisions are recorded at all.
    pub enabled: bool,
    /// Directory for the JSONL audit logs. Defaults to
    /// `<project>/.quadgate/audit` when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,
}

impl Default for AuditSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            log_dir: None,
        }
    }
}

/// Hook host behavior.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HookSettings {
    /// Review time budget in milliseconds. Reviews exceeding it
    /// fail open.
    pub timeout_ms: u64,
}

impl Default for HookSettings {
    fn default() -> Self {
        Self { timeout_ms: 5_000 }
    }
}

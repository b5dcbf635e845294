//! Layered settings loading.
//!
//! Three layers in priority order:
//! 1. Compiled defaults ([`GateSettings::default`])
//! 2. User file `~/.quadgate/settings.json`
//! 3. Project file `<project>/.quadgate/settings.json`
//!
//! Each file layer is deep-merged over the previous one. A missing file
//! contributes nothing; an unreadable or malformed file is logged and
//! skipped so a broken config can never block the gate itself.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::errors::{Result, SettingsError};
use crate::types::GateSettings;

/// Path of the user-level settings file, if a home directory is known.
pub fn user_settings_path() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| {
        PathBuf::from(home)
            .join(".quadgate")
            .join("settings.json")
    })
}

/// Path of the project-level settings file under `project_root`.
pub fn project_settings_path(project_root: &Path) -> PathBuf {
    project_root.join(".quadgate").join("settings.json")
}

/// Recursively merge `overlay` into `base`.
///
/// Objects merge key-by-key; any other value (including arrays)
/// replaces the base wholesale.
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                let merged = match base_map.remove(&key) {
                    Some(base_value) => deep_merge(base_value, overlay_value),
                    None => overlay_value,
                };
                let _ = base_map.insert(key, merged);
            }
            Value::Object(base_map)
        }
        (_, overlay) => overlay,
    }
}

fn read_layer(path: &Path) -> Result<Value> {
    let raw = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Read one layer, degrading to an empty object on any failure.
fn layer_or_empty(path: &Path) -> Value {
    if !path.exists() {
        return Value::Object(serde_json::Map::new());
    }
    match read_layer(path) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(error = %e, "skipping unreadable settings layer");
            Value::Object(serde_json::Map::new())
        }
    }
}

/// Load settings from explicit user and project file paths.
///
/// Either path may point at a missing file. The merged document must
/// still fit the schema; a type-level mismatch (e.g. a string where a
/// number belongs) is an error rather than a silent skip.
pub fn load_settings_from(user: &Path, project: &Path) -> Result<GateSettings> {
    let defaults = serde_json::to_value(GateSettings::default())?;
    let merged = deep_merge(
        deep_merge(defaults, layer_or_empty(user)),
        layer_or_empty(project),
    );
    Ok(serde_json::from_value(merged)?)
}

/// Load settings using the standard layer locations relative to
/// `project_root`.
pub fn load_settings(project_root: &Path) -> Result<GateSettings> {
    let project = project_settings_path(project_root);
    match user_settings_path() {
        Some(user) => load_settings_from(&user, &project),
        None => load_settings_from(Path::new(""), &project),
    }
}

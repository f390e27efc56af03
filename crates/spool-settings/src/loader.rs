//! Settings loading: defaults ← user file ← environment.
//!
//! The file layer is deep-merged over compiled defaults so a partial file
//! only overrides what it names. `SPOOL_*` environment variables win over
//! both. The table-name override is identifier-validated here, at load time,
//! so a bad value fails before any store is opened.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use spool_context::EstimatorPolicy;
use spool_tape::sqlite::identifier::validate_identifier;

use crate::errors::{Result, SettingsError};
use crate::types::SpoolSettings;

/// Location of the user settings file: `~/.spool/settings.json`.
#[must_use]
pub fn settings_path() -> PathBuf {
    let base = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join(".spool").join("settings.json")
}

/// Load settings from the default path with environment overrides applied.
pub fn load_settings() -> Result<SpoolSettings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from a specific file path with environment overrides.
///
/// A missing file is not an error — defaults apply. A present-but-malformed
/// file is an error: silently ignoring a user's typo would be worse.
pub fn load_settings_from_path(path: &Path) -> Result<SpoolSettings> {
    let mut value = serde_json::to_value(SpoolSettings::default())?;

    if path.exists() {
        let raw = fs::read_to_string(path)?;
        let file_value: Value = serde_json::from_str(&raw)?;
        value = deep_merge(value, file_value);
    } else {
        debug!(?path, "settings file not found, using defaults");
    }

    let mut settings: SpoolSettings = serde_json::from_value(value)?;
    apply_overrides(&mut settings, |key| std::env::var(key).ok())?;
    validate(&settings)?;
    Ok(settings)
}

/// Recursively merge `overlay` into `base`. Objects merge key-by-key;
/// any other overlay value replaces the base value outright.
#[must_use]
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

/// Apply `SPOOL_*` overrides from an arbitrary lookup.
///
/// Generic over the lookup so tests can inject values without touching the
/// process environment.
pub fn apply_overrides(
    settings: &mut SpoolSettings,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<()> {
    if let Some(path) = lookup("SPOOL_DB_PATH") {
        settings.store.path = PathBuf::from(path);
    }
    if let Some(table) = lookup("SPOOL_TAPE_TABLE") {
        settings.store.table_name = table;
    }
    if let Some(model) = lookup("SPOOL_MODEL") {
        settings.llm.model = model;
    }
    if let Some(api_key) = lookup("SPOOL_API_KEY") {
        settings.llm.api_key = Some(api_key);
    }
    if let Some(api_base) = lookup("SPOOL_API_BASE") {
        settings.llm.api_base = Some(api_base);
    }
    if let Some(raw) = lookup("SPOOL_ESTIMATOR") {
        settings.context.estimator = parse_estimator(&raw)?;
    }
    Ok(())
}

fn parse_estimator(raw: &str) -> Result<EstimatorPolicy> {
    serde_json::from_value(Value::String(raw.to_string())).map_err(|_| {
        SettingsError::InvalidValue {
            field: "SPOOL_ESTIMATOR",
            value: raw.to_string(),
        }
    })
}

fn validate(settings: &SpoolSettings) -> Result<()> {
    let _ = validate_identifier(&settings.store.table_name, "table name").map_err(|_| {
        SettingsError::InvalidValue {
            field: "store.tableName",
            value: settings.store.table_name.clone(),
        }
    })?;
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

//! Settings type definitions.
//!
//! All types use `#[serde(rename_all = "camelCase")]` for the JSON file
//! format, with `#[serde(default)]` so partial files are fine — missing
//! fields get their default value during deserialization.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use spool_context::EstimatorPolicy;

/// Default system prompt handed to the LLM alongside replayed context.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a tape-first assistant. Keep answers concise, \
     grounded in recorded facts, and maintain continuity with handoff anchors.";

/// Root settings type.
///
/// Loaded from `~/.spool/settings.json` with defaults applied for missing
/// fields and `SPOOL_*` environment variables taking highest priority.
/// There is no global instance — callers own the value and inject it.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpoolSettings {
    /// Tape store location and table.
    pub store: StoreSettings,
    /// LLM provider settings.
    pub llm: LlmSettings,
    /// Context selection settings.
    pub context: ContextSettings,
}

/// Where the tape store lives.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreSettings {
    /// SQLite database file path.
    pub path: PathBuf,
    /// Entries table name. Must match the strict identifier pattern.
    pub table_name: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        let base = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            path: base.join(".spool").join("spool.db"),
            table_name: "tape_entries".to_string(),
        }
    }
}

/// LLM provider configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LlmSettings {
    /// Model identifier, `provider:model` form.
    pub model: String,
    /// API key. `None` defers to the provider client's own resolution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Override for the provider base URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    /// System prompt prepended to every chat.
    pub system_prompt: String,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            model: "openai:gpt-4o-mini".to_string(),
            api_key: None,
            api_base: None,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }
}

/// Context selection configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContextSettings {
    /// Token estimation policy.
    pub estimator: EstimatorPolicy,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let settings = SpoolSettings::default();
        assert_eq!(settings.store.table_name, "tape_entries");
        assert!(settings.store.path.ends_with(".spool/spool.db"));
        assert_eq!(settings.llm.model, "openai:gpt-4o-mini");
        assert!(settings.llm.api_key.is_none());
        assert_eq!(settings.context.estimator, EstimatorPolicy::PreferReportedUsage);
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let settings: SpoolSettings =
            serde_json::from_str(r#"{"llm": {"model": "openai:gpt-4.1"}}"#).unwrap();
        assert_eq!(settings.llm.model, "openai:gpt-4.1");
        assert_eq!(settings.llm.system_prompt, DEFAULT_SYSTEM_PROMPT);
        assert_eq!(settings.store.table_name, "tape_entries");
    }

    #[test]
    fn estimator_uses_kebab_case_on_the_wire() {
        let settings: SpoolSettings =
            serde_json::from_str(r#"{"context": {"estimator": "char-heuristic"}}"#).unwrap();
        assert_eq!(settings.context.estimator, EstimatorPolicy::CharHeuristic);
    }
}

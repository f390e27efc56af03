//! Error types for settings loading.

use thiserror::Error;

/// Errors that can occur while loading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Reading the settings file failed.
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    /// The settings file or a merged value is not valid JSON for the schema.
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field holds a value the schema rejects.
    #[error("invalid value for {field}: {value:?}")]
    InvalidValue {
        /// The offending field or environment variable.
        field: &'static str,
        /// The rejected value.
        value: String,
    },
}

/// Convenience alias for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;

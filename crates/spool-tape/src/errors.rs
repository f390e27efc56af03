//! Error types for the tape store.

use thiserror::Error;

/// Result alias for tape store operations.
pub type Result<T> = std::result::Result<T, TapeStoreError>;

/// Errors raised by the tape store.
#[derive(Debug, Error)]
pub enum TapeStoreError {
    /// A table or database identifier failed the strict identifier pattern.
    /// Rejected eagerly, before any SQL is generated.
    #[error("invalid {field}: {value:?}")]
    InvalidIdentifier {
        /// Which identifier was rejected.
        field: &'static str,
        /// The offending value.
        value: String,
    },

    /// Underlying SQLite failure.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Connection pool failure.
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// Entry payload/meta could not be serialized as JSON text.
    #[error("json serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal invariant violation (poisoned lock, etc.).
    #[error("internal error: {0}")]
    Internal(String),
}

//! Strict identifier validation for generated SQL.
//!
//! Table names are interpolated into SQL text (SQLite cannot bind them), so
//! any value that does not match the identifier pattern is rejected before
//! reaching the storage layer.

use std::sync::LazyLock;

use regex::Regex;

use crate::errors::{Result, TapeStoreError};

static IDENTIFIER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern compiles"));

/// Validate `value` as a SQL identifier, naming `field` in the error.
pub fn validate_identifier<'a>(value: &'a str, field: &'static str) -> Result<&'a str> {
    if IDENTIFIER_RE.is_match(value) {
        Ok(value)
    } else {
        Err(TapeStoreError::InvalidIdentifier {
            field,
            value: value.to_string(),
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

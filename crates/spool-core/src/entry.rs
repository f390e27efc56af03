//! The [`Entry`] struct — the core persisted tape record.
//!
//! Entries are stored flat: `id` and `kind` at the top level, `payload` and
//! `meta` as opaque [`serde_json::Value`] objects. This matches the persisted
//! row shape exactly, so a round-trip through the store is lossless even for
//! payload shapes this version does not know about.
//!
//! Typed access to the payload is opt-in via [`Entry::typed_payload()`],
//! which dispatches on [`EntryKind`] and deserializes into the appropriate
//! payload struct, falling back to [`EntryPayload::Opaque`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::kind::EntryKind;
use crate::payload::EntryPayload;

/// One immutable, ordered record in a tape.
///
/// `id` is positive, unique, and strictly increasing within a tape. It is
/// assigned by the store at append time — never by the caller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Store-assigned position within the tape (1-based).
    pub id: i64,
    /// Kind discriminator.
    pub kind: EntryKind,
    /// Kind-specific data (opaque JSON object).
    #[serde(default)]
    pub payload: Value,
    /// Side information (`created_at`, `run_id`, ...). Never interpreted by
    /// selection logic except `created_at`.
    #[serde(default)]
    pub meta: Map<String, Value>,
}

impl Entry {
    /// Build an entry with an empty meta map.
    #[must_use]
    pub fn new(id: i64, kind: impl Into<EntryKind>, payload: Value) -> Self {
        Self {
            id,
            kind: kind.into(),
            payload,
            meta: Map::new(),
        }
    }

    /// Deserialize the payload into its typed form based on `kind`.
    ///
    /// Unknown kinds, and known kinds whose payload does not match the
    /// expected shape, come back as [`EntryPayload::Opaque`] — this never
    /// fails.
    #[must_use]
    pub fn typed_payload(&self) -> EntryPayload {
        EntryPayload::from_parts(&self.kind, &self.payload)
    }

    /// The `created_at` meta field, when present and a string.
    #[must_use]
    pub fn created_at(&self) -> Option<&str> {
        self.meta.get("created_at").and_then(Value::as_str)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

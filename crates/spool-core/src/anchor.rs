//! The [`Anchor`] struct — a named checkpoint derived from an `anchor` entry.
//!
//! Anchors are never stored separately: every entry of kind `anchor` is a
//! potential anchor, and the list is re-derived from the tape on each read.

use serde::{Deserialize, Serialize};

/// A named checkpoint in a tape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    /// Id of the originating `anchor` entry.
    pub entry_id: i64,
    /// Normalized name (`handoff:<slug>` or `phase:<slug>`).
    pub name: String,
    /// Display name: `state.phase` when non-blank, else the trailing
    /// `:`-segment of `name`.
    pub label: String,
    /// Checkpoint summary (empty when not recorded).
    pub summary: String,
    /// Recorded facts, trimmed, blanks dropped.
    pub facts: Vec<String>,
    /// Creation timestamp from the originating entry's meta.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

//! View-mode resolution: which anchor is active and which entries are in
//! context.

use std::fmt;

use serde::{Deserialize, Serialize};

use spool_core::{Anchor, Entry};

use crate::anchors::find_anchor_by_name;

/// Policy for selecting a context slice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewMode {
    /// The whole tape, no active anchor.
    Full,
    /// Everything after the most recent anchor.
    #[default]
    Latest,
    /// Everything after a specific named anchor.
    FromAnchor,
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Full => "full",
            Self::Latest => "latest",
            Self::FromAnchor => "from-anchor",
        };
        f.write_str(text)
    }
}

/// The suffix of `entries` strictly after the first entry whose id matches.
///
/// When `id` is not present the full list is returned unmodified — a
/// defensive fallback, this never fails.
#[must_use]
pub fn entries_after_id(entries: &[Entry], id: i64) -> &[Entry] {
    match entries.iter().position(|entry| entry.id == id) {
        Some(index) => &entries[index + 1..],
        None => entries,
    }
}

/// Resolve the active anchor and context slice for a view request.
///
/// - `Full`: no active anchor, context is everything.
/// - `Latest`: the most recent anchor (if any), context after it.
/// - `FromAnchor`: last-wins lookup of `anchor_name`; a missing or unknown
///   name falls back to the most recent anchor.
///
/// With no anchors at all, `Latest` and `FromAnchor` degrade to the full
/// list with no active anchor. The selector only computes over what it is
/// given — bootstrap appends are the caller's job.
#[must_use]
pub fn select_context<'a>(
    entries: &'a [Entry],
    anchors: &'a [Anchor],
    view_mode: ViewMode,
    anchor_name: Option<&str>,
) -> (Option<&'a Anchor>, &'a [Entry]) {
    let active = match view_mode {
        ViewMode::Full => None,
        ViewMode::Latest => anchors.last(),
        ViewMode::FromAnchor => anchor_name
            .and_then(|name| find_anchor_by_name(anchors, name))
            .or_else(|| anchors.last()),
    };
    match active {
        Some(anchor) => (Some(anchor), entries_after_id(entries, anchor.entry_id)),
        None => (None, entries),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

//! Heuristic token-cost estimation for a context slice.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use spool_core::{Entry, EntryKind};

/// Cost of an entry the character heuristic has no better guess for.
const FLAT_ENTRY_COST: u64 = 10;

/// How [`estimate_tokens`] prices a context slice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EstimatorPolicy {
    /// Character-count heuristic only.
    CharHeuristic,
    /// Trust the most recent usage figure reported by an `event` entry in
    /// the slice, falling back to the character heuristic when none exists.
    #[default]
    PreferReportedUsage,
}

/// Estimate the token cost of a context slice.
///
/// The character heuristic prices a `message` entry with string content at
/// `max(1, chars / 4)` and everything else at a flat 10 units. Under
/// [`EstimatorPolicy::PreferReportedUsage`], a usage figure reported by an
/// `event` entry wins wholesale, most recent event first. Within one event
/// the lookup order is `data.usage.input_tokens` (the shape run events
/// actually carry — input tokens are what the next call pays for), then
/// `data.usage.total_tokens`, then a bare `total_tokens` at the top level or
/// under `data`. Heuristic, not exact tokenization — the only guarantee is
/// monotonic correlation with text length.
#[must_use]
pub fn estimate_tokens(entries: &[Entry], policy: EstimatorPolicy) -> u64 {
    match policy {
        EstimatorPolicy::CharHeuristic => char_heuristic(entries),
        EstimatorPolicy::PreferReportedUsage => {
            latest_reported_total(entries).unwrap_or_else(|| char_heuristic(entries))
        }
    }
}

fn char_heuristic(entries: &[Entry]) -> u64 {
    entries.iter().map(entry_cost).sum()
}

fn entry_cost(entry: &Entry) -> u64 {
    if entry.kind == EntryKind::Message {
        if let Some(content) = entry.payload.get("content").and_then(Value::as_str) {
            return (content.chars().count() as u64 / 4).max(1);
        }
    }
    FLAT_ENTRY_COST
}

fn latest_reported_total(entries: &[Entry]) -> Option<u64> {
    entries
        .iter()
        .rev()
        .filter(|entry| entry.kind == EntryKind::Event)
        .find_map(|entry| reported_total(&entry.payload))
}

fn reported_total(payload: &Value) -> Option<u64> {
    let usage = payload.get("data").and_then(|data| data.get("usage"));
    usage
        .and_then(|usage| usage.get("input_tokens"))
        .or_else(|| usage.and_then(|usage| usage.get("total_tokens")))
        .or_else(|| payload.get("total_tokens"))
        .or_else(|| payload.get("data")?.get("total_tokens"))
        .and_then(Value::as_u64)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

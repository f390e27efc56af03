//! Anchor derivation from a tape's entries.

use serde_json::Value;

use spool_core::{Anchor, Entry, EntryKind, EntryPayload};

/// Derive the ordered anchor list from `entries`.
///
/// Iterates in id order, selecting entries of kind `anchor` and skipping any
/// whose name is blank after trimming. Missing state fields degrade to
/// defaults — a missing `phase` falls back to the trailing `:`-segment of the
/// name, missing `summary`/`facts` come back empty.
#[must_use]
pub fn extract_anchors(entries: &[Entry]) -> Vec<Anchor> {
    entries
        .iter()
        .filter(|entry| entry.kind == EntryKind::Anchor)
        .filter_map(|entry| {
            let EntryPayload::Anchor(payload) = entry.typed_payload() else {
                return None;
            };
            let name = payload.name.trim();
            if name.is_empty() {
                return None;
            }

            let state = &payload.state;
            let label = state
                .get("phase")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|phase| !phase.is_empty())
                .unwrap_or_else(|| trailing_segment(name))
                .to_string();
            let summary = state
                .get("summary")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .trim()
                .to_string();
            let facts = state
                .get("facts")
                .and_then(Value::as_array)
                .map(|facts| {
                    facts
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::trim)
                        .filter(|fact| !fact.is_empty())
                        .map(ToString::to_string)
                        .collect()
                })
                .unwrap_or_default();

            Some(Anchor {
                entry_id: entry.id,
                name: name.to_string(),
                label,
                summary,
                facts,
                created_at: entry.created_at().map(ToString::to_string),
            })
        })
        .collect()
}

/// Resolve "the anchor named X" with last-wins semantics: when duplicates
/// exist, the most recent entry shadows earlier ones.
#[must_use]
pub fn find_anchor_by_name<'a>(anchors: &'a [Anchor], name: &str) -> Option<&'a Anchor> {
    anchors.iter().rev().find(|anchor| anchor.name == name)
}

fn trailing_segment(name: &str) -> &str {
    match name.rsplit(':').next() {
        Some(segment) if !segment.is_empty() => segment,
        _ => "anchor",
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn anchor_entry(id: i64, name: &str, state: Value) -> Entry {
        Entry::new(id, "anchor", json!({"name": name, "state": state}))
    }

    #[test]
    fn extracts_in_tape_order() {
        let entries = vec![
            Entry::new(1, "message", json!({"role": "user", "content": "hi"})),
            anchor_entry(2, "handoff:design", json!({"phase": "Design"})),
            anchor_entry(4, "handoff:build", json!({})),
        ];
        let anchors = extract_anchors(&entries);
        assert_eq!(anchors.len(), 2);
        assert_eq!(anchors[0].entry_id, 2);
        assert_eq!(anchors[0].label, "Design");
        assert_eq!(anchors[1].entry_id, 4);
        // No phase: label falls back to the trailing name segment.
        assert_eq!(anchors[1].label, "build");
    }

    #[test]
    fn skips_blank_names() {
        let entries = vec![
            anchor_entry(1, "  ", json!({})),
            anchor_entry(2, "handoff:kept", json!({})),
            Entry::new(3, "anchor", json!({"state": {}})),
        ];
        let anchors = extract_anchors(&entries);
        assert_eq!(anchors.len(), 1);
        assert_eq!(anchors[0].name, "handoff:kept");
    }

    #[test]
    fn blank_phase_falls_back_to_name_segment() {
        let entries = vec![anchor_entry(1, "phase:review", json!({"phase": "  "}))];
        assert_eq!(extract_anchors(&entries)[0].label, "review");
    }

    #[test]
    fn collects_trimmed_facts_and_summary() {
        let entries = vec![anchor_entry(
            1,
            "handoff:x",
            json!({"summary": "done so far", "facts": [" a ", "", "b", 7]}),
        )];
        let anchor = &extract_anchors(&entries)[0];
        assert_eq!(anchor.summary, "done so far");
        assert_eq!(anchor.facts, vec!["a", "b"]);
    }

    #[test]
    fn name_lookup_is_last_wins() {
        let entries = vec![
            anchor_entry(1, "handoff:a", json!({})),
            anchor_entry(2, "handoff:b", json!({})),
            anchor_entry(3, "handoff:a", json!({})),
        ];
        let anchors = extract_anchors(&entries);
        assert_eq!(find_anchor_by_name(&anchors, "handoff:a").unwrap().entry_id, 3);
        assert!(find_anchor_by_name(&anchors, "handoff:missing").is_none());
    }
}

//! The [`ConversationSnapshot`] aggregate handed to UI and agent callers.

use serde::Serialize;
use serde_json::Value;

use spool_core::{Anchor, Entry, EntryKind};

/// Read-only aggregate of one view request over a tape.
///
/// Recomputed fresh on every snapshot call, never persisted, and has no
/// identity beyond the call that produced it.
#[derive(Clone, Debug, Serialize)]
pub struct ConversationSnapshot {
    /// Name of the tape this snapshot was taken from.
    pub tape_name: String,
    /// Every entry on the tape, ascending by id.
    pub entries: Vec<Entry>,
    /// Every anchor derived from `entries`, in tape order.
    pub anchors: Vec<Anchor>,
    /// The anchor the context slice is scoped to, when the view has one.
    pub active_anchor: Option<Anchor>,
    /// The resolved context slice.
    pub context_entries: Vec<Entry>,
    /// Estimated token cost of `context_entries`.
    pub estimated_tokens: u64,
}

impl ConversationSnapshot {
    /// Number of entries on the whole tape.
    #[must_use]
    pub fn total_entries(&self) -> usize {
        self.entries.len()
    }

    /// Number of entries in the resolved context slice.
    #[must_use]
    pub fn context_entry_count(&self) -> usize {
        self.context_entries.len()
    }

    /// Project `message` entries into `(role, content)` pairs for chat
    /// display. Only `user`/`assistant` messages with string content appear.
    #[must_use]
    pub fn messages(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .filter(|entry| entry.kind == EntryKind::Message)
            .filter_map(|entry| {
                let role = entry.payload.get("role").and_then(Value::as_str)?;
                if role != "user" && role != "assistant" {
                    return None;
                }
                let content = entry.payload.get("content").and_then(Value::as_str)?;
                Some((role.to_string(), content.to_string()))
            })
            .collect()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn snapshot_with_entries(entries: Vec<Entry>) -> ConversationSnapshot {
        let context_entries = entries.clone();
        ConversationSnapshot {
            tape_name: "main".to_string(),
            entries,
            anchors: Vec::new(),
            active_anchor: None,
            context_entries,
            estimated_tokens: 0,
        }
    }

    #[test]
    fn counts_reflect_slices() {
        let snapshot = ConversationSnapshot {
            tape_name: "main".to_string(),
            entries: vec![
                Entry::new(1, "message", json!({"role": "user", "content": "a"})),
                Entry::new(2, "anchor", json!({"name": "handoff:x", "state": {}})),
                Entry::new(3, "message", json!({"role": "assistant", "content": "b"})),
            ],
            anchors: Vec::new(),
            active_anchor: None,
            context_entries: vec![Entry::new(
                3,
                "message",
                json!({"role": "assistant", "content": "b"}),
            )],
            estimated_tokens: 1,
        };
        assert_eq!(snapshot.total_entries(), 3);
        assert_eq!(snapshot.context_entry_count(), 1);
    }

    #[test]
    fn messages_projects_user_and_assistant_only() {
        let snapshot = snapshot_with_entries(vec![
            Entry::new(1, "message", json!({"role": "user", "content": "hi"})),
            Entry::new(2, "event", json!({"name": "usage"})),
            Entry::new(3, "message", json!({"role": "system", "content": "ignored"})),
            Entry::new(4, "message", json!({"role": "assistant", "content": "hello"})),
            Entry::new(5, "message", json!({"role": "user", "content": ["blocks"]})),
        ]);
        assert_eq!(
            snapshot.messages(),
            vec![
                ("user".to_string(), "hi".to_string()),
                ("assistant".to_string(), "hello".to_string()),
            ]
        );
    }
}

//! Replay of tape entries into provider chat messages.
//!
//! The tape records tool activity as separate `tool_call` / `tool_result`
//! entries; providers want an assistant message carrying `tool_calls`
//! followed by one `tool`-role message per call. The pairing is positional:
//! a `tool_result` entry answers the pending calls by index, and any call
//! left unanswered is flushed with an empty-content placeholder so the
//! transcript never contains a dangling call.

use serde_json::Value;

use spool_core::{ChatMessage, Entry, EntryKind};

/// Replay `entries` into an ordered chat message list.
///
/// `message` entries pass through as-is. A `tool_call` entry becomes an
/// assistant message with `tool_calls` and opens a pending-call window; the
/// next `tool_result` entry pairs its `results` to the pending calls by
/// index. Pending calls are flushed with placeholders before the next
/// `message`/`tool_call` and at end of input. Entries with non-object
/// payloads, and `tool_call` entries without a non-empty `calls` list, are
/// skipped. Other kinds (`anchor`, `event`, ...) do not appear in chat.
#[must_use]
pub fn messages_from_entries(entries: &[Entry]) -> Vec<ChatMessage> {
    let mut messages: Vec<ChatMessage> = Vec::new();
    let mut pending_calls: Vec<Value> = Vec::new();

    for entry in entries {
        if !entry.payload.is_object() {
            continue;
        }
        match entry.kind {
            EntryKind::Message => {
                flush_pending(&mut messages, &mut pending_calls);
                if let Ok(message) = serde_json::from_value(entry.payload.clone()) {
                    messages.push(message);
                }
            }
            EntryKind::ToolCall => {
                flush_pending(&mut messages, &mut pending_calls);
                let calls: Vec<Value> = entry
                    .payload
                    .get("calls")
                    .and_then(Value::as_array)
                    .map(|calls| calls.iter().filter(|call| call.is_object()).cloned().collect())
                    .unwrap_or_default();
                if calls.is_empty() {
                    continue;
                }
                messages.push(ChatMessage {
                    role: "assistant".to_string(),
                    content: Value::String(String::new()),
                    name: None,
                    tool_call_id: None,
                    tool_calls: Some(calls.clone()),
                });
                pending_calls = calls;
            }
            EntryKind::ToolResult => {
                let results = entry
                    .payload
                    .get("results")
                    .and_then(Value::as_array)
                    .cloned()
                    .unwrap_or_default();
                for (index, call) in pending_calls.drain(..).enumerate() {
                    let content = results.get(index).map(render_result).unwrap_or_default();
                    messages.push(tool_message(&call, content));
                }
            }
            _ => {}
        }
    }
    flush_pending(&mut messages, &mut pending_calls);

    messages
}

fn flush_pending(messages: &mut Vec<ChatMessage>, pending_calls: &mut Vec<Value>) {
    for call in pending_calls.drain(..) {
        messages.push(tool_message(&call, String::new()));
    }
}

fn tool_message(call: &Value, content: String) -> ChatMessage {
    let call_id = call
        .get("id")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .map(ToString::to_string);
    let tool_name = call
        .get("function")
        .and_then(|function| function.get("name"))
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .map(ToString::to_string);
    ChatMessage {
        role: "tool".to_string(),
        content: Value::String(content),
        name: tool_name,
        tool_call_id: call_id,
        tool_calls: None,
    }
}

/// A string result passes through verbatim; anything else is rendered as
/// compact JSON text.
fn render_result(result: &Value) -> String {
    match result {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn call(id: &str, name: &str) -> Value {
        json!({"id": id, "type": "function", "function": {"name": name, "arguments": "{}"}})
    }

    #[test]
    fn plain_messages_pass_through() {
        let entries = vec![
            Entry::new(1, "message", json!({"role": "user", "content": "hi"})),
            Entry::new(2, "message", json!({"role": "assistant", "content": "hello"})),
        ];
        let messages = messages_from_entries(&entries);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "user");
        assert_eq!(messages[1].content_text(), Some("hello"));
    }

    #[test]
    fn tool_results_pair_by_index() {
        let entries = vec![
            Entry::new(1, "tool_call", json!({"calls": [call("c1", "read"), call("c2", "grep")]})),
            Entry::new(2, "tool_result", json!({"results": ["first", {"lines": 3}]})),
        ];
        let messages = messages_from_entries(&entries);
        assert_eq!(messages.len(), 3);

        assert_eq!(messages[0].role, "assistant");
        assert_eq!(messages[0].tool_calls.as_ref().unwrap().len(), 2);

        assert_eq!(messages[1].role, "tool");
        assert_eq!(messages[1].tool_call_id.as_deref(), Some("c1"));
        assert_eq!(messages[1].name.as_deref(), Some("read"));
        assert_eq!(messages[1].content_text(), Some("first"));

        // Non-string result renders as compact JSON.
        assert_eq!(messages[2].tool_call_id.as_deref(), Some("c2"));
        assert_eq!(messages[2].content_text(), Some(r#"{"lines":3}"#));
    }

    #[test]
    fn missing_results_become_empty_placeholders() {
        let entries = vec![
            Entry::new(1, "tool_call", json!({"calls": [call("c1", "read"), call("c2", "grep")]})),
            Entry::new(2, "tool_result", json!({"results": ["only one"]})),
        ];
        let messages = messages_from_entries(&entries);
        assert_eq!(messages[2].content_text(), Some(""));
    }

    #[test]
    fn dangling_calls_flushed_before_next_message() {
        let entries = vec![
            Entry::new(1, "tool_call", json!({"calls": [call("c1", "read")]})),
            Entry::new(2, "message", json!({"role": "user", "content": "never mind"})),
        ];
        let messages = messages_from_entries(&entries);
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].role, "tool");
        assert_eq!(messages[1].content_text(), Some(""));
        assert_eq!(messages[2].role, "user");
    }

    #[test]
    fn dangling_calls_flushed_at_end_of_input() {
        let entries = vec![Entry::new(1, "tool_call", json!({"calls": [call("c1", "read")]}))];
        let messages = messages_from_entries(&entries);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].role, "tool");
    }

    #[test]
    fn malformed_tool_call_payloads_skipped() {
        let entries = vec![
            Entry::new(1, "tool_call", json!({"calls": "not a list"})),
            Entry::new(2, "tool_call", json!({"calls": []})),
            Entry::new(3, "anchor", json!({"name": "handoff:x", "state": {}})),
            Entry::new(4, "message", json!({"role": "user", "content": "still here"})),
        ];
        let messages = messages_from_entries(&entries);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, "user");
    }

    #[test]
    fn orphan_tool_result_is_ignored() {
        let entries = vec![Entry::new(1, "tool_result", json!({"results": ["stray"]}))];
        assert!(messages_from_entries(&entries).is_empty());
    }
}

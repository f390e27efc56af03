//! Typed payload structs for each entry kind.
//!
//! Payloads live in the store as opaque JSON; these types give validated,
//! compile-time-safe access at the consumption boundary. Shapes are lenient —
//! extra fields are ignored, optional fields degrade to defaults — because
//! tapes written by other variants of the system must stay readable.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::kind::EntryKind;

/// Payload for `message` entries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MessagePayload {
    /// Message role (`user`, `assistant`, `system`, `tool`).
    pub role: String,
    /// Message content — a plain string in the common case, but arbitrary
    /// JSON (content blocks) is preserved as-is.
    #[serde(default)]
    pub content: Value,
}

impl MessagePayload {
    /// The content as text, when it is a plain string.
    #[must_use]
    pub fn content_text(&self) -> Option<&str> {
        self.content.as_str()
    }
}

/// Payload for `anchor` entries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnchorPayload {
    /// Anchor name (`handoff:<slug>` or `phase:<slug>`).
    pub name: String,
    /// Checkpoint state: `phase`, `summary`, `facts` when recorded.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub state: Value,
}

/// Payload for `event` entries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventPayload {
    /// Event name.
    #[serde(default)]
    pub name: String,
    /// Event data, kept opaque. Run events carry usage figures under
    /// `data.usage` (`input_tokens`, `output_tokens`, `total_tokens`).
    #[serde(default)]
    pub data: Value,
}

/// Payload for `system` entries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SystemPayload {
    /// System notice text.
    #[serde(default)]
    pub content: String,
}

/// Payload for `error` entries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorPayload {
    /// Error category tag.
    #[serde(default)]
    pub kind: String,
    /// Human-readable message.
    #[serde(default)]
    pub message: String,
    /// Structured details.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub details: Value,
}

/// Payload for `tool_call` entries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToolCallPayload {
    /// Provider-shaped tool call objects (`{id, function: {name, arguments}}`).
    #[serde(default)]
    pub calls: Vec<Value>,
}

/// Payload for `tool_result` entries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToolResultPayload {
    /// Results positionally paired with the preceding tool call batch.
    #[serde(default)]
    pub results: Vec<Value>,
}

/// Typed view of an entry payload, dispatched on [`EntryKind`].
#[derive(Clone, Debug, PartialEq)]
pub enum EntryPayload {
    /// `message` payload.
    Message(MessagePayload),
    /// `anchor` payload.
    Anchor(AnchorPayload),
    /// `event` payload.
    Event(EventPayload),
    /// `system` payload.
    System(SystemPayload),
    /// `error` payload.
    Error(ErrorPayload),
    /// `tool_call` payload.
    ToolCall(ToolCallPayload),
    /// `tool_result` payload.
    ToolResult(ToolResultPayload),
    /// Unknown kind, or a known kind whose payload did not match its shape.
    Opaque(Value),
}

impl EntryPayload {
    /// Dispatch a raw payload on its kind.
    #[must_use]
    pub fn from_parts(kind: &EntryKind, payload: &Value) -> Self {
        fn parse<T: serde::de::DeserializeOwned>(payload: &Value) -> Option<T> {
            serde_json::from_value(payload.clone()).ok()
        }

        let typed = match kind {
            EntryKind::Message => parse(payload).map(Self::Message),
            EntryKind::Anchor => parse(payload).map(Self::Anchor),
            EntryKind::Event => parse(payload).map(Self::Event),
            EntryKind::System => parse(payload).map(Self::System),
            EntryKind::Error => parse(payload).map(Self::Error),
            EntryKind::ToolCall => parse(payload).map(Self::ToolCall),
            EntryKind::ToolResult => parse(payload).map(Self::ToolResult),
            EntryKind::Other(_) => None,
        };
        typed.unwrap_or_else(|| Self::Opaque(payload.clone()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

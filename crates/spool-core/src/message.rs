//! The [`ChatMessage`] struct — the role/content shape handed to an LLM.
//!
//! This is the wire shape of one conversational turn after replaying a tape:
//! plain messages pass through, tool calls become assistant messages with a
//! `tool_calls` list, and tool results become `tool`-role messages.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One chat message in provider wire format.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message role (`system`, `user`, `assistant`, `tool`).
    pub role: String,
    /// Message content. A plain string in the common case; content-block
    /// arrays are preserved as-is.
    #[serde(default)]
    pub content: Value,
    /// Tool name (`tool`-role messages only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Id of the tool call this message answers (`tool`-role messages only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
    /// Tool calls requested by the assistant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<Value>>,
}

impl ChatMessage {
    /// A plain text message with the given role.
    #[must_use]
    pub fn text(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: Value::String(content.into()),
            name: None,
            tool_call_id: None,
            tool_calls: None,
        }
    }

    /// A `system` message.
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self::text("system", content)
    }

    /// A `user` message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::text("user", content)
    }

    /// An `assistant` message.
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::text("assistant", content)
    }

    /// The content as text, when it is a plain string.
    #[must_use]
    pub fn content_text(&self) -> Option<&str> {
        self.content.as_str()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

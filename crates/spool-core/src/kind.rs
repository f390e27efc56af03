//! The [`EntryKind`] discriminator.
//!
//! Kinds are open-ended on the wire: consumers tolerate kind strings they do
//! not recognize, so unknown values round-trip through [`EntryKind::Other`]
//! instead of failing deserialization.

use serde::{Deserialize, Serialize};

/// Kind discriminator for a tape entry.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntryKind {
    /// A chat message (`{role, content}` payload).
    Message,
    /// A named checkpoint (`{name, state}` payload).
    Anchor,
    /// An application event (`{name, data}` payload).
    Event,
    /// A system notice (`{content}` payload).
    System,
    /// An error record (`{kind, message, details}` payload).
    Error,
    /// Tool invocations requested by the model (`{calls}` payload).
    ToolCall,
    /// Results paired with a preceding tool call (`{results}` payload).
    ToolResult,
    /// Any kind string this version does not recognize.
    Other(String),
}

impl EntryKind {
    /// The canonical wire string for this kind.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Message => "message",
            Self::Anchor => "anchor",
            Self::Event => "event",
            Self::System => "system",
            Self::Error => "error",
            Self::ToolCall => "tool_call",
            Self::ToolResult => "tool_result",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for EntryKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "message" => Self::Message,
            "anchor" => Self::Anchor,
            "event" => Self::Event,
            "system" => Self::System,
            "error" => Self::Error,
            "tool_call" => Self::ToolCall,
            "tool_result" => Self::ToolResult,
            _ => Self::Other(s),
        }
    }
}

impl From<&str> for EntryKind {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<EntryKind> for String {
    fn from(kind: EntryKind) -> Self {
        kind.as_str().to_string()
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_kinds_round_trip() {
        for raw in [
            "message",
            "anchor",
            "event",
            "system",
            "error",
            "tool_call",
            "tool_result",
        ] {
            let kind = EntryKind::from(raw);
            assert!(!matches!(kind, EntryKind::Other(_)), "{raw} parsed as Other");
            assert_eq!(kind.as_str(), raw);
        }
    }

    #[test]
    fn unknown_kind_is_tolerated() {
        let kind = EntryKind::from("checkpoint_v2");
        assert_eq!(kind, EntryKind::Other("checkpoint_v2".into()));
        assert_eq!(kind.as_str(), "checkpoint_v2");
    }

    #[test]
    fn serde_uses_wire_strings() {
        let json = serde_json::to_value(EntryKind::ToolCall).unwrap();
        assert_eq!(json, serde_json::json!("tool_call"));
        let back: EntryKind = serde_json::from_value(serde_json::json!("anchor")).unwrap();
        assert_eq!(back, EntryKind::Anchor);
    }
}

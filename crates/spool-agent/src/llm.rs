//! The LLM seam.
//!
//! The agent treats the model as an opaque function from a chat message list
//! to either a reply string or a structured error. Implementations live with
//! the caller (HTTP provider clients, test fakes); the agent only depends on
//! this trait.

use async_trait::async_trait;
use thiserror::Error;

use spool_core::ChatMessage;

/// Failure reported by an LLM call.
///
/// Deliberately minimal: the agent surfaces the message inline to the user
/// rather than branching on failure categories.
#[derive(Clone, Debug, Error)]
#[error("{message}")]
pub struct LlmError {
    /// Human-readable description of the failure.
    pub message: String,
}

impl LlmError {
    /// Build an error from any displayable message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// An opaque chat completion provider.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Produce a reply for the given message list (system prompt and
    /// conversation context included).
    async fn chat(&self, messages: Vec<ChatMessage>) -> Result<String, LlmError>;
}

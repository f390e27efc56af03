//! Error types for agent operations.

use thiserror::Error;

/// Errors that can occur in agent operations.
#[derive(Debug, Error)]
pub enum AgentError {
    /// A handoff was requested with a blank name.
    #[error("anchor name cannot be empty")]
    EmptyAnchorName,

    /// The tape store failed.
    #[error(transparent)]
    Store(#[from] spool_tape::TapeStoreError),
}

/// Convenience alias for agent operations.
pub type Result<T> = std::result::Result<T, AgentError>;

//! # spool-agent
//!
//! Tape-backed chat orchestration: the [`TapeAgent`] reads a tape, scopes
//! context to an anchor, invokes an injected [`LlmClient`], and appends the
//! resulting turns back onto the tape.
//!
//! All collaborators are dependency-injected — there is no global store or
//! client. Callers build a [`spool_tape::TapeStore`], an `LlmClient`
//! implementation, and an [`AgentConfig`] (usually via
//! [`AgentConfig::from_settings`]) and hand them to [`TapeAgent::new`].

#![deny(unsafe_code)]

pub mod agent;
pub mod errors;
pub mod llm;

pub use agent::{AUTO_BOOTSTRAP_ANCHOR, AgentConfig, TapeAgent, normalize_anchor_name};
pub use errors::{AgentError, Result};
pub use llm::{LlmClient, LlmError};

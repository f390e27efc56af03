//! # spool-core
//!
//! Foundation types for the Spool tape engine.
//!
//! This crate provides the shared vocabulary that all other Spool crates
//! depend on:
//!
//! - **Entries**: [`Entry`] — one immutable, ordered record in a tape —
//!   and [`EntryKind`], the open-ended kind discriminator.
//! - **Payloads**: [`EntryPayload`] typed payload access via
//!   [`Entry::typed_payload()`], with an opaque fallback for unknown shapes.
//! - **Anchors**: [`Anchor`] — a named checkpoint derived from `anchor`
//!   entries, used to scope context windows.
//! - **Chat messages**: [`ChatMessage`] — the role/content shape handed to
//!   an LLM provider.
//!
//! ## Crate Position
//!
//! Foundation crate. Depended on by all other spool crates.

#![deny(unsafe_code)]

pub mod anchor;
pub mod entry;
pub mod kind;
pub mod message;
pub mod payload;

pub use anchor::Anchor;
pub use entry::Entry;
pub use kind::EntryKind;
pub use message::ChatMessage;
pub use payload::{
    AnchorPayload, EntryPayload, ErrorPayload, EventPayload, MessagePayload, SystemPayload,
    ToolCallPayload, ToolResultPayload,
};

//! Pure context selection over tape entries.
//!
//! Everything in this crate is a side-effect-free computation over a borrowed
//! entry list: deriving anchors, resolving a view mode to a context slice,
//! estimating token cost, and replaying entries into chat messages. Nothing
//! here touches storage or the network — the store hands in entries, this
//! crate hands back a [`ConversationSnapshot`].

#![deny(unsafe_code)]

pub mod anchors;
pub mod estimate;
pub mod replay;
pub mod select;
pub mod snapshot;

pub use anchors::{extract_anchors, find_anchor_by_name};
pub use estimate::{EstimatorPolicy, estimate_tokens};
pub use replay::messages_from_entries;
pub use select::{ViewMode, entries_after_id, select_context};
pub use snapshot::ConversationSnapshot;

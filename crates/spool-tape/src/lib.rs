//! # spool-tape
//!
//! Durable, per-tape, append-only entry storage over SQLite.
//!
//! The [`TapeStore`] owns the persisted entry sequence for every tape:
//! `append` assigns the next id and inserts atomically, `read` returns the
//! full ascending sequence (or `None` for a tape never written), and the
//! auxiliary operations (`reset`, `list_tapes`, `fork`, `merge`, `archive`)
//! cover branching and compaction. All writes run inside transactions and
//! are serialized per tape, so no two entries in the same tape ever receive
//! the same id.

#![deny(unsafe_code)]

pub mod errors;
pub mod sqlite;
pub mod store;

pub use errors::{Result, TapeStoreError};
pub use store::tape_store::{ArchiveRef, TapeStore};

//! High-level store API.

pub mod coerce;
pub mod tape_store;

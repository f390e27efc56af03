//! SQLite plumbing: connection pool, identifier validation, schema.

pub mod connection;
pub mod identifier;
pub mod schema;

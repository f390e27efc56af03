//! Connection pool setup.
//!
//! Every pooled connection gets WAL mode, a busy timeout, and foreign keys
//! on open, so concurrent readers never block on a writer beyond SQLite's
//! normal consistency rules.

use std::path::Path;

use r2d2_sqlite::SqliteConnectionManager;

use crate::errors::Result;

/// Pool of SQLite connections.
pub type ConnectionPool = r2d2::Pool<SqliteConnectionManager>;

/// One checked-out connection.
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Maximum pooled connections. Writers are serialized in-process anyway;
/// the pool mostly serves concurrent readers.
const MAX_POOL_SIZE: u32 = 8;

/// Open a connection pool for the database at `path`.
pub fn open_pool(path: &Path) -> Result<ConnectionPool> {
    let manager = SqliteConnectionManager::file(path).with_init(|conn| {
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA busy_timeout = 5000;
             PRAGMA foreign_keys = ON;",
        )
    });
    let pool = r2d2::Pool::builder().max_size(MAX_POOL_SIZE).build(manager)?;
    Ok(pool)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

//! Schema bootstrap for the entries table.
//!
//! One table holds every tape: rows are keyed by `(tape_name, entry_id)`
//! with a uniqueness constraint, plus an index on `(tape_name, created_at)`
//! for time-scoped scans. The table name is caller-configurable and must be
//! identifier-validated before it reaches this module.

use rusqlite::Connection;

use crate::errors::Result;

/// Create the entries table and its index if they do not exist.
pub fn ensure_schema(conn: &Connection, table: &str) -> Result<()> {
    conn.execute_batch(&format!(
        "CREATE TABLE IF NOT EXISTS {table} (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            tape_name TEXT NOT NULL,
            entry_id INTEGER NOT NULL,
            kind TEXT NOT NULL,
            payload_json TEXT NOT NULL,
            meta_json TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            UNIQUE (tape_name, entry_id)
        );
        CREATE INDEX IF NOT EXISTS idx_{table}_tape_created
            ON {table} (tape_name, created_at);"
    ))?;
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::params;

    #[test]
    fn schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn, "tape_entries").unwrap();
        ensure_schema(&conn, "tape_entries").unwrap();
    }

    #[test]
    fn duplicate_entry_id_violates_uniqueness() {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn, "tape_entries").unwrap();

        let insert = "INSERT INTO tape_entries (tape_name, entry_id, kind, payload_json, meta_json)
                      VALUES (?1, ?2, 'event', '{}', '{}')";
        let _ = conn.execute(insert, params!["t", 1]).unwrap();
        assert!(conn.execute(insert, params!["t", 1]).is_err());
        // Same id on a different tape is fine.
        let _ = conn.execute(insert, params!["u", 1]).unwrap();
    }

    #[test]
    fn created_at_defaults_to_utc_timestamp() {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn, "tape_entries").unwrap();
        let _ = conn
            .execute(
                "INSERT INTO tape_entries (tape_name, entry_id, kind, payload_json, meta_json)
                 VALUES ('t', 1, 'event', '{}', '{}')",
                [],
            )
            .unwrap();
        let created: String = conn
            .query_row("SELECT created_at FROM tape_entries", [], |row| row.get(0))
            .unwrap();
        assert!(created.ends_with('Z'));
    }
}

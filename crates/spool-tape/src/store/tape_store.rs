//! High-level transactional [`TapeStore`] API.
//!
//! Every write method runs inside a single SQLite transaction — callers
//! never observe partial state, and a failure mid-transaction leaves no
//! partial id allocation behind.
//!
//! INVARIANT: tape writes are serialized per-tape via in-process mutex locks
//! (`with_tape_write_lock`). Cross-tape mutations (`fork`, `merge`,
//! `archive`) use a separate global lock. SQLite `UNIQUE(tape_name,
//! entry_id)` enforces id uniqueness at the DB level.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;

use rusqlite::params;
use serde_json::Value;
use tracing::{debug, instrument};
use uuid::Uuid;

use spool_core::{Entry, EntryKind};

use crate::errors::{Result, TapeStoreError};
use crate::sqlite::connection::{ConnectionPool, PooledConnection, open_pool};
use crate::sqlite::identifier::validate_identifier;
use crate::sqlite::schema::ensure_schema;
use crate::store::coerce;

/// Separates a source tape name from the random fork suffix.
const FORK_SUFFIX_DELIMITER: &str = "__";

/// Marks a tape renamed by `archive`.
const ARCHIVE_MARKER: &str = "::archived::";

/// Locator returned by a successful [`TapeStore::archive`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArchiveRef {
    /// The tape name that was archived.
    pub tape: String,
    /// The name the entries now live under.
    pub archived_name: String,
    /// Archive timestamp (`YYYYMMDDTHHMMSSZ`).
    pub archived_at: String,
}

/// SQLite-backed tape store.
///
/// One table holds every tape; entries are addressed by
/// `(tape_name, entry_id)` with ids assigned at append time.
#[derive(Debug)]
pub struct TapeStore {
    pool: ConnectionPool,
    table: String,
    global_write_lock: Mutex<()>,
    tape_write_locks: Mutex<HashMap<String, Weak<Mutex<()>>>>,
    /// First entry id that is "new since fork", per fork tape. In-process
    /// only: a merge in a different process replays from id 1.
    fork_watermarks: Mutex<HashMap<String, i64>>,
}

impl TapeStore {
    const SQLITE_BUSY_MAX_RETRIES: u32 = 32;

    /// Open (or create) the store at `path` using the given table name.
    ///
    /// The table name is validated against the strict identifier pattern
    /// before any SQL is generated.
    pub fn open(path: &Path, table: &str) -> Result<Self> {
        let table = validate_identifier(table, "table name")?.to_string();
        let pool = open_pool(path)?;
        let conn = pool.get()?;
        ensure_schema(&conn, &table)?;
        drop(conn);
        Ok(Self {
            pool,
            table,
            global_write_lock: Mutex::new(()),
            tape_write_locks: Mutex::new(HashMap::new()),
            fork_watermarks: Mutex::new(HashMap::new()),
        })
    }

    /// The validated table name this store writes to.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    fn conn(&self) -> Result<PooledConnection> {
        Ok(self.pool.get()?)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Write serialization
    // ─────────────────────────────────────────────────────────────────────

    fn lock_global_write(&self) -> Result<MutexGuard<'_, ()>> {
        self.global_write_lock
            .lock()
            .map_err(|_| TapeStoreError::Internal("global write lock poisoned".into()))
    }

    fn acquire_tape_write_lock(&self, tape: &str) -> Result<Arc<Mutex<()>>> {
        let mut locks = self
            .tape_write_locks
            .lock()
            .map_err(|_| TapeStoreError::Internal("tape lock map poisoned".into()))?;

        // Opportunistically prune dead weak refs when the map grows.
        if locks.len() > 128 {
            locks.retain(|_, weak| weak.strong_count() > 0);
        }

        if let Some(existing) = locks.get(tape).and_then(Weak::upgrade) {
            return Ok(existing);
        }

        let lock = Arc::new(Mutex::new(()));
        let _ = locks.insert(tape.to_string(), Arc::downgrade(&lock));
        Ok(lock)
    }

    fn with_tape_write_lock<T>(&self, tape: &str, f: impl FnMut() -> Result<T>) -> Result<T> {
        let tape_lock = self.acquire_tape_write_lock(tape)?;
        let _guard = tape_lock
            .lock()
            .map_err(|_| TapeStoreError::Internal("tape write lock poisoned".into()))?;
        self.retry_on_sqlite_busy(f)
    }

    fn with_global_write_lock<T>(&self, f: impl FnMut() -> Result<T>) -> Result<T> {
        let _guard = self.lock_global_write()?;
        self.retry_on_sqlite_busy(f)
    }

    /// Retry an operation on SQLite BUSY/LOCKED with linear backoff + jitter.
    #[allow(clippy::unused_self)]
    fn retry_on_sqlite_busy<T>(&self, mut f: impl FnMut() -> Result<T>) -> Result<T> {
        let mut attempts = 0;

        loop {
            match f() {
                Ok(value) => return Ok(value),
                Err(err)
                    if Self::is_sqlite_busy_or_locked(&err)
                        && attempts < Self::SQLITE_BUSY_MAX_RETRIES =>
                {
                    attempts += 1;
                    let base_ms = u64::from(attempts).saturating_mul(10).min(500);
                    let jitter_range = base_ms / 4;
                    let jitter = if jitter_range > 0 {
                        rand::random::<u64>() % (jitter_range * 2 + 1)
                    } else {
                        0
                    };
                    let backoff_ms = base_ms.saturating_sub(jitter_range) + jitter;
                    std::thread::sleep(Duration::from_millis(backoff_ms));
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn is_sqlite_busy_or_locked(err: &TapeStoreError) -> bool {
        match err {
            TapeStoreError::Sqlite(rusqlite::Error::SqliteFailure(code, _)) => {
                matches!(
                    code.code,
                    rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked
                )
            }
            _ => false,
        }
    }

    fn remove_fork_watermark(&self, tape: &str) -> Result<()> {
        let mut watermarks = self
            .fork_watermarks
            .lock()
            .map_err(|_| TapeStoreError::Internal("fork watermark map poisoned".into()))?;
        let _ = watermarks.remove(tape);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Core operations
    // ─────────────────────────────────────────────────────────────────────

    /// Append one entry to `tape`, assigning the next id.
    ///
    /// Ids start at 1 and are gapless in append order. `payload` and `meta`
    /// are coerced to JSON objects before storage. The returned [`Entry`]
    /// carries the assigned id and a `created_at` meta field.
    #[instrument(skip(self, payload, meta), fields(tape, kind = %kind))]
    pub fn append(
        &self,
        tape: &str,
        kind: EntryKind,
        payload: Value,
        meta: Value,
    ) -> Result<Entry> {
        self.with_tape_write_lock(tape, || {
            self.append_inner(tape, &kind, payload.clone(), meta.clone())
        })
    }

    /// Inner append without acquiring the write lock.
    fn append_inner(
        &self,
        tape: &str,
        kind: &EntryKind,
        payload: Value,
        meta: Value,
    ) -> Result<Entry> {
        let conn = self.conn()?;
        let tx = conn.unchecked_transaction()?;

        let next_id: i64 = tx.query_row(
            &format!(
                "SELECT COALESCE(MAX(entry_id), 0) + 1 FROM {} WHERE tape_name = ?1",
                self.table
            ),
            params![tape],
            |row| row.get(0),
        )?;

        let payload_obj = coerce::to_object(payload);
        let mut meta_obj = coerce::to_object(meta);
        let created_at = chrono::Utc::now().to_rfc3339();
        let _ = meta_obj
            .entry("created_at".to_string())
            .or_insert_with(|| Value::String(created_at.clone()));

        let payload_json = serde_json::to_string(&payload_obj)?;
        let meta_json = serde_json::to_string(&meta_obj)?;

        let _ = tx.execute(
            &format!(
                "INSERT INTO {} (tape_name, entry_id, kind, payload_json, meta_json, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                self.table
            ),
            params![tape, next_id, kind.as_str(), payload_json, meta_json, created_at],
        )?;

        tx.commit()?;

        debug!(tape, entry_id = next_id, "entry appended");

        Ok(Entry {
            id: next_id,
            kind: kind.clone(),
            payload: Value::Object(payload_obj),
            meta: meta_obj,
        })
    }

    /// Read all entries of `tape` in ascending id order.
    ///
    /// Returns `None` when the tape has never been written (zero rows) —
    /// distinct from a tape that exists but is empty after filtering.
    /// Malformed stored JSON degrades to an empty mapping per field, and the
    /// `created_at` column is folded into `meta` when absent there.
    pub fn read(&self, tape: &str) -> Result<Option<Vec<Entry>>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT entry_id, kind, payload_json, meta_json, created_at
             FROM {} WHERE tape_name = ?1 ORDER BY entry_id ASC",
            self.table
        ))?;

        let rows = stmt
            .query_map(params![tape], |row| {
                let entry_id: i64 = row.get(0)?;
                let kind: String = row.get(1)?;
                let payload_json: String = row.get(2)?;
                let meta_json: String = row.get(3)?;
                let created_at: String = row.get(4)?;
                Ok((entry_id, kind, payload_json, meta_json, created_at))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        if rows.is_empty() {
            return Ok(None);
        }

        let entries = rows
            .into_iter()
            .map(|(entry_id, kind, payload_json, meta_json, created_at)| {
                let payload = coerce::safe_load_json(&payload_json);
                let mut meta = coerce::safe_load_json(&meta_json);
                let _ = meta
                    .entry("created_at".to_string())
                    .or_insert_with(|| Value::String(created_at));
                Entry {
                    id: entry_id,
                    kind: EntryKind::from(kind),
                    payload: Value::Object(payload),
                    meta,
                }
            })
            .collect();

        Ok(Some(entries))
    }

    /// Delete all entries of `tape`. Ids restart at 1 on the next append.
    #[instrument(skip(self), fields(tape))]
    pub fn reset(&self, tape: &str) -> Result<()> {
        self.with_tape_write_lock(tape, || {
            let conn = self.conn()?;
            let deleted = conn.execute(
                &format!("DELETE FROM {} WHERE tape_name = ?1", self.table),
                params![tape],
            )?;
            debug!(tape, deleted, "tape reset");
            Ok(())
        })?;
        self.remove_fork_watermark(tape)
    }

    /// Enumerate tapes that are not fork-derived and not archived, ascending.
    pub fn list_tapes(&self) -> Result<Vec<String>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT DISTINCT tape_name FROM {}
             WHERE instr(tape_name, ?1) = 0 AND instr(tape_name, ?2) = 0
             ORDER BY tape_name ASC",
            self.table
        ))?;
        let names = stmt
            .query_map(params![FORK_SUFFIX_DELIMITER, ARCHIVE_MARKER], |row| {
                row.get::<_, String>(0)
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(names)
    }

    /// Duplicate all of `source`'s entries (preserving ids) into a freshly
    /// named tape, and record the id watermark so a later [`merge`] replays
    /// only entries appended after the fork.
    ///
    /// [`merge`]: Self::merge
    #[instrument(skip(self), fields(source))]
    pub fn fork(&self, source: &str) -> Result<String> {
        let suffix = Uuid::new_v4().simple().to_string();
        let fork_name = format!("{source}{FORK_SUFFIX_DELIMITER}{}", &suffix[..8]);

        self.with_global_write_lock(|| {
            let conn = self.conn()?;
            let tx = conn.unchecked_transaction()?;

            let rows = {
                let mut stmt = tx.prepare(&format!(
                    "SELECT entry_id, kind, payload_json, meta_json, created_at
                     FROM {} WHERE tape_name = ?1 ORDER BY entry_id ASC",
                    self.table
                ))?;
                stmt.query_map(params![source], |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, String>(4)?,
                    ))
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?
            };

            let start_id = rows.last().map_or(1, |(last_id, ..)| last_id + 1);

            for (entry_id, kind, payload_json, meta_json, created_at) in &rows {
                let _ = tx.execute(
                    &format!(
                        "INSERT INTO {} (tape_name, entry_id, kind, payload_json, meta_json, created_at)
                         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                        self.table
                    ),
                    params![fork_name, entry_id, kind, payload_json, meta_json, created_at],
                )?;
            }

            tx.commit()?;

            let mut watermarks = self
                .fork_watermarks
                .lock()
                .map_err(|_| TapeStoreError::Internal("fork watermark map poisoned".into()))?;
            let _ = watermarks.insert(fork_name.clone(), start_id);

            debug!(source, fork = %fork_name, start_id, "tape forked");
            Ok(fork_name.clone())
        })
    }

    /// Replay `source`'s entries since its fork watermark onto `target`
    /// (renumbering ids to continue the target's sequence), then delete
    /// `source` entirely.
    ///
    /// A missing watermark defaults to 1, replaying everything.
    #[instrument(skip(self), fields(source, target))]
    pub fn merge(&self, source: &str, target: &str) -> Result<()> {
        self.with_global_write_lock(|| {
            let start_id = {
                let watermarks = self
                    .fork_watermarks
                    .lock()
                    .map_err(|_| TapeStoreError::Internal("fork watermark map poisoned".into()))?;
                watermarks.get(source).copied().unwrap_or(1)
            };

            let conn = self.conn()?;
            let tx = conn.unchecked_transaction()?;

            let rows = {
                let mut stmt = tx.prepare(&format!(
                    "SELECT kind, payload_json, meta_json FROM {}
                     WHERE tape_name = ?1 AND entry_id >= ?2 ORDER BY entry_id ASC",
                    self.table
                ))?;
                stmt.query_map(params![source, start_id], |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                    ))
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?
            };

            if !rows.is_empty() {
                let target_next_id: i64 = tx.query_row(
                    &format!(
                        "SELECT COALESCE(MAX(entry_id), 0) + 1 FROM {} WHERE tape_name = ?1",
                        self.table
                    ),
                    params![target],
                    |row| row.get(0),
                )?;

                let now = chrono::Utc::now().to_rfc3339();
                for (offset, (kind, payload_json, meta_json)) in rows.iter().enumerate() {
                    let _ = tx.execute(
                        &format!(
                            "INSERT INTO {} (tape_name, entry_id, kind, payload_json, meta_json, created_at)
                             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                            self.table
                        ),
                        params![
                            target,
                            target_next_id + offset as i64,
                            kind,
                            payload_json,
                            meta_json,
                            now
                        ],
                    )?;
                }
            }

            let _ = tx.execute(
                &format!("DELETE FROM {} WHERE tape_name = ?1", self.table),
                params![source],
            )?;

            tx.commit()?;

            debug!(source, target, replayed = rows.len(), "tape merged");
            Ok(())
        })?;
        self.remove_fork_watermark(source)
    }

    /// Rename `tape` in place to an archived name embedding a timestamp.
    ///
    /// Returns `None` for an empty tape (nothing is created). Afterwards the
    /// entries remain readable under the archived name while `tape` itself
    /// reads as not-found.
    #[instrument(skip(self), fields(tape))]
    pub fn archive(&self, tape: &str) -> Result<Option<ArchiveRef>> {
        let archived = self.with_global_write_lock(|| {
            let conn = self.conn()?;
            let tx = conn.unchecked_transaction()?;

            let count: i64 = tx.query_row(
                &format!("SELECT COUNT(*) FROM {} WHERE tape_name = ?1", self.table),
                params![tape],
                |row| row.get(0),
            )?;
            if count == 0 {
                return Ok(None);
            }

            let stamp = chrono::Utc::now().format("%Y%m%dT%H%M%SZ").to_string();
            let archived_name = format!("{tape}{ARCHIVE_MARKER}{stamp}");
            let _ = tx.execute(
                &format!("UPDATE {} SET tape_name = ?1 WHERE tape_name = ?2", self.table),
                params![archived_name, tape],
            )?;

            tx.commit()?;

            debug!(tape, archived = %archived_name, "tape archived");
            Ok(Some(ArchiveRef {
                tape: tape.to_string(),
                archived_name,
                archived_at: stamp,
            }))
        })?;
        self.remove_fork_watermark(tape)?;
        Ok(archived)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
#[allow(unused_results)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn setup() -> (tempfile::TempDir, TapeStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = TapeStore::open(&dir.path().join("spool.db"), "tape_entries").unwrap();
        (dir, store)
    }

    fn append_message(store: &TapeStore, tape: &str, content: &str) -> Entry {
        store
            .append(
                tape,
                EntryKind::Message,
                json!({"role": "user", "content": content}),
                Value::Null,
            )
            .unwrap()
    }

    #[test]
    fn invalid_table_name_rejected_eagerly() {
        let dir = tempfile::tempdir().unwrap();
        let result = TapeStore::open(&dir.path().join("spool.db"), "entries; DROP TABLE x");
        assert_matches!(
            result,
            Err(TapeStoreError::InvalidIdentifier { field: "table name", .. })
        );
    }

    #[test]
    fn append_assigns_gapless_ids_from_one() {
        let (_dir, store) = setup();
        for expected in 1..=5 {
            let entry = append_message(&store, "main", "hi");
            assert_eq!(entry.id, expected);
        }
        let entries = store.read("main").unwrap().unwrap();
        let ids: Vec<i64> = entries.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn append_stamps_created_at() {
        let (_dir, store) = setup();
        let entry = append_message(&store, "main", "hi");
        assert!(entry.created_at().is_some());

        let read_back = store.read("main").unwrap().unwrap();
        assert_eq!(read_back[0].created_at(), entry.created_at());
    }

    #[test]
    fn append_preserves_caller_created_at() {
        let (_dir, store) = setup();
        let entry = store
            .append(
                "main",
                EntryKind::Event,
                json!({"name": "boot"}),
                json!({"created_at": "2026-01-01T00:00:00Z"}),
            )
            .unwrap();
        assert_eq!(entry.created_at(), Some("2026-01-01T00:00:00Z"));
    }

    #[test]
    fn append_coerces_non_object_payload() {
        let (_dir, store) = setup();
        let entry = store
            .append("main", EntryKind::Event, json!("bare string"), Value::Null)
            .unwrap();
        assert_eq!(entry.payload["value"], "bare string");

        let read_back = store.read("main").unwrap().unwrap();
        assert_eq!(read_back[0].payload["value"], "bare string");
    }

    #[test]
    fn ids_are_independent_per_tape() {
        let (_dir, store) = setup();
        append_message(&store, "a", "1");
        append_message(&store, "a", "2");
        let entry = append_message(&store, "b", "1");
        assert_eq!(entry.id, 1);
    }

    #[test]
    fn concurrent_appends_never_duplicate_ids() {
        let dir = tempfile::tempdir().unwrap();
        let store =
            Arc::new(TapeStore::open(&dir.path().join("spool.db"), "tape_entries").unwrap());

        let mut handles = Vec::new();
        for _ in 0..4 {
            let store = Arc::clone(&store);
            handles.push(std::thread::spawn(move || {
                for _ in 0..5 {
                    append_message(&store, "shared", "x");
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        let entries = store.read("shared").unwrap().unwrap();
        let ids: Vec<i64> = entries.iter().map(|e| e.id).collect();
        assert_eq!(ids, (1..=20).collect::<Vec<i64>>());
    }

    #[test]
    fn read_never_written_tape_is_none() {
        let (_dir, store) = setup();
        assert!(store.read("ghost").unwrap().is_none());
    }

    #[test]
    fn read_degrades_malformed_stored_json() {
        let (dir, store) = setup();
        append_message(&store, "main", "ok");

        // Corrupt the stored payload through a direct connection.
        let conn = rusqlite::Connection::open(dir.path().join("spool.db")).unwrap();
        conn.execute(
            "UPDATE tape_entries SET payload_json = '{broken' WHERE tape_name = 'main'",
            [],
        )
        .unwrap();

        let entries = store.read("main").unwrap().unwrap();
        assert_eq!(entries[0].payload, json!({}));
    }

    #[test]
    fn reset_restarts_ids_at_one() {
        let (_dir, store) = setup();
        append_message(&store, "main", "a");
        append_message(&store, "main", "b");

        store.reset("main").unwrap();
        assert!(store.read("main").unwrap().is_none());

        let entry = append_message(&store, "main", "fresh");
        assert_eq!(entry.id, 1);
    }

    #[test]
    fn list_tapes_excludes_forks_and_archives() {
        let (_dir, store) = setup();
        append_message(&store, "beta", "x");
        append_message(&store, "alpha", "x");

        let fork = store.fork("alpha").unwrap();
        append_message(&store, "gamma", "x");
        store.archive("gamma").unwrap();

        assert!(fork.contains(FORK_SUFFIX_DELIMITER));
        assert_eq!(store.list_tapes().unwrap(), vec!["alpha", "beta"]);
    }

    #[test]
    fn fork_copies_entries_preserving_ids() {
        let (_dir, store) = setup();
        append_message(&store, "main", "one");
        append_message(&store, "main", "two");

        let fork = store.fork("main").unwrap();
        assert!(fork.starts_with("main__"));

        let forked = store.read(&fork).unwrap().unwrap();
        let original = store.read("main").unwrap().unwrap();
        assert_eq!(forked, original);
    }

    #[test]
    fn fork_then_merge_replays_only_new_entries() {
        let (_dir, store) = setup();
        append_message(&store, "main", "one");
        append_message(&store, "main", "two");

        let fork = store.fork("main").unwrap();
        append_message(&store, &fork, "fork-a");
        append_message(&store, &fork, "fork-b");

        store.merge(&fork, "main").unwrap();

        let entries = store.read("main").unwrap().unwrap();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries.iter().map(|e| e.id).collect::<Vec<_>>(), vec![1, 2, 3, 4]);
        assert_eq!(entries[2].payload["content"], "fork-a");
        assert_eq!(entries[3].payload["content"], "fork-b");

        // The fork tape is gone after merge.
        assert!(store.read(&fork).unwrap().is_none());
    }

    #[test]
    fn merge_without_watermark_replays_everything() {
        let (_dir, store) = setup();
        append_message(&store, "scratch", "a");
        append_message(&store, "scratch", "b");
        append_message(&store, "main", "existing");

        store.merge("scratch", "main").unwrap();

        let entries = store.read("main").unwrap().unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[1].payload["content"], "a");
        assert_eq!(entries[2].payload["content"], "b");
        assert!(store.read("scratch").unwrap().is_none());
    }

    #[test]
    fn merge_empty_fork_just_deletes_source() {
        let (_dir, store) = setup();
        append_message(&store, "main", "one");
        let fork = store.fork("main").unwrap();

        store.merge(&fork, "main").unwrap();

        assert_eq!(store.read("main").unwrap().unwrap().len(), 1);
        assert!(store.read(&fork).unwrap().is_none());
    }

    #[test]
    fn archive_empty_tape_returns_none() {
        let (_dir, store) = setup();
        assert!(store.archive("ghost").unwrap().is_none());
        assert!(store.list_tapes().unwrap().is_empty());
    }

    #[test]
    fn archive_renames_tape_in_place() {
        let (_dir, store) = setup();
        append_message(&store, "main", "keep me");

        let archived = store.archive("main").unwrap().unwrap();
        assert_eq!(archived.tape, "main");
        assert!(archived.archived_name.starts_with("main::archived::"));
        assert!(archived.archived_name.ends_with(&archived.archived_at));

        // Original name reads as not-found; entries live on under the new name.
        assert!(store.read("main").unwrap().is_none());
        let moved = store.read(&archived.archived_name).unwrap().unwrap();
        assert_eq!(moved[0].payload["content"], "keep me");
    }
}

#![forbid(unsafe_code)]

mod error;
mod lists;
mod requests;
mod tags;
mod tasks;
mod types;

pub use error::{Entity, StoreError};
pub use requests::*;
pub use types::{ListRecord, TaskRecord};

use rusqlite::{Connection, OptionalExtension, params};
use std::path::{Path, PathBuf};
use std::time::Duration;
use td_core::ids::UserId;
use time::macros::time;
use time::{OffsetDateTime, UtcOffset};

#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
    storage_dir: PathBuf,
}

impl SqliteStore {
    pub fn open(storage_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let storage_dir = storage_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&storage_dir)?;

        let db_path = storage_dir.join("taskdeck.db");
        let conn = Connection::open(db_path)?;
        conn.busy_timeout(Duration::from_secs(5))?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        install_schema(&conn)?;

        Ok(Self { conn, storage_dir })
    }

    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }
}

fn install_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        r#"
        PRAGMA journal_mode=WAL;
        PRAGMA synchronous=NORMAL;

        CREATE TABLE IF NOT EXISTS meta (
          key TEXT PRIMARY KEY,
          value TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS counters (
          name TEXT PRIMARY KEY,
          value INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS lists (
          id TEXT PRIMARY KEY,
          owner_id TEXT NOT NULL,
          title TEXT NOT NULL,
          color TEXT NOT NULL,
          created_at_ms INTEGER NOT NULL,
          updated_at_ms INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS tasks (
          id TEXT PRIMARY KEY,
          creator_id TEXT NOT NULL,
          list_id TEXT REFERENCES lists(id) ON DELETE SET NULL,
          title TEXT NOT NULL,
          notes TEXT,
          priority TEXT NOT NULL DEFAULT 'none',
          due_at_ms INTEGER,
          completed_at_ms INTEGER,
          position INTEGER NOT NULL DEFAULT 0,
          created_at_ms INTEGER NOT NULL,
          updated_at_ms INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS task_tags (
          task_id TEXT NOT NULL REFERENCES tasks(id) ON DELETE CASCADE,
          tag TEXT NOT NULL,
          PRIMARY KEY (task_id, tag)
        );

        CREATE INDEX IF NOT EXISTS idx_tasks_creator ON tasks(creator_id);
        CREATE INDEX IF NOT EXISTS idx_lists_owner ON lists(owner_id);
        "#,
    )?;
    conn.execute(
        "INSERT OR IGNORE INTO meta(key, value) VALUES (?1, ?2)",
        params!["schema_version", "v1"],
    )?;
    Ok(())
}

pub(crate) fn now_ms() -> i64 {
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    now.as_millis() as i64
}

/// End of the current local day (23:59:59.999) in epoch milliseconds.
/// Falls back to UTC when the local offset cannot be determined.
pub(crate) fn today_end_ms() -> i64 {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    let now = OffsetDateTime::now_utc().to_offset(offset);
    let end = now.replace_time(time!(23:59:59.999));
    (end.unix_timestamp_nanos() / 1_000_000) as i64
}

pub(crate) fn next_counter(conn: &Connection, name: &str) -> Result<i64, StoreError> {
    let current: i64 = conn
        .query_row(
            "SELECT value FROM counters WHERE name=?1",
            params![name],
            |row| row.get(0),
        )
        .optional()?
        .unwrap_or(0);
    let next = current + 1;
    conn.execute(
        r#"
        INSERT INTO counters(name, value) VALUES (?1, ?2)
        ON CONFLICT(name) DO UPDATE SET value=excluded.value
        "#,
        params![name, next],
    )?;
    Ok(next)
}

/// Existence check before ownership check: an absent id is `NotFound`,
/// a present id owned by someone else is `Forbidden`.
pub(crate) fn task_guard(
    conn: &Connection,
    user: &UserId,
    task_id: &str,
) -> Result<(), StoreError> {
    let creator = conn
        .query_row(
            "SELECT creator_id FROM tasks WHERE id=?1",
            params![task_id],
            |row| row.get::<_, String>(0),
        )
        .optional()?;

    let Some(creator) = creator else {
        return Err(StoreError::NotFound(Entity::Task));
    };
    if creator != user.as_str() {
        return Err(StoreError::Forbidden);
    }
    Ok(())
}

/// Existence only, no ownership: `list_id` references on tasks point at
/// any list, but never at one that is missing.
pub(crate) fn list_exists(conn: &Connection, list_id: &str) -> Result<bool, StoreError> {
    let found = conn
        .query_row("SELECT 1 FROM lists WHERE id=?1", params![list_id], |_| {
            Ok(())
        })
        .optional()?;
    Ok(found.is_some())
}

pub(crate) fn list_guard(
    conn: &Connection,
    user: &UserId,
    list_id: &str,
) -> Result<(), StoreError> {
    let owner = conn
        .query_row(
            "SELECT owner_id FROM lists WHERE id=?1",
            params![list_id],
            |row| row.get::<_, String>(0),
        )
        .optional()?;

    let Some(owner) = owner else {
        return Err(StoreError::NotFound(Entity::List));
    };
    if owner != user.as_str() {
        return Err(StoreError::Forbidden);
    }
    Ok(())
}

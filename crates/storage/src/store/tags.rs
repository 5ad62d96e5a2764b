#![forbid(unsafe_code)]

use super::*;
use rusqlite::{Connection, Transaction, params};
use td_core::ids::UserId;
use td_core::model::normalize_tags;

impl SqliteStore {
    /// Replace-all tag synchronization: the desired set fully supersedes
    /// whatever is stored. Guarded, transactional, returns the read-back.
    pub fn sync_tags(
        &mut self,
        user: &UserId,
        task_id: &str,
        tags: &[String],
    ) -> Result<TaskRecord, StoreError> {
        let tags = normalize_tags(tags)?;
        task_guard(&self.conn, user, task_id)?;

        let tx = self.conn.transaction()?;
        replace_tags_tx(&tx, task_id, &tags)?;
        tx.commit()?;

        self.task(user, task_id)
    }
}

/// Delete-then-insert inside the caller's transaction, so a reader never
/// observes a half-replaced set.
pub(crate) fn replace_tags_tx(
    tx: &Transaction<'_>,
    task_id: &str,
    tags: &[String],
) -> Result<(), StoreError> {
    tx.execute("DELETE FROM task_tags WHERE task_id=?1", params![task_id])?;
    if tags.is_empty() {
        return Ok(());
    }
    let mut stmt = tx.prepare("INSERT INTO task_tags(task_id, tag) VALUES (?1, ?2)")?;
    for tag in tags {
        stmt.execute(params![task_id, tag])?;
    }
    Ok(())
}

pub(crate) fn load_tags(conn: &Connection, task_id: &str) -> Result<Vec<String>, StoreError> {
    let mut stmt =
        conn.prepare("SELECT tag FROM task_tags WHERE task_id=?1 ORDER BY tag ASC")?;
    let rows = stmt.query_map(params![task_id], |row| row.get::<_, String>(0))?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

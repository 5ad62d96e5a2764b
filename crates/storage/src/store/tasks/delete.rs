#![forbid(unsafe_code)]

use super::super::*;
use rusqlite::params;
use td_core::ids::UserId;

impl SqliteStore {
    /// Tag associations cascade with the task row.
    pub fn delete_task(&mut self, user: &UserId, task_id: &str) -> Result<(), StoreError> {
        task_guard(&self.conn, user, task_id)?;
        self.conn
            .execute("DELETE FROM tasks WHERE id=?1", params![task_id])?;
        Ok(())
    }
}

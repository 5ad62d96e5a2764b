#![forbid(unsafe_code)]

use super::super::*;
use rusqlite::params;
use td_core::ids::UserId;

impl SqliteStore {
    /// Sets `completed_at_ms` only. Completing an already-completed task
    /// is a no-op transition: the stored timestamp is preserved so
    /// concurrent readers never observe two distinct completion times.
    pub fn complete_task(
        &mut self,
        user: &UserId,
        task_id: &str,
    ) -> Result<TaskRecord, StoreError> {
        task_guard(&self.conn, user, task_id)?;

        let now_ms = now_ms();
        self.conn.execute(
            r#"
            UPDATE tasks
            SET completed_at_ms = COALESCE(completed_at_ms, ?2), updated_at_ms = ?2
            WHERE id = ?1
            "#,
            params![task_id, now_ms],
        )?;

        self.task(user, task_id)
    }

    pub fn uncomplete_task(
        &mut self,
        user: &UserId,
        task_id: &str,
    ) -> Result<TaskRecord, StoreError> {
        task_guard(&self.conn, user, task_id)?;

        let now_ms = now_ms();
        self.conn.execute(
            r#"
            UPDATE tasks
            SET completed_at_ms = NULL, updated_at_ms = ?2
            WHERE id = ?1
            "#,
            params![task_id, now_ms],
        )?;

        self.task(user, task_id)
    }
}

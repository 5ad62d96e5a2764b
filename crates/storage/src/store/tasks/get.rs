#![forbid(unsafe_code)]

use super::super::tags::load_tags;
use super::super::types::{TASK_COLUMNS, task_from_row};
use super::super::*;
use rusqlite::{OptionalExtension, params};
use td_core::ids::UserId;

impl SqliteStore {
    /// Single-task read with the ownership guard applied: absent id is
    /// `NotFound`, someone else's task is `Forbidden`. Tags included.
    pub fn task(&self, user: &UserId, task_id: &str) -> Result<TaskRecord, StoreError> {
        let row = self
            .conn
            .query_row(
                &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id=?1"),
                params![task_id],
                task_from_row,
            )
            .optional()?;

        let Some(mut record) = row else {
            return Err(StoreError::NotFound(Entity::Task));
        };
        if record.creator_id != user.as_str() {
            return Err(StoreError::Forbidden);
        }

        record.tags = load_tags(&self.conn, task_id)?;
        Ok(record)
    }
}

#![forbid(unsafe_code)]

use super::super::tags::replace_tags_tx;
use super::super::*;
use rusqlite::params;
use td_core::ids::UserId;
use td_core::model::{normalize_tags, validate_notes, validate_task_title};

impl SqliteStore {
    /// Insert, then tag sync, then read-back. The two writes are
    /// deliberately separate steps: a tag failure after the insert landed
    /// surfaces as `PartialFailure` instead of being swallowed.
    pub fn create_task(
        &mut self,
        user: &UserId,
        request: CreateTaskRequest,
    ) -> Result<TaskRecord, StoreError> {
        let CreateTaskRequest {
            title,
            notes,
            list_id,
            priority,
            due_at_ms,
            position,
            tags,
        } = request;

        validate_task_title(&title)?;
        if let Some(notes) = &notes {
            validate_notes(notes)?;
        }
        let tags = normalize_tags(&tags)?;

        if let Some(list) = &list_id
            && !list_exists(&self.conn, list)?
        {
            return Err(StoreError::NotFound(Entity::List));
        }

        let now_ms = now_ms();
        let tx = self.conn.transaction()?;
        let seq = next_counter(&tx, "task_seq")?;
        let id = format!("task-{seq:06}");

        tx.execute(
            r#"
            INSERT INTO tasks(id, creator_id, list_id, title, notes, priority,
                              due_at_ms, completed_at_ms, position, created_at_ms, updated_at_ms)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, NULL, ?8, ?9, ?10)
            "#,
            params![
                id,
                user.as_str(),
                list_id,
                title,
                notes,
                priority.as_str(),
                due_at_ms,
                position,
                now_ms,
                now_ms
            ],
        )?;
        tx.commit()?;

        if !tags.is_empty() {
            let result: Result<(), StoreError> = (|| {
                let tx = self.conn.transaction()?;
                replace_tags_tx(&tx, &id, &tags)?;
                tx.commit()?;
                Ok(())
            })();
            if let Err(source) = result {
                return Err(StoreError::PartialFailure {
                    applied_fields: true,
                    source: Box::new(source),
                });
            }
        }

        self.task(user, &id)
    }
}

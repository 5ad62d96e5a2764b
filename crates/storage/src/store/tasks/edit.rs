#![forbid(unsafe_code)]

use super::super::tags::replace_tags_tx;
use super::super::*;
use rusqlite::params;
use td_core::ids::UserId;
use td_core::model::{normalize_tags, validate_notes, validate_task_title};

impl SqliteStore {
    /// Guard, optional field update, optional replace-all tag sync,
    /// read-back. Field update commits before the tag step; a tag failure
    /// after fields landed is reported as `PartialFailure`.
    pub fn edit_task(
        &mut self,
        user: &UserId,
        task_id: &str,
        request: EditTaskRequest,
    ) -> Result<TaskRecord, StoreError> {
        if !request.has_field_edits() && request.tags.is_none() {
            return Err(StoreError::InvalidInput("no fields to edit"));
        }

        let EditTaskRequest {
            title,
            notes,
            list_id,
            priority,
            due_at_ms,
            position,
            tags,
        } = request;

        if let Some(title) = &title {
            validate_task_title(title)?;
        }
        if let Some(Some(notes)) = &notes {
            validate_notes(notes)?;
        }
        let tags = tags.as_deref().map(normalize_tags).transpose()?;

        let current = self.task(user, task_id)?;

        if let Some(Some(target)) = &list_id
            && !list_exists(&self.conn, target)?
        {
            return Err(StoreError::NotFound(Entity::List));
        }
        let fields_edited = title.is_some()
            || notes.is_some()
            || list_id.is_some()
            || priority.is_some()
            || due_at_ms.is_some()
            || position.is_some();

        if fields_edited {
            let now_ms = now_ms();
            let new_title = title.unwrap_or(current.title);
            let new_notes = notes.unwrap_or(current.notes);
            let new_list_id = list_id.unwrap_or(current.list_id);
            let new_priority = priority.unwrap_or(current.priority);
            let new_due_at_ms = due_at_ms.unwrap_or(current.due_at_ms);
            let new_position = position.unwrap_or(current.position);

            self.conn.execute(
                r#"
                UPDATE tasks
                SET title = ?2, notes = ?3, list_id = ?4, priority = ?5,
                    due_at_ms = ?6, position = ?7, updated_at_ms = ?8
                WHERE id = ?1
                "#,
                params![
                    task_id,
                    new_title,
                    new_notes,
                    new_list_id,
                    new_priority.as_str(),
                    new_due_at_ms,
                    new_position,
                    now_ms
                ],
            )?;
        }

        if let Some(tags) = tags {
            let result: Result<(), StoreError> = (|| {
                let tx = self.conn.transaction()?;
                replace_tags_tx(&tx, task_id, &tags)?;
                tx.commit()?;
                Ok(())
            })();
            if let Err(source) = result {
                return Err(StoreError::PartialFailure {
                    applied_fields: fields_edited,
                    source: Box::new(source),
                });
            }
        }

        self.task(user, task_id)
    }
}

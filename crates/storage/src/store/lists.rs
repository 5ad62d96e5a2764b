#![forbid(unsafe_code)]

use super::types::{LIST_COLUMNS, list_from_row};
use super::*;
use rusqlite::{OptionalExtension, params};
use td_core::ids::UserId;
use td_core::model::{DEFAULT_LIST_COLOR, validate_color, validate_list_title};

impl SqliteStore {
    pub fn create_list(
        &mut self,
        user: &UserId,
        request: CreateListRequest,
    ) -> Result<ListRecord, StoreError> {
        let CreateListRequest { title, color } = request;
        validate_list_title(&title)?;
        let color = color.unwrap_or_else(|| DEFAULT_LIST_COLOR.to_string());
        validate_color(&color)?;

        let now_ms = now_ms();
        let tx = self.conn.transaction()?;
        let seq = next_counter(&tx, "list_seq")?;
        let id = format!("list-{seq:06}");

        tx.execute(
            r#"
            INSERT INTO lists(id, owner_id, title, color, created_at_ms, updated_at_ms)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![id, user.as_str(), title, color, now_ms, now_ms],
        )?;
        tx.commit()?;

        self.list(user, &id)
    }

    pub fn lists(&self, user: &UserId) -> Result<Vec<ListRecord>, StoreError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {LIST_COLUMNS} FROM lists WHERE owner_id=?1 \
             ORDER BY created_at_ms ASC, id ASC"
        ))?;
        let rows = stmt.query_map(params![user.as_str()], list_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn list(&self, user: &UserId, list_id: &str) -> Result<ListRecord, StoreError> {
        let row = self
            .conn
            .query_row(
                &format!("SELECT {LIST_COLUMNS} FROM lists WHERE id=?1"),
                params![list_id],
                list_from_row,
            )
            .optional()?;

        let Some(record) = row else {
            return Err(StoreError::NotFound(Entity::List));
        };
        if record.owner_id != user.as_str() {
            return Err(StoreError::Forbidden);
        }
        Ok(record)
    }

    pub fn edit_list(
        &mut self,
        user: &UserId,
        list_id: &str,
        request: EditListRequest,
    ) -> Result<ListRecord, StoreError> {
        let EditListRequest { title, color } = request;
        if title.is_none() && color.is_none() {
            return Err(StoreError::InvalidInput("no fields to edit"));
        }
        if let Some(title) = &title {
            validate_list_title(title)?;
        }
        if let Some(color) = &color {
            validate_color(color)?;
        }

        let current = self.list(user, list_id)?;
        let now_ms = now_ms();
        let new_title = title.unwrap_or(current.title);
        let new_color = color.unwrap_or(current.color);

        self.conn.execute(
            r#"
            UPDATE lists
            SET title = ?2, color = ?3, updated_at_ms = ?4
            WHERE id = ?1
            "#,
            params![list_id, new_title, new_color, now_ms],
        )?;

        self.list(user, list_id)
    }

    /// Tasks that referenced the list revert to unassigned (`ON DELETE
    /// SET NULL` on `tasks.list_id`).
    pub fn delete_list(&mut self, user: &UserId, list_id: &str) -> Result<(), StoreError> {
        list_guard(&self.conn, user, list_id)?;
        self.conn
            .execute("DELETE FROM lists WHERE id=?1", params![list_id])?;
        Ok(())
    }
}

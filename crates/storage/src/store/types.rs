#![forbid(unsafe_code)]

use rusqlite::Row;
use rusqlite::types::Type;
use td_core::model::Priority;
use td_core::view::TaskFacts;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskRecord {
    pub id: String,
    pub creator_id: String,
    pub list_id: Option<String>,
    pub title: String,
    pub notes: Option<String>,
    pub priority: Priority,
    pub due_at_ms: Option<i64>,
    pub completed_at_ms: Option<i64>,
    pub position: i64,
    /// Deduplicated, sorted; loaded from `task_tags`.
    pub tags: Vec<String>,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}

impl TaskRecord {
    pub fn facts(&self) -> TaskFacts<'_> {
        TaskFacts {
            list_id: self.list_id.as_deref(),
            title: &self.title,
            due_at_ms: self.due_at_ms,
            completed_at_ms: self.completed_at_ms,
        }
    }
}

pub(crate) const TASK_COLUMNS: &str = "id, creator_id, list_id, title, notes, priority, \
     due_at_ms, completed_at_ms, position, created_at_ms, updated_at_ms";

pub(crate) fn task_from_row(row: &Row<'_>) -> rusqlite::Result<TaskRecord> {
    let priority_text: String = row.get(5)?;
    let priority = Priority::parse(&priority_text).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(5, Type::Text, "unknown priority value".into())
    })?;
    Ok(TaskRecord {
        id: row.get(0)?,
        creator_id: row.get(1)?,
        list_id: row.get(2)?,
        title: row.get(3)?,
        notes: row.get(4)?,
        priority,
        due_at_ms: row.get(6)?,
        completed_at_ms: row.get(7)?,
        position: row.get(8)?,
        tags: Vec::new(),
        created_at_ms: row.get(9)?,
        updated_at_ms: row.get(10)?,
    })
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListRecord {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub color: String,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}

pub(crate) const LIST_COLUMNS: &str =
    "id, owner_id, title, color, created_at_ms, updated_at_ms";

pub(crate) fn list_from_row(row: &Row<'_>) -> rusqlite::Result<ListRecord> {
    Ok(ListRecord {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        title: row.get(2)?,
        color: row.get(3)?,
        created_at_ms: row.get(4)?,
        updated_at_ms: row.get(5)?,
    })
}

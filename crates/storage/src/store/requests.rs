#![forbid(unsafe_code)]

use td_core::model::Priority;
use td_core::view::View;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TaskQuery {
    pub view: View,
    pub list_id: Option<String>,
    pub search: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateTaskRequest {
    pub title: String,
    pub notes: Option<String>,
    pub list_id: Option<String>,
    pub priority: Priority,
    pub due_at_ms: Option<i64>,
    pub position: i64,
    pub tags: Vec<String>,
}

impl Default for CreateTaskRequest {
    fn default() -> Self {
        Self {
            title: String::new(),
            notes: None,
            list_id: None,
            priority: Priority::None,
            due_at_ms: None,
            position: 0,
            tags: Vec::new(),
        }
    }
}

/// Field edit contract: `None` leaves a field untouched; for nullable
/// fields `Some(None)` clears and `Some(Some(v))` sets.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EditTaskRequest {
    pub title: Option<String>,
    pub notes: Option<Option<String>>,
    pub list_id: Option<Option<String>>,
    pub priority: Option<Priority>,
    pub due_at_ms: Option<Option<i64>>,
    pub position: Option<i64>,
    pub tags: Option<Vec<String>>,
}

impl EditTaskRequest {
    pub(crate) fn has_field_edits(&self) -> bool {
        self.title.is_some()
            || self.notes.is_some()
            || self.list_id.is_some()
            || self.priority.is_some()
            || self.due_at_ms.is_some()
            || self.position.is_some()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateListRequest {
    pub title: String,
    pub color: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EditListRequest {
    pub title: Option<String>,
    pub color: Option<String>,
}

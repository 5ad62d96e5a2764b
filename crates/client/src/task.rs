#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use td_core::view::TaskFacts;

/// Wire shape of a task as returned by the server.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub list_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub notes: Option<String>,
    pub priority: String,
    pub due_at_ms: Option<i64>,
    pub completed_at_ms: Option<i64>,
    pub position: i64,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}

impl Task {
    pub fn facts(&self) -> TaskFacts<'_> {
        TaskFacts {
            list_id: self.list_id.as_deref(),
            title: &self.title,
            due_at_ms: self.due_at_ms,
            completed_at_ms: self.completed_at_ms,
        }
    }
}

/// Expected post-mutation effect, applied speculatively to cached
/// entries before the server responds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TaskChange {
    Complete { completed_at_ms: i64 },
    Uncomplete,
    SetPriority { priority: String },
    SetDueAt { due_at_ms: Option<i64> },
    SetTitle { title: String },
    MoveToList { list_id: Option<String> },
}

impl TaskChange {
    pub fn apply(&self, task: &mut Task) {
        match self {
            Self::Complete { completed_at_ms } => {
                // already-completed stays at its first timestamp, matching
                // the server's no-op transition
                if task.completed_at_ms.is_none() {
                    task.completed_at_ms = Some(*completed_at_ms);
                }
            }
            Self::Uncomplete => task.completed_at_ms = None,
            Self::SetPriority { priority } => task.priority = priority.clone(),
            Self::SetDueAt { due_at_ms } => task.due_at_ms = *due_at_ms,
            Self::SetTitle { title } => task.title = title.clone(),
            Self::MoveToList { list_id } => task.list_id = list_id.clone(),
        }
    }
}

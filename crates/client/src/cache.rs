#![forbid(unsafe_code)]

use crate::task::{Task, TaskChange};
use std::collections::BTreeMap;
use td_core::view::{TaskFilter, View};

/// Cache key: one entry per (view, list) pair, matching how the UI keys
/// its queries. Search results are not cached.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct ViewKey {
    pub view: View,
    pub list_id: Option<String>,
}

impl ViewKey {
    pub fn new(view: View, list_id: Option<String>) -> Self {
        Self { view, list_id }
    }

    fn filter(&self, today_end_ms: i64) -> TaskFilter {
        self.view.filter(self.list_id.as_deref(), None, today_end_ms)
    }
}

#[derive(Clone, Debug, Default)]
struct CachedView {
    tasks: Vec<Task>,
    stale: bool,
}

/// Explicit, injectable cache state. Constructed by the caller and
/// handed to the coordinator; there is no module-level singleton.
#[derive(Debug, Default)]
pub struct CacheContext {
    views: BTreeMap<ViewKey, CachedView>,
    today_end_ms: i64,
}

impl CacheContext {
    /// `today_end_ms` is the end of the current local day, used to
    /// re-evaluate the `today` predicate client-side.
    pub fn new(today_end_ms: i64) -> Self {
        Self {
            views: BTreeMap::new(),
            today_end_ms,
        }
    }

    pub fn today_end_ms(&self) -> i64 {
        self.today_end_ms
    }

    pub fn set_today_end_ms(&mut self, today_end_ms: i64) {
        self.today_end_ms = today_end_ms;
    }

    /// Replace a view's contents from server truth and clear its stale
    /// bit. The refetch is authoritative over any speculative values.
    pub fn ingest(&mut self, key: ViewKey, tasks: Vec<Task>) {
        self.views.insert(key, CachedView { tasks, stale: false });
    }

    pub fn ingest_json(&mut self, key: ViewKey, payload: &str) -> Result<(), serde_json::Error> {
        let tasks: Vec<Task> = serde_json::from_str(payload)?;
        self.ingest(key, tasks);
        Ok(())
    }

    pub fn view(&self, key: &ViewKey) -> Option<&[Task]> {
        self.views.get(key).map(|cached| cached.tasks.as_slice())
    }

    pub fn is_stale(&self, key: &ViewKey) -> bool {
        self.views.get(key).is_some_and(|cached| cached.stale)
    }

    pub(crate) fn mark_all_stale(&mut self) {
        for cached in self.views.values_mut() {
            cached.stale = true;
        }
    }

    pub(crate) fn keys_containing(&self, task_id: &str) -> Vec<ViewKey> {
        self.views
            .iter()
            .filter(|(_, cached)| cached.tasks.iter().any(|task| task.id == task_id))
            .map(|(key, _)| key.clone())
            .collect()
    }

    pub(crate) fn snapshot(&self, key: &ViewKey) -> Option<Vec<Task>> {
        self.views.get(key).map(|cached| cached.tasks.clone())
    }

    /// Restores a snapshot verbatim, leaving the stale bit alone.
    pub(crate) fn restore(&mut self, key: ViewKey, tasks: Vec<Task>) {
        match self.views.get_mut(&key) {
            Some(cached) => cached.tasks = tasks,
            None => {
                self.views.insert(key, CachedView { tasks, stale: false });
            }
        }
    }

    /// Speculative rewrite: apply the change to matching entries, then
    /// drop entries the view's predicate no longer accepts (completing a
    /// task removes it from `today` immediately). Entries are never
    /// speculatively inserted; the post-confirmation refetch handles
    /// membership gains.
    pub(crate) fn rewrite(&mut self, key: &ViewKey, task_id: &str, change: &TaskChange) {
        let filter = key.filter(self.today_end_ms);
        if let Some(cached) = self.views.get_mut(key) {
            for task in cached.tasks.iter_mut() {
                if task.id == task_id {
                    change.apply(task);
                }
            }
            cached
                .tasks
                .retain(|task| task.id != task_id || filter.matches(&task.facts()));
        }
    }
}

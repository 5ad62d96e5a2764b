#![forbid(unsafe_code)]

use super::super::tags::load_tags;
use super::super::types::{TASK_COLUMNS, task_from_row};
use super::super::*;
use rusqlite::params_from_iter;
use rusqlite::types::Value;
use td_core::ids::UserId;
use td_core::model::validate_search;
use td_core::view::{Completion, DueFilter, ListScope};

impl SqliteStore {
    /// View-filtered listing scoped to the caller, evaluated against the
    /// current local clock.
    pub fn tasks(&self, user: &UserId, query: TaskQuery) -> Result<Vec<TaskRecord>, StoreError> {
        self.tasks_as_of(user, query, today_end_ms())
    }

    /// Same as [`SqliteStore::tasks`] with a caller-supplied end-of-day
    /// boundary for the `today` view.
    pub fn tasks_as_of(
        &self,
        user: &UserId,
        query: TaskQuery,
        today_end_ms: i64,
    ) -> Result<Vec<TaskRecord>, StoreError> {
        let TaskQuery {
            view,
            list_id,
            search,
        } = query;

        if let Some(search) = &search {
            validate_search(search)?;
        }

        let filter = view.filter(list_id.as_deref(), search.as_deref(), today_end_ms);

        let mut sql = format!("SELECT {TASK_COLUMNS} FROM tasks WHERE creator_id = ?1");
        let mut values: Vec<Value> = vec![Value::from(user.as_str().to_string())];

        // Search first, then the view predicates; the clauses commute.
        // `%` and `_` in the search pass through as LIKE wildcards, and
        // lower() folds ASCII only, where `TaskFilter::matches` does a
        // literal Unicode-folded substring check. Cached views never carry
        // a search term, so only this clause ever evaluates one.
        if let Some(query) = &filter.title_query {
            values.push(Value::from(format!("%{query}%")));
            sql.push_str(&format!(" AND lower(title) LIKE ?{}", values.len()));
        }

        match &filter.scope {
            ListScope::Any => {}
            ListScope::Unassigned => sql.push_str(" AND list_id IS NULL"),
            ListScope::In(list) => {
                values.push(Value::from(list.clone()));
                sql.push_str(&format!(" AND list_id = ?{}", values.len()));
            }
        }

        match filter.completion {
            Completion::Active => sql.push_str(" AND completed_at_ms IS NULL"),
            Completion::Done => sql.push_str(" AND completed_at_ms IS NOT NULL"),
        }

        match filter.due {
            DueFilter::Any => {}
            DueFilter::Scheduled => sql.push_str(" AND due_at_ms IS NOT NULL"),
            DueFilter::OnOrBefore(end_ms) => {
                values.push(Value::from(end_ms));
                sql.push_str(&format!(
                    " AND due_at_ms IS NOT NULL AND due_at_ms <= ?{}",
                    values.len()
                ));
            }
        }

        sql.push_str(" ORDER BY position ASC, created_at_ms ASC, id ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(values), task_from_row)?;
        let mut out = rows.collect::<Result<Vec<_>, _>>()?;

        for task in &mut out {
            task.tags = load_tags(&self.conn, &task.id)?;
        }
        Ok(out)
    }
}

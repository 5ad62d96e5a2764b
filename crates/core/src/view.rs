#![forbid(unsafe_code)]

//! View filter engine: each view maps to a fixed predicate/ordering pair
//! over a single owner's tasks. The same `TaskFilter` is lowered to SQL by
//! the storage layer and evaluated in memory by the client cache; callers
//! must already have scoped the task collection to its owner.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum View {
    #[default]
    Inbox,
    Today,
    Scheduled,
    All,
    Completed,
}

impl View {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inbox => "inbox",
            Self::Today => "today",
            Self::Scheduled => "scheduled",
            Self::All => "all",
            Self::Completed => "completed",
        }
    }

    /// Transport-facing parse. Unknown or absent tokens fall back to
    /// `Inbox`, matching the default view.
    pub fn parse(token: Option<&str>) -> Self {
        match token {
            Some("today") => Self::Today,
            Some("scheduled") => Self::Scheduled,
            Some("all") => Self::All,
            Some("completed") => Self::Completed,
            _ => Self::Inbox,
        }
    }

    /// Resolves this view plus optional list/search constraints into the
    /// exact predicate set. `today_end_ms` is the end of the current local
    /// day (23:59:59.999) at the evaluating clock, only consulted by
    /// `Today`.
    pub fn filter(
        self,
        list_id: Option<&str>,
        search: Option<&str>,
        today_end_ms: i64,
    ) -> TaskFilter {
        let title_query = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let (scope, completion, due) = match self {
            Self::Inbox => {
                let scope = match list_id {
                    Some(list) => ListScope::In(list.to_string()),
                    None => ListScope::Unassigned,
                };
                (scope, Completion::Active, DueFilter::Any)
            }
            Self::Today => (
                ListScope::Any,
                Completion::Active,
                DueFilter::OnOrBefore(today_end_ms),
            ),
            Self::Scheduled => (ListScope::Any, Completion::Active, DueFilter::Scheduled),
            Self::All => (ListScope::Any, Completion::Active, DueFilter::Any),
            Self::Completed => (ListScope::Any, Completion::Done, DueFilter::Any),
        };

        TaskFilter {
            scope,
            completion,
            due,
            title_query,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListScope {
    Any,
    Unassigned,
    In(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    Active,
    Done,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DueFilter {
    Any,
    Scheduled,
    OnOrBefore(i64),
}

/// The fields of a task a view predicate can observe.
#[derive(Clone, Copy, Debug)]
pub struct TaskFacts<'a> {
    pub list_id: Option<&'a str>,
    pub title: &'a str,
    pub due_at_ms: Option<i64>,
    pub completed_at_ms: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskFilter {
    pub scope: ListScope,
    pub completion: Completion,
    pub due: DueFilter,
    pub title_query: Option<String>,
}

impl TaskFilter {
    pub fn matches(&self, facts: &TaskFacts<'_>) -> bool {
        match &self.scope {
            ListScope::Any => {}
            ListScope::Unassigned => {
                if facts.list_id.is_some() {
                    return false;
                }
            }
            ListScope::In(list) => {
                if facts.list_id != Some(list.as_str()) {
                    return false;
                }
            }
        }

        match self.completion {
            Completion::Active => {
                if facts.completed_at_ms.is_some() {
                    return false;
                }
            }
            Completion::Done => {
                if facts.completed_at_ms.is_none() {
                    return false;
                }
            }
        }

        match self.due {
            DueFilter::Any => {}
            DueFilter::Scheduled => {
                if facts.due_at_ms.is_none() {
                    return false;
                }
            }
            DueFilter::OnOrBefore(end_ms) => match facts.due_at_ms {
                Some(due) if due <= end_ms => {}
                _ => return false,
            },
        }

        if let Some(query) = &self.title_query
            && !facts.title.to_lowercase().contains(query.as_str())
        {
            return false;
        }

        true
    }
}

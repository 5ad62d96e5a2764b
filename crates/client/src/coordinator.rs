#![forbid(unsafe_code)]

use crate::cache::{CacheContext, ViewKey};
use crate::task::{Task, TaskChange};
use std::collections::BTreeMap;

/// Handle for resolving one in-flight mutation. `task_seq` increases
/// monotonically per task, so a late server response can be recognized
/// as stale instead of clobbering a newer speculative write.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MutationTicket {
    pub task_id: String,
    pub task_seq: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    Confirmed,
    RolledBack,
    /// The ticket no longer names a pending mutation; the response is
    /// ignored.
    Stale,
}

#[derive(Debug)]
struct InFlight {
    global_seq: u64,
    task_id: String,
    task_seq: u64,
    change: TaskChange,
    /// One entry per cached view that contained the task when this
    /// mutation applied; restored verbatim on rollback.
    snapshots: Vec<(ViewKey, Vec<Task>)>,
}

/// Optimistic mutation coordinator. Single-threaded and cooperative:
/// every speculative write and every resolution runs to completion
/// before the next one starts, but mutations for different tasks may be
/// in flight concurrently and resolve out of issue order.
#[derive(Debug)]
pub struct Coordinator {
    cache: CacheContext,
    pending: Vec<InFlight>,
    next_global_seq: u64,
    task_seqs: BTreeMap<String, u64>,
}

impl Coordinator {
    pub fn new(cache: CacheContext) -> Self {
        Self {
            cache,
            pending: Vec::new(),
            next_global_seq: 0,
            task_seqs: BTreeMap::new(),
        }
    }

    pub fn cache(&self) -> &CacheContext {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut CacheContext {
        &mut self.cache
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn has_pending(&self, task_id: &str) -> bool {
        self.pending.iter().any(|entry| entry.task_id == task_id)
    }

    /// Snapshot every cached view containing the task, then rewrite those
    /// views with the expected change. The real request is issued by the
    /// caller; the returned ticket resolves it via [`Coordinator::confirm`]
    /// or [`Coordinator::fail`].
    pub fn apply(&mut self, task_id: &str, change: TaskChange) -> MutationTicket {
        let keys = self.cache.keys_containing(task_id);
        let snapshots: Vec<(ViewKey, Vec<Task>)> = keys
            .iter()
            .filter_map(|key| self.cache.snapshot(key).map(|tasks| (key.clone(), tasks)))
            .collect();

        for key in &keys {
            self.cache.rewrite(key, task_id, &change);
        }

        let task_seq = {
            let seq = self.task_seqs.entry(task_id.to_string()).or_insert(0);
            *seq += 1;
            *seq
        };
        self.next_global_seq += 1;

        self.pending.push(InFlight {
            global_seq: self.next_global_seq,
            task_id: task_id.to_string(),
            task_seq,
            change,
            snapshots,
        });

        MutationTicket {
            task_id: task_id.to_string(),
            task_seq,
        }
    }

    /// Server accepted the mutation: the speculative values stay but every
    /// cached view is marked stale, since completion state is a membership
    /// predicate in several views and only a refetch is authoritative.
    pub fn confirm(&mut self, ticket: &MutationTicket) -> Resolution {
        let Some(index) = self.find(ticket) else {
            return Resolution::Stale;
        };
        self.pending.remove(index);
        self.cache.mark_all_stale();
        Resolution::Confirmed
    }

    /// Server rejected the mutation: restore that mutation's own
    /// snapshots verbatim, then replay every still-pending later
    /// speculative write on top so an independent pending effect is not
    /// erased. The caller re-surfaces the server's error unchanged.
    pub fn fail(&mut self, ticket: &MutationTicket) -> Resolution {
        let Some(index) = self.find(ticket) else {
            return Resolution::Stale;
        };
        let failed = self.pending.remove(index);

        let mut restored: Vec<ViewKey> = Vec::with_capacity(failed.snapshots.len());
        for (key, tasks) in failed.snapshots {
            self.cache.restore(key.clone(), tasks);
            restored.push(key);
        }

        for entry in &mut self.pending {
            if entry.global_seq < failed.global_seq {
                continue;
            }
            for key in &restored {
                let Some(tasks) = self.cache.snapshot(key) else {
                    continue;
                };
                let contains = tasks.iter().any(|task| task.id == entry.task_id);
                // this mutation's snapshot of the view predates the
                // rollback; refresh it (or drop it) before re-applying
                entry.snapshots.retain(|(snap_key, _)| snap_key != key);
                if contains {
                    entry.snapshots.push((key.clone(), tasks));
                    self.cache.rewrite(key, &entry.task_id, &entry.change);
                }
            }
        }

        self.cache.mark_all_stale();
        Resolution::RolledBack
    }

    fn find(&self, ticket: &MutationTicket) -> Option<usize> {
        self.pending.iter().position(|entry| {
            entry.task_id == ticket.task_id && entry.task_seq == ticket.task_seq
        })
    }
}

#![forbid(unsafe_code)]

//! Client-resident cache layer: applies a mutation's expected effect to
//! every cached view before the server confirms it, tracks per-mutation
//! undo snapshots, and reconciles with the authoritative response.

mod cache;
mod coordinator;
mod task;

pub use cache::{CacheContext, ViewKey};
pub use coordinator::{Coordinator, MutationTicket, Resolution};
pub use task::{Task, TaskChange};

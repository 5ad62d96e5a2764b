#![forbid(unsafe_code)]

mod store;

pub use store::{
    CreateListRequest, CreateTaskRequest, EditListRequest, EditTaskRequest, Entity, ListRecord,
    SqliteStore, StoreError, TaskQuery, TaskRecord,
};

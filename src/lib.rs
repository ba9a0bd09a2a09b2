//! Personal task tracker: a file-backed task list and the prompt that drives it.

pub mod error;
pub mod shell;
pub mod task;
pub mod task_store;
pub mod ui;

pub use error::{RecordError, Result, StoreError};
pub use shell::Shell;
pub use task::{Task, TaskRecord};
pub use task_store::{TaskFilter, TaskStore, DEFAULT_FILENAME};

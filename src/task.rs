use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::error::RecordError;

/// Timestamp layout for `created_at`, ISO-8601 with microseconds.
const CREATED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub title: String,
    pub description: String,
    pub priority: String, // "low", "medium", "high"
    pub due_date: String, // YYYY-MM-DD
    pub category: String,
    completed: bool,
    created_at: String,
}

impl Task {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        priority: impl Into<String>,
        due_date: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            priority: priority.into(),
            due_date: due_date.into(),
            category: category.into(),
            completed: false,
            created_at: Local::now().format(CREATED_AT_FORMAT).to_string(),
        }
    }

    pub fn created_at(&self) -> &str {
        &self.created_at
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    /// Completion only moves forward; there is no way to reopen a task.
    pub fn mark_complete(&mut self) {
        self.completed = true;
    }

    pub fn to_record(&self) -> TaskRecord {
        TaskRecord {
            title: Some(self.title.clone()),
            description: Some(self.description.clone()),
            priority: Some(self.priority.clone()),
            due_date: Some(self.due_date.clone()),
            category: Some(self.category.clone()),
            completed: Some(self.completed),
            created_at: Some(self.created_at.clone()),
        }
    }

    /// Rebuilds a task from its stored record. `created_at` is kept as stored.
    pub fn from_record(record: TaskRecord) -> Result<Self, RecordError> {
        Ok(Self {
            title: record.title.ok_or(RecordError::MissingField("title"))?,
            description: record
                .description
                .ok_or(RecordError::MissingField("description"))?,
            priority: record.priority.ok_or(RecordError::MissingField("priority"))?,
            due_date: record.due_date.ok_or(RecordError::MissingField("due_date"))?,
            category: record.category.ok_or(RecordError::MissingField("category"))?,
            completed: record
                .completed
                .ok_or(RecordError::MissingField("completed"))?,
            created_at: record
                .created_at
                .ok_or(RecordError::MissingField("created_at"))?,
        })
    }
}

/// One entry of the backing file. Every key is required when loading; absent
/// ones surface as `RecordError::MissingField` from [`Task::from_record`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<String>,
    pub category: Option<String>,
    pub completed: Option<bool>,
    pub created_at: Option<String>,
}

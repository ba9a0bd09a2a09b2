use crate::error::{Result, StoreError};
use crate::task::{Task, TaskRecord};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

pub const DEFAULT_FILENAME: &str = "tasks.json";

/// Equality constraints applied by [`TaskStore::list`]. Unset fields match
/// every task; set fields are combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub category: Option<String>,
    pub due_date: Option<String>,
}

impl TaskFilter {
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    pub fn matches(&self, task: &Task) -> bool {
        self.category.as_ref().map_or(true, |c| task.category == *c)
            && self.due_date.as_ref().map_or(true, |d| task.due_date == *d)
    }
}

/// Ordered task list mirrored to a JSON file.
///
/// Titles are not unique. `get`, `update` and `complete` act on the first task
/// with a matching title; `delete` removes all of them.
///
/// Every mutation rewrites the whole file in place. There is no temp-file and
/// rename step, so a crash during `save` can leave the file truncated.
#[derive(Debug)]
pub struct TaskStore {
    tasks: Vec<Task>,
    filename: PathBuf,
}

impl TaskStore {
    pub fn new(filename: impl Into<PathBuf>) -> Result<Self> {
        let filename = filename.into();
        let tasks = load(&filename)?;
        info!("Loaded {} tasks from {}", tasks.len(), filename.display());
        Ok(Self { tasks, filename })
    }

    pub fn filename(&self) -> &Path {
        &self.filename
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Reads the backing file again. A missing file yields an empty list.
    pub fn load(&self) -> Result<Vec<Task>> {
        load(&self.filename)
    }

    pub fn save(&self) -> Result<()> {
        let records: Vec<TaskRecord> = self.tasks.iter().map(Task::to_record).collect();
        let data =
            serde_json::to_string_pretty(&records).map_err(|source| StoreError::Serialize {
                path: self.filename.clone(),
                source,
            })?;
        fs::write(&self.filename, data).map_err(|source| StoreError::Io {
            path: self.filename.clone(),
            source,
        })?;
        debug!("Saved {} tasks to {}", self.tasks.len(), self.filename.display());
        Ok(())
    }

    pub fn add(&mut self, task: Task) -> Result<()> {
        debug!("Adding task '{}'", task.title);
        self.tasks.push(task);
        self.save()
    }

    /// Removes every task titled `title` and returns how many were removed.
    pub fn delete(&mut self, title: &str) -> Result<usize> {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.title != title);
        let removed = before - self.tasks.len();
        debug!("Deleted {} task(s) titled '{}'", removed, title);
        self.save()?;
        Ok(removed)
    }

    /// Replaces the first task titled `old_title`, keeping its position.
    /// Returns `false` and drops `new_task` when nothing matches.
    pub fn update(&mut self, old_title: &str, new_task: Task) -> Result<bool> {
        let replaced = match self.tasks.iter_mut().find(|t| t.title == old_title) {
            Some(task) => {
                debug!("Updating task '{}' -> '{}'", old_title, new_task.title);
                *task = new_task;
                true
            }
            None => {
                debug!("No task titled '{}' to update", old_title);
                false
            }
        };
        self.save()?;
        Ok(replaced)
    }

    pub fn get(&self, title: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.title == title)
    }

    /// Marks the first task titled `title` complete and saves. Nothing is
    /// written when no task matches.
    pub fn complete(&mut self, title: &str) -> Result<bool> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.title == title) else {
            debug!("No task titled '{}' to complete", title);
            return Ok(false);
        };
        task.mark_complete();
        debug!("Completed task '{}'", title);
        self.save()?;
        Ok(true)
    }

    pub fn list(&self, filter: &TaskFilter, show_completed: bool) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| filter.matches(t))
            .filter(|t| show_completed || !t.completed())
            .collect()
    }
}

fn load(path: &Path) -> Result<Vec<Task>> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!("{} not found, starting empty", path.display());
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let records: Vec<TaskRecord> =
        serde_json::from_str(&data).map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            Task::from_record(record).map_err(|source| StoreError::Record {
                path: path.to_path_buf(),
                index,
                source,
            })
        })
        .collect()
}

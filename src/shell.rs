//! Numbered-menu prompt over a [`TaskStore`].
//!
//! Input is forwarded to the store verbatim: priorities, dates and titles are
//! not checked here either.

use crate::task::Task;
use crate::task_store::{TaskFilter, TaskStore};
use crate::ui;
use anyhow::Result;
use std::io::{BufRead, Write};
use tracing::debug;

const MENU: &str = "\nTo-Do List Application
1. Add Task
2. Delete Task
3. Update Task
4. View Tasks
5. Mark Task as Complete
6. Exit";

pub struct Shell<'s, R, W> {
    store: &'s mut TaskStore,
    input: R,
    output: W,
    board: bool,
}

impl<'s, R: BufRead, W: Write> Shell<'s, R, W> {
    pub fn new(store: &'s mut TaskStore, input: R, output: W) -> Self {
        Self {
            store,
            input,
            output,
            board: false,
        }
    }

    /// Offer the full-screen board after listing tasks. Only useful when the
    /// shell is attached to a real terminal.
    pub fn with_board(mut self, board: bool) -> Self {
        self.board = board;
        self
    }

    /// Runs until the user picks Exit or input ends.
    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.output, "{MENU}")?;
            let Some(choice) = self.prompt("Enter your choice: ")? else {
                break;
            };
            debug!("Menu choice '{}'", choice);

            let keep_going = match choice.as_str() {
                "1" => self.add()?,
                "2" => self.delete()?,
                "3" => self.update()?,
                "4" => self.view()?,
                "5" => self.complete()?,
                "6" => {
                    writeln!(self.output, "Exiting...")?;
                    false
                }
                _ => {
                    writeln!(self.output, "Invalid choice. Please try again.")?;
                    true
                }
            };
            if !keep_going {
                break;
            }
        }
        Ok(())
    }

    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }

    /// Prompts showing `current`; blank input keeps it.
    fn prompt_or(&mut self, label: &str, current: &str) -> Result<Option<String>> {
        Ok(self
            .prompt(&format!("{label} ({current}): "))?
            .map(|value| if value.is_empty() { current.to_string() } else { value }))
    }

    fn add(&mut self) -> Result<bool> {
        let Some(title) = self.prompt("Title: ")? else {
            return Ok(false);
        };
        let Some(description) = self.prompt("Description: ")? else {
            return Ok(false);
        };
        let Some(priority) = self.prompt("Priority (low, medium, high): ")? else {
            return Ok(false);
        };
        let Some(due_date) = self.prompt("Due Date (YYYY-MM-DD): ")? else {
            return Ok(false);
        };
        let Some(category) = self.prompt("Category: ")? else {
            return Ok(false);
        };

        self.store
            .add(Task::new(title, description, priority, due_date, category))?;
        writeln!(self.output, "Task added successfully.")?;
        Ok(true)
    }

    fn delete(&mut self) -> Result<bool> {
        let Some(title) = self.prompt("Enter the title of the task to delete: ")? else {
            return Ok(false);
        };
        self.store.delete(&title)?;
        writeln!(self.output, "Task deleted successfully.")?;
        Ok(true)
    }

    fn update(&mut self) -> Result<bool> {
        let Some(old_title) = self.prompt("Enter the title of the task to update: ")? else {
            return Ok(false);
        };
        let Some(current) = self.store.get(&old_title).cloned() else {
            writeln!(self.output, "Task not found.")?;
            return Ok(true);
        };

        let Some(title) = self.prompt_or("Title", &current.title)? else {
            return Ok(false);
        };
        let Some(description) = self.prompt_or("Description", &current.description)? else {
            return Ok(false);
        };
        let Some(priority) = self.prompt_or("Priority", &current.priority)? else {
            return Ok(false);
        };
        let Some(due_date) = self.prompt_or("Due Date", &current.due_date)? else {
            return Ok(false);
        };
        let Some(category) = self.prompt_or("Category", &current.category)? else {
            return Ok(false);
        };

        // The replacement is a fresh task: new timestamp, not completed.
        let task = Task::new(title, description, priority, due_date, category);
        self.store.update(&old_title, task)?;
        writeln!(self.output, "Task updated successfully.")?;
        Ok(true)
    }

    fn view(&mut self) -> Result<bool> {
        let Some(show_completed) = self.prompt("Show completed tasks? (yes/no): ")? else {
            return Ok(false);
        };
        let show_completed = show_completed.eq_ignore_ascii_case("yes");

        let mut filter = TaskFilter::default();
        let Some(category) = self.prompt("Filter by category (leave blank for no filter): ")?
        else {
            return Ok(false);
        };
        if !category.is_empty() {
            filter = filter.category(category);
        }
        let Some(due_date) =
            self.prompt("Filter by due date (YYYY-MM-DD, leave blank for no filter): ")?
        else {
            return Ok(false);
        };
        if !due_date.is_empty() {
            filter = filter.due_date(due_date);
        }

        let tasks = self.store.list(&filter, show_completed);
        if tasks.is_empty() {
            writeln!(self.output, "No tasks found.")?;
            return Ok(true);
        }
        for task in &tasks {
            writeln!(
                self.output,
                "Title: {}, Description: {}, Priority: {}, Due Date: {}, Category: {}, Completed: {}",
                task.title,
                task.description,
                task.priority,
                task.due_date,
                task.category,
                task.completed(),
            )?;
        }

        if self.board {
            write!(self.output, "Open board view? (yes/no): ")?;
            self.output.flush()?;
            let mut answer = String::new();
            if self.input.read_line(&mut answer)? == 0 {
                return Ok(false);
            }
            if answer.trim_end_matches(['\n', '\r']).eq_ignore_ascii_case("yes") {
                ui::show_board(&tasks, show_completed)?;
            }
        }
        Ok(true)
    }

    fn complete(&mut self) -> Result<bool> {
        let Some(title) = self.prompt("Enter the title of the task to mark as complete: ")? else {
            return Ok(false);
        };
        if self.store.complete(&title)? {
            writeln!(self.output, "Task marked as complete.")?;
        } else {
            writeln!(self.output, "Task not found.")?;
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::tempdir;

    fn run_script(store: &mut TaskStore, script: &str) -> Result<String> {
        let mut output = Vec::new();
        Shell::new(store, Cursor::new(script.as_bytes()), &mut output).run()?;
        Ok(String::from_utf8(output)?)
    }

    #[test]
    fn test_add_and_view() -> Result<()> {
        let temp = tempdir()?;
        let mut store = TaskStore::new(temp.path().join("tasks.json"))?;

        let output = run_script(
            &mut store,
            "1\nWrite report\nQ3 numbers\nhigh\n2024-01-01\nwork\n4\nyes\n\n\n6\n",
        )?;

        assert!(output.contains("Task added successfully."));
        assert!(output.contains(
            "Title: Write report, Description: Q3 numbers, Priority: high, \
             Due Date: 2024-01-01, Category: work, Completed: false"
        ));
        assert!(output.ends_with("Exiting...\n"));
        assert_eq!(store.tasks().len(), 1);
        Ok(())
    }

    #[test]
    fn test_update_keeps_blank_fields() -> Result<()> {
        let temp = tempdir()?;
        let mut store = TaskStore::new(temp.path().join("tasks.json"))?;
        let mut original = Task::new("old", "desc", "low", "2024-01-01", "home");
        original.mark_complete();
        store.add(original)?;

        let output = run_script(&mut store, "3\nold\nnew\n\nhigh\n\n\n6\n")?;

        assert!(output.contains("Title (old): "));
        assert!(output.contains("Task updated successfully."));
        let task = &store.tasks()[0];
        assert_eq!(task.title, "new");
        assert_eq!(task.description, "desc");
        assert_eq!(task.priority, "high");
        assert_eq!(task.due_date, "2024-01-01");
        assert_eq!(task.category, "home");
        assert!(!task.completed());
        Ok(())
    }

    #[test]
    fn test_not_found_messages() -> Result<()> {
        let temp = tempdir()?;
        let mut store = TaskStore::new(temp.path().join("tasks.json"))?;

        let output = run_script(&mut store, "3\nmissing\n5\nmissing\n4\nno\n\n\n6\n")?;

        assert_eq!(output.matches("Task not found.").count(), 2);
        assert!(output.contains("No tasks found."));
        Ok(())
    }

    #[test]
    fn test_complete_and_filter_hides_done() -> Result<()> {
        let temp = tempdir()?;
        let mut store = TaskStore::new(temp.path().join("tasks.json"))?;
        store.add(Task::new("a", "", "low", "2024-01-01", "work"))?;
        store.add(Task::new("b", "", "low", "2024-01-01", "work"))?;

        let output = run_script(&mut store, "5\na\n4\nNO\nwork\n2024-01-01\n6\n")?;

        assert!(output.contains("Task marked as complete."));
        assert!(!output.contains("Title: a,"));
        assert!(output.contains("Title: b,"));
        assert!(store.get("a").is_some_and(|t| t.completed()));
        Ok(())
    }

    #[test]
    fn test_delete_reports_success_even_without_match() -> Result<()> {
        let temp = tempdir()?;
        let mut store = TaskStore::new(temp.path().join("tasks.json"))?;
        store.add(Task::new("a", "", "low", "", ""))?;

        let output = run_script(&mut store, "2\nnothing\n2\na\n6\n")?;

        assert_eq!(output.matches("Task deleted successfully.").count(), 2);
        assert!(store.tasks().is_empty());
        Ok(())
    }

    #[test]
    fn test_input_is_kept_verbatim() -> Result<()> {
        let temp = tempdir()?;
        let mut store = TaskStore::new(temp.path().join("tasks.json"))?;

        let output = run_script(
            &mut store,
            "1\n  Buy milk  \n desc \nlow\n2024-01-01\nhome\n5\nBuy milk\n5\n  Buy milk  \n 6\n6\n",
        )?;

        let task = &store.tasks()[0];
        assert_eq!(task.title, "  Buy milk  ");
        assert_eq!(task.description, " desc ");
        assert_eq!(output.matches("Task not found.").count(), 1);
        assert!(output.contains("Task marked as complete."));
        assert!(task.completed());
        assert_eq!(output.matches("Invalid choice. Please try again.").count(), 1);
        assert!(output.ends_with("Exiting...\n"));
        Ok(())
    }

    #[test]
    fn test_invalid_choice_reprompts_and_eof_exits() -> Result<()> {
        let temp = tempdir()?;
        let mut store = TaskStore::new(temp.path().join("tasks.json"))?;

        let output = run_script(&mut store, "9\n")?;

        assert!(output.contains("Invalid choice. Please try again."));
        assert_eq!(output.matches("6. Exit").count(), 2);
        assert!(!output.contains("Exiting..."));
        Ok(())
    }
}

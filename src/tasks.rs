//! Focus task list.
//!
//! A small ordered list of things to work on during a session. New tasks go to
//! the front. The whole list is snapshotted into history when a session
//! completes.

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Shown in place of the list when there are no tasks.
pub const EMPTY_PLACEHOLDER: &str = "Add a few tasks you want to stay focused on.";

static LAST_ID: AtomicU64 = AtomicU64::new(0);

/// Generates a task id from the current time and a process-wide counter.
pub fn create_id() -> String {
    let seq = LAST_ID.fetch_add(1, Ordering::Relaxed) + 1;
    format!("{}-{:x}", Local::now().timestamp_millis(), seq)
}

/// A single task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Stable identifier.
    pub id: String,
    /// What to do.
    pub text: String,
    /// Checked off.
    pub done: bool,
}

/// Ordered task list, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps tasks loaded from storage.
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    /// Adds a task at the front. Returns its id, or `None` if `text` is blank.
    pub fn add(&mut self, text: &str) -> Option<String> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let task = Task {
            id: create_id(),
            text: text.to_string(),
            done: false,
        };
        let id = task.id.clone();
        self.tasks.insert(0, task);
        Some(id)
    }

    /// Sets the done flag of the task with `id`. Returns whether it exists.
    pub fn toggle(&mut self, id: &str, done: bool) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.done = done;
                true
            }
            None => false,
        }
    }

    /// Removes the task with `id`. Returns whether it existed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    /// A copy of the current tasks.
    pub fn snapshot(&self) -> Vec<Task> {
        self.tasks.clone()
    }

    /// Number of tasks checked off.
    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.done).count()
    }

    /// The tasks, newest first.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Task at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    /// Number of tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

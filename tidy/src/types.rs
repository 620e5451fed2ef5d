//! Domain types for the to-do list.
//!
//! A list is an ordered collection of tasks. Completing a task also hides it;
//! hidden tasks stay in the list and count toward the summary, but are left
//! out of the visible view unless `show_hidden` is set.

use crate::schedule::{Category, ScheduledTime};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use tidy_macros::Action;

/// Identifier of a task, unique within a list
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(u64);

impl TaskId {
    /// Wraps a raw identifier
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Input for a new task, before an id is assigned
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewTask {
    /// Task text
    pub text: String,
    /// Category, `school` unless chosen
    pub category: Category,
    /// Optional scheduled date
    pub date: Option<NaiveDate>,
    /// Optional scheduled time
    pub time: Option<ScheduledTime>,
}

impl NewTask {
    /// Creates a draft with the given text and default fields
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Sets the category
    #[must_use]
    pub const fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// Sets the scheduled date
    #[must_use]
    pub const fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Sets the scheduled time
    #[must_use]
    pub const fn with_time(mut self, time: ScheduledTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Whether the text is empty or only whitespace
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// A single task
///
/// Serialized through the storage record form, see [`crate::persistence`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "crate::persistence::TaskRecord", into = "crate::persistence::TaskRecord")]
pub struct Task {
    /// Unique identifier
    pub id: TaskId,
    /// Task text
    pub text: String,
    /// Whether the task is completed
    pub completed: bool,
    /// Category
    pub category: Category,
    /// Scheduled date
    pub date: Option<NaiveDate>,
    /// Scheduled time
    pub time: Option<ScheduledTime>,
}

impl Task {
    /// Creates an open task from a draft
    #[must_use]
    pub fn new(id: TaskId, draft: NewTask) -> Self {
        Self {
            id,
            text: draft.text,
            completed: false,
            category: draft.category,
            date: draft.date,
            time: draft.time,
        }
    }

    /// Hidden tasks are exactly the completed ones
    #[must_use]
    pub const fn hidden(&self) -> bool {
        self.completed
    }

    /// Flips completion, and with it visibility
    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }

    /// Date and time joined for display, `None` if neither is set
    #[must_use]
    pub fn schedule_label(&self) -> Option<String> {
        match (self.date, self.time) {
            (Some(date), Some(time)) => Some(format!("{} {time}", date.format("%Y-%m-%d"))),
            (Some(date), None) => Some(date.format("%Y-%m-%d").to_string()),
            (None, Some(time)) => Some(time.to_string()),
            (None, None) => None,
        }
    }
}

/// Completed and total task counts
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    /// Completed tasks
    pub completed: usize,
    /// All tasks, hidden included
    pub total: usize,
}

impl Summary {
    /// Tasks not yet completed
    #[must_use]
    pub const fn remaining(self) -> usize {
        self.total - self.completed
    }

    /// Share of completed tasks in `0.0..=1.0`, `0.0` for an empty list
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // task counts stay far below 2^52
    pub fn completion_ratio(self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {} tasks completed", self.completed, self.total)
    }
}

/// State of the to-do list
#[derive(Clone, Debug, Default)]
pub struct TodoState {
    /// Tasks in insertion order
    pub tasks: Vec<Task>,
    /// Id the next added task receives
    pub next_id: u64,
    /// Set once `next_id` can no longer advance; further adds are refused
    pub ids_exhausted: bool,
    /// Whether hidden tasks are included in the visible view
    pub show_hidden: bool,
    /// Bumped on every change that must reach storage
    pub revision: u64,
    /// Highest revision known to be written
    pub persisted_revision: Option<u64>,
    /// Whether a load has finished, successfully or not
    pub loaded: bool,
    /// The stored list could not be read, so automatic writes are held back
    /// until a load succeeds or a write is requested explicitly
    pub writes_held: bool,
}

impl TodoState {
    /// Creates a new empty state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of tasks
    #[must_use]
    pub fn count(&self) -> usize {
        self.tasks.len()
    }

    /// Returns the number of completed tasks
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|task| task.completed).count()
    }

    /// Completed and total counts
    #[must_use]
    pub fn summary(&self) -> Summary {
        Summary {
            completed: self.completed_count(),
            total: self.count(),
        }
    }

    /// Returns a task by id
    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Returns a task by id, mutably
    pub fn get_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id == id)
    }

    /// Checks if a task exists
    #[must_use]
    pub fn exists(&self, id: TaskId) -> bool {
        self.get(id).is_some()
    }

    /// Tasks to display: all of them when `show_hidden` is set, otherwise
    /// only the ones that are not hidden
    pub fn visible_tasks(&self) -> impl Iterator<Item = &Task> {
        let show_hidden = self.show_hidden;
        self.tasks
            .iter()
            .filter(move |task| show_hidden || !task.hidden())
    }

    /// Appends a task built from the draft, returning its new id
    ///
    /// Returns `None` without touching the list once every id is used.
    pub fn insert(&mut self, draft: NewTask) -> Option<TaskId> {
        if self.ids_exhausted {
            return None;
        }
        let id = TaskId::new(self.next_id);
        match self.next_id.checked_add(1) {
            Some(next) => self.next_id = next,
            None => self.ids_exhausted = true,
        }
        self.tasks.push(Task::new(id, draft));
        Some(id)
    }

    /// Removes a task, returning it if it existed
    pub fn remove(&mut self, id: TaskId) -> Option<Task> {
        let position = self.tasks.iter().position(|task| task.id == id)?;
        Some(self.tasks.remove(position))
    }

    /// Replaces the list with loaded tasks
    ///
    /// Later duplicates of an id are dropped. `next_id` moves past the
    /// highest loaded id so new tasks never collide; a loaded `u64::MAX`
    /// exhausts the id space. Returns the number of duplicates dropped.
    pub fn replace_tasks(&mut self, tasks: Vec<Task>) -> usize {
        let incoming = tasks.len();
        let mut seen = HashSet::with_capacity(incoming);
        self.tasks = tasks.into_iter().filter(|task| seen.insert(task.id)).collect();

        if let Some(highest) = self.tasks.iter().map(|task| task.id.value()).max() {
            match highest.checked_add(1) {
                Some(next) => self.next_id = self.next_id.max(next),
                None => self.ids_exhausted = true,
            }
        }
        incoming - self.tasks.len()
    }
}

/// Commands and events of the to-do list
///
/// Commands come from the user. Events are fed back by storage effects.
#[derive(Action, Clone, Debug, PartialEq, Eq)]
pub enum TodoAction {
    // ========== Commands ==========
    /// Command: Read the list from storage
    #[command]
    Load,

    /// Command: Append a new task
    #[command]
    AddTask {
        /// The task to add
        draft: NewTask,
    },

    /// Command: Flip a task between open and completed
    #[command]
    ToggleComplete {
        /// Task to toggle
        id: TaskId,
    },

    /// Command: Remove a task
    #[command]
    DeleteTask {
        /// Task to delete
        id: TaskId,
    },

    /// Command: Include or exclude hidden tasks from the visible view
    #[command]
    SetShowHidden {
        /// Whether hidden tasks are shown
        show: bool,
    },

    /// Command: Write the current list to storage
    #[command]
    Persist,

    // ========== Events ==========
    /// Event: Stored list was read
    #[event]
    Loaded {
        /// Tasks in stored order, empty if nothing was stored
        tasks: Vec<Task>,
    },

    /// Event: Stored list was corrupted
    #[event]
    LoadFailed {
        /// Error message
        reason: String,
        /// Whether the unreadable payload was removed from storage
        discarded: bool,
    },

    /// Event: Backend could not be read; writes are held until a load succeeds
    #[event]
    ReadFailed {
        /// Error message
        reason: String,
    },

    /// Event: List was written
    #[event]
    Persisted {
        /// Revision that reached storage
        revision: u64,
    },

    /// Event: List could not be written
    #[event]
    PersistFailed {
        /// Revision that failed
        revision: u64,
        /// Error message
        reason: String,
    },
}

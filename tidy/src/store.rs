//! `TodoStore`: the to-do list behind a typed API.
//!
//! Mutations return once the in-memory change is applied. The returned
//! [`EffectHandle`] resolves when the triggered write has landed, for callers
//! that need to know.

use crate::chart::{self, ChartSegment};
use crate::reducer::{TodoEnvironment, TodoReducer};
use crate::types::{NewTask, Summary, Task, TaskId, TodoAction, TodoState};
use std::time::Duration;
use tidy_runtime::{EffectHandle, Store, StoreError};

type TodoRuntime = Store<TodoState, TodoAction, TodoEnvironment, TodoReducer>;

/// Handle to a to-do list; clones share the same list
#[derive(Clone)]
pub struct TodoStore {
    store: TodoRuntime,
}

impl TodoStore {
    /// Creates an empty, not yet loaded store
    #[must_use]
    pub fn new(environment: TodoEnvironment) -> Self {
        Self {
            store: Store::new(TodoState::new(), TodoReducer::new(), environment),
        }
    }

    /// Creates a store and waits for the stored list to load
    ///
    /// A missing or unreadable stored list is not an error; the store starts
    /// empty.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] only if the store was shut
    /// down concurrently.
    pub async fn open(environment: TodoEnvironment) -> Result<Self, StoreError> {
        let store = Self::new(environment);
        store.load().await?.wait().await;
        Ok(store)
    }

    /// Reads the stored list, replacing the in-memory one
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after [`shutdown`](Self::shutdown).
    pub async fn load(&self) -> Result<EffectHandle, StoreError> {
        self.store.send(TodoAction::Load).await
    }

    /// Appends a task; blank text is ignored
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after [`shutdown`](Self::shutdown).
    pub async fn add(&self, draft: NewTask) -> Result<EffectHandle, StoreError> {
        self.store.send(TodoAction::AddTask { draft }).await
    }

    /// Flips a task between open and completed; unknown ids are ignored
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after [`shutdown`](Self::shutdown).
    pub async fn toggle_complete(&self, id: TaskId) -> Result<EffectHandle, StoreError> {
        self.store.send(TodoAction::ToggleComplete { id }).await
    }

    /// Removes a task; unknown ids are ignored
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after [`shutdown`](Self::shutdown).
    pub async fn delete(&self, id: TaskId) -> Result<EffectHandle, StoreError> {
        self.store.send(TodoAction::DeleteTask { id }).await
    }

    /// Includes or excludes hidden tasks from [`visible_tasks`](Self::visible_tasks)
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after [`shutdown`](Self::shutdown).
    pub async fn set_show_hidden(&self, show: bool) -> Result<EffectHandle, StoreError> {
        self.store.send(TodoAction::SetShowHidden { show }).await
    }

    /// Writes the full list to storage
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after [`shutdown`](Self::shutdown).
    pub async fn persist(&self) -> Result<EffectHandle, StoreError> {
        self.store.send(TodoAction::Persist).await
    }

    /// All tasks in insertion order, hidden ones included
    pub async fn tasks(&self) -> Vec<Task> {
        self.store.state(|state| state.tasks.clone()).await
    }

    /// Tasks to display under the current `show_hidden` setting
    pub async fn visible_tasks(&self) -> Vec<Task> {
        self.store
            .state(|state| state.visible_tasks().cloned().collect())
            .await
    }

    /// A single task by id
    pub async fn task(&self, id: TaskId) -> Option<Task> {
        self.store.state(|state| state.get(id).cloned()).await
    }

    /// Completed and total counts
    pub async fn summary(&self) -> Summary {
        self.store.state(TodoState::summary).await
    }

    /// Whether hidden tasks are currently shown
    pub async fn show_hidden(&self) -> bool {
        self.store.state(|state| state.show_hidden).await
    }

    /// Completed versus remaining chart segments
    pub async fn completion_chart(&self) -> Vec<ChartSegment> {
        chart::completion_chart(self.summary().await)
    }

    /// Per-category chart segments
    pub async fn category_chart(&self) -> Vec<ChartSegment> {
        self.store.state(|state| chart::category_chart(&state.tasks)).await
    }

    /// A copy of the whole state
    pub async fn snapshot(&self) -> TodoState {
        self.store.state(TodoState::clone).await
    }

    /// Stops accepting commands and waits for pending writes
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownTimeout`] if writes are still running
    /// when `timeout` expires.
    pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
        self.store.shutdown(timeout).await
    }
}

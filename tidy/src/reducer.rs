//! Reducer logic for the to-do list.
//!
//! Commands mutate state synchronously. Any command that changes the list
//! bumps the revision and returns a write effect carrying a snapshot of the
//! list at that revision. Storage results come back as events.

use crate::persistence::{decode_tasks, encode_tasks, PersistGate, WriteOutcome};
use crate::types::{NewTask, TaskId, TodoAction, TodoState};
use std::fmt;
use std::sync::Arc;
use tidy_core::{effect::Effect, key_value::KeyValueStore, reducer::Reducer, smallvec, SmallVec};

/// Storage key used when none is configured
pub const DEFAULT_STORAGE_KEY: &str = "todos";

/// Environment dependencies for the to-do reducer
#[derive(Clone)]
pub struct TodoEnvironment {
    /// Backend the list is read from and written to
    pub storage: Arc<dyn KeyValueStore>,
    /// Key the list is stored under
    pub storage_key: String,
    gate: PersistGate,
}

impl TodoEnvironment {
    /// Creates an environment writing to `storage_key` in `storage`
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStore>, storage_key: impl Into<String>) -> Self {
        Self {
            storage,
            storage_key: storage_key.into(),
            gate: PersistGate::new(),
        }
    }

    /// Gate ordering this environment's writes
    #[must_use]
    pub const fn gate(&self) -> &PersistGate {
        &self.gate
    }
}

impl fmt::Debug for TodoEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TodoEnvironment")
            .field("storage_key", &self.storage_key)
            .finish_non_exhaustive()
    }
}

/// Reducer for the to-do list
#[derive(Clone, Debug, Default)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn add_task(
        state: &mut TodoState,
        draft: NewTask,
        env: &TodoEnvironment,
    ) -> SmallVec<[Effect<TodoAction>; 4]> {
        if draft.is_blank() {
            tracing::debug!("Ignoring task with blank text");
            return SmallVec::new();
        }

        let Some(id) = state.insert(draft) else {
            tracing::warn!(next_id = state.next_id, "Task ids exhausted, ignoring add");
            return SmallVec::new();
        };
        tracing::debug!(%id, "Task added");
        smallvec![Self::persist(state, env)]
    }

    fn toggle_complete(
        state: &mut TodoState,
        id: TaskId,
        env: &TodoEnvironment,
    ) -> SmallVec<[Effect<TodoAction>; 4]> {
        let Some(task) = state.get_mut(id) else {
            tracing::debug!(%id, "Ignoring toggle of unknown task");
            return SmallVec::new();
        };

        task.toggle();
        tracing::debug!(%id, completed = task.completed, "Task toggled");
        smallvec![Self::persist(state, env)]
    }

    fn delete_task(
        state: &mut TodoState,
        id: TaskId,
        env: &TodoEnvironment,
    ) -> SmallVec<[Effect<TodoAction>; 4]> {
        if state.remove(id).is_none() {
            tracing::debug!(%id, "Ignoring delete of unknown task");
            return SmallVec::new();
        }

        tracing::debug!(%id, "Task deleted");
        smallvec![Self::persist(state, env)]
    }

    /// Bump the revision and snapshot the list into a write effect
    ///
    /// Nothing is written while `writes_held` is set.
    fn persist(state: &mut TodoState, env: &TodoEnvironment) -> Effect<TodoAction> {
        if state.writes_held {
            tracing::warn!(key = %env.storage_key, "Stored task list was never read, not overwriting it");
            return Effect::None;
        }

        state.revision += 1;
        let revision = state.revision;

        let payload = match encode_tasks(&state.tasks) {
            Ok(payload) => payload,
            Err(error) => {
                tracing::warn!(revision, %error, "Could not encode task list, skipping write");
                return Effect::None;
            },
        };

        let storage = Arc::clone(&env.storage);
        let key = env.storage_key.clone();
        let gate = env.gate.clone();

        Effect::future(async move {
            match gate.write(storage.as_ref(), &key, revision, payload).await {
                Ok(WriteOutcome::Written) => Some(TodoAction::Persisted { revision }),
                Ok(WriteOutcome::Superseded) => None,
                Err(error) => Some(TodoAction::PersistFailed {
                    revision,
                    reason: error.to_string(),
                }),
            }
        })
    }

    /// Read and decode the stored list; corrupted payloads are removed
    fn load(env: &TodoEnvironment) -> Effect<TodoAction> {
        let storage = Arc::clone(&env.storage);
        let key = env.storage_key.clone();

        Effect::future(async move {
            let payload = match storage.get(&key).await {
                Ok(Some(payload)) => payload,
                Ok(None) => return Some(TodoAction::Loaded { tasks: Vec::new() }),
                Err(error) => {
                    return Some(TodoAction::ReadFailed {
                        reason: error.to_string(),
                    })
                },
            };

            match decode_tasks(&payload) {
                Ok(tasks) => Some(TodoAction::Loaded { tasks }),
                Err(error) => {
                    let discarded = match storage.remove(&key).await {
                        Ok(()) => true,
                        Err(remove_error) => {
                            tracing::warn!(%key, error = %remove_error, "Could not discard unreadable task list");
                            false
                        },
                    };
                    Some(TodoAction::LoadFailed {
                        reason: error.to_string(),
                        discarded,
                    })
                },
            }
        })
    }
}

impl Reducer for TodoReducer {
    type State = TodoState;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        tracing::trace!(action = action.name(), command = action.is_command(), "Reducing");

        match action {
            // ========== Commands ==========
            TodoAction::Load => smallvec![Self::load(env)],

            TodoAction::AddTask { draft } => Self::add_task(state, draft, env),

            TodoAction::ToggleComplete { id } => Self::toggle_complete(state, id, env),

            TodoAction::DeleteTask { id } => Self::delete_task(state, id, env),

            TodoAction::SetShowHidden { show } => {
                state.show_hidden = show;
                SmallVec::new()
            },

            TodoAction::Persist => {
                state.writes_held = false;
                smallvec![Self::persist(state, env)]
            },

            // ========== Events ==========
            TodoAction::Loaded { tasks } => {
                let dropped = state.replace_tasks(tasks);
                if dropped > 0 {
                    tracing::warn!(dropped, "Dropped stored tasks with duplicate ids");
                }
                state.loaded = true;
                state.writes_held = false;
                tracing::info!(tasks = state.count(), key = %env.storage_key, "Task list loaded");
                SmallVec::new()
            },

            TodoAction::LoadFailed { reason, discarded } => {
                state.replace_tasks(Vec::new());
                state.loaded = true;
                state.writes_held = false;
                tracing::warn!(%reason, discarded, key = %env.storage_key, "Starting with an empty task list");
                SmallVec::new()
            },

            TodoAction::ReadFailed { reason } => {
                state.loaded = true;
                state.writes_held = true;
                tracing::warn!(%reason, key = %env.storage_key, "Could not read task list, holding writes until a load succeeds");
                SmallVec::new()
            },

            TodoAction::Persisted { revision } => {
                state.persisted_revision = Some(state.persisted_revision.map_or(revision, |last| last.max(revision)));
                SmallVec::new()
            },

            TodoAction::PersistFailed { revision, reason } => {
                tracing::warn!(revision, %reason, key = %env.storage_key, "Failed to write task list");
                SmallVec::new()
            },
        }
    }
}

//! # Tidy
//!
//! A to-do list store built on the tidy reducer architecture.
//!
//! Tasks carry text, a completion flag, a category and an optional schedule.
//! Completing a task hides it from the default view without removing it.
//! Every change to the list rewrites it in full to a key-value backend, and
//! the list is read back once when the store opens.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tidy::{FileKeyValueStore, NewTask, TodoEnvironment, TodoStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let storage = Arc::new(FileKeyValueStore::new("/tmp/tidy"));
//! let store = TodoStore::open(TodoEnvironment::new(storage, "todos")).await?;
//!
//! store.add(NewTask::new("Buy milk")).await?.wait().await;
//! println!("{}", store.summary().await);
//! # Ok(())
//! # }
//! ```

pub mod chart;
pub mod config;
pub mod file_store;
pub mod persistence;
pub mod reducer;
pub mod schedule;
pub mod store;
pub mod types;
pub mod view;

pub use chart::ChartSegment;
pub use config::TodoConfig;
pub use file_store::FileKeyValueStore;
pub use persistence::{CodecError, PersistGate};
pub use reducer::{TodoEnvironment, TodoReducer, DEFAULT_STORAGE_KEY};
pub use schedule::{Category, FieldParseError, ScheduledTime};
pub use store::TodoStore;
pub use types::{NewTask, Summary, Task, TaskId, TodoAction, TodoState};

//! Key-value store trait for persisted application state.
//!
//! A key-value store holds whole serialized documents under string keys. The
//! to-do store writes its full task list under a single key after every
//! mutation and reads it back once at startup.
//!
//! # Implementations
//!
//! - `FileKeyValueStore` (in the `tidy` crate): one JSON file per key
//! - `InMemoryKeyValueStore` (in `tidy-testing`): `HashMap`-backed, for tests
//!
//! # Example
//!
//! ```no_run
//! use tidy_core::key_value::{KeyValueError, KeyValueStore};
//!
//! async fn example<S: KeyValueStore>(store: &S) -> Result<(), KeyValueError> {
//!     store.set("todos", "[]".to_string()).await?;
//!     let raw = store.get("todos").await?;
//!     assert_eq!(raw.as_deref(), Some("[]"));
//!     store.remove("todos").await?;
//!     Ok(())
//! }
//! ```

use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Boxed future returned by [`KeyValueStore`] methods
pub type KeyValueFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, KeyValueError>> + Send + 'a>>;

/// Errors that can occur during key-value store operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyValueError {
    /// The key is empty or contains characters the backend cannot store.
    #[error("Invalid key '{key}': {reason}")]
    InvalidKey {
        /// The rejected key
        key: String,
        /// Why the key was rejected
        reason: String,
    },

    /// The backend could not complete a read, write or delete.
    #[error("I/O error: {0}")]
    Io(String),

    /// The backend refused the operation (used by test doubles to simulate outages).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Key-value store abstraction for persisted state.
///
/// Values are opaque strings; serialization is the caller's concern.
/// `set` overwrites any previous value (last-writer-wins) and `remove` of a
/// missing key is not an error.
///
/// # Dyn Compatibility
///
/// This trait uses explicit `Pin<Box<dyn Future>>` returns instead of `async fn`
/// so it can be used as `Arc<dyn KeyValueStore>` inside effects.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, or `None` if the key is absent.
    ///
    /// # Errors
    ///
    /// Returns [`KeyValueError`] if the key is invalid or the backend fails.
    fn get<'a>(&'a self, key: &'a str) -> KeyValueFuture<'a, Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`KeyValueError`] if the key is invalid or the backend fails.
    fn set<'a>(&'a self, key: &'a str, value: String) -> KeyValueFuture<'a, ()>;

    /// Delete `key`. Deleting a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`KeyValueError`] if the key is invalid or the backend fails.
    fn remove<'a>(&'a self, key: &'a str) -> KeyValueFuture<'a, ()>;
}

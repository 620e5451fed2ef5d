//! # Tidy Testing
//!
//! Testing utilities and helpers for the tidy reducer architecture.
//!
//! This crate provides:
//! - [`ReducerTest`]: Given/When/Then harness for reducers
//! - [`assertions`]: Effect assertion helpers
//! - [`InMemoryKeyValueStore`]: Mock persistence backend with failure injection
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use tidy_testing::InMemoryKeyValueStore;
//!
//! #[tokio::test]
//! async fn test_add_persists() {
//!     let storage = InMemoryKeyValueStore::new();
//!     let store = TodoStore::open(TodoEnvironment::new(Arc::new(storage.clone()), "todos")).await?;
//!
//!     store.add(NewTask::new("Buy milk")).await?.wait().await;
//!     assert!(storage.contains_key("todos"));
//! }
//! ```

/// In-memory key-value store for tests
pub mod key_value_mocks;

/// Given/When/Then reducer harness
pub mod reducer_test;

// Re-export commonly used items
pub use key_value_mocks::InMemoryKeyValueStore;
pub use reducer_test::{assertions, ReducerTest};

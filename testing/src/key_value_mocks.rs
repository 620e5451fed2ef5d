//! In-memory key-value store for fast, deterministic tests.
//!
//! [`InMemoryKeyValueStore`] keeps values in a `HashMap` and can be told to
//! fail reads or writes, which is how tests exercise the storage-failure paths.

#![allow(clippy::unwrap_used)] // Test infrastructure uses unwrap for simplicity
#![allow(clippy::missing_panics_doc)] // Lock poisoning only follows a panicking test

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use tidy_core::key_value::{KeyValueError, KeyValueFuture, KeyValueStore};

/// In-memory key-value store for tests.
///
/// Clones share the same map, so a test can keep one clone for assertions
/// and hand another to the code under test.
///
/// # Example
///
/// ```
/// use tidy_core::key_value::KeyValueStore;
/// use tidy_testing::InMemoryKeyValueStore;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let storage = InMemoryKeyValueStore::new();
/// storage.set("todos", "[]".to_string()).await?;
///
/// assert_eq!(storage.raw("todos").as_deref(), Some("[]"));
/// assert_eq!(storage.write_count(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct InMemoryKeyValueStore {
    data: Arc<RwLock<HashMap<String, String>>>,
    fail_reads: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
    writes: Arc<AtomicUsize>,
}

impl InMemoryKeyValueStore {
    /// Create a new empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with one key, bypassing the write counter
    #[must_use]
    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.insert_raw(key, value);
        store
    }

    /// Put a value directly into the map without counting it as a write
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.data
            .write()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    /// Read a value directly, without going through the async trait
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.data.read().unwrap().get(key).cloned()
    }

    /// Check if a key exists
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.read().unwrap().contains_key(key)
    }

    /// Number of successful `set` calls so far
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Make subsequent `get` calls fail with [`KeyValueError::Unavailable`]
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent `set` and `remove` calls fail with [`KeyValueError::Unavailable`]
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<(), KeyValueError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(KeyValueError::Unavailable(
                "writes disabled for this test".to_string(),
            ));
        }
        Ok(())
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get<'a>(&'a self, key: &'a str) -> KeyValueFuture<'a, Option<String>> {
        Box::pin(async move {
            if self.fail_reads.load(Ordering::SeqCst) {
                return Err(KeyValueError::Unavailable(
                    "reads disabled for this test".to_string(),
                ));
            }
            Ok(self.raw(key))
        })
    }

    fn set<'a>(&'a self, key: &'a str, value: String) -> KeyValueFuture<'a, ()> {
        Box::pin(async move {
            self.check_writable()?;
            self.data.write().unwrap().insert(key.to_string(), value);
            self.writes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
    }

    fn remove<'a>(&'a self, key: &'a str) -> KeyValueFuture<'a, ()> {
        Box::pin(async move {
            self.check_writable()?;
            self.data.write().unwrap().remove(key);
            Ok(())
        })
    }
}

//! Storage format and write ordering for the task list.
//!
//! The list is stored under a single key as a JSON array of task records:
//!
//! ```json
//! [{"id":0,"text":"Buy milk","completed":false,"hidden":false,
//!   "category":"school","date":"2024-10-05","time":"14:30"}]
//! ```
//!
//! Reads are lenient: missing fields take defaults, unknown fields are
//! ignored, and `hidden` is recomputed from `completed`.

use crate::schedule::{category_or_default, optional_date, Category, ScheduledTime};
use crate::types::{Task, TaskId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tidy_core::key_value::{KeyValueError, KeyValueStore};
use tokio::sync::Mutex;

/// Errors from encoding or decoding the stored list
#[derive(Error, Debug)]
pub enum CodecError {
    /// Stored payload is not a valid task list
    #[error("corrupted task list: {0}")]
    Corrupted(#[source] serde_json::Error),

    /// Task list could not be serialized
    #[error("failed to encode task list: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Storage form of a [`Task`]
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct TaskRecord {
    id: TaskId,
    #[serde(default)]
    text: String,
    #[serde(default)]
    completed: bool,
    // Written for readers that still expect it, never trusted on read.
    #[serde(default)]
    hidden: bool,
    #[serde(default, deserialize_with = "category_or_default")]
    category: Category,
    #[serde(default, with = "optional_date")]
    date: Option<NaiveDate>,
    #[serde(default)]
    time: Option<ScheduledTime>,
}

impl From<TaskRecord> for Task {
    fn from(record: TaskRecord) -> Self {
        Self {
            id: record.id,
            text: record.text,
            completed: record.completed,
            category: record.category,
            date: record.date,
            time: record.time,
        }
    }
}

impl From<Task> for TaskRecord {
    fn from(task: Task) -> Self {
        Self {
            hidden: task.hidden(),
            id: task.id,
            text: task.text,
            completed: task.completed,
            category: task.category,
            date: task.date,
            time: task.time,
        }
    }
}

/// Serialize tasks to the stored JSON array
///
/// # Errors
///
/// Returns [`CodecError::Encode`] if serialization fails.
pub fn encode_tasks(tasks: &[Task]) -> Result<String, CodecError> {
    serde_json::to_string(tasks).map_err(CodecError::Encode)
}

/// Parse the stored JSON array back into tasks, keeping stored order
///
/// Records with missing or blank text are dropped.
///
/// # Errors
///
/// Returns [`CodecError::Corrupted`] if the payload is not a JSON array of
/// task records.
pub fn decode_tasks(payload: &str) -> Result<Vec<Task>, CodecError> {
    let tasks: Vec<Task> = serde_json::from_str(payload).map_err(CodecError::Corrupted)?;
    Ok(tasks
        .into_iter()
        .filter(|task| {
            let keep = !task.text.trim().is_empty();
            if !keep {
                tracing::warn!(id = %task.id, "Dropping stored task with blank text");
            }
            keep
        })
        .collect())
}

/// Result of a gated write
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The payload reached storage
    Written,
    /// A newer revision was already written, so this one was skipped
    Superseded,
}

/// Serializes list writes and drops stale ones.
///
/// Every write carries the revision it snapshots. Writes run one at a time,
/// and a write whose revision is not newer than the last one written is
/// skipped, so storage never moves backwards even when effects finish out
/// of order.
#[derive(Clone, Debug, Default)]
pub struct PersistGate {
    last_written: Arc<Mutex<Option<u64>>>,
}

impl PersistGate {
    /// Creates a gate with nothing written yet
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Highest revision written through this gate
    pub async fn last_written(&self) -> Option<u64> {
        *self.last_written.lock().await
    }

    /// Write `payload` under `key` unless a newer revision already landed
    ///
    /// # Errors
    ///
    /// Returns the storage error if the write fails. The gate is left
    /// unchanged, so a later revision can still be written.
    pub async fn write(
        &self,
        storage: &dyn KeyValueStore,
        key: &str,
        revision: u64,
        payload: String,
    ) -> Result<WriteOutcome, KeyValueError> {
        let mut last_written = self.last_written.lock().await;

        if last_written.is_some_and(|last| revision <= last) {
            tracing::trace!(revision, "Skipping superseded write");
            return Ok(WriteOutcome::Superseded);
        }

        storage.set(key, payload).await?;
        *last_written = Some(revision);
        Ok(WriteOutcome::Written)
    }
}

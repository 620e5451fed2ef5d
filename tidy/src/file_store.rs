//! File-backed [`KeyValueStore`]: one `<key>.json` file per key in a directory.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tidy_core::key_value::{KeyValueError, KeyValueFuture, KeyValueStore};

/// Stores each key as `<dir>/<key>.json`
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// reader never sees a half-written list.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    /// Creates a store rooted at `dir`; the directory is created on first write
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the files
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, KeyValueError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get<'a>(&'a self, key: &'a str) -> KeyValueFuture<'a, Option<String>> {
        Box::pin(async move {
            let path = self.path_for(key)?;
            match tokio::fs::read_to_string(&path).await {
                Ok(contents) => Ok(Some(contents)),
                Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
                Err(error) => Err(KeyValueError::Io(format!(
                    "failed to read {}: {error}",
                    path.display()
                ))),
            }
        })
    }

    fn set<'a>(&'a self, key: &'a str, value: String) -> KeyValueFuture<'a, ()> {
        Box::pin(async move {
            let path = self.path_for(key)?;
            tokio::fs::create_dir_all(&self.dir).await.map_err(|error| {
                KeyValueError::Io(format!("failed to create {}: {error}", self.dir.display()))
            })?;

            let tmp = path.with_extension("json.tmp");
            tokio::fs::write(&tmp, value.as_bytes())
                .await
                .map_err(|error| KeyValueError::Io(format!("failed to write {}: {error}", tmp.display())))?;
            tokio::fs::rename(&tmp, &path).await.map_err(|error| {
                KeyValueError::Io(format!(
                    "failed to rename {} -> {}: {error}",
                    tmp.display(),
                    path.display()
                ))
            })
        })
    }

    fn remove<'a>(&'a self, key: &'a str) -> KeyValueFuture<'a, ()> {
        Box::pin(async move {
            let path = self.path_for(key)?;
            match tokio::fs::remove_file(&path).await {
                Ok(()) => Ok(()),
                Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
                Err(error) => Err(KeyValueError::Io(format!(
                    "failed to remove {}: {error}",
                    path.display()
                ))),
            }
        })
    }
}

fn validate_key(key: &str) -> Result<(), KeyValueError> {
    let invalid = |reason: &str| KeyValueError::InvalidKey {
        key: key.to_string(),
        reason: reason.to_string(),
    };

    if key.trim().is_empty() {
        return Err(invalid("key is required"));
    }
    if key.contains('/') || key.contains('\\') {
        return Err(invalid("must not contain path separators"));
    }
    if key.contains("..") {
        return Err(invalid("must not contain '..'"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[tokio::test]
    async fn missing_key_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileKeyValueStore::new(dir.path().join("never-created"));

        assert_eq!(storage.get("todos").await.unwrap(), None);
        storage.remove("todos").await.unwrap();
    }

    #[tokio::test]
    async fn set_creates_directory_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileKeyValueStore::new(dir.path().join("nested").join("data"));

        storage.set("todos", "[1]".to_string()).await.unwrap();
        storage.set("todos", "[2]".to_string()).await.unwrap();

        assert_eq!(storage.get("todos").await.unwrap().as_deref(), Some("[2]"));
        assert!(storage.dir().join("todos.json").is_file());
        assert!(!storage.dir().join("todos.json.tmp").exists());
    }

    #[tokio::test]
    async fn remove_deletes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileKeyValueStore::new(dir.path());

        storage.set("todos", "[]".to_string()).await.unwrap();
        storage.remove("todos").await.unwrap();

        assert_eq!(storage.get("todos").await.unwrap(), None);
    }

    #[tokio::test]
    async fn rejects_keys_that_escape_the_directory() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileKeyValueStore::new(dir.path());

        for key in ["", "  ", "../todos", "a/b", "a\\b", ".."] {
            let result = storage.set(key, "[]".to_string()).await;
            assert!(
                matches!(result, Err(KeyValueError::InvalidKey { .. })),
                "key {key:?} should be rejected"
            );
        }
    }
}

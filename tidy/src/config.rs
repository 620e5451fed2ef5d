//! Configuration management for the tidy binary.
//!
//! Loads configuration from environment variables with sensible defaults.
//! Command-line flags override what is loaded here.

use crate::reducer::DEFAULT_STORAGE_KEY;
use directories::ProjectDirs;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoConfig {
    /// Directory holding the stored list
    pub data_dir: PathBuf,
    /// Key the list is stored under
    pub storage_key: String,
    /// Seconds to wait for pending writes on exit
    pub shutdown_timeout: u64,
    /// Tracing filter directives
    pub log_filter: String,
}

impl TodoConfig {
    /// Load configuration from the process environment
    ///
    /// - `TIDY_DATA_DIR`: data directory (default: the platform data dir)
    /// - `TIDY_STORAGE_KEY`: storage key (default: `todos`)
    /// - `TIDY_SHUTDOWN_TIMEOUT_SECS`: exit flush timeout (default: 5)
    /// - `RUST_LOG`: tracing filter (default: `tidy=info`)
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            data_dir: lookup("TIDY_DATA_DIR")
                .filter(|dir| !dir.trim().is_empty())
                .map_or_else(default_data_dir, PathBuf::from),
            storage_key: lookup("TIDY_STORAGE_KEY")
                .filter(|key| !key.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string()),
            shutdown_timeout: lookup("TIDY_SHUTDOWN_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(5),
            log_filter: lookup("RUST_LOG").unwrap_or_else(|| "tidy=info".to_string()),
        }
    }

    /// Shutdown timeout as a [`Duration`]
    #[must_use]
    pub const fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout)
    }
}

impl Default for TodoConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn default_data_dir() -> PathBuf {
    ProjectDirs::from("", "", "tidy")
        .map_or_else(|| PathBuf::from(".tidy"), |dirs| dirs.data_dir().to_path_buf())
}

//! # Configuration
//!
//! All state lives under one data directory holding two JSON files, one per
//! entity type. The [`StorageConfig`] is built once in `main` and handed to
//! each store; nothing reads paths from ambient globals.

use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Location of the flat-file storage.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
        }
    }

    /// OS-appropriate data directory, falling back to `./data` when the
    /// platform offers no home directory (containers, CI).
    pub fn default_data_dir() -> PathBuf {
        ProjectDirs::from("", "", "solveit")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("data"))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn problems_file(&self) -> PathBuf {
        self.data_dir.join("problems.json")
    }

    pub fn users_file(&self) -> PathBuf {
        self.data_dir.join("users.json")
    }
}

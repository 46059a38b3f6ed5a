use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tracing::warn;

/// One JSON-array-in-a-file collection of records.
///
/// Generic over the record type; [`super::ProblemStore`] and
/// [`super::UserStore`] instantiate it for their rows. Reads are tolerant
/// (missing or malformed files load as empty), writes rewrite the whole
/// file pretty-printed.
pub(crate) struct JsonCollection<T> {
    path: PathBuf,
    _record: PhantomData<T>,
}

impl<T: Serialize + DeserializeOwned> JsonCollection<T> {
    /// Opens the collection, creating an empty file if none exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let collection = Self {
            path: path.as_ref().to_path_buf(),
            _record: PhantomData,
        };
        collection.ensure_initialized()?;
        Ok(collection)
    }

    /// Creates the backing file with an empty array if absent. Idempotent.
    fn ensure_initialized(&self) -> Result<()> {
        if !self.path.exists() {
            if let Some(parent) = self.path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&self.path, "[]")?;
        }
        Ok(())
    }

    /// Reads and parses the entire file. A missing file or malformed
    /// content yields an empty collection rather than an error; the next
    /// `save_all` rewrites a valid file.
    pub fn load_all(&self) -> Vec<T> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "collection unreadable, treating as empty");
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "collection malformed, treating as empty");
                Vec::new()
            }
        }
    }

    /// Overwrites the file with the full serialized collection,
    /// pretty-printed for human diffing.
    pub fn save_all(&self, records: &[T]) -> Result<()> {
        let content = serde_json::to_string_pretty(records)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

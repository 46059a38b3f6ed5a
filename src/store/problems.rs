use super::collection::JsonCollection;
use crate::config::StorageConfig;
use crate::error::Result;
use crate::model::{Problem, ProblemPatch, Statistics};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A problem record as persisted: the record plus its owner.
///
/// The ownership tag lives here, on the storage row, not on [`Problem`]
/// itself. Rows written before accounts existed have no `user_id` and read
/// back with an empty one, so they simply never match a user filter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OwnedProblem {
    #[serde(flatten)]
    pub record: Problem,
    #[serde(default)]
    pub user_id: String,
}

/// Flat-file store for problem records.
pub struct ProblemStore {
    collection: JsonCollection<OwnedProblem>,
}

impl ProblemStore {
    pub fn open(config: &StorageConfig) -> Result<Self> {
        Ok(Self {
            collection: JsonCollection::open(config.problems_file())?,
        })
    }

    /// Every row in the store, all users included.
    pub fn load_all(&self) -> Vec<OwnedProblem> {
        self.collection.load_all()
    }

    /// Linear scan by record id alone, ignoring ownership.
    pub fn get_problem(&self, id: &str) -> Option<OwnedProblem> {
        self.collection
            .load_all()
            .into_iter()
            .find(|row| row.record.id == id)
    }

    /// Appends a row and rewrites the file.
    pub fn save_problem(&self, row: OwnedProblem) -> Result<OwnedProblem> {
        let mut rows = self.collection.load_all();
        rows.push(row.clone());
        self.collection.save_all(&rows)?;
        Ok(row)
    }

    /// Removes the row with the given id, ignoring ownership. The file is
    /// only rewritten when something was actually removed; returns whether
    /// a deletion occurred.
    pub fn delete_problem(&self, id: &str) -> Result<bool> {
        let mut rows = self.collection.load_all();
        let original_count = rows.len();
        rows.retain(|row| row.record.id != id);
        if rows.len() < original_count {
            self.collection.save_all(&rows)?;
            return Ok(true);
        }
        Ok(false)
    }

    /// All rows owned by `user_id`, in insertion order.
    pub fn get_user_problems(&self, user_id: &str) -> Vec<OwnedProblem> {
        self.collection
            .load_all()
            .into_iter()
            .filter(|row| row.user_id == user_id)
            .collect()
    }

    /// The row matching `(id, user_id)`, if any.
    pub fn get_user_problem(&self, id: &str, user_id: &str) -> Option<OwnedProblem> {
        self.collection
            .load_all()
            .into_iter()
            .find(|row| row.record.id == id && row.user_id == user_id)
    }

    /// Tags the record with its owner and appends it.
    pub fn save_user_problem(&self, record: Problem, user_id: &str) -> Result<OwnedProblem> {
        self.save_problem(OwnedProblem {
            record,
            user_id: user_id.to_string(),
        })
    }

    /// Applies `patch` to the row matching `(id, user_id)`, replacing it in
    /// place and rewriting the file. Returns `None` when no row matches;
    /// another user's row is indistinguishable from a nonexistent one.
    pub fn update_user_problem(
        &self,
        id: &str,
        user_id: &str,
        patch: &ProblemPatch,
    ) -> Result<Option<OwnedProblem>> {
        let mut rows = self.collection.load_all();
        let Some(position) = rows
            .iter()
            .position(|row| row.record.id == id && row.user_id == user_id)
        else {
            return Ok(None);
        };

        rows[position].record.apply(patch);
        let updated = rows[position].clone();
        self.collection.save_all(&rows)?;
        Ok(Some(updated))
    }

    /// Removes the row matching `(id, user_id)`. The file is only rewritten
    /// when something was removed; returns whether a deletion occurred.
    pub fn delete_user_problem(&self, id: &str, user_id: &str) -> Result<bool> {
        let mut rows = self.collection.load_all();
        let original_count = rows.len();
        rows.retain(|row| !(row.record.id == id && row.user_id == user_id));
        if rows.len() < original_count {
            self.collection.save_all(&rows)?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Single pass over the user's rows: total count plus per-category
    /// counts. Categories without records are absent from the map.
    pub fn get_user_statistics(&self, user_id: &str) -> Statistics {
        let rows = self.get_user_problems(user_id);
        let mut categories: BTreeMap<String, usize> = BTreeMap::new();
        for row in &rows {
            *categories.entry(row.record.category.clone()).or_insert(0) += 1;
        }
        Statistics {
            total_problems: rows.len(),
            total_categories: categories.len(),
            categories,
        }
    }
}

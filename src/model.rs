//! # Domain Model
//!
//! Record types for the two persisted collections. Both use time-derived
//! string ids (`YYYYmmddHHMMSS` plus microseconds), matching the stored data
//! format, and both tolerate older rows with missing fields: a problem
//! without a `category` reads as `"General"`, one without `updated_at` reads
//! as its creation time. Defaulting happens in exactly one place — here, at
//! construction and deserialization — never scattered through callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_CATEGORY: &str = "General";

/// Time-derived record identifier, unique at microsecond resolution.
pub(crate) fn time_id(now: DateTime<Utc>) -> String {
    now.format("%Y%m%d%H%M%S%6f").to_string()
}

/// One recorded problem and its solution.
///
/// Deliberately carries no owner: ownership tagging is the storage layer's
/// concern (see [`crate::store::OwnedProblem`]).
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Problem {
    pub id: String,
    pub problem: String,
    pub solution: String,
    pub category: String,
    pub timestamp: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Problem {
    pub fn new(problem: String, solution: String, category: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: time_id(now),
            problem,
            solution,
            category: category.unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            timestamp: now,
            updated_at: now,
        }
    }

    /// Applies the provided fields from `patch`, leaving absent ones
    /// unchanged, and advances `updated_at`.
    pub fn apply(&mut self, patch: &ProblemPatch) {
        if let Some(problem) = &patch.problem {
            self.problem = problem.clone();
        }
        if let Some(solution) = &patch.solution {
            self.solution = solution.clone();
        }
        if let Some(category) = &patch.category {
            self.category = category.clone();
        }
        self.updated_at = Utc::now();
    }
}

// Custom deserializer to handle legacy rows: `category` may be missing
// (defaults to "General") and `updated_at` may be missing (defaults to the
// row's own `timestamp`).
impl<'de> Deserialize<'de> for Problem {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let helper = ProblemHelper::deserialize(deserializer)?;
        let timestamp = helper.timestamp.unwrap_or_else(Utc::now);
        Ok(Problem {
            id: helper.id,
            problem: helper.problem,
            solution: helper.solution,
            category: helper
                .category
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            timestamp,
            updated_at: helper.updated_at.unwrap_or(timestamp),
        })
    }
}

#[derive(Deserialize)]
struct ProblemHelper {
    id: String,
    problem: String,
    solution: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
}

/// Partial update for a problem record. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProblemPatch {
    pub problem: Option<String>,
    pub solution: Option<String>,
    pub category: Option<String>,
}

/// A registered account. `password_hash` is an opaque digest; the plaintext
/// password is never persisted, and this struct never serializes into a
/// response — handlers return [`UserProfile`] instead.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: time_id(now),
            username,
            email,
            password_hash,
            created_at: now,
        }
    }
}

/// Public projection of a [`User`], safe to return to clients.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            created_at: user.created_at,
        }
    }
}

/// Aggregate counts over one user's problems. Categories with zero records
/// are absent from the map, never listed with 0.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Statistics {
    pub total_problems: usize,
    pub categories: BTreeMap<String, usize>,
    pub total_categories: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_problem_defaults_category() {
        let problem = Problem::new("P".into(), "S".into(), None);
        assert_eq!(problem.category, "General");
    }

    #[test]
    fn new_problem_keeps_explicit_category() {
        let problem = Problem::new("P".into(), "S".into(), Some("Rust".into()));
        assert_eq!(problem.category, "Rust");
    }

    #[test]
    fn new_problem_timestamps_match() {
        let problem = Problem::new("P".into(), "S".into(), None);
        assert_eq!(problem.updated_at, problem.timestamp);
    }

    #[test]
    fn apply_patches_only_provided_fields() {
        let mut problem = Problem::new("Old P".into(), "Old S".into(), Some("Cat".into()));

        std::thread::sleep(std::time::Duration::from_millis(10));
        problem.apply(&ProblemPatch {
            solution: Some("New S".into()),
            ..Default::default()
        });

        assert_eq!(problem.problem, "Old P");
        assert_eq!(problem.solution, "New S");
        assert_eq!(problem.category, "Cat");
        assert!(problem.updated_at > problem.timestamp);
    }

    #[test]
    fn apply_empty_patch_still_touches_updated_at() {
        let mut problem = Problem::new("P".into(), "S".into(), None);
        let before = problem.updated_at;

        std::thread::sleep(std::time::Duration::from_millis(10));
        problem.apply(&ProblemPatch::default());

        assert_eq!(problem.problem, "P");
        assert!(problem.updated_at >= before);
    }

    #[test]
    fn legacy_problem_without_category_or_updated_at() {
        let json = r#"{
            "id": "20240101120000000000",
            "problem": "It broke",
            "solution": "Turned it off and on",
            "timestamp": "2024-01-01T12:00:00Z"
        }"#;

        let loaded: Problem = serde_json::from_str(json).unwrap();
        assert_eq!(loaded.category, "General");
        assert_eq!(loaded.updated_at, loaded.timestamp);
    }

    #[test]
    fn problem_serialization_roundtrip() {
        let problem = Problem::new("P".into(), "S".into(), Some("Cat".into()));
        let json = serde_json::to_string(&problem).unwrap();
        let loaded: Problem = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, problem);
    }

    #[test]
    fn profile_never_carries_password_data() {
        let user = User::new("ana".into(), "ana@example.com".into(), "digest".into());
        let profile = UserProfile::from(&user);
        let json = serde_json::to_string(&profile).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("digest"));
    }

    #[test]
    fn time_ids_are_time_ordered() {
        let earlier = time_id("2024-01-01T12:00:00Z".parse().unwrap());
        let later = time_id("2024-01-01T12:00:01Z".parse().unwrap());
        assert!(earlier < later);
        assert_eq!(earlier.len(), 20);
    }
}

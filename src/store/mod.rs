//! # Storage Layer
//!
//! Two parallel, structurally identical stores back the application:
//! [`ProblemStore`] and [`UserStore`]. Each owns a single JSON file holding a
//! pretty-printed array of records, and each mutation is a whole-file
//! load → modify → rewrite cycle.
//!
//! ## Philosophy
//!
//! - **One file per entity type**: `problems.json` and `users.json` simulate
//!   single-table databases. Insertion order is preserved but carries no
//!   meaning.
//! - **Self-healing reads**: a missing or malformed file loads as an empty
//!   collection (logged, never propagated). Availability is preferred over
//!   failing the request; the next successful write restores a valid file.
//! - **No write protection**: rewrites are plain `fs::write` calls. A crash
//!   mid-write can corrupt the store, which the tolerant reader absorbs.
//! - **No locking**: concurrent mutations can lose updates. The deployment
//!   model is a single low-traffic process, and the code should stay that
//!   simple.
//!
//! ## Ownership filtering
//!
//! Problem records are scoped to their creator. The record type itself
//! carries no owner; the store persists [`OwnedProblem`] rows pairing a
//! `user_id` with the record, and every user-facing query or mutation
//! filters on the `(record id, user id)` pair. A caller can neither read nor
//! mutate another user's rows, enforced purely by this filter.

mod collection;
pub mod problems;
pub mod users;

pub use problems::{OwnedProblem, ProblemStore};
pub use users::UserStore;

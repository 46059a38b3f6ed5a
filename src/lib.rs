//! # SolveIt Architecture
//!
//! SolveIt is a personal problem/solution tracker: authenticated users record
//! issues they ran into and how they solved them, grouped by category, with
//! basic statistics and export. It is a **library with a thin server binary**,
//! not a server application that happens to contain some library code.
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  HTTP Layer (http/)                                         │
//! │  - axum router, extractors, status-code mapping             │
//! │  - The ONLY place that knows about requests and responses   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Auth Layer (auth/)                                         │
//! │  - Credential flows: signup, login, password change         │
//! │  - Password hashing and the in-process session table        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Whole-file JSON collections, one file per entity type    │
//! │  - Per-user ownership filtering for problem records         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything below `http/` is transport-agnostic: functions take normal Rust
//! values, return `Result`, and never assume an HTTP context. The binary
//! (`main.rs`) only parses arguments, initializes tracing, and serves the
//! router.
//!
//! ## Storage Model
//!
//! Persistence deliberately simulates a single-table database per entity:
//! every mutation loads the whole JSON array, modifies it in memory, and
//! rewrites the whole file. This is O(total records) per write and carries a
//! lost-update race between concurrent writers. Both are accepted: the
//! intended deployment is one low-traffic process holding personal data, and
//! the pretty-printed files stay human-diffable. A corrupt or missing file
//! loads as an empty collection rather than an error.

pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod model;
pub mod store;

pub use config::StorageConfig;
pub use error::{Error, Result};

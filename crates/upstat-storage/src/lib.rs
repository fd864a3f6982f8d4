//! # upstat-storage
//!
//! SQLite persistence for per-extension analysis results.
//! One row per extension, overwritten on every run.

pub mod engine;
pub mod queries;
pub mod schema;

pub use engine::SqliteResultStore;

//! # upstat-core
//!
//! Foundation crate for the upstat deprecation pipeline.
//! Defines the data model, version handling, errors, config, collaborator
//! traits and tracing bootstrap. Every other crate in the workspace depends
//! on this.

pub mod config;
pub mod errors;
pub mod tracing;
pub mod traits;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::UpstatConfig;
pub use errors::error_code::UpstatErrorCode;
pub use types::collections::{FxHashMap, FxHashSet};
pub use types::version::{Constraint, Version};

//! Collaborator traits. The pipeline reads extensions, libraries and
//! release data through these and persists results through [`ResultStore`].

pub mod registries;
pub mod store;

pub use registries::{ExtensionRegistry, LibraryRegistry, UpdateRegistry};
pub use store::ResultStore;

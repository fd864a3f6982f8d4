//! Reference implementations of the collaborator registries.

pub mod extensions;
pub mod libraries;
pub mod updates;

pub use extensions::InMemoryExtensionRegistry;
pub use libraries::{InMemoryLibraryRegistry, YamlLibraryRegistry};
pub use updates::InMemoryUpdateRegistry;

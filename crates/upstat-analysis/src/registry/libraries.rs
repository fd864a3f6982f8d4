//! Library registries.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use upstat_core::traits::{ExtensionRegistry, LibraryRegistry};
use upstat_core::types::LibraryDefinition;

/// The platform's own libraries are always loadable.
pub const PLATFORM_EXTENSION: &str = "core";

type Definitions = BTreeMap<String, LibraryDefinition>;

/// Fixed definitions, for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLibraryRegistry {
    installed: BTreeMap<String, Definitions>,
}

impl InMemoryLibraryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `extension` installed with no libraries.
    pub fn with_extension(mut self, extension: &str) -> Self {
        self.installed.entry(extension.to_string()).or_default();
        self
    }

    pub fn with_library(mut self, extension: &str, library: &str, definition: LibraryDefinition) -> Self {
        self.installed
            .entry(extension.to_string())
            .or_default()
            .insert(library.to_string(), definition);
        self
    }
}

impl LibraryRegistry for InMemoryLibraryRegistry {
    fn libraries_for(&self, extension: &str) -> Option<Definitions> {
        match self.installed.get(extension) {
            Some(definitions) => Some(definitions.clone()),
            None if extension == PLATFORM_EXTENSION => Some(Definitions::new()),
            None => None,
        }
    }
}

/// Reads `<ext>.libraries.yml` of installed extensions from disk.
#[derive(Debug, Clone, Default)]
pub struct YamlLibraryRegistry {
    installed: BTreeMap<String, PathBuf>,
    core_dir: Option<PathBuf>,
}

impl YamlLibraryRegistry {
    /// Snapshot the installed extensions of `registry`. `core_dir` holds
    /// `core.libraries.yml`.
    pub fn from_registry(registry: &dyn ExtensionRegistry, core_dir: Option<PathBuf>) -> Self {
        let installed = registry
            .all()
            .into_iter()
            .filter(|e| e.installed)
            .map(|e| (e.machine_name, e.path))
            .collect();
        Self { installed, core_dir }
    }

    fn read(path: &Path) -> Definitions {
        let Ok(contents) = std::fs::read_to_string(path) else {
            return Definitions::new();
        };
        if contents.trim().is_empty() {
            return Definitions::new();
        }
        serde_yaml::from_str(&contents).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "unreadable library definitions");
            Definitions::new()
        })
    }
}

impl LibraryRegistry for YamlLibraryRegistry {
    fn libraries_for(&self, extension: &str) -> Option<Definitions> {
        if extension == PLATFORM_EXTENSION {
            return Some(
                self.core_dir
                    .as_deref()
                    .map(|dir| Self::read(&dir.join("core.libraries.yml")))
                    .unwrap_or_default(),
            );
        }
        self.installed
            .get(extension)
            .map(|dir| Self::read(&dir.join(format!("{extension}.libraries.yml"))))
    }
}

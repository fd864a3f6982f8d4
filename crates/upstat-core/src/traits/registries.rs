//! Read-only registries owned by the host platform.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::types::{ExtensionDescriptor, LibraryDefinition, ReleaseData};

/// Every extension the platform knows about, installed or not.
pub trait ExtensionRegistry: Send + Sync {
    /// All known extensions in registry order.
    fn all(&self) -> Vec<ExtensionDescriptor>;

    fn get(&self, machine_name: &str) -> Option<ExtensionDescriptor> {
        self.all().into_iter().find(|e| e.machine_name == machine_name)
    }

    fn is_installed(&self, machine_name: &str) -> bool {
        self.get(machine_name).is_some_and(|e| e.installed)
    }
}

/// Asset library definitions per extension.
pub trait LibraryRegistry: Send + Sync {
    /// Libraries declared by `extension`, or `None` when the extension is not
    /// installed and its libraries cannot be loaded.
    fn libraries_for(&self, extension: &str) -> Option<BTreeMap<String, LibraryDefinition>>;
}

/// Release information for contributed projects.
pub trait UpdateRegistry: Send + Sync {
    fn release_data(&self, project: &str) -> Option<ReleaseData>;
}

impl<T: ExtensionRegistry + ?Sized> ExtensionRegistry for Arc<T> {
    fn all(&self) -> Vec<ExtensionDescriptor> {
        (**self).all()
    }
    fn get(&self, machine_name: &str) -> Option<ExtensionDescriptor> {
        (**self).get(machine_name)
    }
    fn is_installed(&self, machine_name: &str) -> bool {
        (**self).is_installed(machine_name)
    }
}

impl<T: LibraryRegistry + ?Sized> LibraryRegistry for Arc<T> {
    fn libraries_for(&self, extension: &str) -> Option<BTreeMap<String, LibraryDefinition>> {
        (**self).libraries_for(extension)
    }
}

impl<T: UpdateRegistry + ?Sized> UpdateRegistry for Arc<T> {
    fn release_data(&self, project: &str) -> Option<ReleaseData> {
        (**self).release_data(project)
    }
}

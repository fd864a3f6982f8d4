//! Extension registry backed by a list, optionally discovered on disk.

use std::collections::BTreeSet;
use std::path::Path;

use upstat_core::errors::ScanError;
use upstat_core::traits::ExtensionRegistry;
use upstat_core::types::{ExtensionDescriptor, ExtensionType, InfoMetadata, Origin};

use crate::scanners::walker::{name_segments, ExtensionWalker};

#[derive(Debug, Clone, Default)]
pub struct InMemoryExtensionRegistry {
    extensions: Vec<ExtensionDescriptor>,
}

impl InMemoryExtensionRegistry {
    pub fn new(extensions: Vec<ExtensionDescriptor>) -> Self {
        Self { extensions }
    }

    pub fn push(&mut self, extension: ExtensionDescriptor) {
        self.extensions.push(extension);
    }

    /// Find every `<name>.info.yml` under `site_root`. Extensions under
    /// `<site_root>/core` get the core origin; `installed` lists enabled
    /// machine names. Info files of unknown types are skipped.
    pub fn discover(
        site_root: &Path,
        walker: &ExtensionWalker,
        installed: &BTreeSet<String>,
    ) -> Result<Self, ScanError> {
        let info_files = walker.files(site_root, |path| {
            matches!(name_segments(path).as_slice(), [_, "info", "yml"])
        });

        let mut extensions = Vec::new();
        for file in info_files {
            let Some(machine_name) = name_segments(&file).first().map(|s| s.to_string()) else {
                continue;
            };
            let contents = std::fs::read_to_string(&file).map_err(|e| ScanError::io(&file, e))?;
            let info = match InfoMetadata::from_yaml(&contents) {
                Ok(info) => info,
                Err(e) => {
                    tracing::warn!(path = %file.display(), error = %e, "skipping unparsable info file");
                    continue;
                }
            };
            let Some(kind) = info.kind.as_deref().and_then(ExtensionType::from_info_type) else {
                continue;
            };
            let Some(dir) = file.parent() else {
                continue;
            };
            let origin = if dir.strip_prefix(site_root).is_ok_and(|rel| rel.starts_with("core")) {
                Origin::Core
            } else {
                Origin::Site
            };
            extensions.push(
                ExtensionDescriptor::new(machine_name.clone(), dir, kind)
                    .with_info(info)
                    .with_installed(installed.contains(&machine_name))
                    .with_origin(origin),
            );
        }
        tracing::debug!(root = %site_root.display(), count = extensions.len(), "extensions discovered");
        Ok(Self { extensions })
    }
}

impl ExtensionRegistry for InMemoryExtensionRegistry {
    fn all(&self) -> Vec<ExtensionDescriptor> {
        self.extensions.clone()
    }

    fn get(&self, machine_name: &str) -> Option<ExtensionDescriptor> {
        self.extensions
            .iter()
            .find(|e| e.machine_name == machine_name)
            .cloned()
    }
}

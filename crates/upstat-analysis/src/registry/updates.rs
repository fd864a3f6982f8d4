//! Update registry backed by a fixed map.

use std::collections::BTreeMap;

use upstat_core::traits::UpdateRegistry;
use upstat_core::types::{Release, ReleaseData};

#[derive(Debug, Clone, Default)]
pub struct InMemoryUpdateRegistry {
    projects: BTreeMap<String, ReleaseData>,
}

impl InMemoryUpdateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `version` as the newest release of `project`.
    pub fn with_release(mut self, project: &str, version: &str, core_compatibility: Option<&str>) -> Self {
        self.projects
            .entry(project.to_string())
            .or_default()
            .releases
            .insert(
                0,
                Release {
                    version: version.to_string(),
                    core_compatibility: core_compatibility.map(str::to_string),
                },
            );
        self
    }
}

impl UpdateRegistry for InMemoryUpdateRegistry {
    fn release_data(&self, project: &str) -> Option<ReleaseData> {
        self.projects.get(project).cloned()
    }
}

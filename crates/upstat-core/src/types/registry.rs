//! Records returned by the library and update registries.

use serde::{Deserialize, Serialize};

/// One asset library definition. Only the deprecation notice matters here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryDefinition {
    /// Deprecation message; may contain a `%library_id%` placeholder.
    pub deprecated: Option<String>,
    pub dependencies: Vec<String>,
}

/// One published release of a contributed project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    pub version: String,
    /// Core constraint the release declares, if known.
    pub core_compatibility: Option<String>,
}

/// Release history of a project, newest recommended release first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseData {
    pub releases: Vec<Release>,
}

impl ReleaseData {
    pub fn latest(&self) -> Option<&Release> {
        self.releases.first()
    }
}

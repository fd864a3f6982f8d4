//! File scanner settings.

use serde::{Deserialize, Serialize};

const DEFAULT_IGNORE_DIRS: &[&str] = &["node_modules", "vendor", ".git", "bower_components"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Directory names skipped during traversal. Default: node_modules,
    /// vendor, .git, bower_components. `tests/fixtures` is always skipped.
    pub ignore_dirs: Option<Vec<String>>,
}

impl ScanConfig {
    pub fn effective_ignore_dirs(&self) -> Vec<String> {
        match &self.ignore_dirs {
            Some(dirs) => dirs.clone(),
            None => DEFAULT_IGNORE_DIRS.iter().map(|d| d.to_string()).collect(),
        }
    }
}

//! External analyzer settings.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

const DEFAULT_MEMORY_LIMIT: &str = "1500M";
const DEFAULT_EXECUTABLE: &str = "php";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Platform root the analyzer runs from. Default: current directory.
    pub site_root: Option<PathBuf>,
    /// Interpreter path or name looked up on `PATH`. Default: `php`.
    pub executable: Option<String>,
    /// Composer vendor directory. Default: `<site_root>/vendor`.
    pub vendor_dir: Option<PathBuf>,
    /// Scratch directory for the rule file and analyzer cache.
    /// Default: `<system temp>/upstat`.
    pub temp_dir: Option<PathBuf>,
    /// Alternate rule template. Default: the built-in template.
    pub rule_template: Option<PathBuf>,
    /// Analyzer memory limit. Default: 1500M.
    pub memory_limit: Option<String>,
}

impl AnalyzerConfig {
    pub fn effective_site_root(&self) -> PathBuf {
        self.site_root.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn effective_executable(&self) -> &str {
        self.executable.as_deref().unwrap_or(DEFAULT_EXECUTABLE)
    }

    pub fn effective_vendor_dir(&self) -> PathBuf {
        self.vendor_dir
            .clone()
            .unwrap_or_else(|| self.effective_site_root().join("vendor"))
    }

    pub fn effective_temp_dir(&self) -> PathBuf {
        self.temp_dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("upstat"))
    }

    pub fn effective_memory_limit(&self) -> &str {
        self.memory_limit.as_deref().unwrap_or(DEFAULT_MEMORY_LIMIT)
    }
}

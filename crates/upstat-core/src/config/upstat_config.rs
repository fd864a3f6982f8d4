//! Top-level configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{AnalyzerConfig, PlatformConfig, ProjectsConfig, ScanConfig};
use crate::errors::ConfigError;

pub const CONFIG_FILE_NAME: &str = "upstat.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstatConfig {
    pub platform: PlatformConfig,
    pub analyzer: AnalyzerConfig,
    pub scan: ScanConfig,
    pub projects: ProjectsConfig,
}

impl UpstatConfig {
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source).map_err(|e| ConfigError::TomlParse {
            message: e.to_string(),
        })?;
        // Surface bad version strings at load time rather than mid-run.
        config.platform.resolve()?;
        Ok(config)
    }

    /// Load `<root>/upstat.toml`, falling back to defaults when absent.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let path = root.join(CONFIG_FILE_NAME);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let source = std::fs::read_to_string(&path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml(&source)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::TomlParse {
            message: e.to_string(),
        })
    }
}

//! Running platform version settings.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::types::Version;

const DEFAULT_VERSION: &str = "9.5.11";
const DEFAULT_OLDEST_SUPPORTED_MINOR: &str = "9.4";
const DEFAULT_NEXT_MAJOR_MIN_PHP: &str = "8.1";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    /// Running platform version. Default: 9.5.11.
    pub version: Option<String>,
    /// Oldest minor of the running major that still receives security
    /// support. Default: 9.4.
    pub oldest_supported_minor: Option<String>,
    /// Minimum PHP version required by the next major. Default: 8.1.
    pub next_major_min_php: Option<String>,
}

impl PlatformConfig {
    pub fn effective_version(&self) -> &str {
        self.version.as_deref().unwrap_or(DEFAULT_VERSION)
    }

    pub fn effective_oldest_supported_minor(&self) -> &str {
        self.oldest_supported_minor
            .as_deref()
            .unwrap_or(DEFAULT_OLDEST_SUPPORTED_MINOR)
    }

    pub fn effective_next_major_min_php(&self) -> &str {
        self.next_major_min_php
            .as_deref()
            .unwrap_or(DEFAULT_NEXT_MAJOR_MIN_PHP)
    }

    /// Parse every version string.
    pub fn resolve(&self) -> Result<Platform, ConfigError> {
        let parse = |field: &str, value: &str| {
            Version::parse(value).map_err(|_| ConfigError::InvalidVersion {
                field: field.to_string(),
                value: value.to_string(),
            })
        };
        Ok(Platform {
            version: parse("platform.version", self.effective_version())?,
            oldest_supported_minor: parse(
                "platform.oldest_supported_minor",
                self.effective_oldest_supported_minor(),
            )?,
            next_major_min_php: parse(
                "platform.next_major_min_php",
                self.effective_next_major_min_php(),
            )?,
        })
    }
}

/// Validated platform versions every classification decision depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    pub version: Version,
    pub oldest_supported_minor: Version,
    pub next_major_min_php: Version,
}

impl Platform {
    pub fn new(version: Version, oldest_supported_minor: Version) -> Self {
        Self {
            version,
            oldest_supported_minor,
            next_major_min_php: Version::new(8, 1, 0),
        }
    }

    pub fn major(&self) -> u64 {
        self.version.major
    }

    /// `<major + 1>.0.0`.
    pub fn next_major(&self) -> Version {
        self.version.next_major()
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::new(Version::new(9, 5, 11), Version::new(9, 4, 0))
    }
}

//! Extension descriptors and their parsed `*.info.yml` metadata.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};

use super::version::{Constraint, Version};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtensionType {
    Module,
    Theme,
    Profile,
}

impl ExtensionType {
    pub fn from_info_type(value: &str) -> Option<Self> {
        match value {
            "module" => Some(Self::Module),
            "theme" => Some(Self::Theme),
            "profile" => Some(Self::Profile),
            _ => None,
        }
    }
}

impl fmt::Display for ExtensionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Module => "module",
            Self::Theme => "theme",
            Self::Profile => "profile",
        })
    }
}

/// Where an extension ships from. Platform (`core`) extensions are never
/// collated into projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    Core,
    Site,
}

/// `base theme` accepts a theme name or `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BaseTheme {
    Named(String),
    Disabled(bool),
}

/// The subset of `*.info.yml` keys the pipeline reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InfoMetadata {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(deserialize_with = "stringish")]
    pub project: Option<String>,
    #[serde(deserialize_with = "stringish")]
    pub version: Option<String>,
    #[serde(deserialize_with = "stringish")]
    pub core_version_requirement: Option<String>,
    #[serde(rename = "base theme")]
    pub base_theme: Option<BaseTheme>,
    pub package: Option<String>,
    pub lifecycle: Option<String>,
    pub lifecycle_link: Option<String>,
    pub dependencies: Vec<String>,
    pub libraries: Vec<String>,
    #[serde(rename = "libraries-override")]
    pub libraries_override: BTreeMap<String, serde_yaml::Value>,
    #[serde(rename = "libraries-extend")]
    pub libraries_extend: BTreeMap<String, Vec<String>>,
    pub hidden: bool,
}

impl InfoMetadata {
    pub fn from_yaml(source: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document deserialises to unit, not a map.
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(source)
    }

    /// Whether `core_version_requirement` parses and admits `target`.
    pub fn allows_core(&self, target: &Version) -> bool {
        self.core_version_requirement
            .as_deref()
            .and_then(|raw| Constraint::parse(raw).ok())
            .is_some_and(|c| c.allows(target))
    }
}

/// Accept strings, numbers and booleans as an optional string.
fn stringish<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<serde_yaml::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_yaml::Value::String(s)) => Some(s),
        Some(serde_yaml::Value::Number(n)) => Some(n.to_string()),
        Some(serde_yaml::Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// An installable extension as reported by the extension registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtensionDescriptor {
    pub machine_name: String,
    /// Extension root directory.
    pub path: PathBuf,
    pub kind: ExtensionType,
    pub info: InfoMetadata,
    pub installed: bool,
    pub origin: Origin,
}

impl ExtensionDescriptor {
    pub fn new(machine_name: impl Into<String>, path: impl Into<PathBuf>, kind: ExtensionType) -> Self {
        Self {
            machine_name: machine_name.into(),
            path: path.into(),
            kind,
            info: InfoMetadata::default(),
            installed: true,
            origin: Origin::Site,
        }
    }

    pub fn with_info(mut self, info: InfoMetadata) -> Self {
        self.info = info;
        self
    }

    pub fn with_installed(mut self, installed: bool) -> Self {
        self.installed = installed;
        self
    }

    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = origin;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path with forward slashes, for substring checks.
    pub fn path_string(&self) -> String {
        self.path.to_string_lossy().replace('\\', "/")
    }

    pub fn is_platform(&self) -> bool {
        self.origin == Origin::Core
    }

    pub fn project_id(&self) -> Option<&str> {
        self.info.project.as_deref().filter(|p| !p.is_empty())
    }

    /// Whether this extension declares compatibility with the next major
    /// after `platform_major`.
    pub fn next_major_compatible(&self, platform_major: u64) -> bool {
        self.info.allows_core(&Version::new(platform_major + 1, 0, 0))
    }
}

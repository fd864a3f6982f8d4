//! Extension metadata checks: `*.info.yml` and `composer.json`.
//!
//! An extension is declared ready for the next major when this scanner
//! reports nothing.

use std::path::Path;

use upstat_core::config::Platform;
use upstat_core::errors::ScanError;
use upstat_core::types::{AnalyzerTag, Constraint, ExtensionDescriptor, Finding, InfoMetadata};

use super::walker::{display_path, file_name, name_segments, ExtensionWalker};
use super::{error_finding, read_file, FileScanner};

pub const DEFAULT_LIFECYCLE_LINK: &str = "https://www.drupal.org/node/3215042";
const CORE_REQUIREMENT_LINK: &str = "https://drupal.org/node/3070687";
const COMPOSER_LINK: &str = "https://drupal.org/node/2514612#s-drupal-9-compatibility";

pub struct ExtensionMetadataScanner {
    walker: ExtensionWalker,
    platform: Platform,
    self_fixture_path: String,
}

impl ExtensionMetadataScanner {
    pub fn new(walker: ExtensionWalker, platform: Platform, self_fixture_path: impl Into<String>) -> Self {
        Self {
            walker,
            platform,
            self_fixture_path: self_fixture_path.into(),
        }
    }

    fn scan_info_file(&self, path: &Path, findings: &mut Vec<Finding>) -> Result<(), ScanError> {
        let contents = read_file(path)?;
        let file = display_path(path);
        let finding = |message: String, line: u32| {
            Finding::new(message, file.clone(), line, AnalyzerTag::ExtensionMetadata)
        };

        let raw: serde_yaml::Value = match serde_yaml::from_str(&contents) {
            Ok(value) => value,
            Err(e) => {
                findings.push(finding(format!("Parse error in {}: {e}", file_name(path)), 0));
                return Ok(());
            }
        };
        let info: InfoMetadata = match InfoMetadata::from_yaml(&contents) {
            Ok(info) => info,
            Err(e) => {
                findings.push(finding(format!("Parse error in {}: {e}", file_name(path)), 0));
                return Ok(());
            }
        };

        if info.package.as_deref() == Some("Testing")
            && !display_path(path).replace('\\', "/").contains(&self.self_fixture_path)
        {
            return Ok(());
        }

        let has_key = |key: &str| raw.get(key).is_some();

        if info.kind.as_deref() == Some("theme") && !has_key("base theme") {
            findings.push(finding(
                "The now required 'base theme' key is missing. See https://www.drupal.org/node/3066038."
                    .to_string(),
                0,
            ));
        }

        match info.core_version_requirement.as_deref() {
            None => findings.push(finding(
                format!(
                    "Add core_version_requirement to {} to designate which Drupal versions is the extension compatible with. See {CORE_REQUIREMENT_LINK}.",
                    file_name(path)
                ),
                0,
            )),
            Some(value) => {
                let line = key_line(&contents, "core_version_requirement");
                match Constraint::parse(value) {
                    Err(_) => findings.push(finding(
                        format!(
                            "Value of core_version_requirement: {value} is not a valid version constraint. See {CORE_REQUIREMENT_LINK}."
                        ),
                        line,
                    )),
                    Ok(c) if !c.allows(&self.platform.next_major()) => findings.push(finding(
                        format!(
                            "Value of core_version_requirement: {value} is not compatible with the next major version of Drupal core. See {CORE_REQUIREMENT_LINK}."
                        ),
                        line,
                    )),
                    Ok(_) => {}
                }
            }
        }

        if let Some(lifecycle) = info.lifecycle.as_deref() {
            if matches!(lifecycle, "deprecated" | "obsolete") {
                let link = info
                    .lifecycle_link
                    .as_deref()
                    .filter(|l| !l.is_empty())
                    .unwrap_or(DEFAULT_LIFECYCLE_LINK);
                findings.push(finding(
                    format!(
                        "This extension is {lifecycle}. Use an alternative extension, {lifecycle} extensions will not be supported by the next major version. See {link}."
                    ),
                    key_line(&contents, "lifecycle"),
                ));
            }
        }
        Ok(())
    }

    fn scan_composer_file(&self, path: &Path, findings: &mut Vec<Finding>) -> Result<(), ScanError> {
        let contents = read_file(path)?;
        let file = display_path(path);
        let json: serde_json::Value = serde_json::from_str(&contents).map_err(|e| ScanError::Json {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let Some(require) = json.get("require") else {
            return Ok(());
        };

        if let Some(value) = require.get("drupal/core").and_then(|v| v.as_str()) {
            let line = quoted_key_line(&contents, "drupal/core");
            let message = match Constraint::parse(value) {
                Err(_) => Some(format!(
                    "The drupal/core requirement {value} in composer.json is not a valid version constraint. See {COMPOSER_LINK}."
                )),
                Ok(c) if !c.allows(&self.platform.next_major()) => Some(format!(
                    "The drupal/core requirement {value} in composer.json is not compatible with the next major version of Drupal core. See {COMPOSER_LINK}."
                )),
                Ok(_) => None,
            };
            if let Some(message) = message {
                findings.push(Finding::new(message, file.clone(), line, AnalyzerTag::ExtensionMetadata));
            }
        }

        if let Some(value) = require.get("php").and_then(|v| v.as_str()) {
            let line = quoted_key_line(&contents, "php");
            let min_php = &self.platform.next_major_min_php;
            let message = match Constraint::parse(value) {
                Err(_) => Some(format!(
                    "The PHP requirement {value} in composer.json is not a valid version constraint."
                )),
                Ok(c) if !c.allows(min_php) => Some(format!(
                    "The PHP requirement {value} in composer.json is not compatible with PHP {}.{}, the minimum required by Drupal {}.",
                    min_php.major,
                    min_php.minor,
                    self.platform.next_major().major
                )),
                Ok(_) => None,
            };
            if let Some(message) = message {
                findings.push(Finding::new(message, file, line, AnalyzerTag::ExtensionMetadata));
            }
        }
        Ok(())
    }
}

/// 1-based line of a top-level `key:` in YAML source, 0 if absent.
fn key_line(contents: &str, key: &str) -> u32 {
    let prefix = format!("{key}:");
    contents
        .lines()
        .position(|l| l.starts_with(&prefix))
        .map_or(0, |idx| idx as u32 + 1)
}

/// 1-based line of a `"key":` in JSON source, 0 if absent.
fn quoted_key_line(contents: &str, key: &str) -> u32 {
    let needle = format!("\"{key}\"");
    contents
        .lines()
        .position(|l| l.trim_start().starts_with(&needle))
        .map_or(0, |idx| idx as u32 + 1)
}

impl FileScanner for ExtensionMetadataScanner {
    fn tag(&self) -> AnalyzerTag {
        AnalyzerTag::ExtensionMetadata
    }

    fn scan(&self, extension: &ExtensionDescriptor) -> Result<Vec<Finding>, ScanError> {
        let files = self.walker.files(extension.path(), |path| {
            matches!(name_segments(path).as_slice(), [_, "info", "yml"])
                || file_name(path) == "composer.json"
        });

        let mut findings = Vec::new();
        for file in files {
            if file_name(&file) == "composer.json" {
                if let Err(e) = self.scan_composer_file(&file, &mut findings) {
                    findings.push(Finding::new(
                        e.to_string(),
                        display_path(&file),
                        0,
                        AnalyzerTag::ExtensionMetadata,
                    ));
                }
            } else if let Err(e) = self.scan_info_file(&file, &mut findings) {
                findings.push(error_finding(self.tag(), &e));
            }
        }
        Ok(findings)
    }
}

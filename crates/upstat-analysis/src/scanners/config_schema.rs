//! Removed views argument setting in exported view config.

use upstat_core::errors::ScanError;
use upstat_core::types::{AnalyzerTag, ExtensionDescriptor, Finding};

use super::walker::{display_path, file_name, ExtensionWalker};
use super::{error_finding, read_file, FileScanner};

pub const DEPRECATED_SETTING: &str = "default_argument_skip_url:";

pub struct ConfigSchemaScanner {
    walker: ExtensionWalker,
}

impl ConfigSchemaScanner {
    pub fn new(walker: ExtensionWalker) -> Self {
        Self { walker }
    }
}

/// 1-based line of the first occurrence of the setting, line 1 when the
/// setting is present but its line cannot be pinned down.
pub fn setting_line(contents: &str) -> Option<u32> {
    if !contents.contains(DEPRECATED_SETTING) {
        return None;
    }
    let line = contents
        .lines()
        .position(|l| l.contains(DEPRECATED_SETTING))
        .map(|idx| idx as u32 + 1)
        .unwrap_or(1);
    Some(line)
}

impl FileScanner for ConfigSchemaScanner {
    fn tag(&self) -> AnalyzerTag {
        AnalyzerTag::ConfigSchema
    }

    fn scan(&self, extension: &ExtensionDescriptor) -> Result<Vec<Finding>, ScanError> {
        let files = self.walker.files(extension.path(), |path| {
            let name = file_name(path);
            name.starts_with("views.view.") && name.ends_with(".yml")
        });

        let mut findings = Vec::new();
        for file in files {
            let contents = match read_file(&file) {
                Ok(contents) => contents,
                Err(e) => {
                    findings.push(error_finding(self.tag(), &e));
                    continue;
                }
            };
            if let Some(line) = setting_line(&contents) {
                findings.push(Finding::new(
                    "Support for the default_argument_skip_url setting of views contextual filters is deprecated in drupal:9.4.0 and is removed from drupal:10.0.0. No replacement is provided. See https://www.drupal.org/node/3278424.",
                    display_path(&file),
                    line,
                    AnalyzerTag::ConfigSchema,
                ));
            }
        }
        Ok(findings)
    }
}

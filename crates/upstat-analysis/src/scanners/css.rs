//! Deprecated off-canvas selector in stylesheets.

use upstat_core::errors::ScanError;
use upstat_core::types::{AnalyzerTag, ExtensionDescriptor, Finding};

use super::walker::{display_path, ExtensionWalker};
use super::{error_finding, read_file, FileScanner};

pub const DEPRECATED_SELECTOR: &str = "#drupal-off-canvas";

/// Selectors that contain the deprecated one as a substring but are fine.
pub const SAFE_SELECTORS: [&str; 2] = [
    "#drupal-off-canvas:not(.drupal-off-canvas-reset)",
    "#drupal-off-canvas-wrapper",
];

pub struct CssScanner {
    walker: ExtensionWalker,
}

impl CssScanner {
    pub fn new(walker: ExtensionWalker) -> Self {
        Self { walker }
    }
}

/// Whether `contents` still uses the bare deprecated selector once the safe
/// selectors are removed.
pub fn uses_deprecated_selector(contents: &str) -> bool {
    let neutralized = SAFE_SELECTORS
        .iter()
        .fold(contents.to_string(), |acc, safe| acc.replace(safe, ""));
    neutralized.contains(DEPRECATED_SELECTOR)
}

impl FileScanner for CssScanner {
    fn tag(&self) -> AnalyzerTag {
        AnalyzerTag::Css
    }

    fn scan(&self, extension: &ExtensionDescriptor) -> Result<Vec<Finding>, ScanError> {
        let files = self
            .walker
            .files(extension.path(), |path| path.extension().is_some_and(|e| e == "css"));

        let mut findings = Vec::new();
        for file in files {
            let contents = match read_file(&file) {
                Ok(contents) => contents,
                Err(e) => {
                    findings.push(error_finding(self.tag(), &e));
                    continue;
                }
            };
            if uses_deprecated_selector(&contents) {
                findings.push(Finding::new(
                    "The #drupal-off-canvas selector is deprecated in drupal:9.5.0 and is removed from drupal:10.0.0. Update this selector to #drupal-off-canvas-wrapper. See https://www.drupal.org/node/3305664.",
                    display_path(&file),
                    0,
                    AnalyzerTag::Css,
                ));
            }
        }
        Ok(findings)
    }
}

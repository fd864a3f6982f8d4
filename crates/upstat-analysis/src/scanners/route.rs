//! Deprecated access checks in `*.routing.yml`.

use upstat_core::errors::ScanError;
use upstat_core::types::{AnalyzerTag, ExtensionDescriptor, Finding};

use super::walker::{display_path, name_segments, ExtensionWalker};
use super::{error_finding, read_file, FileScanner};

/// Access-check requirements removed in favour of `_entity_access`.
pub const DEPRECATED_ACCESS_CHECKS: [&str; 2] = ["_access_node_revision", "_access_media_revision"];

pub struct RouteScanner {
    walker: ExtensionWalker,
}

impl RouteScanner {
    pub fn new(walker: ExtensionWalker) -> Self {
        Self { walker }
    }
}

impl FileScanner for RouteScanner {
    fn tag(&self) -> AnalyzerTag {
        AnalyzerTag::Route
    }

    fn scan(&self, extension: &ExtensionDescriptor) -> Result<Vec<Finding>, ScanError> {
        let files = self.walker.files(extension.path(), |path| {
            matches!(name_segments(path).as_slice(), [_, "routing", "yml"])
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
                        for token in DEPRECATED_ACCESS_CHECKS {
                if contents.contains(token) {
                    findings.push(Finding::new(
                        format!(
                            "The {token} routing requirement is deprecated in drupal:9.3.0 and is removed from drupal:10.0.0. Use _entity_access instead. See https://www.drupal.org/node/3161210."
                        ),
                        display_path(&file),
                        0,
                        AnalyzerTag::Route,
                    ));
                }
            }
        }
        Ok(findings)
    }
}

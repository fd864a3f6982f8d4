//! Raw and classified findings.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::category::Category;

/// Identifies the scanner that produced a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalyzerTag {
    Phpstan,
    Twig,
    Library,
    Route,
    Css,
    ConfigSchema,
    ExtensionMetadata,
    ThemeFunction,
}

impl AnalyzerTag {
    pub fn name(self) -> &'static str {
        match self {
            AnalyzerTag::Phpstan => "phpstan",
            AnalyzerTag::Twig => "twig",
            AnalyzerTag::Library => "library",
            AnalyzerTag::Route => "route",
            AnalyzerTag::Css => "css",
            AnalyzerTag::ConfigSchema => "config_schema",
            AnalyzerTag::ExtensionMetadata => "extension_metadata",
            AnalyzerTag::ThemeFunction => "theme_function",
        }
    }
}

impl fmt::Display for AnalyzerTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One problem reported by one scanner. `line == 0` means unknown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub message: String,
    pub file: String,
    pub line: u32,
    pub analyzer: AnalyzerTag,
}

impl Finding {
    pub fn new(
        message: impl Into<String>,
        file: impl Into<String>,
        line: u32,
        analyzer: AnalyzerTag,
    ) -> Self {
        Self {
            message: message.into(),
            file: file.into(),
            line,
            analyzer,
        }
    }
}

/// A finding after classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedFinding {
    #[serde(flatten)]
    pub finding: Finding,
    pub rewritten_message: String,
    pub category: Category,
}

impl ClassifiedFinding {
    pub fn line(&self) -> u32 {
        self.finding.line
    }

    pub fn analyzer(&self) -> AnalyzerTag {
        self.finding.analyzer
    }
}

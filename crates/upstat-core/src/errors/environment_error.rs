//! Analyzer environment setup errors.
//!
//! Any of these abandons the current analysis run; nothing is persisted.

use std::path::PathBuf;

use super::error_code::{self, UpstatErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum EnvironmentError {
    #[error("Analyzer executable not found: {name}")]
    ExecutableNotFound { name: String },

    #[error("Analyzer binary not found at {}", path.display())]
    AnalyzerBinaryNotFound { path: PathBuf },

    #[error("Temporary directory {} is not writable: {message}", path.display())]
    TempDirUnavailable { path: PathBuf, message: String },

    #[error("Required rule file missing: {}", path.display())]
    RuleFileMissing { path: PathBuf },

    #[error("Rule template {} unreadable: {message}", path.display())]
    RuleTemplateUnreadable { path: PathBuf, message: String },

    #[error("Failed to write rule file {}: {message}", path.display())]
    RuleFileWrite { path: PathBuf, message: String },

    #[error("Malformed composer metadata in {}: {message}", path.display())]
    MalformedComposer { path: PathBuf, message: String },
}

impl UpstatErrorCode for EnvironmentError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ExecutableNotFound { .. } => error_code::EXECUTABLE_NOT_FOUND,
            Self::AnalyzerBinaryNotFound { .. } => error_code::ANALYZER_NOT_FOUND,
            Self::TempDirUnavailable { .. } => error_code::TEMP_DIR_UNAVAILABLE,
            Self::RuleFileMissing { .. }
            | Self::RuleTemplateUnreadable { .. }
            | Self::RuleFileWrite { .. } => error_code::RULE_FILE_ERROR,
            Self::MalformedComposer { .. } => error_code::MALFORMED_COMPOSER,
        }
    }
}

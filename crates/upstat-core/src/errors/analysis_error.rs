//! Errors that abort a single analysis run.

use super::environment_error::EnvironmentError;
use super::error_code::UpstatErrorCode;
use super::storage_error::StorageError;

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Analyzer environment unavailable: {0}")]
    Environment(#[from] EnvironmentError),

    #[error("Failed to persist analysis result: {0}")]
    Storage(#[from] StorageError),
}

impl UpstatErrorCode for AnalysisError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Environment(e) => e.error_code(),
            Self::Storage(e) => e.error_code(),
        }
    }
}

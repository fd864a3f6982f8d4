//! File scanner errors. Recoverable: the orchestrator turns each into a
//! finding and keeps going.

use std::path::PathBuf;

use super::error_code::{self, UpstatErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML in {}: {message}", path.display())]
    Yaml { path: PathBuf, message: String },

    #[error("Invalid JSON in {}: {message}", path.display())]
    Json { path: PathBuf, message: String },

    #[error("Parse error in {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },
}

impl ScanError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// The file the error refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Io { path, .. }
            | Self::Yaml { path, .. }
            | Self::Json { path, .. }
            | Self::Parse { path, .. } => path,
        }
    }
}

impl UpstatErrorCode for ScanError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io { .. } => error_code::SCAN_IO_ERROR,
            _ => error_code::SCAN_PARSE_ERROR,
        }
    }
}

//! Storage-layer errors for the result store.

use super::error_code::{self, UpstatErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl UpstatErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::SqliteError { .. } => error_code::STORAGE_ERROR,
            Self::Serialization { .. } => error_code::SERIALIZATION_ERROR,
        }
    }
}

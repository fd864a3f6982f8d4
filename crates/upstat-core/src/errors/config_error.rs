//! Configuration loading errors.

use super::error_code::{self, UpstatErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {message}")]
    Io { path: String, message: String },

    #[error("Failed to parse TOML: {message}")]
    TomlParse { message: String },

    #[error("Invalid version for {field}: '{value}'")]
    InvalidVersion { field: String, value: String },
}

impl UpstatErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidVersion { .. } => error_code::INVALID_VERSION,
            _ => error_code::CONFIG_ERROR,
        }
    }
}

//! Stable, machine-readable error codes.

/// Every upstat error exposes a stable code string.
pub trait UpstatErrorCode {
    fn error_code(&self) -> &'static str;
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const INVALID_VERSION: &str = "INVALID_VERSION";
pub const INVALID_CONSTRAINT: &str = "INVALID_CONSTRAINT";
pub const EXECUTABLE_NOT_FOUND: &str = "EXECUTABLE_NOT_FOUND";
pub const ANALYZER_NOT_FOUND: &str = "ANALYZER_NOT_FOUND";
pub const TEMP_DIR_UNAVAILABLE: &str = "TEMP_DIR_UNAVAILABLE";
pub const RULE_FILE_ERROR: &str = "RULE_FILE_ERROR";
pub const MALFORMED_COMPOSER: &str = "MALFORMED_COMPOSER";
pub const SCAN_IO_ERROR: &str = "SCAN_IO_ERROR";
pub const SCAN_PARSE_ERROR: &str = "SCAN_PARSE_ERROR";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const SERIALIZATION_ERROR: &str = "SERIALIZATION_ERROR";

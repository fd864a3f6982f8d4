//! Error types for every upstat subsystem.
//! One enum per subsystem, all `thiserror`-derived, all carrying a stable
//! error code through [`UpstatErrorCode`].

pub mod analysis_error;
pub mod config_error;
pub mod constraint_error;
pub mod environment_error;
pub mod error_code;
pub mod scan_error;
pub mod storage_error;

pub use analysis_error::AnalysisError;
pub use config_error::ConfigError;
pub use constraint_error::ConstraintError;
pub use environment_error::EnvironmentError;
pub use error_code::UpstatErrorCode;
pub use scan_error::ScanError;
pub use storage_error::StorageError;

//! Configuration loaded from `upstat.toml`.

pub mod analyzer_config;
pub mod platform_config;
pub mod projects_config;
pub mod scan_config;
pub mod upstat_config;

pub use analyzer_config::AnalyzerConfig;
pub use platform_config::{Platform, PlatformConfig};
pub use projects_config::ProjectsConfig;
pub use scan_config::ScanConfig;
pub use upstat_config::UpstatConfig;

//! The external static analyzer: environment discovery, the generated rule
//! file, the subprocess invocation, and JSON report parsing.

pub mod environment;
pub mod process;
pub mod report;

pub use environment::{Environment, EnvironmentCell};
pub use process::{AnalyzerRun, ExternalAnalyzer, FAILURE_SENTINEL, NO_FILES_MARKER};
pub use report::AnalyzerReport;

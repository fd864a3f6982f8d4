//! # upstat-analysis
//!
//! The deprecation pipeline: external analyzer driver, file scanners,
//! classifier, per-extension orchestration and project collation.

pub mod analyzer;
pub mod classifier;
pub mod collator;
pub mod orchestrator;
pub mod registry;
pub mod scanners;

pub use analyzer::{Environment, EnvironmentCell, ExternalAnalyzer};
pub use classifier::{Classification, Classifier, Owner};
pub use collator::ProjectCollator;
pub use orchestrator::{AnalysisOptions, AnalysisOrchestrator};

//! Data model shared by every upstat crate.

pub mod category;
pub mod collections;
pub mod extension;
pub mod finding;
pub mod project;
pub mod registry;
pub mod result;
pub mod version;

pub use category::{Category, NextStep, Split};
pub use extension::{ExtensionDescriptor, ExtensionType, InfoMetadata, Origin};
pub use finding::{AnalyzerTag, ClassifiedFinding, Finding};
pub use project::{ProjectDerived, ProjectType, ProjectView, UpdateStatus};
pub use registry::{LibraryDefinition, Release, ReleaseData};
pub use result::{AnalysisResult, SplitCounts, Totals};
pub use version::{Constraint, Version};

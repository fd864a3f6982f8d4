//! Projects: deduplicated groups of extensions with derived status.

use serde::{Deserialize, Serialize};

use super::category::NextStep;
use super::extension::ExtensionDescriptor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectType {
    Custom,
    Contrib,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateStatus {
    NotChecked,
    NotAvailable,
    Available,
    AlreadyInstalled,
}

/// Status computed for a project during collation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDerived {
    pub project_id: String,
    pub project_type: ProjectType,
    /// `None` for custom projects, which are never checked.
    pub update_status: Option<UpdateStatus>,
    pub update_version: Option<String>,
    pub update_next_major_compatible: Option<bool>,
    pub next_major_compatible: bool,
    pub next_step: NextStep,
}

/// A representative extension paired with its derived project status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectView {
    pub descriptor: ExtensionDescriptor,
    pub derived: ProjectDerived,
}

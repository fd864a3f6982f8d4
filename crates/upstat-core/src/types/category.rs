//! Remediation categories and recommended next steps.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Remediation category assigned to every classified finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Deprecated before the oldest supported minor; fix now.
    Old,
    /// Deprecated in or before the running version of a site-local extension.
    Safe,
    /// Deprecated after what can be fixed today.
    Later,
    /// Fixable with an automated refactoring tool.
    Rector,
    /// No version could be determined.
    Uncategorized,
    /// Known false positive or not relevant for the next major.
    Ignore,
}

/// Severity bucket a category rolls up into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Split {
    Error,
    Warning,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Old,
        Category::Safe,
        Category::Later,
        Category::Rector,
        Category::Uncategorized,
        Category::Ignore,
    ];

    pub fn split(self) -> Option<Split> {
        match self {
            Category::Safe | Category::Old | Category::Rector => Some(Split::Error),
            Category::Later | Category::Uncategorized => Some(Split::Warning),
            Category::Ignore => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::Old => "old",
            Category::Safe => "safe",
            Category::Later => "later",
            Category::Rector => "rector",
            Category::Uncategorized => "uncategorized",
            Category::Ignore => "ignore",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Recommended action for an extension or project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NextStep {
    Relax,
    Remove,
    Update,
    Collaborate,
    Scan,
    Rector,
    Manual,
}

impl NextStep {
    pub fn name(self) -> &'static str {
        match self {
            NextStep::Relax => "relax",
            NextStep::Remove => "remove",
            NextStep::Update => "update",
            NextStep::Collaborate => "collaborate",
            NextStep::Scan => "scan",
            NextStep::Rector => "rector",
            NextStep::Manual => "manual",
        }
    }
}

impl fmt::Display for NextStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

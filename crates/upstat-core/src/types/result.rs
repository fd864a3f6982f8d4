//! Per-extension analysis results as persisted by the result store.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::category::{Category, NextStep, Split};
use super::finding::ClassifiedFinding;

/// Error/warning roll-up of the per-category counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitCounts {
    pub error: usize,
    pub warning: usize,
}

impl SplitCounts {
    pub fn record(&mut self, split: Split) {
        match split {
            Split::Error => self.error += 1,
            Split::Warning => self.warning += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub errors: usize,
    pub file_errors: usize,
    /// Only categories that occurred are present.
    pub categories: BTreeMap<Category, usize>,
    pub split: SplitCounts,
    pub next_step: NextStep,
    /// True iff the extension metadata scanner found nothing.
    pub declared_ready: bool,
}

impl Totals {
    pub fn new(errors: usize, file_errors: usize) -> Self {
        Self {
            errors,
            file_errors,
            categories: BTreeMap::new(),
            split: SplitCounts::default(),
            next_step: NextStep::Relax,
            declared_ready: true,
        }
    }

    pub fn category_count(&self, category: Category) -> usize {
        self.categories.get(&category).copied().unwrap_or(0)
    }
}

/// The complete outcome of one analysis run for one extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub timestamp: DateTime<Utc>,
    pub files: BTreeMap<String, Vec<ClassifiedFinding>>,
    pub totals: Totals,
}

impl AnalysisResult {
    pub fn finding_count(&self) -> usize {
        self.files.values().map(Vec::len).sum()
    }

    pub fn findings(&self) -> impl Iterator<Item = (&str, &ClassifiedFinding)> {
        self.files
            .iter()
            .flat_map(|(file, findings)| findings.iter().map(move |f| (file.as_str(), f)))
    }
}

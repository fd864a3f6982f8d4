//! Shape of the analyzer's `--error-format=json` output.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyzerReport {
    #[serde(deserialize_with = "map_or_empty_list")]
    pub files: BTreeMap<String, FileMessages>,
    #[serde(default)]
    pub errors: Vec<String>,
    pub totals: ReportTotals,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileMessages {
    #[serde(default)]
    pub messages: Vec<ReportMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportMessage {
    pub message: String,
    #[serde(default)]
    pub line: Option<u32>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ReportTotals {
    #[serde(default)]
    pub errors: usize,
    #[serde(default)]
    pub file_errors: usize,
}

impl AnalyzerReport {
    pub fn from_json(stdout: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(stdout.trim())
    }
}

/// An empty map is encoded as `[]` by the analyzer.
fn map_or_empty_list<'de, D>(deserializer: D) -> Result<BTreeMap<String, FileMessages>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Files {
        Map(BTreeMap<String, FileMessages>),
        List(Vec<serde_json::Value>),
    }

    match Files::deserialize(deserializer)? {
        Files::Map(map) => Ok(map),
        Files::List(list) if list.is_empty() => Ok(BTreeMap::new()),
        Files::List(_) => Err(serde::de::Error::custom("expected a map of files")),
    }
}

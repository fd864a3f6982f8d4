//! Project collation settings.

use serde::{Deserialize, Serialize};

const DEFAULT_SELF_FIXTURE_PATH: &str = "upgrade_status/tests/modules";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectsConfig {
    /// Check release data for uninstalled projects too. Default: false.
    pub check_disabled: Option<bool>,
    /// Machine name of the active install profile, never suggested for
    /// removal.
    pub active_profile: Option<String>,
    /// Path fragment identifying this tool's own test fixtures.
    /// Default: `upgrade_status/tests/modules`.
    pub self_fixture_path: Option<String>,
}

impl ProjectsConfig {
    pub fn effective_check_disabled(&self) -> bool {
        self.check_disabled.unwrap_or(false)
    }

    pub fn effective_self_fixture_path(&self) -> &str {
        self.self_fixture_path
            .as_deref()
            .unwrap_or(DEFAULT_SELF_FIXTURE_PATH)
    }
}

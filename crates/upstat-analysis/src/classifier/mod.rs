//! Finding classification.
//!
//! [`Classifier::classify`] is a pure function of the message, the owning
//! extension's kind and the platform versions. Rules apply in a fixed order
//! and later rules override earlier ones: version-derived category, then the
//! rector allow-list, then the broken-interface silencer, then the removal
//! horizon, then the time-boxed silencers.

pub mod rules;

use std::sync::LazyLock;

use regex::Regex;
use upstat_core::config::Platform;
use upstat_core::types::{Category, ExtensionDescriptor, Version};

use rules::{
    BROKEN_INTERFACE_MESSAGE, RECTOR_ALLOW_LIST, RECTOR_PREFIX, SILENCED_FRAGMENTS, SILENCED_UNTIL_MAJOR,
};

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

static COLON_DEPRECATED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":\s+(in|as of)\b").expect("valid deprecated-colon regex"));

static USE_DRUPAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\.\s)use \\Drupal").expect("valid use-drupal regex"));

static TEST_BASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(Web|)TestBase\. Deprecated in drupal:8\.8\.0").expect("valid test-base regex")
});

static DEPRECATED_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Deprecated (in|as of) drupal:(\d+\.\d+)").expect("valid deprecated-version regex")
});

static REMOVAL_HORIZON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(will be|is) removed (before|from) drupal:(\d+)").expect("valid removal regex")
});

const TEST_BASE_VERSION: Version = Version::new(8, 6, 0);
const TEST_BASE_NOTE: &str = " Replacement available from drupal:8.6.0.";

/// Who owns the code a finding was raised in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner {
    /// Published project (has a `project` key); must keep supporting every
    /// supported minor.
    Distributable,
    /// Site-specific code; only the running version matters.
    SiteLocal,
}

impl Owner {
    pub fn of(extension: &ExtensionDescriptor) -> Self {
        if extension.project_id().is_some() {
            Self::Distributable
        } else {
            Self::SiteLocal
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub message: String,
    pub category: Category,
}

#[derive(Debug, Clone)]
pub struct Classifier {
    platform: Platform,
}

impl Classifier {
    pub fn new(platform: Platform) -> Self {
        Self { platform }
    }

    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    pub fn classify(&self, raw: &str, owner: Owner) -> Classification {
        let message = normalize(raw);
        let (message, version) = extract_version(message);

        let mut category = match version {
            None => Category::Uncategorized,
            Some(version) => match owner {
                Owner::Distributable if version <= self.platform.oldest_supported_minor => Category::Old,
                Owner::SiteLocal if version <= self.platform.version => Category::Safe,
                _ => Category::Later,
            },
        };

        if RECTOR_ALLOW_LIST.contains(message.as_str()) || message.starts_with(RECTOR_PREFIX) {
            category = Category::Rector;
        }

        if message == BROKEN_INTERFACE_MESSAGE {
            category = Category::Ignore;
        }

        if let Some(cap) = REMOVAL_HORIZON.captures(&message) {
            let removal_major = cap[3].parse::<u64>().unwrap_or(0);
            if removal_major > self.platform.major() + 1 {
                category = Category::Ignore;
            }
        }

        if self.platform.major() < SILENCED_UNTIL_MAJOR
            && SILENCED_FRAGMENTS.iter().any(|f| message.contains(f))
        {
            category = Category::Ignore;
        }

        Classification { message, category }
    }
}

/// Collapse whitespace and rewrite `": in"`/`": as of"` into
/// `". Deprecated in"`.
pub fn normalize(raw: &str) -> String {
    let collapsed = WHITESPACE.replace_all(raw, " ");
    let rewritten = COLON_DEPRECATED.replace_all(collapsed.trim(), ". Deprecated $1");
    USE_DRUPAL.replace_all(&rewritten, "${1}Use \\Drupal").into_owned()
}

fn extract_version(mut message: String) -> (String, Option<Version>) {
    if TEST_BASE.is_match(&message) {
        if !message.ends_with(TEST_BASE_NOTE.trim_start()) {
            message.push_str(TEST_BASE_NOTE);
        }
        return (message, Some(TEST_BASE_VERSION));
    }
    let version = DEPRECATED_VERSION
        .captures(&message)
        .and_then(|cap| Version::parse(&cap[2]).ok());
    (message, version)
}

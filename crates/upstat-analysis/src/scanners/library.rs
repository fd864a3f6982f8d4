//! Deprecated asset library usage.
//!
//! References are collected from four places: the info file (`libraries`,
//! `libraries-override`, `libraries-extend`), library dependency lists in
//! `<ext>.libraries.yml`, `attach_library()` calls in templates, and
//! `extension/library` string literals on library-related source lines.
//! Each referenced library is then looked up in the library registry.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use upstat_core::errors::ScanError;
use upstat_core::traits::LibraryRegistry;
use upstat_core::types::{AnalyzerTag, ExtensionDescriptor, Finding, InfoMetadata, LibraryDefinition};

use super::walker::{display_path, file_name, ExtensionWalker};
use super::{error_finding, read_file, FileScanner};

pub const LIBRARY_ID_PLACEHOLDER: &str = "%library_id%";

static ATTACH_LIBRARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"attach_library\(\s*['"]([^'"]+)['"]\s*\)"#).expect("valid attach_library regex")
});

static LIBRARY_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"['"]([a-z0-9_]+/[A-Za-z0-9_.\-]+)['"]"#).expect("valid library literal regex")
});

const SOURCE_EXTENSIONS: [&str; 5] = ["php", "module", "theme", "inc", "install"];

/// One place a library is referenced from.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct LibraryReference {
    pub file: String,
    pub line: u32,
    pub library: String,
}

/// What the registry says about a referenced library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibraryStatus {
    Current,
    Deprecated(String),
    /// The owning extension is not installed.
    Indeterminate,
}

pub struct LibraryScanner {
    walker: ExtensionWalker,
    registry: Arc<dyn LibraryRegistry>,
}

impl LibraryScanner {
    pub fn new(walker: ExtensionWalker, registry: Arc<dyn LibraryRegistry>) -> Self {
        Self { walker, registry }
    }

    /// Resolve one `extension/library` id against the registry.
    pub fn status(
        &self,
        library_id: &str,
        cache: &mut BTreeMap<String, Option<BTreeMap<String, LibraryDefinition>>>,
    ) -> LibraryStatus {
        let Some((extension, library)) = library_id.split_once('/') else {
            return LibraryStatus::Current;
        };
        let definitions = cache
            .entry(extension.to_string())
            .or_insert_with(|| self.registry.libraries_for(extension));
        match definitions {
            None => LibraryStatus::Indeterminate,
            Some(definitions) => match definitions.get(library).and_then(|d| d.deprecated.as_deref()) {
                Some(message) => LibraryStatus::Deprecated(message.replace(LIBRARY_ID_PLACEHOLDER, library_id)),
                None => LibraryStatus::Current,
            },
        }
    }

    /// Gather every reference. Files that cannot be read or parsed are
    /// recorded in `errors` and skipped.
    fn collect_references(&self, extension: &ExtensionDescriptor, errors: &mut Vec<ScanError>) -> Vec<LibraryReference> {
        let root = extension.path();
        let mut refs = Vec::new();

        let info_path = root.join(format!("{}.info.yml", extension.machine_name));
        if info_path.is_file() {
            if let Err(e) = info_references(&info_path, &mut refs) {
                errors.push(e);
            }
        }

        let libraries_path = root.join(format!("{}.libraries.yml", extension.machine_name));
        if libraries_path.is_file() {
            if let Err(e) = dependency_references(&libraries_path, &mut refs) {
                errors.push(e);
            }
        }

        let templates = self
            .walker
            .files(root, |path| file_name(path).ends_with(".html.twig"));
        for template in templates {
            let contents = match read_file(&template) {
                Ok(contents) => contents,
                Err(e) => {
                    errors.push(e);
                    continue;
                }
            };
            for (idx, line) in contents.lines().enumerate() {
                for cap in ATTACH_LIBRARY.captures_iter(line) {
                    refs.push(LibraryReference {
                        file: display_path(&template),
                        line: idx as u32 + 1,
                        library: cap[1].to_string(),
                    });
                }
            }
        }

        let sources = self.walker.files(root, |path| {
            path.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| SOURCE_EXTENSIONS.contains(&e))
        });
        for source in sources {
            let contents = match read_file(&source) {
                Ok(contents) => contents,
                Err(e) => {
                    errors.push(e);
                    continue;
                }
            };
            for (idx, line) in contents.lines().enumerate() {
                if !line.contains("librar") {
                    continue;
                }
                for cap in LIBRARY_LITERAL.captures_iter(line) {
                    refs.push(LibraryReference {
                        file: display_path(&source),
                        line: idx as u32 + 1,
                        library: cap[1].to_string(),
                    });
                }
            }
        }

        refs.retain(|r| r.library.contains('/'));
        refs.sort();
        refs.dedup();
        refs
    }
}

fn info_references(info_path: &Path, refs: &mut Vec<LibraryReference>) -> Result<(), ScanError> {
    let contents = read_file(info_path)?;
    let info = InfoMetadata::from_yaml(&contents).map_err(|e| ScanError::Yaml {
        path: info_path.to_path_buf(),
        message: e.to_string(),
    })?;
    let ids = info
        .libraries
        .iter()
        .chain(info.libraries_override.keys())
        .chain(info.libraries_extend.keys());
    for id in ids {
        push_reference(refs, info_path, &contents, id);
    }
    Ok(())
}

fn dependency_references(libraries_path: &Path, refs: &mut Vec<LibraryReference>) -> Result<(), ScanError> {
    let contents = read_file(libraries_path)?;
    let definitions: BTreeMap<String, LibraryDefinition> = if contents.trim().is_empty() {
        BTreeMap::new()
    } else {
        serde_yaml::from_str(&contents).map_err(|e| ScanError::Yaml {
            path: libraries_path.to_path_buf(),
            message: e.to_string(),
        })?
    };
    for definition in definitions.values() {
        for id in &definition.dependencies {
            push_reference(refs, libraries_path, &contents, id);
        }
    }
    Ok(())
}

fn push_reference(refs: &mut Vec<LibraryReference>, path: &Path, contents: &str, id: &str) {
    let line = contents
        .lines()
        .position(|l| l.contains(id))
        .map_or(0, |idx| idx as u32 + 1);
    refs.push(LibraryReference {
        file: display_path(path),
        line,
        library: id.to_string(),
    });
}

impl FileScanner for LibraryScanner {
    fn tag(&self) -> AnalyzerTag {
        AnalyzerTag::Library
    }

    fn scan(&self, extension: &ExtensionDescriptor) -> Result<Vec<Finding>, ScanError> {
        let mut errors = Vec::new();
        let refs = self.collect_references(extension, &mut errors);
        let mut cache = BTreeMap::new();
        let mut seen = BTreeSet::new();
        let mut findings: Vec<Finding> = errors.iter().map(|e| error_finding(self.tag(), e)).collect();

        for reference in refs {
            let message = match self.status(&reference.library, &mut cache) {
                LibraryStatus::Current => continue,
                LibraryStatus::Deprecated(message) => message,
                LibraryStatus::Indeterminate => {
                    let owner = reference.library.split('/').next().unwrap_or_default();
                    format!(
                        "The '{}' library is not loadable because the '{owner}' extension is not installed, so its deprecation status cannot be determined.",
                        reference.library
                    )
                }
            };
            if seen.insert((reference.file.clone(), reference.line, message.clone())) {
                findings.push(Finding::new(message, reference.file, reference.line, AnalyzerTag::Library));
            }
        }
        Ok(findings)
    }
}

//! Twig template deprecations.

pub mod engine;

use std::sync::{Arc, LazyLock};

use regex::Regex;
use upstat_core::errors::ScanError;
use upstat_core::types::{AnalyzerTag, ExtensionDescriptor, Finding};

pub use engine::{BuiltinTwigEngine, RuntimeDeprecation, TemplateEngine, TemplateSyntaxError};

use super::walker::{display_path, file_name, ExtensionWalker};
use super::{error_finding, read_file, FileScanner};

static TEMPLATE_LOCATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"in "([^"]+)" at line (\d+)"#).expect("valid template location regex")
});

pub struct TwigScanner {
    walker: ExtensionWalker,
    engine: Arc<dyn TemplateEngine>,
}

impl TwigScanner {
    /// Dot directories are always skipped in addition to the walker's
    /// ignore list.
    pub fn new(walker: ExtensionWalker, engine: Arc<dyn TemplateEngine>) -> Self {
        Self {
            walker: walker.skipping_dot_dirs(),
            engine,
        }
    }
}

/// Attribute a deprecation to the template named in its message, falling
/// back to where the runtime raised it.
pub fn deprecation_to_finding(deprecation: RuntimeDeprecation) -> Finding {
    let located = TEMPLATE_LOCATION.captures(&deprecation.message).and_then(|cap| {
        let line = cap[2].parse::<u32>().ok()?;
        Some((cap[1].to_string(), line))
    });
    let (file, line) = located.unwrap_or((deprecation.file, deprecation.line));
    Finding::new(deprecation.message, file, line, AnalyzerTag::Twig)
}

impl FileScanner for TwigScanner {
    fn tag(&self) -> AnalyzerTag {
        AnalyzerTag::Twig
    }

    fn scan(&self, extension: &ExtensionDescriptor) -> Result<Vec<Finding>, ScanError> {
        let templates = self
            .walker
            .files(extension.path(), |path| file_name(path).ends_with(".html.twig"));

        let mut findings = Vec::new();
        for template in templates {
            let source = match read_file(&template) {
                Ok(source) => source,
                Err(e) => {
                    findings.push(error_finding(self.tag(), &e));
                    continue;
                }
            };
            let name = display_path(&template);
            let parsed = self.engine.parse(&name, &source, &mut |deprecation| {
                findings.push(deprecation_to_finding(deprecation));
            });
            if let Err(e) = parsed {
                tracing::debug!(template = %name, error = %e, "template syntax error");
                findings.push(Finding::new(e.message, name, e.line, AnalyzerTag::Twig));
            }
        }
        findings.sort_by(|a, b| a.file.cmp(&b.file));
        Ok(findings)
    }
}

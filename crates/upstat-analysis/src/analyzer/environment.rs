//! Analyzer environment discovery.
//!
//! Locates the interpreter and the analyzer binary, claims a writable
//! scratch directory, and writes the rule file the analyzer is pointed at.
//! Discovery runs at most once per [`EnvironmentCell`].

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use upstat_core::config::AnalyzerConfig;
use upstat_core::errors::EnvironmentError;

const BUILTIN_RULE_TEMPLATE: &str = include_str!("deprecation_rules.neon");
const RULE_FILE_NAME: &str = "deprecation_testing.neon";

/// Vendor rule sets included in the generated rule file.
pub const REQUIRED_RULE_INCLUDES: [&str; 2] = [
    "mglaman/phpstan-drupal/extension.neon",
    "phpstan/phpstan-deprecation-rules/rules.neon",
];
pub const OPTIONAL_RULE_INCLUDES: [&str; 1] = ["jangregor/phpstan-prophecy/extension.neon"];

/// Everything needed to invoke the analyzer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    pub executable: PathBuf,
    pub analyze_binary: PathBuf,
    /// Working directory for the subprocess.
    pub platform_root: PathBuf,
    pub temp_dir: PathBuf,
    pub rule_file: PathBuf,
}

impl Environment {
    pub fn prepare(config: &AnalyzerConfig) -> Result<Self, EnvironmentError> {
        let platform_root = config.effective_site_root();
        let vendor_dir = match &config.vendor_dir {
            Some(dir) => dir.clone(),
            None => composer_vendor_dir(&platform_root)?
                .unwrap_or_else(|| config.effective_vendor_dir()),
        };

        let executable = which::which(config.effective_executable()).map_err(|_| {
            EnvironmentError::ExecutableNotFound {
                name: config.effective_executable().to_string(),
            }
        })?;

        let analyze_binary = vendor_dir.join("bin").join("phpstan");
        if !analyze_binary.is_file() {
            return Err(EnvironmentError::AnalyzerBinaryNotFound {
                path: analyze_binary,
            });
        }

        let temp_dir = config.effective_temp_dir();
        ensure_writable(&temp_dir)?;

        let template = match &config.rule_template {
            Some(path) => fs::read_to_string(path).map_err(|e| EnvironmentError::RuleTemplateUnreadable {
                path: path.clone(),
                message: e.to_string(),
            })?,
            None => BUILTIN_RULE_TEMPLATE.to_string(),
        };

        let mut includes = Vec::new();
        for rel in REQUIRED_RULE_INCLUDES {
            let path = vendor_dir.join(rel);
            if !path.is_file() {
                return Err(EnvironmentError::RuleFileMissing { path });
            }
            includes.push(path);
        }
        includes.extend(
            OPTIONAL_RULE_INCLUDES
                .iter()
                .map(|rel| vendor_dir.join(rel))
                .filter(|path| path.is_file()),
        );

        let rule_file = temp_dir.join(RULE_FILE_NAME);
        fs::write(&rule_file, render_rule_file(&template, &temp_dir, &includes)).map_err(|e| {
            EnvironmentError::RuleFileWrite {
                path: rule_file.clone(),
                message: e.to_string(),
            }
        })?;

        tracing::info!(
            executable = %executable.display(),
            analyzer = %analyze_binary.display(),
            rule_file = %rule_file.display(),
            includes = includes.len(),
            "analyzer environment ready"
        );

        Ok(Self {
            executable,
            analyze_binary,
            platform_root,
            temp_dir,
            rule_file,
        })
    }
}

/// Inject the scratch directory under `parameters:` and append the
/// `includes:` block.
pub fn render_rule_file(template: &str, temp_dir: &Path, includes: &[PathBuf]) -> String {
    let tmp_line = format!(
        "parameters:\n\ttmpDir: '{}'",
        temp_dir.join("phpstan").display()
    );
    let mut rendered = template.replacen("parameters:", &tmp_line, 1);
    if !rendered.ends_with('\n') {
        rendered.push('\n');
    }
    if !includes.is_empty() {
        rendered.push_str("includes:\n");
        for include in includes {
            rendered.push_str(&format!("\t- '{}'\n", include.display()));
        }
    }
    rendered
}

/// `config.vendor-dir` from the site's `composer.json`, if declared.
fn composer_vendor_dir(root: &Path) -> Result<Option<PathBuf>, EnvironmentError> {
    let path = root.join("composer.json");
    if !path.is_file() {
        return Ok(None);
    }
    let malformed = |message: String| EnvironmentError::MalformedComposer {
        path: path.clone(),
        message,
    };
    let contents = fs::read_to_string(&path).map_err(|e| malformed(e.to_string()))?;
    let json: serde_json::Value = serde_json::from_str(&contents).map_err(|e| malformed(e.to_string()))?;
    if !json.is_object() {
        return Err(malformed("top level is not an object".to_string()));
    }
    Ok(json
        .pointer("/config/vendor-dir")
        .and_then(|v| v.as_str())
        .map(|dir| root.join(dir)))
}

fn ensure_writable(dir: &Path) -> Result<(), EnvironmentError> {
    let unavailable = |message: String| EnvironmentError::TempDirUnavailable {
        path: dir.to_path_buf(),
        message,
    };
    fs::create_dir_all(dir.join("phpstan")).map_err(|e| unavailable(e.to_string()))?;
    let probe = dir.join(".upstat-write-probe");
    fs::write(&probe, b"").map_err(|e| unavailable(e.to_string()))?;
    let _ = fs::remove_file(&probe);
    Ok(())
}

/// Lazily prepared [`Environment`]. Only success is cached; a failed
/// preparation is retried on the next call.
#[derive(Debug)]
pub struct EnvironmentCell {
    config: AnalyzerConfig,
    cell: OnceLock<Environment>,
}

impl EnvironmentCell {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self {
            config,
            cell: OnceLock::new(),
        }
    }

    /// A cell that is already prepared.
    pub fn ready(environment: Environment) -> Self {
        let cell = OnceLock::new();
        let _ = cell.set(environment);
        Self {
            config: AnalyzerConfig::default(),
            cell,
        }
    }

    pub fn get(&self) -> Option<&Environment> {
        self.cell.get()
    }

    pub fn get_or_prepare(&self) -> Result<&Environment, EnvironmentError> {
        if let Some(environment) = self.cell.get() {
            return Ok(environment);
        }
        let environment = Environment::prepare(&self.config)?;
        Ok(self.cell.get_or_init(|| environment))
    }
}

//! Running the analyzer and turning its output into findings.

use std::path::Path;
use std::process::Command;
use std::sync::LazyLock;

use regex::Regex;
use upstat_core::types::{AnalyzerTag, Finding};

use super::environment::Environment;
use super::report::AnalyzerReport;

/// Stderr marker for a target with nothing to analyse.
pub const NO_FILES_MARKER: &str = "No files found to analyse";

/// File key of the synthetic finding for unusable analyzer output.
pub const FAILURE_SENTINEL: &str = "PHPStan failed";

static FILE_SCOPED_ERROR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^(.+) on line (\d+) while analysing file (.+)$").expect("valid general error regex")
});

/// Findings and base totals from one analyzer invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalyzerRun {
    pub findings: Vec<Finding>,
    pub error_count: usize,
    pub file_error_count: usize,
}

pub struct ExternalAnalyzer<'a> {
    environment: &'a Environment,
}

impl<'a> ExternalAnalyzer<'a> {
    pub fn new(environment: &'a Environment) -> Self {
        Self { environment }
    }

    pub fn command_line(&self, target: &Path, memory_limit: &str) -> Vec<String> {
        let env = self.environment;
        vec![
            env.executable.display().to_string(),
            env.analyze_binary.display().to_string(),
            "analyse".to_string(),
            format!("--memory-limit={memory_limit}"),
            "--error-format=json".to_string(),
            format!("--configuration={}", env.rule_file.display()),
            target.display().to_string(),
        ]
    }

    /// Run against `target`. Never fails: unusable output degrades to a
    /// single sentinel finding. The exit code is ignored.
    pub fn run(&self, target: &Path, memory_limit: &str) -> AnalyzerRun {
        let argv = self.command_line(target, memory_limit);
        tracing::debug!(command = %argv.join(" "), "running analyzer");

        let output = Command::new(&argv[0])
            .args(&argv[1..])
            .current_dir(&self.environment.platform_root)
            .output();
        let (stdout, stderr) = match output {
            Ok(output) => (
                String::from_utf8_lossy(&output.stdout).into_owned(),
                String::from_utf8_lossy(&output.stderr).into_owned(),
            ),
            Err(e) => (String::new(), e.to_string()),
        };
        interpret_output(&argv, &stdout, &stderr)
    }
}

/// Convert raw analyzer output into an [`AnalyzerRun`].
pub fn interpret_output(argv: &[String], stdout: &str, stderr: &str) -> AnalyzerRun {
    if stderr.contains(NO_FILES_MARKER) {
        return AnalyzerRun::default();
    }

    let report = match AnalyzerReport::from_json(stdout) {
        Ok(report) => report,
        Err(e) => {
            tracing::warn!(error = %e, "analyzer output is not a valid report");
            let or_empty = |s: &str| {
                let s = s.trim();
                if s.is_empty() {
                    "Empty.".to_string()
                } else {
                    s.to_string()
                }
            };
            let message = format!(
                "Analyzer command failed: {} | Command output: {} | Command error: {}",
                argv.join(" "),
                or_empty(stdout),
                or_empty(stderr)
            );
            return AnalyzerRun {
                findings: vec![Finding::new(message, FAILURE_SENTINEL, 0, AnalyzerTag::Phpstan)],
                error_count: 1,
                file_error_count: 1,
            };
        }
    };

    let mut run = AnalyzerRun {
        findings: Vec::new(),
        error_count: report.totals.errors,
        file_error_count: report.totals.file_errors,
    };

    for (file, messages) in report.files {
        for message in messages.messages {
            run.findings.push(Finding::new(
                message.message,
                file.clone(),
                message.line.unwrap_or(0),
                AnalyzerTag::Phpstan,
            ));
        }
    }

    for error in report.errors {
        match FILE_SCOPED_ERROR.captures(error.trim()) {
            Some(cap) => {
                let line = cap[2].parse().unwrap_or(0);
                run.findings.push(Finding::new(
                    cap[1].trim(),
                    cap[3].trim(),
                    line,
                    AnalyzerTag::Phpstan,
                ));
                run.file_error_count += 1;
            }
            None => tracing::warn!(error = %error, "dropping general analyzer error"),
        }
    }
    run
}

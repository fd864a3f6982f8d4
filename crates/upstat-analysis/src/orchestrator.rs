//! One full analysis of one extension.
//!
//! Runs the external analyzer and every file scanner, merges their findings
//! per file, classifies each finding, rolls up the totals and the next
//! step, and persists the result. Only an unusable analyzer environment
//! aborts a run; everything else degrades to findings.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use upstat_core::config::UpstatConfig;
use upstat_core::errors::{AnalysisError, ConfigError, UpstatErrorCode};
use upstat_core::traits::{LibraryRegistry, ResultStore};
use upstat_core::types::{
    AnalysisResult, Category, ClassifiedFinding, ExtensionDescriptor, Finding, NextStep, Totals,
};

use crate::analyzer::{EnvironmentCell, ExternalAnalyzer};
use crate::classifier::{Classifier, Owner};
use crate::scanners::theme_function::REMOVAL_MAJOR;
use crate::scanners::twig::{BuiltinTwigEngine, TemplateEngine};
use crate::scanners::{
    run_guarded, ConfigSchemaScanner, CssScanner, ExtensionMetadataScanner, ExtensionWalker, FileScanner,
    LibraryScanner, RouteScanner, ThemeFunctionScanner, TwigScanner,
};

/// Per-run options.
#[derive(Debug, Clone, Default)]
pub struct AnalysisOptions {
    /// Overrides `[analyzer] memory_limit`.
    pub memory_limit: Option<String>,
}

pub struct AnalysisOrchestrator {
    environment: Arc<EnvironmentCell>,
    store: Arc<dyn ResultStore>,
    classifier: Classifier,
    memory_limit: String,
    metadata: ExtensionMetadataScanner,
    scanners: Vec<Box<dyn FileScanner>>,
    theme_functions: ThemeFunctionScanner,
}

impl AnalysisOrchestrator {
    pub fn new(
        config: &UpstatConfig,
        environment: Arc<EnvironmentCell>,
        store: Arc<dyn ResultStore>,
        libraries: Arc<dyn LibraryRegistry>,
    ) -> Result<Self, ConfigError> {
        Self::with_template_engine(config, environment, store, libraries, Arc::new(BuiltinTwigEngine::new()))
    }

    pub fn with_template_engine(
        config: &UpstatConfig,
        environment: Arc<EnvironmentCell>,
        store: Arc<dyn ResultStore>,
        libraries: Arc<dyn LibraryRegistry>,
        engine: Arc<dyn TemplateEngine>,
    ) -> Result<Self, ConfigError> {
        let platform = config.platform.resolve()?;
        let walker = ExtensionWalker::from_config(&config.scan);

        let scanners: Vec<Box<dyn FileScanner>> = vec![
            Box::new(TwigScanner::new(walker.clone(), engine)),
            Box::new(LibraryScanner::new(walker.clone(), libraries)),
            Box::new(RouteScanner::new(walker.clone())),
            Box::new(CssScanner::new(walker.clone())),
            Box::new(ConfigSchemaScanner::new(walker.clone())),
        ];

        Ok(Self {
            environment,
            store,
            metadata: ExtensionMetadataScanner::new(
                walker,
                platform.clone(),
                config.projects.effective_self_fixture_path(),
            ),
            classifier: Classifier::new(platform),
            memory_limit: config.analyzer.effective_memory_limit().to_string(),
            scanners,
            theme_functions: ThemeFunctionScanner::new(),
        })
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Analyze `extension` and persist the result, replacing any previous
    /// one.
    pub fn analyze(
        &self,
        extension: &ExtensionDescriptor,
        options: &AnalysisOptions,
    ) -> Result<AnalysisResult, AnalysisError> {
        let environment = self.environment.get_or_prepare().inspect_err(|e| {
            tracing::error!(
                extension = %extension.machine_name,
                code = e.error_code(),
                error = %e,
                "analyzer environment unavailable"
            );
        })?;

        tracing::info!(extension = %extension.machine_name, path = %extension.path().display(), "analysis started");

        let memory_limit = options.memory_limit.as_deref().unwrap_or(&self.memory_limit);
        let run = ExternalAnalyzer::new(environment).run(extension.path(), memory_limit);

        let mut totals = Totals::new(run.error_count, run.file_error_count);
        let mut per_file: BTreeMap<String, Vec<Finding>> = BTreeMap::new();
        for finding in run.findings {
            per_file.entry(finding.file.clone()).or_default().push(finding);
        }

        let mut scanned = run_guarded(&self.metadata, extension);
        totals.declared_ready = scanned.is_empty();
        for scanner in &self.scanners {
            scanned.extend(run_guarded(scanner.as_ref(), extension));
        }
        if self.classifier.platform().major() < REMOVAL_MAJOR {
            scanned.extend(run_guarded(&self.theme_functions, extension));
        }
        for finding in scanned {
            totals.errors += 1;
            totals.file_errors += 1;
            per_file.entry(finding.file.clone()).or_default().push(finding);
        }

        let owner = Owner::of(extension);
        let mut files = BTreeMap::new();
        for (file, findings) in per_file {
            let classified: Vec<ClassifiedFinding> = findings
                .into_iter()
                .map(|finding| {
                    let classification = self.classifier.classify(&finding.message, owner);
                    record_category(&mut totals, classification.category);
                    ClassifiedFinding {
                        finding,
                        rewritten_message: classification.message,
                        category: classification.category,
                    }
                })
                .collect();
            files.insert(file, classified);
        }

        let result = AnalysisResult {
            timestamp: Utc::now(),
            files,
            totals,
        };
        self.store.put(&extension.machine_name, &result)?;

        tracing::info!(
            extension = %extension.machine_name,
            findings = result.finding_count(),
            next_step = %result.totals.next_step,
            "analysis stored"
        );
        Ok(result)
    }

    /// Analyze several extensions one after another. A broken environment
    /// stops the batch at the first extension it affects.
    pub fn analyze_all(
        &self,
        extensions: &[ExtensionDescriptor],
        options: &AnalysisOptions,
    ) -> Vec<(String, Result<AnalysisResult, AnalysisError>)> {
        let mut outcomes = Vec::with_capacity(extensions.len());
        for extension in extensions {
            let outcome = self.analyze(extension, options);
            let stop = matches!(outcome, Err(AnalysisError::Environment(_)));
            outcomes.push((extension.machine_name.clone(), outcome));
            if stop {
                tracing::warn!(remaining = extensions.len() - outcomes.len(), "batch stopped");
                break;
            }
        }
        outcomes
    }
}

/// Fold one classified finding into the running totals.
///
/// A rector finding forces `Rector`; otherwise the first non-ignored
/// finding moves `Relax` to `Manual`.
pub fn record_category(totals: &mut Totals, category: Category) {
    if category == Category::Rector {
        totals.next_step = NextStep::Rector;
    } else if totals.next_step == NextStep::Relax && category != Category::Ignore {
        totals.next_step = NextStep::Manual;
    }
    *totals.categories.entry(category).or_insert(0) += 1;
    if let Some(split) = category.split() {
        totals.split.record(split);
    }
}

//! End-to-end analysis runs against a scripted analyzer.
//!
//! T6-ORC-01: Classified and persisted results
//! T6-ORC-02: Scanner findings
//! T6-ORC-03: Environment failures

#![cfg(unix)]

mod common;

use std::path::Path;
use std::sync::Arc;

use common::{extension, scripted_environment, write, EMPTY_REPORT};
use upstat_analysis::analyzer::FAILURE_SENTINEL;
use upstat_analysis::registry::InMemoryLibraryRegistry;
use upstat_analysis::{AnalysisOptions, AnalysisOrchestrator, EnvironmentCell};
use upstat_core::config::{AnalyzerConfig, UpstatConfig};
use upstat_core::errors::AnalysisError;
use upstat_core::traits::ResultStore;
use upstat_core::types::{AnalyzerTag, Category, ExtensionType, NextStep};
use upstat_storage::SqliteResultStore;

const RECTOR_MESSAGE: &str = "Call to deprecated function drupal_set_message():\nin drupal:8.5.0 and is removed from drupal:9.0.0. Use \\Drupal\\Core\\Messenger\\MessengerInterface::addMessage() instead.";

fn orchestrator(
    config: &UpstatConfig,
    cell: EnvironmentCell,
) -> (AnalysisOrchestrator, Arc<SqliteResultStore>) {
    upstat_core::tracing::init();
    let store = Arc::new(SqliteResultStore::open_in_memory().unwrap());
    let orchestrator = AnalysisOrchestrator::new(
        config,
        Arc::new(cell),
        store.clone(),
        Arc::new(InMemoryLibraryRegistry::new()),
    )
    .unwrap();
    (orchestrator, store)
}

fn report_for(file: &Path, message: &str, line: u32) -> String {
    let key = file.to_string_lossy().into_owned();
    serde_json::json!({
        "totals": {"errors": 1, "file_errors": 1},
        "files": {
            key: {"errors": 1, "messages": [{"message": message, "line": line}]}
        },
        "errors": []
    })
    .to_string()
}

// ============================================================
// T6-ORC-01: Classified and persisted results
// ============================================================

#[test]
fn t6_orc_01a_rector_finding_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "modules/foo/foo.info.yml", "name: Foo\ntype: module\ncore_version_requirement: ^9 || ^10\n");
    write(root, "modules/foo/foo.module", "<?php\n\nfunction foo_help() {\n  drupal_set_message('x');\n}\n");
    let module_file = root.join("modules/foo/foo.module");
    let env = scripted_environment(root, &report_for(&module_file, RECTOR_MESSAGE, 4), 1);

    let (orchestrator, store) = orchestrator(&UpstatConfig::default(), EnvironmentCell::ready(env));
    let foo = extension(root, "modules/foo", "foo", ExtensionType::Module);
    let result = orchestrator.analyze(&foo, &AnalysisOptions::default()).unwrap();

    assert_eq!(result.finding_count(), 1);
    let findings = &result.files[&*module_file.to_string_lossy()];
    assert_eq!(findings[0].category, Category::Rector);
    assert_eq!(findings[0].line(), 4);
    assert!(findings[0].rewritten_message.contains("drupal_set_message(). Deprecated in"));
    assert!(findings[0].finding.message.contains(":\nin drupal:8.5.0"));

    let totals = &result.totals;
    assert_eq!((totals.errors, totals.file_errors), (1, 1));
    assert_eq!(totals.category_count(Category::Rector), 1);
    assert_eq!(totals.categories.len(), 1);
    assert_eq!((totals.split.error, totals.split.warning), (1, 0));
    assert_eq!(totals.next_step, NextStep::Rector);
    assert!(totals.declared_ready);

    assert_eq!(store.get("foo").unwrap(), Some(result));
}

#[test]
fn t6_orc_01b_reanalysis_replaces_previous_result() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "foo/foo.info.yml", "name: Foo\ntype: module\ncore_version_requirement: ^9 || ^10\n");
    let env = scripted_environment(root, EMPTY_REPORT, 0);
    let (orchestrator, store) = orchestrator(&UpstatConfig::default(), EnvironmentCell::ready(env));
    let foo = extension(root, "foo", "foo", ExtensionType::Module);

    let first = orchestrator.analyze(&foo, &AnalysisOptions::default()).unwrap();
    let second = orchestrator.analyze(&foo, &AnalysisOptions::default()).unwrap();
    assert!(second.timestamp >= first.timestamp);
    assert_eq!(store.list_names().unwrap(), vec!["foo".to_string()]);
    assert_eq!(store.get("foo").unwrap().unwrap().timestamp, second.timestamp);
    assert_eq!(second.totals.next_step, NextStep::Relax);
    assert_eq!(second.finding_count(), 0);
}

#[test]
fn t6_orc_01c_analyzer_failure_is_one_uncategorized_finding() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "foo/foo.info.yml", "name: Foo\ntype: module\ncore_version_requirement: ^9 || ^10\n");
    let env = scripted_environment(root, "Segmentation fault", 139);
    let (orchestrator, _store) = orchestrator(&UpstatConfig::default(), EnvironmentCell::ready(env));
    let foo = extension(root, "foo", "foo", ExtensionType::Module);

    let options = AnalysisOptions {
        memory_limit: Some("3G".into()),
    };
    let result = orchestrator.analyze(&foo, &options).unwrap();
    let sentinel = &result.files[FAILURE_SENTINEL];
    assert_eq!(sentinel.len(), 1);
    assert!(sentinel[0].finding.message.contains("--memory-limit=3G"));
    assert_eq!(sentinel[0].category, Category::Uncategorized);
    assert_eq!(result.totals.next_step, NextStep::Manual);
    assert!(result.totals.declared_ready);
}

// ============================================================
// T6-ORC-02: Scanner findings
// ============================================================

#[test]
fn t6_orc_02a_theme_without_base_theme() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "themes/bar/bar.info.yml", "name: Bar\ntype: theme\ncore_version_requirement: ^9 || ^10\n");
    let env = scripted_environment(root, EMPTY_REPORT, 0);
    let (orchestrator, store) = orchestrator(&UpstatConfig::default(), EnvironmentCell::ready(env));
    let bar = extension(root, "themes/bar", "bar", ExtensionType::Theme);

    let result = orchestrator.analyze(&bar, &AnalysisOptions::default()).unwrap();
    assert_eq!(result.finding_count(), 1);
    let (file, finding) = result.findings().next().unwrap();
    assert!(file.ends_with("bar.info.yml"));
    assert_eq!(finding.analyzer(), AnalyzerTag::ExtensionMetadata);
    assert_eq!(finding.category, Category::Uncategorized);

    let totals = &result.totals;
    assert_eq!((totals.errors, totals.file_errors), (1, 1));
    assert_eq!((totals.split.error, totals.split.warning), (0, 1));
    assert!(!totals.declared_ready);
    assert_eq!(totals.next_step, NextStep::Manual);
    assert!(store.get("bar").unwrap().is_some());
}

const THEME_HOOK: &str = "<?php\nfunction foo_theme() {\n  return ['foo_item' => ['function' => 'theme_foo_item']];\n}\n";

#[test]
fn t6_orc_02b_theme_functions_only_before_removal_major() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "foo/foo.info.yml", "name: Foo\ntype: module\ncore_version_requirement: ^9 || ^10\n");
    write(root, "foo/foo.module", THEME_HOOK);
    let foo = extension(root, "foo", "foo", ExtensionType::Module);
    let count_theme_functions = |result: &upstat_core::types::AnalysisResult| {
        result
            .findings()
            .filter(|(_, f)| f.analyzer() == AnalyzerTag::ThemeFunction)
            .count()
    };

    let env = scripted_environment(root, EMPTY_REPORT, 0);
    let (nine, _) = orchestrator(&UpstatConfig::default(), EnvironmentCell::ready(env.clone()));
    let result = nine.analyze(&foo, &AnalysisOptions::default()).unwrap();
    assert_eq!(count_theme_functions(&result), 1);

    let config = UpstatConfig::from_toml(
        "[platform]\nversion = \"10.1.0\"\noldest_supported_minor = \"10.0\"\n",
    )
    .unwrap();
    let (ten, _) = orchestrator(&config, EnvironmentCell::ready(env));
    let result = ten.analyze(&foo, &AnalysisOptions::default()).unwrap();
    assert_eq!(count_theme_functions(&result), 0);
}

// ============================================================
// T6-ORC-03: Environment failures
// ============================================================

fn broken_cell(root: &Path) -> EnvironmentCell {
    EnvironmentCell::new(AnalyzerConfig {
        site_root: Some(root.to_path_buf()),
        executable: Some("upstat-no-such-interpreter".into()),
        temp_dir: Some(root.join("tmp")),
        ..AnalyzerConfig::default()
    })
}

#[test]
fn t6_orc_03a_environment_failure_persists_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "foo/foo.info.yml", "name: Foo\ntype: module\n");
    let (orchestrator, store) = orchestrator(&UpstatConfig::default(), broken_cell(root));
    let foo = extension(root, "foo", "foo", ExtensionType::Module);

    let err = orchestrator.analyze(&foo, &AnalysisOptions::default()).unwrap_err();
    assert!(matches!(err, AnalysisError::Environment(_)));
    assert!(store.list_names().unwrap().is_empty());
}

#[test]
fn t6_orc_03b_batch_stops_at_environment_failure() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "foo/foo.info.yml", "name: Foo\ntype: module\n");
    write(root, "bar/bar.info.yml", "name: Bar\ntype: module\n");
    let (orchestrator, _) = orchestrator(&UpstatConfig::default(), broken_cell(root));
    let extensions = vec![
        extension(root, "foo", "foo", ExtensionType::Module),
        extension(root, "bar", "bar", ExtensionType::Module),
    ];

    let outcomes = orchestrator.analyze_all(&extensions, &AnalysisOptions::default());
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].0, "foo");
    assert!(outcomes[0].1.is_err());
}

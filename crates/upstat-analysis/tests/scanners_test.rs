//! Tests for the file scanners.
//!
//! T3-SCN-01: Route scanner
//! T3-SCN-02: CSS scanner
//! T3-SCN-03: Config schema scanner
//! T3-SCN-04: Extension metadata scanner
//! T3-SCN-05: Library scanner
//! T3-SCN-06: Theme function scanner
//! T3-SCN-07: Twig scanner
//! T3-SCN-08: Guarded execution
//! T3-SCN-09: Unreadable files do not discard other findings

mod common;

use std::sync::Arc;

use common::{extension, write, write_bytes};
use upstat_analysis::registry::InMemoryLibraryRegistry;
use upstat_analysis::scanners::twig::{RuntimeDeprecation, TemplateEngine, TemplateSyntaxError};
use upstat_analysis::scanners::*;
use upstat_core::config::Platform;
use upstat_core::errors::ScanError;
use upstat_core::types::{AnalyzerTag, ExtensionDescriptor, ExtensionType, Finding, LibraryDefinition};

fn walker() -> ExtensionWalker {
    ExtensionWalker::default()
}

fn metadata_scanner() -> ExtensionMetadataScanner {
    ExtensionMetadataScanner::new(walker(), Platform::default(), "upgrade_status/tests/modules")
}

// ============================================================
// T3-SCN-01: Route
// ============================================================

#[test]
fn t3_scn_01a_flags_deprecated_access_checks() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "foo/foo.routing.yml",
        "foo.revision:\n  path: '/node/{node}/revisions/{node_revision}/view'\n  requirements:\n    _access_node_revision: 'view'\n",
    );
    write(dir.path(), "foo/foo.extra.routing.yml", "_access_media_revision: 'view'\n");
    let ext = extension(dir.path(), "foo", "foo", ExtensionType::Module);

    let findings = RouteScanner::new(walker()).scan(&ext).unwrap();
    assert_eq!(findings.len(), 1);
    assert!(findings[0].message.contains("_access_node_revision"));
    assert_eq!(findings[0].line, 0);
    assert_eq!(findings[0].analyzer, AnalyzerTag::Route);
}

#[test]
fn t3_scn_01b_clean_routes_yield_nothing() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "foo/foo.routing.yml", "foo.page:\n  path: '/foo'\n");
    let ext = extension(dir.path(), "foo", "foo", ExtensionType::Module);
    assert!(RouteScanner::new(walker()).scan(&ext).unwrap().is_empty());
}

// ============================================================
// T3-SCN-02: CSS
// ============================================================

#[test]
fn t3_scn_02a_only_bare_selector_is_flagged() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "foo/css/safe.css",
        "#drupal-off-canvas-wrapper a { color: red; }\n#drupal-off-canvas:not(.drupal-off-canvas-reset) p {}\n",
    );
    write(dir.path(), "foo/css/bad.css", "#drupal-off-canvas p { margin: 0; }\n");
    write(dir.path(), "foo/css/plain.css", "body { margin: 0; }\n");
    write(dir.path(), "foo/node_modules/pkg/bad.css", "#drupal-off-canvas {}\n");
    let ext = extension(dir.path(), "foo", "foo", ExtensionType::Module);

    let findings = CssScanner::new(walker()).scan(&ext).unwrap();
    assert_eq!(findings.len(), 1);
    assert!(findings[0].file.ends_with("bad.css"));
    assert!(!findings[0].file.contains("node_modules"));
    assert_eq!(findings[0].line, 0);
}

// ============================================================
// T3-SCN-03: Config schema
// ============================================================

#[test]
fn t3_scn_03a_reports_first_match_line() {
    let dir = tempfile::tempdir().unwrap();
    let view = "langcode: en\nstatus: true\nid: frontpage\ndisplay:\n  default:\n    arguments:\n      default_argument_skip_url: false\n";
    write(dir.path(), "foo/config/optional/views.view.frontpage.yml", view);
    write(dir.path(), "foo/config/optional/views.view.other.yml", "id: other\n");
    let ext = extension(dir.path(), "foo", "foo", ExtensionType::Module);

    let findings = ConfigSchemaScanner::new(walker()).scan(&ext).unwrap();
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].line, 7);
    assert_eq!(findings[0].analyzer, AnalyzerTag::ConfigSchema);
}

#[test]
fn t3_scn_03b_fixtures_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "foo/tests/fixtures/views.view.x.yml",
        "default_argument_skip_url: true\n",
    );
    let ext = extension(dir.path(), "foo", "foo", ExtensionType::Module);
    assert!(ConfigSchemaScanner::new(walker()).scan(&ext).unwrap().is_empty());
}

// ============================================================
// T3-SCN-04: Extension metadata
// ============================================================

#[test]
fn t3_scn_04a_compatible_module_is_clean() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "foo/foo.info.yml",
        "name: Foo\ntype: module\ncore_version_requirement: ^9 || ^10\n",
    );
    write(
        dir.path(),
        "foo/composer.json",
        r#"{"name": "drupal/foo", "require": {"drupal/core": "^9 || ^10", "php": ">=8.1"}}"#,
    );
    let ext = extension(dir.path(), "foo", "foo", ExtensionType::Module);
    assert!(metadata_scanner().scan(&ext).unwrap().is_empty());
}

#[test]
fn t3_scn_04b_missing_and_incompatible_requirements() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "foo/foo.info.yml", "name: Foo\ntype: module\n");
    write(
        dir.path(),
        "foo/modules/sub/sub.info.yml",
        "name: Sub\ntype: module\ncore_version_requirement: ^8.8 || ^9\n",
    );
    write(
        dir.path(),
        "foo/modules/odd/odd.info.yml",
        "name: Odd\ntype: module\ncore_version_requirement: banana\n",
    );
    let ext = extension(dir.path(), "foo", "foo", ExtensionType::Module);

    let findings = metadata_scanner().scan(&ext).unwrap();
    assert_eq!(findings.len(), 3);
    assert!(findings
        .iter()
        .any(|f| f.message.starts_with("Add core_version_requirement to foo.info.yml")));
    let incompatible = findings
        .iter()
        .find(|f| f.message.contains("^8.8 || ^9 is not compatible"))
        .unwrap();
    assert_eq!(incompatible.line, 3);
    assert!(findings.iter().any(|f| f.message.contains("not a valid version constraint")));
}

#[test]
fn t3_scn_04c_theme_without_base_theme() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "bar/bar.info.yml",
        "name: Bar\ntype: theme\ncore_version_requirement: ^9 || ^10\n",
    );
    let ext = extension(dir.path(), "bar", "bar", ExtensionType::Theme);
    let findings = metadata_scanner().scan(&ext).unwrap();
    assert_eq!(findings.len(), 1);
    assert!(findings[0].message.contains("'base theme'"));

    write(
        dir.path(),
        "bar/bar.info.yml",
        "name: Bar\ntype: theme\nbase theme: false\ncore_version_requirement: ^9 || ^10\n",
    );
    assert!(metadata_scanner().scan(&ext).unwrap().is_empty());
}

#[test]
fn t3_scn_04d_lifecycle_uses_default_link() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "foo/foo.info.yml",
        "name: Foo\ntype: module\ncore_version_requirement: ^9 || ^10\nlifecycle: obsolete\n",
    );
    let ext = extension(dir.path(), "foo", "foo", ExtensionType::Module);
    let findings = metadata_scanner().scan(&ext).unwrap();
    assert_eq!(findings.len(), 1);
    assert!(findings[0].message.contains("obsolete"));
    assert!(findings[0].message.contains("https://www.drupal.org/node/3215042"));
    assert_eq!(findings[0].line, 4);
}

#[test]
fn t3_scn_04e_testing_package_skipped_outside_own_fixtures() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "foo/tests/modules/foo_test/foo_test.info.yml", "name: T\ntype: module\npackage: Testing\n");
    let ext = extension(dir.path(), "foo", "foo", ExtensionType::Module);
    assert!(metadata_scanner().scan(&ext).unwrap().is_empty());

    write(
        dir.path(),
        "upgrade_status/tests/modules/fixture/fixture.info.yml",
        "name: F\ntype: module\npackage: Testing\n",
    );
    let own = extension(dir.path(), "upgrade_status", "upgrade_status", ExtensionType::Module);
    assert_eq!(metadata_scanner().scan(&own).unwrap().len(), 1);
}

#[test]
fn t3_scn_04f_composer_constraints() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "foo/foo.info.yml", "name: Foo\ntype: module\ncore_version_requirement: ^9 || ^10\n");
    write(
        dir.path(),
        "foo/composer.json",
        "{\n  \"require\": {\n    \"drupal/core\": \"^8.8 || ^9\",\n    \"php\": \"^7.3\"\n  }\n}\n",
    );
    let ext = extension(dir.path(), "foo", "foo", ExtensionType::Module);
    let findings = metadata_scanner().scan(&ext).unwrap();
    assert_eq!(findings.len(), 2);
    assert_eq!(findings[0].line, 3);
    assert!(findings[1].message.contains("PHP 8.1"));

    write(dir.path(), "foo/composer.json", "{ not json");
    let findings = metadata_scanner().scan(&ext).unwrap();
    assert_eq!(findings.len(), 1);
    assert!(findings[0].message.contains("Invalid JSON"));
}

// ============================================================
// T3-SCN-05: Library
// ============================================================

fn library_registry() -> Arc<InMemoryLibraryRegistry> {
    Arc::new(
        InMemoryLibraryRegistry::new()
            .with_library(
                "core",
                "jquery.once",
                LibraryDefinition {
                    deprecated: Some(
                        "The \"%library_id%\" asset library is deprecated in drupal:9.3.0 and is removed from drupal:10.0.0. Use the core/once library instead."
                            .into(),
                    ),
                    dependencies: vec![],
                },
            )
            .with_library("foo", "global", LibraryDefinition::default())
            .with_library(
                "old",
                "lib",
                LibraryDefinition {
                    deprecated: Some("%library_id% is deprecated.".into()),
                    dependencies: vec![],
                },
            ),
    )
}

#[test]
fn t3_scn_05a_three_outcomes() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "foo/foo.info.yml",
        "name: Foo\ntype: theme\nlibraries:\n  - foo/global\n  - old/lib\n  - gone/thing\n",
    );
    write(
        dir.path(),
        "foo/foo.libraries.yml",
        "global:\n  js:\n    js/foo.js: {}\n  dependencies:\n    - core/jquery.once\n    - core/drupal\n",
    );
    write(dir.path(), "foo/templates/page.html.twig", "{{ attach_library('core/jquery.once') }}\n");
    write(
        dir.path(),
        "foo/foo.module",
        "<?php\n$path = 'node/add';\n$build['#attached']['library'][] = 'core/jquery.once';\n",
    );
    let ext = extension(dir.path(), "foo", "foo", ExtensionType::Theme);

    let findings = LibraryScanner::new(walker(), library_registry()).scan(&ext).unwrap();
    assert_eq!(findings.len(), 5, "{findings:#?}");

    let deprecated: Vec<&Finding> = findings
        .iter()
        .filter(|f| f.message.contains("\"core/jquery.once\" asset library"))
        .collect();
    assert_eq!(deprecated.len(), 3);
    assert!(deprecated.iter().any(|f| f.file.ends_with("foo.module") && f.line == 3));
    assert!(deprecated.iter().any(|f| f.file.ends_with("page.html.twig") && f.line == 1));

    assert!(findings.iter().any(|f| f.message == "old/lib is deprecated."));
    let indeterminate: Vec<&Finding> = findings
        .iter()
        .filter(|f| f.message.contains("'gone' extension is not installed"))
        .collect();
    assert_eq!(indeterminate.len(), 1);
    assert_eq!(indeterminate[0].line, 6);
}

// ============================================================
// T3-SCN-06: Theme functions
// ============================================================

const THEME_HOOKS: &str = r#"<?php

function foo_theme($existing, $type, $theme, $path) {
  return [
    'foo_item' => [
      'variables' => ['item' => NULL],
      'function' => 'theme_foo_item',
    ],
    'foo_list' => [
      'template' => 'foo-list',
    ],
  ];
}

function foo_theme_registry_alter(&$theme_registry) {
  $theme_registry['item_list']['function'] = 'foo_item_list';
}

function foo_unrelated() {
  return ['function' => 'not_a_hook'];
}
"#;

#[test]
fn t3_scn_06a_detects_both_declaration_shapes() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "foo/foo.module", THEME_HOOKS);
    let ext = extension(dir.path(), "foo", "foo", ExtensionType::Module);

    let findings = ThemeFunctionScanner::new().scan(&ext).unwrap();
    assert_eq!(findings.len(), 2, "{findings:#?}");
    assert!(findings[0].message.contains("'theme_foo_item'"));
    assert_eq!(findings[0].line, 7);
    assert!(findings[1].message.contains("'foo_item_list'"));
    assert_eq!(findings[1].line, 16);
}

#[test]
fn t3_scn_06b_theme_overrides() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "bar/bar.theme",
        "<?php\nfunction bar_preprocess_page(&$variables) {}\nfunction bar_item_list($variables) {\n  return '';\n}\nfunction bar_helper($a, $b) {}\n",
    );
    let ext = extension(dir.path(), "bar", "bar", ExtensionType::Theme);
    let findings = ThemeFunctionScanner::new().scan(&ext).unwrap();
    assert_eq!(findings.len(), 1);
    assert!(findings[0].message.contains("'item_list' theme function"));
    assert_eq!(findings[0].line, 3);
}

#[test]
fn t3_scn_06c_parse_error_is_one_finding() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "foo/foo.module", "<?php\nfunction foo_theme( {\n  return [\n");
    let ext = extension(dir.path(), "foo", "foo", ExtensionType::Module);
    let findings = ThemeFunctionScanner::new().scan(&ext).unwrap();
    assert_eq!(findings.len(), 1);
    assert!(findings[0].message.starts_with("Parse error"));
}

#[test]
fn t3_scn_06d_no_hooks_no_findings() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "foo/foo.module", "<?php\nfunction foo_help() {}\n");
    let ext = extension(dir.path(), "foo", "foo", ExtensionType::Module);
    assert!(ThemeFunctionScanner::new().scan(&ext).unwrap().is_empty());
}

// ============================================================
// T3-SCN-07: Twig
// ============================================================

#[test]
fn t3_scn_07a_sorted_findings_and_syntax_errors() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "foo/templates/b.html.twig", "{% spaceless %}<p>b</p>{% endspaceless %}\n");
    write(dir.path(), "foo/templates/a.html.twig", "\n{% filter upper %}a{% endfilter %}\n");
    write(dir.path(), "foo/templates/broken.html.twig", "{% if a %}\n{% endfor %}\n");
    write(dir.path(), "foo/.storybook/x.html.twig", "{% spaceless %}{% endspaceless %}");
    let ext = extension(dir.path(), "foo", "foo", ExtensionType::Module);

    let scanner = TwigScanner::new(walker(), Arc::new(twig::BuiltinTwigEngine::new()));
    let findings = scanner.scan(&ext).unwrap();
    assert_eq!(findings.len(), 3, "{findings:#?}");
    assert!(findings[0].file.ends_with("a.html.twig"));
    assert_eq!(findings[0].line, 2);
    assert!(findings[1].file.ends_with("b.html.twig"));
    assert!(findings[2].file.ends_with("broken.html.twig"));
    assert_eq!(findings[2].line, 2);
    assert!(findings.iter().all(|f| f.analyzer == AnalyzerTag::Twig));
}

struct RuntimeEngine;

impl TemplateEngine for RuntimeEngine {
    fn parse(
        &self,
        name: &str,
        _source: &str,
        deprecations: &mut dyn FnMut(RuntimeDeprecation),
    ) -> Result<(), TemplateSyntaxError> {
        deprecations(RuntimeDeprecation {
            message: "The \"drupal_escape\" filter is deprecated.".into(),
            file: "/core/lib/Drupal/Core/Template/TwigExtension.php".into(),
            line: 42,
        });
        deprecations(RuntimeDeprecation {
            message: format!("The \"x\" tag in \"{name}\" at line 9 is deprecated."),
            file: "/vendor/twig/twig/src/Parser.php".into(),
            line: 100,
        });
        Ok(())
    }
}

#[test]
fn t3_scn_07b_falls_back_to_runtime_location() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "foo/templates/a.html.twig", "x");
    let ext = extension(dir.path(), "foo", "foo", ExtensionType::Module);

    let findings = TwigScanner::new(walker(), Arc::new(RuntimeEngine)).scan(&ext).unwrap();
    assert_eq!(findings.len(), 2);
    let runtime = findings.iter().find(|f| f.line == 42).unwrap();
    assert_eq!(runtime.file, "/core/lib/Drupal/Core/Template/TwigExtension.php");
    let located = findings.iter().find(|f| f.line == 9).unwrap();
    assert!(located.file.ends_with("a.html.twig"));
}

// ============================================================
// T3-SCN-08: Guarded execution
// ============================================================

struct Failing;

impl FileScanner for Failing {
    fn tag(&self) -> AnalyzerTag {
        AnalyzerTag::Css
    }
    fn scan(&self, _extension: &ExtensionDescriptor) -> Result<Vec<Finding>, ScanError> {
        Err(ScanError::Parse {
            path: "/x/broken.css".into(),
            message: "bad bytes".into(),
        })
    }
}

struct Panicking;

impl FileScanner for Panicking {
    fn tag(&self) -> AnalyzerTag {
        AnalyzerTag::Route
    }
    fn scan(&self, _extension: &ExtensionDescriptor) -> Result<Vec<Finding>, ScanError> {
        panic!("scanner bug")
    }
}

#[test]
fn t3_scn_08a_errors_become_findings_and_panics_are_contained() {
    let ext = ExtensionDescriptor::new("foo", "/x", ExtensionType::Module);

    let findings = run_guarded(&Failing, &ext);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].file, "/x/broken.css");
    assert_eq!(findings[0].analyzer, AnalyzerTag::Css);
    assert!(findings[0].message.contains("bad bytes"));

    assert!(run_guarded(&Panicking, &ext).is_empty());
}

// ============================================================
// T3-SCN-09: Unreadable files
// ============================================================

/// Latin-1 bytes that are not valid UTF-8.
const NOT_UTF8: &[u8] = b"caf\xe9";

/// Asserts exactly one read failure, attributed to `bad` under `tag`, and
/// returns the remaining findings.
fn split_unreadable<'a>(findings: &'a [Finding], bad: &str, tag: AnalyzerTag) -> Vec<&'a Finding> {
    let (failed, rest): (Vec<&Finding>, Vec<&Finding>) =
        findings.iter().partition(|f| f.message.starts_with("Scanning failed"));
    assert_eq!(failed.len(), 1, "{findings:#?}");
    assert!(failed[0].file.ends_with(bad), "{:?}", failed[0].file);
    assert_eq!(failed[0].analyzer, tag);
    assert_eq!(failed[0].line, 0);
    rest
}

#[test]
fn t3_scn_09a_css_keeps_readable_stylesheets() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "foo/a.css", "#drupal-off-canvas p { margin: 0; }\n");
    write_bytes(dir.path(), "foo/b.css", NOT_UTF8);
    let ext = extension(dir.path(), "foo", "foo", ExtensionType::Module);

    let findings = run_guarded(&CssScanner::new(walker()), &ext);
    let rest = split_unreadable(&findings, "b.css", AnalyzerTag::Css);
    assert_eq!(rest.len(), 1);
    assert!(rest[0].file.ends_with("a.css"));
}

#[test]
fn t3_scn_09b_route_keeps_readable_routing_files() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "foo/foo.routing.yml", "r:\n  requirements:\n    _access_node_revision: 'view'\n");
    write_bytes(dir.path(), "foo/sub/bar.routing.yml", NOT_UTF8);
    let ext = extension(dir.path(), "foo", "foo", ExtensionType::Module);

    let findings = run_guarded(&RouteScanner::new(walker()), &ext);
    let rest = split_unreadable(&findings, "bar.routing.yml", AnalyzerTag::Route);
    assert_eq!(rest.len(), 1);
    assert!(rest[0].file.ends_with("foo.routing.yml"));
}

#[test]
fn t3_scn_09c_config_schema_keeps_readable_views() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "foo/config/install/views.view.a.yml", "id: a\ndefault_argument_skip_url: true\n");
    write_bytes(dir.path(), "foo/config/install/views.view.b.yml", NOT_UTF8);
    let ext = extension(dir.path(), "foo", "foo", ExtensionType::Module);

    let findings = run_guarded(&ConfigSchemaScanner::new(walker()), &ext);
    let rest = split_unreadable(&findings, "views.view.b.yml", AnalyzerTag::ConfigSchema);
    assert_eq!(rest.len(), 1);
    assert_eq!(rest[0].line, 2);
}

#[test]
fn t3_scn_09d_metadata_keeps_readable_info_files() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "foo/foo.info.yml", "name: Foo\ntype: module\n");
    write_bytes(dir.path(), "foo/sub/sub.info.yml", NOT_UTF8);
    let ext = extension(dir.path(), "foo", "foo", ExtensionType::Module);

    let findings = run_guarded(&metadata_scanner(), &ext);
    let rest = split_unreadable(&findings, "sub.info.yml", AnalyzerTag::ExtensionMetadata);
    assert!(!rest.is_empty());
    assert!(rest.iter().all(|f| f.file.ends_with("foo.info.yml")));
}

#[test]
fn t3_scn_09e_library_keeps_readable_templates() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "foo/templates/a.html.twig", "{{ attach_library('old/lib') }}\n");
    write_bytes(dir.path(), "foo/templates/b.html.twig", NOT_UTF8);
    let ext = extension(dir.path(), "foo", "foo", ExtensionType::Module);

    let findings = run_guarded(&LibraryScanner::new(walker(), library_registry()), &ext);
    let rest = split_unreadable(&findings, "b.html.twig", AnalyzerTag::Library);
    assert_eq!(rest.len(), 1);
    assert_eq!(rest[0].message, "old/lib is deprecated.");
}

#[test]
fn t3_scn_09f_theme_function_keeps_readable_module() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "foo/foo.module", THEME_HOOKS);
    write_bytes(dir.path(), "foo/foo.theme", NOT_UTF8);
    let ext = extension(dir.path(), "foo", "foo", ExtensionType::Module);

    let findings = run_guarded(&ThemeFunctionScanner::new(), &ext);
    let rest = split_unreadable(&findings, "foo.theme", AnalyzerTag::ThemeFunction);
    assert_eq!(rest.len(), 2);
}

#[test]
fn t3_scn_09g_twig_keeps_readable_templates() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "foo/templates/a.html.twig", "{% spaceless %}<p>a</p>{% endspaceless %}\n");
    write_bytes(dir.path(), "foo/templates/b.html.twig", NOT_UTF8);
    let ext = extension(dir.path(), "foo", "foo", ExtensionType::Module);

    let scanner = TwigScanner::new(walker(), Arc::new(twig::BuiltinTwigEngine::new()));
    let findings = run_guarded(&scanner, &ext);
    let rest = split_unreadable(&findings, "b.html.twig", AnalyzerTag::Twig);
    assert_eq!(rest.len(), 1);
    assert!(rest[0].message.contains("\"spaceless\" tag"));
}

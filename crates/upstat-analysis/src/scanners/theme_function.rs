//! Legacy theme functions.
//!
//! `<ext>_theme()` and `<ext>_theme_registry_alter()` are parsed with
//! tree-sitter and searched for the two ways a theme hook can point at a
//! function instead of a template: a `'function' => ...` array entry and a
//! `$registry[...]['function'] = ...` assignment. Themes are additionally
//! checked for `<theme>_<hook>($variables)` overrides.

use std::path::Path;

use tree_sitter::{Node, Parser, Tree};
use upstat_core::errors::ScanError;
use upstat_core::types::{AnalyzerTag, ExtensionDescriptor, ExtensionType, Finding};

use super::walker::display_path;
use super::{error_finding, read_file, FileScanner};

/// Platform major that removed theme function support.
pub const REMOVAL_MAJOR: u64 = 10;

const CONVERT_LINK: &str = "https://www.drupal.org/node/1831138";

/// Theme function names that are really hook implementations.
const KNOWN_THEME_HOOKS: [&str; 12] = [
    "theme",
    "page_attachments",
    "page_top",
    "page_bottom",
    "library_info_build",
    "install",
    "uninstall",
    "requirements",
    "help",
    "preprocess",
    "process",
    "suggestions",
];

const HOOK_PREFIXES: [&str; 6] = [
    "preprocess",
    "process",
    "theme_suggestions",
    "form_",
    "update_",
    "post_update_",
];

#[derive(Debug, Default)]
pub struct ThemeFunctionScanner;

impl ThemeFunctionScanner {
    pub fn new() -> Self {
        Self
    }
}

fn parse_php(path: &Path, source: &str) -> Result<Tree, ScanError> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_php::LANGUAGE_PHP.into())
        .map_err(|e| ScanError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    parser.parse(source, None).ok_or_else(|| ScanError::Parse {
        path: path.to_path_buf(),
        message: "parser produced no tree".to_string(),
    })
}

fn text<'a>(node: Node<'_>, source: &'a str) -> &'a str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

fn unquote(raw: &str) -> &str {
    raw.trim().trim_matches(|c| c == '\'' || c == '"')
}

fn line_of(node: Node<'_>) -> u32 {
    node.start_position().row as u32 + 1
}

fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error)
}

/// Top-level and nested function definitions keyed by name.
fn function_definitions<'t>(node: Node<'t>, source: &str, out: &mut Vec<(String, Node<'t>)>) {
    if node.kind() == "function_definition" {
        if let Some(name) = node.child_by_field_name("name") {
            out.push((text(name, source).to_string(), node));
        }
    }
    for i in 0..node.named_child_count() {
        if let Some(child) = node.named_child(i) {
            function_definitions(child, source, out);
        }
    }
}

/// One theme function declaration found in a hook body.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Declaration {
    function: String,
    line: u32,
}

fn find_declarations(node: Node<'_>, source: &str, out: &mut Vec<Declaration>) {
    match node.kind() {
        // 'function' => 'theme_foo'
        "array_element_initializer" if node.named_child_count() == 2 => {
            if let (Some(key), Some(value)) = (node.named_child(0), node.named_child(1)) {
                if unquote(text(key, source)) == "function" {
                    out.push(Declaration {
                        function: unquote(text(value, source)).to_string(),
                        line: line_of(node),
                    });
                }
            }
        }
        // $registry['foo']['function'] = 'theme_foo';
        "assignment_expression" => {
            let left = node.child_by_field_name("left");
            let right = node.child_by_field_name("right");
            if let (Some(left), Some(right)) = (left, right) {
                let index = (left.kind() == "subscript_expression")
                    .then(|| left.named_child(left.named_child_count().saturating_sub(1)))
                    .flatten();
                if index.is_some_and(|idx| unquote(text(idx, source)) == "function") {
                    out.push(Declaration {
                        function: unquote(text(right, source)).to_string(),
                        line: line_of(node),
                    });
                }
            }
        }
        _ => {}
    }
    for i in 0..node.named_child_count() {
        if let Some(child) = node.named_child(i) {
            find_declarations(child, source, out);
        }
    }
}

fn is_hook_implementation(hook: &str) -> bool {
    KNOWN_THEME_HOOKS.contains(&hook)
        || hook.ends_with("_alter")
        || HOOK_PREFIXES.iter().any(|p| hook.starts_with(p))
}

/// A theme function override takes exactly one `$variables` parameter.
fn takes_variables(function: Node<'_>, source: &str) -> bool {
    let Some(params) = function.child_by_field_name("parameters") else {
        return false;
    };
    params.named_child_count() == 1
        && params
            .named_child(0)
            .is_some_and(|p| text(p, source).contains("$variables"))
}

impl ThemeFunctionScanner {
    fn scan_file(
        &self,
        extension: &ExtensionDescriptor,
        path: &Path,
        check_overrides: bool,
        findings: &mut Vec<Finding>,
    ) -> Result<(), ScanError> {
        let source = read_file(path)?;
        let name = &extension.machine_name;
        let hooks = [format!("{name}_theme"), format!("{name}_theme_registry_alter")];
        let mentions_hook = hooks.iter().any(|h| source.contains(&format!("function {h}(")));
        if !mentions_hook && !check_overrides {
            return Ok(());
        }

        let file = display_path(path);
        let tree = parse_php(path, &source)?;
        let root = tree.root_node();
        if let Some(error) = first_error(root) {
            findings.push(Finding::new(
                format!(
                    "Parse error in {file} at line {}; theme functions could not be checked.",
                    line_of(error)
                ),
                file,
                line_of(error),
                AnalyzerTag::ThemeFunction,
            ));
            return Ok(());
        }

        let mut functions = Vec::new();
        function_definitions(root, &source, &mut functions);

        for (function_name, node) in &functions {
            if !hooks.contains(function_name) {
                continue;
            }
            let mut declarations = Vec::new();
            if let Some(body) = node.child_by_field_name("body") {
                find_declarations(body, &source, &mut declarations);
            }
            for declaration in declarations {
                findings.push(Finding::new(
                    format!(
                        "The theme function '{}' declared in {function_name}() is deprecated in drupal:8.0.0 and is removed from drupal:10.0.0. Convert it to a Twig template. See {CONVERT_LINK}.",
                        declaration.function
                    ),
                    file.clone(),
                    declaration.line,
                    AnalyzerTag::ThemeFunction,
                ));
            }
        }

        if check_overrides {
            let prefix = format!("{name}_");
            for (function_name, node) in &functions {
                let Some(hook) = function_name.strip_prefix(&prefix) else {
                    continue;
                };
                if is_hook_implementation(hook) || !takes_variables(*node, &source) {
                    continue;
                }
                findings.push(Finding::new(
                    format!(
                        "The {name} theme overrides the '{hook}' theme function with {function_name}(). Theme functions are deprecated in drupal:8.0.0 and are removed from drupal:10.0.0. Convert it to a Twig template. See {CONVERT_LINK}."
                    ),
                    file.clone(),
                    line_of(*node),
                    AnalyzerTag::ThemeFunction,
                ));
            }
        }
        Ok(())
    }
}

impl FileScanner for ThemeFunctionScanner {
    fn tag(&self) -> AnalyzerTag {
        AnalyzerTag::ThemeFunction
    }

    fn scan(&self, extension: &ExtensionDescriptor) -> Result<Vec<Finding>, ScanError> {
        let mut findings = Vec::new();
        for suffix in ["module", "theme"] {
            let path = extension
                .path()
                .join(format!("{}.{suffix}", extension.machine_name));
            if !path.is_file() {
                continue;
            }
            let check_overrides = suffix == "theme" && extension.kind == ExtensionType::Theme;
            if let Err(e) = self.scan_file(extension, &path, check_overrides, &mut findings) {
                findings.push(error_finding(self.tag(), &e));
            }
        }
        Ok(findings)
    }
}

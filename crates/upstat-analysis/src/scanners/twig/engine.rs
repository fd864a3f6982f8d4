//! Template engine seam and the built-in Twig tag checker.
//!
//! The built-in engine does not render anything. It tokenizes tags and
//! expressions, tracks block nesting, and raises the deprecation notices a
//! Twig 2 runtime would raise while compiling the template.

use std::sync::LazyLock;

use regex::Regex;

/// A recoverable deprecation notice raised while parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeDeprecation {
    pub message: String,
    /// Where the runtime raised the notice.
    pub file: String,
    pub line: u32,
}

/// A template that cannot be parsed at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct TemplateSyntaxError {
    pub message: String,
    pub line: u32,
}

pub trait TemplateEngine: Send + Sync {
    /// Parse `source`, reporting every deprecation to `deprecations`.
    fn parse(
        &self,
        name: &str,
        source: &str,
        deprecations: &mut dyn FnMut(RuntimeDeprecation),
    ) -> Result<(), TemplateSyntaxError>;
}

static TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\{%-?~?\s*([A-Za-z_]\w*)(.*?)~?-?%\}").expect("valid twig tag regex")
});

static EXPRESSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{\{(.*?)\}\}").expect("valid twig expression regex"));

static DEPRECATED_TEST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bis\s+(?:not\s+)?(sameas|divisibleby)\b").expect("valid twig test regex")
});

static FOR_IF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bin\b.*\bif\b").expect("valid for-if regex"));

/// Tags that open a block closed by `end<tag>`.
const BLOCK_TAGS: [&str; 14] = [
    "if", "for", "block", "spaceless", "filter", "macro", "embed", "apply", "autoescape", "with",
    "sandbox", "verbatim", "raw", "trans",
];

#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinTwigEngine;

impl BuiltinTwigEngine {
    pub fn new() -> Self {
        Self
    }
}

struct OpenBlock {
    tag: String,
    line: u32,
}

fn line_at(source: &str, offset: usize) -> u32 {
    source[..offset].matches('\n').count() as u32 + 1
}

/// Blank out `{# ... #}` comments, keeping newlines so offsets map to the
/// same lines.
fn strip_comments(name: &str, source: &str) -> Result<String, TemplateSyntaxError> {
    let mut out = String::with_capacity(source.len());
    let mut rest = source;
    while let Some(start) = rest.find("{#") {
        out.push_str(&rest[..start]);
        let Some(len) = rest[start + 2..].find("#}") else {
            let line = line_at(source, source.len() - rest.len() + start);
            return Err(TemplateSyntaxError {
                message: format!("Unclosed comment in \"{name}\" at line {line}."),
                line,
            });
        };
        let comment = &rest[start..start + 2 + len + 2];
        out.extend(comment.chars().map(|c| if c == '\n' { '\n' } else { ' ' }));
        rest = &rest[start + comment.len()..];
    }
    out.push_str(rest);
    Ok(out)
}

fn is_block_opener(tag: &str, body: &str) -> bool {
    if tag == "set" {
        // `{% set x %}...{% endset %}` captures; `{% set x = 1 %}` does not.
        return !body.contains('=');
    }
    if tag == "block" {
        // `{% block title "Hi" %}` is the short form.
        return body.split_whitespace().count() <= 1;
    }
    BLOCK_TAGS.contains(&tag)
}

impl TemplateEngine for BuiltinTwigEngine {
    fn parse(
        &self,
        name: &str,
        source: &str,
        deprecations: &mut dyn FnMut(RuntimeDeprecation),
    ) -> Result<(), TemplateSyntaxError> {
        let mut notify = |message: String, line: u32| {
            deprecations(RuntimeDeprecation {
                message,
                file: name.to_string(),
                line,
            })
        };

        let stripped = strip_comments(name, source)?;
        let source = stripped.as_str();

        let mut stack: Vec<OpenBlock> = Vec::new();
        let mut verbatim: Option<(String, usize)> = None;
        let mut verbatim_bodies = Vec::new();
        let mut last_end = 0;

        for cap in TAG.captures_iter(source) {
            let whole = cap.get(0).map_or(0..0, |m| m.range());
            let tag = &cap[1];
            let body = cap[2].trim();
            let line = line_at(source, whole.start);

            if let Some((open, body_start)) = &verbatim {
                if tag == format!("end{open}") {
                    verbatim_bodies.push(*body_start..whole.start);
                    verbatim = None;
                    stack.pop();
                }
                last_end = whole.end;
                continue;
            }

            check_unclosed(name, source, last_end, whole.start)?;
            last_end = whole.end;

            match tag {
                "spaceless" => notify(
                    format!(
                        "The \"spaceless\" tag in \"{name}\" at line {line} is deprecated since Twig 2.7, use the \"spaceless\" filter with the \"apply\" tag instead."
                    ),
                    line,
                ),
                "filter" => notify(
                    format!(
                        "The \"filter\" tag in \"{name}\" at line {line} is deprecated since Twig 2.9, use the \"apply\" tag instead."
                    ),
                    line,
                ),
                "raw" => notify(
                    format!(
                        "The \"raw\" tag is deprecated since version 1.21. Use \"verbatim\" instead in \"{name}\" at line {line}."
                    ),
                    line,
                ),
                "for" if FOR_IF.is_match(body) => notify(
                    format!(
                        "Using an \"if\" condition on \"for\" tag in \"{name}\" at line {line} is deprecated since Twig 2.10.0, use a \"filter\" filter or an \"if\" condition inside the \"for\" body instead (if your condition depends on a variable updated inside the loop)."
                    ),
                    line,
                ),
                _ => {}
            }
            check_tests(name, body, line, &mut notify);

            if let Some(closed) = tag.strip_prefix("end") {
                match stack.pop() {
                    Some(open) if open.tag == closed => {}
                    Some(open) => {
                        return Err(TemplateSyntaxError {
                            message: format!(
                                "Unexpected \"{tag}\" tag (expecting closing tag for the \"{}\" tag defined near line {}) in \"{name}\" at line {line}.",
                                open.tag, open.line
                            ),
                            line,
                        })
                    }
                    None => {
                        return Err(TemplateSyntaxError {
                            message: format!("Unexpected \"{tag}\" tag in \"{name}\" at line {line}."),
                            line,
                        })
                    }
                }
            } else if is_block_opener(tag, body) {
                stack.push(OpenBlock {
                    tag: tag.to_string(),
                    line,
                });
                if tag == "verbatim" || tag == "raw" {
                    verbatim = Some((tag.to_string(), whole.end));
                }
            }
        }
        check_unclosed(name, source, last_end, source.len())?;

        for cap in EXPRESSION.captures_iter(source) {
            let start = cap.get(0).map_or(0, |m| m.start());
            if verbatim_bodies.iter().any(|body| body.contains(&start)) {
                continue;
            }
            let line = line_at(source, start);
            check_tests(name, &cap[1], line, &mut notify);
        }

        if let Some(open) = stack.pop() {
            return Err(TemplateSyntaxError {
                message: format!(
                    "Unexpected end of template. Twig was looking for the following tags \"end{tag}\" to close the \"{tag}\" block started at line {line} in \"{name}\".",
                    tag = open.tag,
                    line = open.line
                ),
                line: open.line,
            });
        }
        Ok(())
    }
}

fn check_tests(name: &str, body: &str, line: u32, notify: &mut impl FnMut(String, u32)) {
    for cap in DEPRECATED_TEST.captures_iter(body) {
        let (test, replacement) = match &cap[1] {
            "sameas" => ("sameas", "same as"),
            _ => ("divisibleby", "divisible by"),
        };
        notify(
            format!(
                "The \"{test}\" test is deprecated since version 1.21. Use \"{replacement}\" instead in \"{name}\" at line {line}."
            ),
            line,
        );
    }
}

/// A `{%` with no matching `%}` between two recognised tags.
fn check_unclosed(name: &str, source: &str, from: usize, to: usize) -> Result<(), TemplateSyntaxError> {
    if let Some(idx) = source[from..to].find("{%") {
        let line = line_at(source, from + idx);
        return Err(TemplateSyntaxError {
            message: format!("Unclosed \"block\" in \"{name}\" at line {line}."),
            line,
        });
    }
    Ok(())
}

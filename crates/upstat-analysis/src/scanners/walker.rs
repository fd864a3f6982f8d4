//! Sequential extension walker built on the `ignore` crate.
//!
//! `.gitignore` files are not honoured: a shipped extension is scanned as
//! it sits on disk. Ignore-listed directory names and any `tests/fixtures`
//! directory are pruned.

use std::path::{Path, PathBuf};

use upstat_core::config::ScanConfig;

#[derive(Debug, Clone)]
pub struct ExtensionWalker {
    ignore_dirs: Vec<String>,
    skip_dot_dirs: bool,
}

impl ExtensionWalker {
    pub fn new(ignore_dirs: Vec<String>) -> Self {
        Self {
            ignore_dirs,
            skip_dot_dirs: false,
        }
    }

    pub fn from_config(config: &ScanConfig) -> Self {
        Self::new(config.effective_ignore_dirs())
    }

    /// Also prune every directory whose name starts with a dot.
    pub fn skipping_dot_dirs(mut self) -> Self {
        self.skip_dot_dirs = true;
        self
    }

    /// Every regular file under `root` accepted by `accept`, sorted by path.
    pub fn files<F>(&self, root: &Path, accept: F) -> Vec<PathBuf>
    where
        F: Fn(&Path) -> bool,
    {
        let ignore_dirs = self.ignore_dirs.clone();
        let skip_dot_dirs = self.skip_dot_dirs;

        let mut builder = ignore::WalkBuilder::new(root);
        builder
            .hidden(false)
            .git_ignore(false)
            .git_global(false)
            .git_exclude(false)
            .ignore(false)
            .parents(false)
            .follow_links(false)
            .filter_entry(move |entry| {
                if entry.depth() == 0 || !entry.file_type().is_some_and(|ft| ft.is_dir()) {
                    return true;
                }
                let name = entry.file_name().to_string_lossy();
                if ignore_dirs.iter().any(|d| d.as_str() == name) {
                    return false;
                }
                if skip_dot_dirs && name.starts_with('.') {
                    return false;
                }
                !entry.path().ends_with("tests/fixtures")
            });

        let mut files: Vec<PathBuf> = builder
            .build()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::debug!(root = %root.display(), error = %e, "walk entry skipped");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
            .map(ignore::DirEntry::into_path)
            .filter(|path| accept(path))
            .collect();
        files.sort();
        files
    }
}

impl Default for ExtensionWalker {
    fn default() -> Self {
        Self::from_config(&ScanConfig::default())
    }
}

/// The dot-separated segments of a file name.
pub fn name_segments(path: &Path) -> Vec<&str> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.split('.').collect())
        .unwrap_or_default()
}

pub fn file_name(path: &Path) -> &str {
    path.file_name().and_then(|n| n.to_str()).unwrap_or("")
}

/// Path as stored in findings.
pub fn display_path(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

//! Shared fixtures for the analysis integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use upstat_core::types::{ExtensionDescriptor, ExtensionType, InfoMetadata};

/// Write `contents` to `root/rel`, creating parent directories.
pub fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// Write raw bytes to `root/rel`, creating parent directories.
pub fn write_bytes(root: &Path, rel: &str, contents: &[u8]) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// Descriptor for an extension at `root/rel`, reading its info file when
/// present.
pub fn extension(root: &Path, rel: &str, name: &str, kind: ExtensionType) -> ExtensionDescriptor {
    let dir = root.join(rel);
    let info_path = dir.join(format!("{name}.info.yml"));
    let info = fs::read_to_string(&info_path)
        .map(|s| InfoMetadata::from_yaml(&s).unwrap())
        .unwrap_or_default();
    ExtensionDescriptor::new(name, dir, kind).with_info(info)
}

/// A prepared environment whose analyzer is a shell script printing
/// `stdout` and exiting with `status`.
#[cfg(unix)]
pub fn scripted_environment(root: &Path, stdout: &str, status: i32) -> upstat_analysis::Environment {
    let script = root.join("fake-phpstan.sh");
    fs::write(
        &script,
        format!("#!/bin/sh\ncat <<'REPORT'\n{stdout}\nREPORT\nexit {status}\n"),
    )
    .unwrap();
    let temp_dir = root.join("scratch");
    fs::create_dir_all(&temp_dir).unwrap();
    upstat_analysis::Environment {
        executable: "/bin/sh".into(),
        analyze_binary: script,
        platform_root: root.to_path_buf(),
        rule_file: temp_dir.join("deprecation_testing.neon"),
        temp_dir,
    }
}

/// An empty, well-formed analyzer report.
pub const EMPTY_REPORT: &str = r#"{"totals":{"errors":0,"file_errors":0},"files":[],"errors":[]}"#;

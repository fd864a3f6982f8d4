//! Purpose-built scanners for the formats the external analyzer cannot see.
//!
//! Each scanner walks one extension and reports [`Finding`]s. Scanner
//! errors are recoverable: [`run_guarded`] turns an error into a finding and
//! a panic into a log line, so one broken file never loses the rest of a run.

pub mod config_schema;
pub mod css;
pub mod library;
pub mod metadata;
pub mod route;
pub mod theme_function;
pub mod twig;
pub mod walker;

use std::panic::{self, AssertUnwindSafe};

use upstat_core::errors::ScanError;
use upstat_core::types::{AnalyzerTag, ExtensionDescriptor, Finding};

pub use config_schema::ConfigSchemaScanner;
pub use css::CssScanner;
pub use library::LibraryScanner;
pub use metadata::ExtensionMetadataScanner;
pub use route::RouteScanner;
pub use theme_function::ThemeFunctionScanner;
pub use twig::TwigScanner;
pub use walker::ExtensionWalker;

/// A detector for one source format.
pub trait FileScanner {
    fn tag(&self) -> AnalyzerTag;

    fn scan(&self, extension: &ExtensionDescriptor) -> Result<Vec<Finding>, ScanError>;
}

/// Run `scanner`, converting an error into a single finding and swallowing
/// panics.
pub fn run_guarded(scanner: &dyn FileScanner, extension: &ExtensionDescriptor) -> Vec<Finding> {
    let tag = scanner.tag();
    match panic::catch_unwind(AssertUnwindSafe(|| scanner.scan(extension))) {
        Ok(Ok(findings)) => {
            tracing::debug!(
                extension = %extension.machine_name,
                scanner = %tag,
                count = findings.len(),
                "scanner finished"
            );
            findings
        }
        Ok(Err(e)) => {
            tracing::warn!(
                extension = %extension.machine_name,
                scanner = %tag,
                error = %e,
                "scanner error"
            );
            vec![error_finding(tag, &e)]
        }
        Err(_) => {
            tracing::error!(
                extension = %extension.machine_name,
                scanner = %tag,
                "scanner panicked"
            );
            Vec::new()
        }
    }
}

/// The finding reported in place of a file the scanner could not process.
pub fn error_finding(tag: AnalyzerTag, error: &ScanError) -> Finding {
    Finding::new(
        format!("Scanning failed: {error}"),
        walker::display_path(error.path()),
        0,
        tag,
    )
}

fn read_file(path: &std::path::Path) -> Result<String, ScanError> {
    std::fs::read_to_string(path).map_err(|e| ScanError::io(path, e))
}

//! Tracing bootstrap.
//!
//! The filter is read from `UPSTAT_LOG` (same syntax as `RUST_LOG`) and
//! defaults to `upstat=info`.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

pub const LOG_ENV_VAR: &str = "UPSTAT_LOG";
const DEFAULT_FILTER: &str = "upstat=info";

/// Install a global fmt subscriber. Calling more than once is a no-op, and
/// an already-installed global subscriber is left alone.
pub fn init() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init();
    });
}

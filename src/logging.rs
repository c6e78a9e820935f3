//! Tracing subscriber setup.
//!
//! Filtering follows `RUST_LOG` and falls back to `info` when it is unset or
//! invalid.

use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_FILTER: &str = "info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber for the server binary.
///
/// Calling it again after a subscriber is installed is a no-op.
pub fn init() {
    let _ = fmt()
        .with_env_filter(env_filter())
        .with_target(true)
        .with_line_number(true)
        .try_init();
}

/// Installs a subscriber that writes through the test harness capture.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(env_filter())
        .with_test_writer()
        .try_init();
}

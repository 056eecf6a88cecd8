//! Tracing subscriber setup.
//!
//! The library only emits `tracing` events. Binaries call [`init`]; tests
//! call [`init_for_tests`].

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static TEST_INIT: OnceCell<()> = OnceCell::new();

/// Install a fmt subscriber. `RUST_LOG` overrides `default_filter`.
///
/// Does nothing if a global subscriber is already set.
pub fn init(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    fmt().with_env_filter(filter).with_target(false).try_init().ok();
}

/// Idempotent logging for tests.
///
/// Level comes from `TEST_LOG`, then `RUST_LOG`, then `"warn"`. Output goes
/// through the test writer so the harness captures it.
pub fn init_for_tests() {
    TEST_INIT.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

//! Tracing subscriber setup.

use tracing_subscriber::{fmt, EnvFilter};

/// Install the process-wide subscriber, filtered by `RUST_LOG` (default `info`).
///
/// Safe to call more than once; later calls are ignored.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).try_init().ok();
}

/// Test logging, filtered by `TEST_LOG`, then `RUST_LOG`, then `warn`.
///
/// Output goes through the test writer so cargo captures it per test.
#[cfg(test)]
pub(crate) fn init_for_tests() {
    use std::sync::OnceLock;

    static INITIALIZED: OnceLock<()> = OnceLock::new();
    INITIALIZED.get_or_init(|| {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init_for_tests();
        init_for_tests();
        init();
        tracing::warn!("logging initialised twice without panicking");
    }
}

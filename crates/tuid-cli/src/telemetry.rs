//! Logging for the `tuid` binary.
//!
//! Events go to stderr so generated identifiers on stdout stay pipeable.
//! Filtering comes from `RUST_LOG` and defaults to `warn`.

use tracing_subscriber::{EnvFilter, fmt};

/// Installs the global `tracing` subscriber.
pub fn init_tracing() {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .init();
}

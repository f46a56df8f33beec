use std::io;

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize logging on stderr, keeping stdout for the report.
///
/// - Uses `RUST_LOG` for log level filtering (defaults to `default_level` if not set)
/// - `verbose` raises the default level to `debug`
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

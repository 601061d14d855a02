use std::io;

use tracing_subscriber::EnvFilter;

/// Installs the stderr subscriber used by both binaries. Reports go to
/// stdout, so diagnostics must never share that stream.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

//! Logging setup for a sync run.

use tracing::subscriber::DefaultGuard;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set; a successful run prints nothing.
pub const DEFAULT_FILTER: &str = "warn";

/// Installs a stderr subscriber as the default for the current thread.
///
/// Logging stays active until the returned guard is dropped.
pub fn init() -> DefaultGuard {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    tracing::subscriber::set_default(subscriber)
}

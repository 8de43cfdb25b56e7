//! Tracing subscriber setup for applications and tests

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "tabula=info";

/// Install a fmt subscriber filtered by `RUST_LOG` (default `tabula=info`)
///
/// Returns `false` when a global subscriber was already installed, so it is
/// safe to call more than once.
pub fn init() -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}

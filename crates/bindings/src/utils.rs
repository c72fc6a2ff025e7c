//! Utility functions exposed to Python.

use pyo3::prelude::*;
use tracing_subscriber::EnvFilter;

/// Returns the package version string.
#[pyfunction]
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Installs a `tracing` subscriber writing to stderr.
///
/// `filter` uses `RUST_LOG` syntax (e.g. `"cosim_core=debug"`); without it
/// the `RUST_LOG` environment variable is read.
///
/// # Returns
///
/// `false` when a global subscriber was already installed.
#[pyfunction]
#[pyo3(signature = (filter=None))]
pub fn init_logging(filter: Option<&str>) -> bool {
    let filter = filter.map_or_else(EnvFilter::from_default_env, EnvFilter::new);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}

//! Python bindings for the co-simulation statistics engine.
//!
//! This crate exposes the engine to Python testbenches via PyO3. It provides:
//! 1. **Session:** `PyCosimStats` for stepping, logging per-cycle samples and producing reports.
//! 2. **Utilities:** Version string and logging setup.
//! 3. **Conversion:** Python dict to `CosimConfig`, `StatsError` to Python exceptions.

use pyo3::prelude::*;

/// Python dict and error conversion.
pub mod conversion;
/// Statistics session binding (`PyCosimStats`).
pub mod stats;
/// Utility functions (version, logging).
pub mod utils;

/// Registers all classes and functions onto the given Python module.
///
/// # Arguments
///
/// * `m` - The Python module to register types and functions on.
///
/// # Errors
///
/// Returns a `PyErr` if registration fails.
pub fn register_cosim_module(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<stats::PyCosimStats>()?;

    m.add_function(wrap_pyfunction!(utils::version, m)?)?;
    m.add_function(wrap_pyfunction!(utils::init_logging, m)?)?;

    Ok(())
}

#[pymodule]
#[pyo3(name = "_core")]
fn cosim_module(m: &Bound<'_, PyModule>) -> PyResult<()> {
    register_cosim_module(m)
}

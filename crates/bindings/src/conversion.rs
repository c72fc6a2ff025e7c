//! Python/Rust conversion.
//!
//! Configuration dicts are converted through JSON so Python and the RTL
//! plusargs share one schema. Engine errors map onto the closest built-in
//! Python exception.

use cosim_core::{CosimConfig, StatsError};
use pyo3::exceptions::{PyIOError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;

/// Converts a Python dict to a `CosimConfig`.
///
/// Keys must match the configuration structure (`profiling`, `trace`, `report`);
/// missing keys take their defaults.
///
/// # Errors
///
/// Raises `ValueError` when the dict is malformed or the profiling window is inverted.
pub fn py_dict_to_config(py: Python<'_>, dict: &Bound<'_, PyAny>) -> PyResult<CosimConfig> {
    let json = py.import("json")?;
    let text: String = json.call_method1("dumps", (dict,))?.extract()?;
    CosimConfig::from_json(&text).map_err(stats_error_to_py)
}

/// Maps an engine error to a Python exception.
#[allow(clippy::needless_pass_by_value)]
pub fn stats_error_to_py(err: StatsError) -> PyErr {
    match err {
        StatsError::Io { .. } | StatsError::Stream(_) => PyIOError::new_err(err.to_string()),
        StatsError::Config(_) | StatsError::InvalidWindow { .. } => {
            PyValueError::new_err(err.to_string())
        }
        StatsError::Serialize(_) => PyRuntimeError::new_err(err.to_string()),
    }
}

//! Configuration for a co-simulation run.
//!
//! This module defines the settings the RTL testbench passes at setup time. It provides:
//! 1. **Defaults:** Baseline profiling window, trace depth and report destination.
//! 2. **Structures:** Profiling, trace and report sections of [`CosimConfig`].
//!
//! Configuration is supplied as JSON (from plusargs or the Python API) or built with `CosimConfig::default()`.

use std::path::PathBuf;

use serde::Deserialize;

use crate::common::{Result, StatsError};

/// Default configuration constants.
mod defaults {
    /// Reset vector of the core; profiling starts here by default.
    pub const PROF_PC_START: u32 = 0x0001_0000;

    /// Open-ended window: never stops on its own.
    pub const PROF_PC_STOP: u32 = u32::MAX;

    /// Number of trace entries retained for divergence dumps.
    pub const TRACE_HISTORY: usize = 32;

    /// Report file written into the output directory.
    pub const REPORT_FILE: &str = "hw_stats.json";
}

/// Root configuration.
///
/// # Examples
///
/// ```
/// use cosim_core::config::CosimConfig;
///
/// let json = r#"{
///     "profiling": { "pc_start": 65536, "pc_stop": 66000, "single_match": true },
///     "trace": { "enabled": true, "history": 8 },
///     "report": { "out_dir": "out/cosim" }
/// }"#;
///
/// let config = CosimConfig::from_json(json).unwrap();
/// assert!(config.profiling.single_match);
/// assert_eq!(config.trace.history, 8);
/// assert_eq!(config.report.file_name, "hw_stats.json");
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CosimConfig {
    /// Profiling window settings
    #[serde(default)]
    pub profiling: ProfilingConfig,
    /// Trace entry retention
    #[serde(default)]
    pub trace: TraceConfig,
    /// Report destination
    #[serde(default)]
    pub report: ReportConfig,
}

impl CosimConfig {
    /// Parses a JSON configuration document and validates it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(StatsError::Config)?;
        config.profiling.validate()?;
        Ok(config)
    }
}

/// PC-range profiling window.
///
/// Profiling turns on when the core reaches `pc_start` and off when it
/// reaches `pc_stop`. With `single_match` the window fires only once; with
/// `on_boot` profiling is already on when the run starts.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfilingConfig {
    /// PC that opens the window
    #[serde(default = "ProfilingConfig::default_pc_start")]
    pub pc_start: u32,

    /// PC that closes the window
    #[serde(default = "ProfilingConfig::default_pc_stop")]
    pub pc_stop: u32,

    /// Close the window for good after its first stop
    #[serde(default)]
    pub single_match: bool,

    /// Start with profiling enabled
    #[serde(default)]
    pub on_boot: bool,
}

impl ProfilingConfig {
    /// Returns the default window start.
    const fn default_pc_start() -> u32 {
        defaults::PROF_PC_START
    }

    /// Returns the default window stop.
    const fn default_pc_stop() -> u32 {
        defaults::PROF_PC_STOP
    }

    /// Rejects a window that stops before it starts.
    pub const fn validate(&self) -> Result<()> {
        if self.pc_stop < self.pc_start {
            return Err(StatsError::InvalidWindow {
                start: self.pc_start,
                stop: self.pc_stop,
            });
        }
        Ok(())
    }
}

impl Default for ProfilingConfig {
    fn default() -> Self {
        Self {
            pc_start: defaults::PROF_PC_START,
            pc_stop: defaults::PROF_PC_STOP,
            single_match: false,
            on_boot: false,
        }
    }
}

/// Trace entry retention.
#[derive(Debug, Clone, Deserialize)]
pub struct TraceConfig {
    /// Keep a history of trace entries
    #[serde(default)]
    pub enabled: bool,

    /// Number of entries kept
    #[serde(default = "TraceConfig::default_history")]
    pub history: usize,
}

impl TraceConfig {
    /// Returns the default history depth.
    const fn default_history() -> usize {
        defaults::TRACE_HISTORY
    }
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            history: defaults::TRACE_HISTORY,
        }
    }
}

/// Report destination.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Output directory; the current directory when empty
    #[serde(default)]
    pub out_dir: PathBuf,

    /// Report file name
    #[serde(default = "ReportConfig::default_file_name")]
    pub file_name: String,
}

impl ReportConfig {
    /// Returns the default report file name.
    fn default_file_name() -> String {
        defaults::REPORT_FILE.to_string()
    }

    /// Full path of the report file.
    pub fn path(&self) -> PathBuf {
        self.out_dir.join(&self.file_name)
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::new(),
            file_name: defaults::REPORT_FILE.to_string(),
        }
    }
}

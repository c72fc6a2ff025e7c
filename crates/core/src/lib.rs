//! RISC-V co-simulation instrumentation library.
//!
//! This crate aggregates the micro-architectural events an RTL simulation reports while it
//! steps an ISA model, and turns them into the following:
//! 1. **Core:** Cycle accounting and top-down analysis (bad speculation, front-end, back-end, retiring).
//! 2. **Caches:** Reference, hit, miss and writeback counts for the instruction and data caches.
//! 3. **Branch prediction:** Prediction accuracy and mispredictions per retired instruction.
//! 4. **Trace:** The pooled per-sample record used to correlate RTL and model execution.
//! 5. **Session:** Profiling window, trace history and the `hw_stats.json` report.

/// Common types (access direction, derived metrics, errors).
pub mod common;
/// Co-simulation configuration (profiling window, trace, report destination).
pub mod config;
/// Event samples delivered by the RTL side.
pub mod events;
/// Session and profiling window driving the accumulators.
pub mod sim;
/// Event accumulators and the combined report.
pub mod stats;
/// Trace entry correlating RTL and model execution.
pub mod trace;

/// Root configuration type; use `CosimConfig::default()` or `CosimConfig::from_json`.
pub use crate::config::CosimConfig;
/// Result and error types shared by the crate.
pub use crate::common::{Result, StatsError};
/// Session object owning all accumulators for one simulation run.
pub use crate::sim::CosimSession;
/// Aggregator routing event samples to the accumulators.
pub use crate::stats::CosimStats;

//! Simulation-side drivers of the accumulators.
//!
//! This module connects the RTL testbench to the statistics. It provides:
//! 1. **Session:** The per-run owner of the aggregator, trace entry and report destination.
//! 2. **Profiling window:** PC-range policy that opens and closes the profiling gate.

/// Per-run session object.
pub mod session;

/// PC-range profiling window.
pub mod window;

pub use session::CosimSession;
pub use window::ProfilingWindow;

//! Co-simulation session.
//!
//! A [`CosimSession`] is created once per simulation run and owns everything
//! the testbench talks to: the statistics aggregator, the profiling window,
//! the pooled trace entry and its history. It replaces per-process global
//! state; the testbench shell keeps one session and forwards each DPI call
//! to it.

use std::collections::VecDeque;
use std::fmt::Write as _;
use std::fs;

use crate::common::{Result, StatsError};
use crate::config::CosimConfig;
use crate::events::{CoreEventSample, MemoryEventSample};
use crate::stats::CosimStats;
use crate::trace::TraceEntry;

use super::window::ProfilingWindow;

/// State of one co-simulation run.
#[derive(Debug)]
pub struct CosimSession {
    config: CosimConfig,
    stats: CosimStats,
    window: ProfilingWindow,
    te: TraceEntry,
    history: VecDeque<TraceEntry>,
    trace_depth: usize,
    clk: u64,
    cycles_all: u64,
}

impl CosimSession {
    /// Creates a session; profiling starts enabled only for an on-boot window.
    pub fn new(config: CosimConfig) -> Self {
        let window = ProfilingWindow::new(&config.profiling);
        let mut stats = CosimStats::new();
        stats.set_enabled(window.is_active());
        let trace_depth = if config.trace.enabled {
            config.trace.history
        } else {
            0
        };
        Self {
            stats,
            window,
            te: TraceEntry::default(),
            history: VecDeque::with_capacity(trace_depth),
            trace_depth,
            clk: 0,
            cycles_all: 0,
            config,
        }
    }

    /// Session configuration.
    pub const fn config(&self) -> &CosimConfig {
        &self.config
    }

    /// Statistics aggregator.
    pub const fn stats(&self) -> &CosimStats {
        &self.stats
    }

    /// Mutable access to the aggregator, for callers routing samples themselves.
    pub const fn stats_mut(&mut self) -> &mut CosimStats {
        &mut self.stats
    }

    /// Advances to clock `clk`, about to execute the instruction at `pc`.
    ///
    /// Applies the profiling window before any event of this step is logged.
    pub fn step(&mut self, clk: u64, pc: u32) {
        self.clk = clk;
        if let Some(enable) = self.window.observe(pc) {
            self.apply_gate(enable);
        }
    }

    /// Forces the profiling gate.
    ///
    /// The window follows the forced state: after a forced enable the next
    /// `pc_stop` still closes it, after a forced disable only `pc_start`
    /// reopens it.
    pub fn set_profiling(&mut self, enable: bool) {
        self.window.force(enable);
        self.apply_gate(enable);
    }

    fn apply_gate(&mut self, enable: bool) {
        if self.stats.is_enabled() != enable {
            tracing::debug!(clk = self.clk, enable, "profiling gate changed");
        }
        self.stats.set_enabled(enable);
    }

    /// Returns whether events are currently counted.
    pub const fn is_profiling(&self) -> bool {
        self.stats.is_enabled()
    }

    /// Dispatches the samples of one clock: core, instruction cache, data cache, predictor.
    pub fn log_stats(
        &mut self,
        core: &CoreEventSample,
        icache: &MemoryEventSample,
        dcache: &MemoryEventSample,
        bpred: &MemoryEventSample,
    ) {
        self.log_core(core);
        self.stats.on_memory_event(icache, true);
        self.stats.on_memory_event(dcache, false);
        self.stats.on_branch_event(bpred);
    }

    /// Counts one simulated cycle and forwards its core sample.
    ///
    /// Callers logging the other units separately go through [`Self::stats_mut`].
    pub fn log_core(&mut self, core: &CoreEventSample) {
        self.cycles_all += 1;
        self.stats.on_core_event(core);
    }

    /// Repopulates the pooled trace entry for clock `clk`.
    ///
    /// The entry is reset first, so fields `fill` leaves alone keep their
    /// defaults. With tracing enabled a copy is kept in the bounded history.
    pub fn add_trace_entry<F>(&mut self, clk: u64, fill: F)
    where
        F: FnOnce(&mut TraceEntry),
    {
        self.te.reset();
        self.te.sample_cnt = clk;
        fill(&mut self.te);
        if self.trace_depth > 0 {
            if self.history.len() >= self.trace_depth {
                let _ = self.history.pop_front();
            }
            self.history.push_back(self.te.clone());
        }
    }

    /// Most recent trace entry.
    pub const fn trace_entry(&self) -> &TraceEntry {
        &self.te
    }

    /// Retained trace entries, oldest first.
    pub fn trace_history(&self) -> impl Iterator<Item = &TraceEntry> {
        self.history.iter()
    }

    /// Retained trace entries, one per line, oldest first.
    pub fn render_trace_history(&self) -> String {
        let mut out = String::new();
        for te in &self.history {
            let _ = writeln!(out, "{te}");
        }
        out
    }

    /// Clock of the last `step`.
    pub const fn clock(&self) -> u64 {
        self.clk
    }

    /// Cycles logged through `log_stats`, profiled or not.
    pub const fn simulation_cycles(&self) -> u64 {
        self.cycles_all
    }

    /// Human-readable summary of the whole run.
    pub fn summary(&mut self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Simulation cycles: {}", self.cycles_all);
        let _ = writeln!(out, "Stats - Profiling Summary (approx.):");
        out.push_str(&self.stats.render_all());
        out
    }

    /// Writes the report into the configured output directory and returns the summary.
    pub fn finish(&mut self) -> Result<String> {
        let report = &self.config.report;
        if !report.out_dir.as_os_str().is_empty() {
            fs::create_dir_all(&report.out_dir).map_err(|source| StatsError::Io {
                path: report.out_dir.clone(),
                source,
            })?;
        }
        let path = report.path();
        self.stats.write_report(&path)?;
        Ok(self.summary())
    }
}

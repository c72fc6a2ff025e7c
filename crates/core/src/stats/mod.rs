//! Event accumulators and the combined statistics aggregator.
//!
//! [`CosimStats`] owns one accumulator per unit and routes RTL samples to them:
//! 1. **Core:** [`CoreStats`] for cycle accounting and top-down analysis.
//! 2. **Branch predictor:** [`BranchStats`] for prediction accuracy.
//! 3. **Caches:** Two [`CacheStats`], one for the instruction cache and one for the data cache.
//!
//! Every accumulator carries its own profiling gate; the aggregator opens
//! and closes all four together.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::common::{Result, StatsError};
use crate::events::{CoreEventSample, MemoryEventSample};

/// Branch predictor accumulator.
pub mod bpred;
/// Cache accumulator.
pub mod cache;
/// Report document.
pub mod report;
/// Core top-down accumulator.
pub mod tda;

pub use bpred::{BranchReport, BranchStats};
pub use cache::{CacheKind, CacheReport, CacheStats};
pub use report::HwReport;
pub use tda::{CoreStats, TdaCategory, TdaEntry, TdaSubcategory, TdaSummary};

/// Indentation unit of the human-readable summary.
pub const INDENT: &str = "    ";

/// Owns all accumulators of one simulation run.
#[derive(Clone, Debug, Default)]
pub struct CosimStats {
    core: CoreStats,
    bpred: BranchStats,
    icache: CacheStats,
    dcache: CacheStats,
}

impl CosimStats {
    /// Creates the accumulators with profiling disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens or closes the profiling gate of every accumulator.
    pub fn set_enabled(&mut self, enable: bool) {
        self.core.set_enabled(enable);
        self.bpred.set_enabled(enable);
        self.icache.set_enabled(enable);
        self.dcache.set_enabled(enable);
    }

    /// Returns whether the core accumulator is counting.
    pub const fn is_enabled(&self) -> bool {
        self.core.is_enabled()
    }

    /// Core accumulator.
    pub const fn core(&self) -> &CoreStats {
        &self.core
    }

    /// Branch predictor accumulator.
    pub const fn bpred(&self) -> &BranchStats {
        &self.bpred
    }

    /// Cache accumulator for `kind`.
    pub const fn cache(&self, kind: CacheKind) -> &CacheStats {
        match kind {
            CacheKind::Instruction => &self.icache,
            CacheKind::Data => &self.dcache,
        }
    }

    /// Forwards a per-cycle core sample.
    #[inline]
    pub fn on_core_event(&mut self, ev: &CoreEventSample) {
        self.core.add_event(ev);
    }

    /// Routes a cache sample to the instruction or data cache accumulator.
    ///
    /// A sample without `accessed` is ignored. Otherwise the reference is
    /// counted, then a hit, or a miss with an optional writeback. A sample
    /// flagged both hit and miss counts as a hit.
    pub fn on_memory_event(&mut self, ev: &MemoryEventSample, icache: bool) {
        if !ev.accessed {
            return;
        }
        let dir = ev.direction();
        let stats = if icache {
            &mut self.icache
        } else {
            &mut self.dcache
        };
        stats.referenced(dir, ev.size);
        if ev.hit {
            if ev.miss {
                tracing::debug!(icache, "cache sample flagged both hit and miss");
            }
            stats.hit(dir);
        } else if ev.miss {
            stats.miss(dir);
            if ev.writeback {
                stats.writeback();
            }
        }
    }

    /// Routes a branch predictor sample; `hit` means the prediction was correct.
    #[inline]
    pub const fn on_branch_event(&mut self, ev: &MemoryEventSample) {
        if ev.accessed {
            self.bpred.collect(ev.hit);
        }
    }

    /// Normalises the predictor against the core's retired instructions.
    fn summarize(&mut self) {
        self.bpred.summarize(self.core.total_retired());
    }

    /// Renders all sections: core, bpred, icache, dcache.
    pub fn render_all(&mut self) -> String {
        self.summarize();
        let sections = [
            ("core", self.core.render()),
            ("bpred", self.bpred.render()),
            (CacheKind::Instruction.label(), self.icache.render(CacheKind::Instruction)),
            (CacheKind::Data.label(), self.dcache.render(CacheKind::Data)),
        ];
        let mut out = String::new();
        for (label, body) in sections {
            out.push_str(label);
            out.push('\n');
            for line in body.lines() {
                out.push_str(INDENT);
                out.push_str(line);
                out.push('\n');
            }
        }
        out
    }

    /// Builds the report document.
    pub fn report(&mut self) -> HwReport {
        self.summarize();
        HwReport {
            core: self.core.serialize(),
            bpred: self.bpred.serialize(),
            icache: self.icache.serialize(),
            dcache: self.dcache.serialize(),
            done: true,
        }
    }

    /// Writes the report to a stream.
    pub fn serialize_all<W: Write>(&mut self, w: W) -> Result<()> {
        self.report().write_to(w)
    }

    /// Writes the report to `path`, replacing any previous file.
    ///
    /// The document is encoded in memory first, so an encoding failure never
    /// truncates an existing report.
    pub fn write_report(&mut self, path: &Path) -> Result<()> {
        let mut buf = self.report().to_json()?;
        buf.push('\n');
        fs::write(path, buf).map_err(|source| StatsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "hardware stats report written");
        Ok(())
    }
}

//! Core cycle accounting and top-down analysis.
//!
//! Every profiled cycle is classified by the RTL into one top-level
//! category. This module accumulates those classifications and derives:
//! 1. **Level 1:** Bad speculation, front-end bound, back-end bound, retiring.
//! 2. **Level 2:** Front-end memory (icache) vs core, back-end memory (dcache) vs core, integer vs SIMD.
//! 3. **Throughput:** IPC and CPI over the retired instruction count.
//!
//! Only the raw counters are stored. Everything else is recomputed by
//! [`CoreStats::finalize`], so a summary can never be stale.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::Metric;
use crate::events::CoreEventSample;

/// Level-1 top-down category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TdaCategory {
    /// Cycles lost to misspeculation.
    BadSpec,
    /// Cycles the front-end failed to deliver an instruction.
    Frontend,
    /// Cycles the back-end could not accept an instruction.
    Backend,
    /// Cycles that retired an instruction.
    Retiring,
}

/// Level-2 top-down subcategory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TdaSubcategory {
    /// Front-end stall caused by the instruction cache.
    Icache,
    /// Data cache stall in the back-end.
    Dcache,
    /// Stall not attributed to a cache.
    Core,
    /// Retired scalar instruction.
    Integer,
    /// Retired SIMD instruction.
    Simd,
}

/// One row of the machine-readable breakdown: `[category, subcategory | null, cycles]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TdaEntry(pub TdaCategory, pub Option<TdaSubcategory>, pub u64);

impl TdaEntry {
    /// Cycle count of the row.
    #[inline]
    pub const fn count(&self) -> u64 {
        self.2
    }
}

/// Derived top-down decomposition of the accumulated cycles.
///
/// For well-formed input the identities `stalls + retired == cycles`,
/// `fe_ic + fe_core == fe`, `be_dc + be_core == be` and
/// `ret_int + ret_simd == retired` hold exactly. Malformed input (several
/// stall flags on one cycle, a cache flag without its parent flag) makes the
/// subtractions wrap; the identities then still hold modulo 2^64.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TdaSummary {
    /// Profiled cycles.
    pub cycles: u64,
    /// Bad speculation cycles.
    pub bad_spec: u64,
    /// Front-end bound cycles.
    pub fe: u64,
    /// Front-end cycles attributed to the instruction cache.
    pub fe_ic: u64,
    /// Front-end cycles not attributed to the instruction cache.
    pub fe_core: u64,
    /// Back-end bound cycles.
    pub be: u64,
    /// Back-end cycles attributed to the data cache.
    pub be_dc: u64,
    /// Back-end cycles not attributed to the data cache.
    pub be_core: u64,
    /// Sum of bad speculation, front-end and back-end cycles.
    pub stalls: u64,
    /// Retired instructions (one per non-stalled cycle).
    pub retired: u64,
    /// Retired scalar instructions.
    pub ret_int: u64,
    /// Retired SIMD instructions.
    pub ret_simd: u64,
    /// Instructions per cycle.
    pub ipc: Metric,
    /// Cycles per instruction.
    pub cpi: Metric,
}

impl TdaSummary {
    /// The seven-row level-2 breakdown, in report order. The counts sum to `cycles`.
    pub const fn breakdown(&self) -> [TdaEntry; 7] {
        use TdaCategory::{Backend, BadSpec, Frontend, Retiring};
        use TdaSubcategory::{Core, Dcache, Icache, Integer, Simd};
        [
            TdaEntry(BadSpec, None, self.bad_spec),
            TdaEntry(Frontend, Some(Icache), self.fe_ic),
            TdaEntry(Frontend, Some(Core), self.fe_core),
            TdaEntry(Backend, Some(Dcache), self.be_dc),
            TdaEntry(Backend, Some(Core), self.be_core),
            TdaEntry(Retiring, Some(Integer), self.ret_int),
            TdaEntry(Retiring, Some(Simd), self.ret_simd),
        ]
    }

    /// Returns `true` when no derived count wrapped.
    pub const fn is_consistent(&self) -> bool {
        self.stalls <= self.cycles
            && self.fe_ic <= self.fe
            && self.be_dc <= self.be
            && self.ret_simd <= self.retired
    }
}

impl fmt::Display for TdaSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Cycles: {}, Inst: {}, Stalls: {}, CPI: {:.3} (IPC: {:.3})",
            self.cycles, self.retired, self.stalls, self.cpi, self.ipc
        )?;
        writeln!(f, "    TDA")?;
        writeln!(
            f,
            "        L1: Bad Spec: {}, FE: {}, BE: {}, Retired: {}",
            self.bad_spec, self.fe, self.be, self.retired
        )?;
        write!(
            f,
            "        L2: FE Mem: {}, FE Core: {}, BE Mem: {}, BE Core: {}, INT: {}, SIMD: {}",
            self.fe_ic, self.fe_core, self.be_dc, self.be_core, self.ret_int, self.ret_simd
        )
    }
}

/// Per-cycle top-down accumulator for the whole core.
#[derive(Clone, Debug, Default)]
pub struct CoreStats {
    enabled: bool,
    cycles: u64,
    bad_spec: u64,
    fe: u64,
    fe_ic: u64,
    be: u64,
    be_dc: u64,
    ret_simd: u64,
}

impl CoreStats {
    /// Creates an empty, disabled accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens or closes the profiling gate.
    #[inline]
    pub const fn set_enabled(&mut self, enable: bool) {
        self.enabled = enable;
    }

    /// Returns whether events are currently counted.
    #[inline]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Accounts one cycle. Ignored entirely, cycle included, while disabled.
    #[inline]
    pub fn add_event(&mut self, ev: &CoreEventSample) {
        if !self.enabled {
            return;
        }
        self.bad_spec += ev.bad_spec as u64;
        self.fe += ev.fe as u64;
        self.fe_ic += ev.fe_ic as u64;
        self.be += ev.be as u64;
        self.be_dc += ev.be_dc as u64;
        self.ret_simd += ev.ret_simd as u64;
        self.cycles += 1;
    }

    /// Profiled cycles so far.
    #[inline]
    pub const fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Derives the full decomposition from the current counters.
    ///
    /// Pure: it can be called any number of times and does not touch the counters.
    pub fn finalize(&self) -> TdaSummary {
        let stalls = self
            .bad_spec
            .wrapping_add(self.fe)
            .wrapping_add(self.be);
        let retired = self.cycles.wrapping_sub(stalls);
        let (ipc, cpi) = if self.cycles > 0 && retired > 0 {
            (
                Metric::ratio(retired, self.cycles),
                Metric::ratio(self.cycles, retired),
            )
        } else {
            (Metric::UNDEFINED, Metric::UNDEFINED)
        };
        let summary = TdaSummary {
            cycles: self.cycles,
            bad_spec: self.bad_spec,
            fe: self.fe,
            fe_ic: self.fe_ic,
            fe_core: self.fe.wrapping_sub(self.fe_ic),
            be: self.be,
            be_dc: self.be_dc,
            be_core: self.be.wrapping_sub(self.be_dc),
            stalls,
            retired,
            ret_int: retired.wrapping_sub(self.ret_simd),
            ret_simd: self.ret_simd,
            ipc,
            cpi,
        };
        if !summary.is_consistent() {
            tracing::warn!(
                cycles = summary.cycles,
                stalls = summary.stalls,
                "core event flags are not mutually exclusive; top-down breakdown wrapped"
            );
        }
        summary
    }

    /// Retired instruction count, used to normalise branch mispredictions.
    #[inline]
    pub const fn total_retired(&self) -> u64 {
        self.cycles
            .wrapping_sub(self.bad_spec.wrapping_add(self.fe).wrapping_add(self.be))
    }

    /// Human-readable two-level breakdown with CPI/IPC at three decimals.
    pub fn render(&self) -> String {
        self.finalize().to_string()
    }

    /// The seven-row machine-readable breakdown.
    pub fn serialize(&self) -> [TdaEntry; 7] {
        self.finalize().breakdown()
    }
}

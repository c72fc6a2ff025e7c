//! Event samples reported by the RTL simulation.
//!
//! The RTL testbench samples its performance signals once per clock and hands
//! them over as plain flag bundles:
//! 1. **Core events:** One [`CoreEventSample`] per cycle, classifying the cycle for top-down analysis.
//! 2. **Memory events:** One [`MemoryEventSample`] per cache or predictor lookup.
//!
//! Samples are consumed exactly once and never retained.

use serde::{Deserialize, Serialize};

use crate::common::{Direction, HitMiss};

/// Per-cycle top-down classification flags.
///
/// A well-formed sample sets at most one of `bad_spec`, `fe` and `be`;
/// `fe_ic` implies `fe` and `be_dc` implies `be`. A sample with none of the
/// stall flags set is a retiring cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreEventSample {
    /// Cycle lost to bad speculation (flush after misprediction).
    #[serde(default)]
    pub bad_spec: bool,
    /// Front-end bound cycle.
    #[serde(default)]
    pub fe: bool,
    /// Front-end bound cycle caused by the instruction cache.
    #[serde(default)]
    pub fe_ic: bool,
    /// Back-end bound cycle.
    #[serde(default)]
    pub be: bool,
    /// Back-end bound cycle caused by the data cache.
    #[serde(default)]
    pub be_dc: bool,
    /// The instruction retiring this cycle is a SIMD operation.
    #[serde(default)]
    pub ret_simd: bool,
}

impl CoreEventSample {
    /// A retiring cycle with no stall flags.
    pub const RETIRE: Self = Self {
        bad_spec: false,
        fe: false,
        fe_ic: false,
        be: false,
        be_dc: false,
        ret_simd: false,
    };

    /// A cycle lost to bad speculation.
    pub const fn bad_spec() -> Self {
        Self {
            bad_spec: true,
            ..Self::RETIRE
        }
    }

    /// A front-end bound cycle; `icache` marks it as instruction-cache bound.
    pub const fn frontend(icache: bool) -> Self {
        Self {
            fe: true,
            fe_ic: icache,
            ..Self::RETIRE
        }
    }

    /// A back-end bound cycle; `dcache` marks it as data-cache bound.
    pub const fn backend(dcache: bool) -> Self {
        Self {
            be: true,
            be_dc: dcache,
            ..Self::RETIRE
        }
    }

    /// A retiring cycle; `simd` marks the retired instruction as SIMD.
    pub const fn retire(simd: bool) -> Self {
        Self {
            ret_simd: simd,
            ..Self::RETIRE
        }
    }
}

/// One cache or branch predictor lookup as seen by the RTL.
///
/// For branch predictor samples, `hit` means the prediction was correct.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryEventSample {
    /// A lookup happened this cycle; everything else is ignored when false.
    #[serde(default)]
    pub accessed: bool,
    /// The lookup hit.
    #[serde(default)]
    pub hit: bool,
    /// The lookup missed.
    #[serde(default)]
    pub miss: bool,
    /// The miss evicts a dirty line.
    #[serde(default)]
    pub writeback: bool,
    /// The access is a store. Loads and instruction fetches leave this clear.
    #[serde(default)]
    pub is_store: bool,
    /// Transfer size in bytes.
    #[serde(default)]
    pub size: u8,
    /// Combined outcome as encoded by the RTL.
    #[serde(default)]
    pub outcome: HitMiss,
}

impl MemoryEventSample {
    /// A cycle with no lookup.
    pub const IDLE: Self = Self {
        accessed: false,
        hit: false,
        miss: false,
        writeback: false,
        is_store: false,
        size: 0,
        outcome: HitMiss::Unknown,
    };

    /// A load (or fetch) of `size` bytes that hit.
    pub const fn read_hit(size: u8) -> Self {
        Self {
            accessed: true,
            hit: true,
            size,
            outcome: HitMiss::Hit,
            ..Self::IDLE
        }
    }

    /// A load (or fetch) of `size` bytes that missed.
    pub const fn read_miss(size: u8) -> Self {
        Self {
            accessed: true,
            miss: true,
            size,
            outcome: HitMiss::Miss,
            ..Self::IDLE
        }
    }

    /// A store of `size` bytes that hit.
    pub const fn write_hit(size: u8) -> Self {
        Self {
            is_store: true,
            ..Self::read_hit(size)
        }
    }

    /// A store of `size` bytes that missed; `writeback` marks a dirty eviction.
    pub const fn write_miss(size: u8, writeback: bool) -> Self {
        Self {
            is_store: true,
            writeback,
            ..Self::read_miss(size)
        }
    }

    /// A branch prediction lookup.
    pub const fn prediction(correct: bool) -> Self {
        Self {
            accessed: true,
            hit: correct,
            miss: !correct,
            outcome: HitMiss::from_flags(correct, !correct),
            ..Self::IDLE
        }
    }

    /// Direction of the access.
    #[inline]
    pub const fn direction(&self) -> Direction {
        Direction::from_store(self.is_store)
    }
}

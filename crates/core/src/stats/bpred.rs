//! Branch predictor statistics.
//!
//! Counts predictor lookups and correct predictions. The misprediction rate
//! is normalised by the core's retired instruction count, which this
//! accumulator cannot see; [`BranchStats::summarize`] supplies it before
//! rendering.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::common::Metric;

/// Prediction outcome counters.
#[derive(Clone, Debug, Default)]
pub struct BranchStats {
    enabled: bool,
    total: u64,
    correct: u64,
    retired_insts: u64,
}

impl BranchStats {
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

    /// Counts one prediction.
    #[inline]
    pub const fn collect(&mut self, correct: bool) {
        if !self.enabled {
            return;
        }
        self.total += 1;
        if correct {
            self.correct += 1;
        }
    }

    /// Sets the retired instruction count used to normalise mispredictions.
    ///
    /// Must be called before `render`/`serialize` in every reporting pass;
    /// otherwise those use whatever count was supplied last (zero initially).
    pub const fn summarize(&mut self, total_retired: u64) {
        self.retired_insts = total_retired;
    }

    /// Predictions observed.
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Correct predictions.
    pub const fn correct(&self) -> u64 {
        self.correct
    }

    /// Wrong predictions.
    pub const fn mispredicted(&self) -> u64 {
        self.total - self.correct
    }

    /// `correct / total`; undefined without predictions.
    pub fn accuracy(&self) -> Metric {
        Metric::ratio(self.correct, self.total)
    }

    /// Mispredictions per retired instruction; undefined until summarized
    /// against a non-zero instruction count.
    pub fn mispredict_rate(&self) -> Metric {
        Metric::ratio(self.mispredicted(), self.retired_insts)
    }

    /// Human-readable summary.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = write!(
            out,
            "Predictions: {}, Correct: {}, Mispredicted: {}, Accuracy: {:.3}, Mispredicts/Inst: {:.3}",
            self.total,
            self.correct,
            self.mispredicted(),
            self.accuracy(),
            self.mispredict_rate()
        );
        out
    }

    /// Machine-readable counters mirroring `render`.
    pub fn serialize(&self) -> BranchReport {
        BranchReport {
            predictions: self.total,
            correct: self.correct,
            mispredicted: self.mispredicted(),
            retired_insts: self.retired_insts,
            accuracy: self.accuracy(),
            mispredict_rate: self.mispredict_rate(),
        }
    }
}

/// `bpred` section of the report.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BranchReport {
    /// Predictions observed.
    pub predictions: u64,
    /// Correct predictions.
    pub correct: u64,
    /// Wrong predictions.
    pub mispredicted: u64,
    /// Instruction count the rate is normalised by.
    pub retired_insts: u64,
    /// `correct / predictions`, `null` without predictions.
    pub accuracy: Metric,
    /// `mispredicted / retired_insts`, `null` when no instruction retired.
    pub mispredict_rate: Metric,
}

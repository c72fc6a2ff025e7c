//! Machine-readable hardware statistics report.
//!
//! The report is a single JSON object with the sections in fixed order:
//!
//! ```json
//! {
//!   "core": [["bad_spec", null, 50], ["frontend", "icache", 100], ...],
//!   "bpred": { "predictions": 0, "correct": 0, ... },
//!   "icache": { "read_referenced": 0, ... },
//!   "dcache": { "read_referenced": 0, ... },
//!   "_done": true
//! }
//! ```
//!
//! The trailing `_done` key marks a complete document. Undefined ratios are `null`.

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use super::bpred::BranchReport;
use super::cache::CacheReport;
use super::tda::TdaEntry;
use crate::common::{Result, StatsError};

/// Complete report document.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HwReport {
    /// Top-down breakdown; the seven counts sum to the profiled cycles.
    pub core: [TdaEntry; 7],
    /// Branch predictor section.
    pub bpred: BranchReport,
    /// Instruction cache section.
    pub icache: CacheReport,
    /// Data cache section.
    pub dcache: CacheReport,
    /// Completion sentinel, always `true` in a written report.
    #[serde(rename = "_done")]
    pub done: bool,
}

impl HwReport {
    /// Section names in document order.
    pub const SECTIONS: [&'static str; 4] = ["core", "bpred", "icache", "dcache"];

    /// Sum of the top-down breakdown counts (wrapping, see [`TdaSummary`](super::TdaSummary)).
    pub fn core_cycles(&self) -> u64 {
        self.core
            .iter()
            .fold(0_u64, |acc, e| acc.wrapping_add(e.count()))
    }

    /// Encodes the report as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(StatsError::Serialize)
    }

    /// Writes the encoded report to `w`, followed by a newline.
    ///
    /// The document is fully encoded before the first byte is written.
    pub fn write_to<W: Write>(&self, mut w: W) -> Result<()> {
        let mut buf = serde_json::to_vec_pretty(self).map_err(StatsError::Serialize)?;
        buf.push(b'\n');
        w.write_all(&buf)?;
        w.flush()?;
        Ok(())
    }

    /// Parses a report document.
    pub fn from_json(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(StatsError::Serialize)
    }

    /// Parses a report document from a reader.
    pub fn from_reader<R: Read>(r: R) -> Result<Self> {
        serde_json::from_reader(r).map_err(StatsError::Serialize)
    }
}

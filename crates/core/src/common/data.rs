//! Memory Access Classification.
//!
//! This module defines how cache references and their outcomes are categorised:
//! 1. **Direction:** Cache statistics are split by read and write references.
//! 2. **Outcome:** Samples and trace entries report hit, miss, or no lookup at all.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Direction of a cache reference.
///
/// Instruction fetches are always reads; data accesses are reads for loads
/// and writes for stores.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Load or instruction fetch.
    Read,
    /// Store.
    Write,
}

impl Direction {
    /// Both directions in report order.
    pub const ALL: [Self; 2] = [Self::Read, Self::Write];

    /// Derives the direction from the RTL load/store flag.
    #[inline]
    pub const fn from_store(is_store: bool) -> Self {
        if is_store { Self::Write } else { Self::Read }
    }

    /// Index into per-direction counter arrays.
    #[inline]
    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Read => 0,
            Self::Write => 1,
        }
    }

    /// Lowercase label used in summaries and report keys.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Hit-or-miss outcome of a cache or predictor lookup.
///
/// `Unknown` is the reset state: the sample did not perform a lookup on
/// that unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitMiss {
    /// No lookup happened in this sample.
    #[default]
    Unknown,
    /// Lookup hit (or prediction was correct).
    Hit,
    /// Lookup missed (or prediction was wrong).
    Miss,
}

impl HitMiss {
    /// Decodes the two-bit `hm` encoding used by the RTL: bit 0 is hit, bit 1 is miss.
    ///
    /// Any other combination (neither, or both) is reported as `Unknown`.
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b01 => Self::Hit,
            0b10 => Self::Miss,
            _ => Self::Unknown,
        }
    }

    /// Builds an outcome from separate hit and miss flags.
    pub const fn from_flags(hit: bool, miss: bool) -> Self {
        match (hit, miss) {
            (true, false) => Self::Hit,
            (false, true) => Self::Miss,
            _ => Self::Unknown,
        }
    }

    /// Single-character tag used in trace dumps.
    pub const fn tag(self) -> char {
        match self {
            Self::Unknown => '-',
            Self::Hit => 'H',
            Self::Miss => 'M',
        }
    }
}

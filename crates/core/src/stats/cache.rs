//! Cache statistics.
//!
//! One [`CacheStats`] instance exists per cache (instruction and data). It
//! counts references, hits and misses separately for reads and writes, plus
//! a single writeback count for dirty evictions.

use std::fmt::{self, Write as _};

use serde::{Deserialize, Serialize};

use crate::common::{Direction, Metric};

/// Which cache an accumulator belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CacheKind {
    /// Level-1 instruction cache.
    Instruction,
    /// Level-1 data cache.
    Data,
}

impl CacheKind {
    /// Section label used in summaries and reports.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Instruction => "icache",
            Self::Data => "dcache",
        }
    }
}

impl fmt::Display for CacheKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Reference, hit and miss counters for one cache.
///
/// A reference with neither a hit nor a miss is legal and only counted as a
/// reference, so `hits + misses <= references` per direction for
/// well-formed callers.
#[derive(Clone, Debug, Default)]
pub struct CacheStats {
    enabled: bool,
    references: [u64; 2],
    hits: [u64; 2],
    misses: [u64; 2],
    writebacks: u64,
}

impl CacheStats {
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

    /// Counts a reference. `size` does not affect the counts.
    #[inline]
    pub const fn referenced(&mut self, dir: Direction, _size: u8) {
        if self.enabled {
            self.references[dir.index()] += 1;
        }
    }

    /// Counts a hit.
    #[inline]
    pub const fn hit(&mut self, dir: Direction) {
        if self.enabled {
            self.hits[dir.index()] += 1;
        }
    }

    /// Counts a miss.
    #[inline]
    pub const fn miss(&mut self, dir: Direction) {
        if self.enabled {
            self.misses[dir.index()] += 1;
        }
    }

    /// Counts a dirty line eviction.
    #[inline]
    pub const fn writeback(&mut self) {
        if self.enabled {
            self.writebacks += 1;
        }
    }

    /// References in `dir`.
    pub const fn references(&self, dir: Direction) -> u64 {
        self.references[dir.index()]
    }

    /// Hits in `dir`.
    pub const fn hits(&self, dir: Direction) -> u64 {
        self.hits[dir.index()]
    }

    /// Misses in `dir`.
    pub const fn misses(&self, dir: Direction) -> u64 {
        self.misses[dir.index()]
    }

    /// Dirty evictions.
    pub const fn writebacks(&self) -> u64 {
        self.writebacks
    }

    /// `hits / references` in `dir`; undefined without references.
    pub fn hit_rate(&self, dir: Direction) -> Metric {
        Metric::ratio(self.hits(dir), self.references(dir))
    }

    /// Human-readable dump labelled by `kind`.
    pub fn render(&self, kind: CacheKind) -> String {
        let mut out = String::new();
        let name = match kind {
            CacheKind::Instruction => "Instruction cache",
            CacheKind::Data => "Data cache",
        };
        let _ = writeln!(out, "{name} ({kind})");
        for dir in Direction::ALL {
            let _ = writeln!(
                out,
                "    {:<5} - Ref: {}, Hit: {}, Miss: {}, Hit rate: {:.3}",
                dir,
                self.references(dir),
                self.hits(dir),
                self.misses(dir),
                self.hit_rate(dir)
            );
        }
        let _ = write!(out, "    Writebacks: {}", self.writebacks);
        out
    }

    /// Machine-readable counters mirroring `render`.
    pub fn serialize(&self) -> CacheReport {
        use Direction::{Read, Write};
        CacheReport {
            read_referenced: self.references(Read),
            read_hit: self.hits(Read),
            read_miss: self.misses(Read),
            read_hit_rate: self.hit_rate(Read),
            write_referenced: self.references(Write),
            write_hit: self.hits(Write),
            write_miss: self.misses(Write),
            write_hit_rate: self.hit_rate(Write),
            writeback: self.writebacks,
        }
    }
}

/// `icache` / `dcache` section of the report.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheReport {
    /// Read references.
    pub read_referenced: u64,
    /// Read hits.
    pub read_hit: u64,
    /// Read misses.
    pub read_miss: u64,
    /// Read hit rate, `null` without read references.
    pub read_hit_rate: Metric,
    /// Write references.
    pub write_referenced: u64,
    /// Write hits.
    pub write_hit: u64,
    /// Write misses.
    pub write_miss: u64,
    /// Write hit rate, `null` without write references.
    pub write_hit_rate: Metric,
    /// Dirty evictions.
    pub writeback: u64,
}

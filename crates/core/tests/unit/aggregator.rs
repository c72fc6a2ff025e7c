//! Aggregator routing tests.
//!
//! Checks that samples reach the right accumulator, that idle samples are
//! no-ops, and that the combined summary keeps its section order.

use cosim_core::common::{Direction, HitMiss};
use cosim_core::events::{CoreEventSample, MemoryEventSample};
use cosim_core::stats::{CacheKind, CosimStats, INDENT};
use pretty_assertions::assert_eq;

use crate::common::reference_stats;

fn enabled() -> CosimStats {
    let mut s = CosimStats::new();
    s.set_enabled(true);
    s
}

#[test]
fn gate_propagates_to_all_accumulators() {
    let mut s = CosimStats::new();
    assert!(!s.is_enabled());
    s.set_enabled(true);
    assert!(s.core().is_enabled());
    assert!(s.bpred().is_enabled());
    assert!(s.cache(CacheKind::Instruction).is_enabled());
    assert!(s.cache(CacheKind::Data).is_enabled());
    s.set_enabled(false);
    assert!(!s.core().is_enabled());
    assert!(!s.bpred().is_enabled());
    assert!(!s.cache(CacheKind::Instruction).is_enabled());
    assert!(!s.cache(CacheKind::Data).is_enabled());
}

#[test]
fn idle_sample_is_noop() {
    let mut s = enabled();
    let idle = MemoryEventSample {
        hit: true,
        miss: true,
        writeback: true,
        is_store: true,
        size: 4,
        outcome: HitMiss::Hit,
        ..MemoryEventSample::IDLE
    };
    s.on_memory_event(&idle, true);
    s.on_memory_event(&idle, false);
    s.on_branch_event(&idle);
    for kind in [CacheKind::Instruction, CacheKind::Data] {
        for dir in Direction::ALL {
            assert_eq!(s.cache(kind).references(dir), 0);
        }
    }
    assert_eq!(s.bpred().total(), 0);
}

#[test]
fn store_routes_to_write_direction() {
    let mut s = enabled();
    s.on_memory_event(&MemoryEventSample::write_hit(4), false);
    s.on_memory_event(&MemoryEventSample::read_hit(4), false);
    let d = s.cache(CacheKind::Data);
    assert_eq!(d.references(Direction::Write), 1);
    assert_eq!(d.hits(Direction::Write), 1);
    assert_eq!(d.references(Direction::Read), 1);
    assert_eq!(d.hits(Direction::Read), 1);
    assert_eq!(s.cache(CacheKind::Instruction).references(Direction::Read), 0);
}

#[test]
fn writeback_only_counted_on_miss() {
    let mut s = enabled();
    let hit_with_wb = MemoryEventSample {
        writeback: true,
        ..MemoryEventSample::write_hit(4)
    };
    s.on_memory_event(&hit_with_wb, false);
    assert_eq!(s.cache(CacheKind::Data).writebacks(), 0);
    s.on_memory_event(&MemoryEventSample::write_miss(4, true), false);
    assert_eq!(s.cache(CacheKind::Data).writebacks(), 1);
    s.on_memory_event(&MemoryEventSample::write_miss(4, false), false);
    assert_eq!(s.cache(CacheKind::Data).writebacks(), 1);
}

#[test]
fn hit_and_miss_together_counts_as_hit() {
    let mut s = enabled();
    let both = MemoryEventSample {
        miss: true,
        writeback: true,
        ..MemoryEventSample::read_hit(4)
    };
    s.on_memory_event(&both, true);
    let i = s.cache(CacheKind::Instruction);
    assert_eq!(i.references(Direction::Read), 1);
    assert_eq!(i.hits(Direction::Read), 1);
    assert_eq!(i.misses(Direction::Read), 0);
    assert_eq!(i.writebacks(), 0);
}

#[test]
fn branch_samples_use_hit_as_correct() {
    let mut s = enabled();
    s.on_branch_event(&MemoryEventSample::prediction(true));
    s.on_branch_event(&MemoryEventSample::prediction(false));
    s.on_branch_event(&MemoryEventSample::prediction(true));
    assert_eq!(s.bpred().total(), 3);
    assert_eq!(s.bpred().correct(), 2);
}

#[test]
fn core_samples_reach_core() {
    let mut s = enabled();
    s.on_core_event(&CoreEventSample::backend(true));
    s.on_core_event(&CoreEventSample::RETIRE);
    assert_eq!(s.core().cycles(), 2);
    assert_eq!(s.core().total_retired(), 1);
}

#[test]
fn render_all_section_order_and_indent() {
    let mut s = reference_stats();
    let text = s.render_all();
    let labels: Vec<&str> = text.lines().filter(|l| !l.starts_with(' ')).collect();
    assert_eq!(labels, ["core", "bpred", "icache", "dcache"]);
    for line in text.lines().filter(|l| l.starts_with(' ')) {
        assert!(line.starts_with(INDENT));
    }
    assert!(text.contains("Cycles: 940, Inst: 770, Stalls: 170, CPI: 1.221 (IPC: 0.819)"));
}

#[test]
fn render_all_summarizes_predictor_against_core() {
    let mut s = reference_stats();
    let text = s.render_all();
    // 10 mispredictions over 770 retired instructions.
    assert!(text.contains("Mispredicts/Inst: 0.013"));
    assert!(text.contains("Accuracy: 0.900"));
    assert_eq!(s.bpred().serialize().retired_insts, 770);
}

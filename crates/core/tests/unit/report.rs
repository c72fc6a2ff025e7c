//! Report document tests.
//!
//! Covers the document shape, the file output contract and parsing a written
//! report back.

use std::fs;
use std::io::Write;

use cosim_core::StatsError;
use cosim_core::common::Metric;
use cosim_core::stats::{CosimStats, HwReport};
use pretty_assertions::assert_eq;
use tempfile::{NamedTempFile, tempdir};

use crate::common::reference_stats;

fn close(a: Metric, b: Metric) -> bool {
    match (a.value(), b.value()) {
        (Some(x), Some(y)) => (x - y).abs() < 1e-12,
        (None, None) => true,
        _ => false,
    }
}

#[test]
fn document_shape() {
    let mut s = reference_stats();
    let json: serde_json::Value = serde_json::from_str(&s.report().to_json().unwrap()).unwrap();
    let obj = json.as_object().unwrap();
    for section in HwReport::SECTIONS {
        assert!(obj.contains_key(section), "missing section {section}");
    }
    assert_eq!(obj.get("_done"), Some(&serde_json::Value::Bool(true)));

    let core = obj["core"].as_array().unwrap();
    assert_eq!(core.len(), 7);
    assert_eq!(core[0], serde_json::json!(["bad_spec", null, 50]));
    assert_eq!(core[1], serde_json::json!(["frontend", "icache", 100]));
    assert_eq!(core[6], serde_json::json!(["retiring", "simd", 1]));

    assert_eq!(obj["icache"]["read_referenced"], 770);
    assert_eq!(obj["icache"]["write_hit_rate"], serde_json::Value::Null);
    assert_eq!(obj["dcache"]["writeback"], 6);
    assert_eq!(obj["bpred"]["predictions"], 100);
}

#[test]
fn sections_in_fixed_order_with_sentinel_last() {
    let mut s = reference_stats();
    let text = s.report().to_json().unwrap();
    // Section keys only; "icache"/"dcache" also appear as breakdown subcategories.
    let pos = |key: &str| text.find(&format!("\"{key}\":")).unwrap();
    assert!(text.find("\"icache\"").unwrap() < pos("bpred"));
    assert!(pos("core") < pos("bpred"));
    assert!(pos("bpred") < pos("icache"));
    assert!(pos("icache") < pos("dcache"));
    assert!(pos("dcache") < pos("_done"));
    assert!(text.trim_end().ends_with('}'));
}

#[test]
fn written_report_parses_back() {
    let mut s = reference_stats();
    let dir = tempdir().unwrap();
    let path = dir.path().join("hw_stats.json");
    s.write_report(&path).unwrap();

    let parsed = HwReport::from_reader(fs::File::open(&path).unwrap()).unwrap();
    let expected = s.report();
    assert!(parsed.done);
    assert_eq!(parsed.core, expected.core);
    assert_eq!(parsed.core_cycles(), s.core().cycles());

    for (got, want) in [
        (parsed.icache, expected.icache),
        (parsed.dcache, expected.dcache),
    ] {
        assert_eq!(got.read_referenced, want.read_referenced);
        assert_eq!(got.read_hit, want.read_hit);
        assert_eq!(got.read_miss, want.read_miss);
        assert_eq!(got.write_referenced, want.write_referenced);
        assert_eq!(got.write_hit, want.write_hit);
        assert_eq!(got.write_miss, want.write_miss);
        assert_eq!(got.writeback, want.writeback);
        assert!(close(got.read_hit_rate, want.read_hit_rate));
        assert!(close(got.write_hit_rate, want.write_hit_rate));
    }
    assert_eq!(parsed.bpred.predictions, expected.bpred.predictions);
    assert_eq!(parsed.bpred.correct, expected.bpred.correct);
    assert_eq!(parsed.bpred.retired_insts, expected.bpred.retired_insts);
    assert!(close(parsed.bpred.accuracy, expected.bpred.accuracy));
    assert!(close(parsed.bpred.mispredict_rate, expected.bpred.mispredict_rate));
}

#[test]
fn report_matches_render() {
    let mut s = reference_stats();
    let text = s.render_all();
    let r = s.report();
    let core = s.core().finalize();
    assert!(text.contains(&format!("Cycles: {}", r.core_cycles())));
    assert!(text.contains(&format!("INT: {}, SIMD: {}", r.core[5].count(), r.core[6].count())));
    assert!(text.contains(&format!("Bad Spec: {}", r.core[0].count())));
    assert_eq!(core.retired, r.bpred.retired_insts);
    assert!(text.contains(&format!(
        "read  - Ref: {}, Hit: {}, Miss: {}",
        r.icache.read_referenced, r.icache.read_hit, r.icache.read_miss
    )));
    assert!(text.contains(&format!("Writebacks: {}", r.dcache.writeback)));
    assert!(text.contains(&format!("Predictions: {}, Correct: {}", r.bpred.predictions, r.bpred.correct)));
}

#[test]
fn overwrites_longer_previous_report() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(&vec![b' '; 64 * 1024]).unwrap();
    file.write_all(b"trailing garbage").unwrap();
    file.flush().unwrap();

    let mut s = CosimStats::new();
    s.write_report(file.path()).unwrap();
    let text = fs::read_to_string(file.path()).unwrap();
    assert!(!text.contains("trailing garbage"));
    let parsed = HwReport::from_json(&text).unwrap();
    assert_eq!(parsed.core_cycles(), 0);
}

#[test]
fn empty_run_reports_undefined_ratios() {
    let mut s = CosimStats::new();
    let r = s.report();
    assert!(r.icache.read_hit_rate.is_undefined());
    assert!(r.bpred.accuracy.is_undefined());
    assert!(r.bpred.mispredict_rate.is_undefined());
    let text = s.render_all();
    assert!(text.contains("CPI: undefined (IPC: undefined)"));
}

#[test]
fn io_failure_is_reported_and_state_untouched() {
    let mut s = reference_stats();
    let before = s.report();
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing").join("hw_stats.json");
    let err = s.write_report(&path).unwrap_err();
    assert!(matches!(err, StatsError::Io { .. }));
    assert!(err.to_string().contains("hw_stats.json"));
    assert_eq!(s.report(), before);
}

#[test]
fn serialize_all_writes_to_stream() {
    let mut s = reference_stats();
    let mut buf = Vec::new();
    s.serialize_all(&mut buf).unwrap();
    assert_eq!(buf.last(), Some(&b'\n'));
    let parsed = HwReport::from_json(std::str::from_utf8(&buf).unwrap()).unwrap();
    assert_eq!(parsed.core, s.report().core);
}

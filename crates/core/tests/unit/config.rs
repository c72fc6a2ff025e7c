//! Configuration defaults and parsing.

use std::path::{Path, PathBuf};

use cosim_core::{CosimConfig, StatsError};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[test]
fn defaults() {
    let c = CosimConfig::default();
    assert_eq!(c.profiling.pc_start, 0x0001_0000);
    assert_eq!(c.profiling.pc_stop, u32::MAX);
    assert!(!c.profiling.single_match);
    assert!(!c.profiling.on_boot);
    assert!(!c.trace.enabled);
    assert_eq!(c.trace.history, 32);
    assert_eq!(c.report.path(), PathBuf::from("hw_stats.json"));
}

#[test]
fn empty_document_uses_defaults() {
    let c = CosimConfig::from_json("{}").unwrap();
    assert_eq!(c.profiling.pc_start, CosimConfig::default().profiling.pc_start);
    assert_eq!(c.report.file_name, "hw_stats.json");
}

#[test]
fn partial_sections_keep_remaining_defaults() {
    let c = CosimConfig::from_json(r#"{ "profiling": { "on_boot": true, "pc_stop": 70000 } }"#)
        .unwrap();
    assert!(c.profiling.on_boot);
    assert_eq!(c.profiling.pc_start, 0x0001_0000);
    assert_eq!(c.profiling.pc_stop, 70000);
    assert_eq!(c.trace.history, 32);
}

#[test]
fn report_path_joins_directory() {
    let c = CosimConfig::from_json(r#"{ "report": { "out_dir": "out/run0", "file_name": "s.json" } }"#)
        .unwrap();
    assert_eq!(c.report.path(), Path::new("out/run0").join("s.json"));
}

#[test]
fn inverted_window_is_rejected() {
    let err = CosimConfig::from_json(r#"{ "profiling": { "pc_start": 512, "pc_stop": 256 } }"#)
        .unwrap_err();
    assert!(matches!(err, StatsError::InvalidWindow { start: 512, stop: 256 }));
    assert!(err.to_string().contains("0x100"));
}

#[rstest]
#[case::not_json("profiling")]
#[case::wrong_type(r#"{ "trace": { "history": "deep" } }"#)]
#[case::negative_pc(r#"{ "profiling": { "pc_start": -4 } }"#)]
fn malformed_documents(#[case] json: &str) {
    assert!(matches!(CosimConfig::from_json(json), Err(StatsError::Config(_))));
}

#[test]
fn single_pc_window_is_valid() {
    let c = CosimConfig::from_json(r#"{ "profiling": { "pc_start": 256, "pc_stop": 256 } }"#);
    assert!(c.is_ok());
}

//! Branch predictor accumulator tests.

use cosim_core::stats::BranchStats;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn collect_n(bp: &mut BranchStats, correct: bool, n: u64) {
    for _ in 0..n {
        bp.collect(correct);
    }
}

#[rstest]
#[case(1)]
#[case(17)]
#[case(1000)]
fn all_correct(#[case] n: u64) {
    let mut bp = BranchStats::new();
    bp.set_enabled(true);
    collect_n(&mut bp, true, n);
    bp.summarize(n);
    assert_eq!(bp.accuracy().value(), Some(1.0));
    assert_eq!(bp.mispredict_rate().value(), Some(0.0));
}

#[rstest]
#[case(1)]
#[case(17)]
#[case(1000)]
fn all_wrong(#[case] n: u64) {
    let mut bp = BranchStats::new();
    bp.set_enabled(true);
    collect_n(&mut bp, false, n);
    bp.summarize(n);
    assert_eq!(bp.accuracy().value(), Some(0.0));
    assert_eq!(bp.mispredict_rate().value(), Some(1.0));
}

#[test]
fn mispredictions_normalised_by_retired_count() {
    let mut bp = BranchStats::new();
    bp.set_enabled(true);
    collect_n(&mut bp, true, 30);
    collect_n(&mut bp, false, 10);
    bp.summarize(200);
    assert_eq!(bp.total(), 40);
    assert_eq!(bp.correct(), 30);
    assert_eq!(bp.mispredicted(), 10);
    assert_eq!(bp.accuracy().value(), Some(0.75));
    assert_eq!(bp.mispredict_rate().value(), Some(0.05));

    let r = bp.serialize();
    assert_eq!(r.predictions, 40);
    assert_eq!(r.correct, 30);
    assert_eq!(r.mispredicted, 10);
    assert_eq!(r.retired_insts, 200);
}

#[test]
fn no_predictions_is_undefined() {
    let mut bp = BranchStats::new();
    bp.set_enabled(true);
    bp.summarize(0);
    assert!(bp.accuracy().is_undefined());
    assert!(bp.mispredict_rate().is_undefined());
    let r = bp.serialize();
    assert!(r.accuracy.is_undefined());
    assert!(r.mispredict_rate.is_undefined());
}

#[test]
fn disabled_ignores_predictions() {
    let mut bp = BranchStats::new();
    collect_n(&mut bp, true, 5);
    assert_eq!(bp.total(), 0);
    bp.set_enabled(true);
    collect_n(&mut bp, false, 2);
    bp.set_enabled(false);
    collect_n(&mut bp, true, 5);
    assert_eq!(bp.total(), 2);
    assert_eq!(bp.correct(), 0);
}

#[test]
fn stale_normalisation_is_not_a_crash() {
    let mut bp = BranchStats::new();
    bp.set_enabled(true);
    collect_n(&mut bp, false, 4);
    bp.summarize(8);
    let first = bp.render();
    collect_n(&mut bp, false, 4);
    // Rendered against the previous normalisation until summarized again.
    assert_eq!(bp.mispredict_rate().value(), Some(1.0));
    assert!(first.contains("Mispredicts/Inst: 0.500"));
    assert!(bp.render().contains("Mispredicted: 8"));
}

//! End-to-end mining scenarios.
//!
//! Each test feeds a small, hand-constructed point set through [`mine`]
//! and checks the admitted patterns against a worked-out expectation,
//! rather than against any internal module.

use colocation_core::{MiningConfig, RawPoint};

fn config(radius: f64, min_prevalence: f64) -> MiningConfig {
    MiningConfig::builder().radius(radius).min_prevalence(min_prevalence).build().unwrap()
}

fn types_of(patterns: &[colocation_core::Pattern], wanted: &[&str]) -> Option<colocation_core::Pattern> {
    patterns.iter().find(|p| p.types() == wanted).cloned()
}

#[test]
fn s1_empty_input_yields_no_patterns() {
    let config = config(0.01, 0.5);
    let err = colocation_core::mine(&[], &config).unwrap_err();
    assert!(matches!(err, colocation_core::MiningError::EmptyPointSet));
}

#[test]
fn s2_singleton_pair() {
    let points = vec![RawPoint::new(0, "A", 0.0, 0.0), RawPoint::new(1, "B", 0.001, 0.0)];
    let config = config(0.01, 0.5);
    let patterns = colocation_core::mine(&points, &config).unwrap();

    assert_eq!(patterns.len(), 1);
    let ab = types_of(&patterns, &["A", "B"]).expect("A,B pattern");
    assert_eq!(ab.participation_index(), 1.0);
    assert_eq!(ab.instances(), &[vec![0, 1]]);
}

#[test]
fn s3_below_threshold_admits_nothing() {
    let mut points: Vec<RawPoint> = (0..10).map(|i| RawPoint::new(i, "A", i as f64, 0.0)).collect();
    points.push(RawPoint::new(10, "B", 0.0, 0.0));
    let config = config(0.5, 0.5);
    let patterns = colocation_core::mine(&points, &config).unwrap();
    assert!(patterns.is_empty(), "expected no admitted pattern, got {patterns:?}");
}

#[test]
fn s4_full_triangle() {
    let points = vec![
        RawPoint::new(0, "A", 0.0, 0.0),
        RawPoint::new(1, "B", 0.0, 0.001),
        RawPoint::new(2, "C", 0.001, 0.0),
    ];
    let config = config(0.01, 0.5);
    let patterns = colocation_core::mine(&points, &config).unwrap();

    for pair in [["A", "B"], ["A", "C"], ["B", "C"]] {
        let p = types_of(&patterns, &pair).unwrap_or_else(|| panic!("missing pattern {pair:?}"));
        assert_eq!(p.participation_index(), 1.0);
        assert_eq!(p.instances().len(), 1);
    }

    let abc = types_of(&patterns, &["A", "B", "C"]).expect("A,B,C pattern");
    assert_eq!(abc.participation_index(), 1.0);
    assert_eq!(abc.instances(), &[vec![0, 1, 2]]);
}

#[test]
fn s5_incomplete_triangle_never_generates_abc() {
    let points = vec![
        RawPoint::new(0, "A", 0.0, 0.0),
        RawPoint::new(1, "B", 0.0, 0.001),
        RawPoint::new(2, "C", 1.0, 1.0),
    ];
    let config = config(0.01, 0.5);
    let patterns = colocation_core::mine(&points, &config).unwrap();

    assert!(types_of(&patterns, &["A", "B"]).is_some());
    assert!(types_of(&patterns, &["A", "C"]).is_none());
    assert!(types_of(&patterns, &["B", "C"]).is_none());
    assert!(types_of(&patterns, &["A", "B", "C"]).is_none());
}

#[test]
fn s6_apriori_closure_pruning() {
    // A sits at the origin with B, C, D all within radius of A and of each
    // other pairwise except B-D and C-D, so the frequent size-2 set is
    // {AB, AC, BC, AD} and BD/CD are absent. Only ABC should ever be
    // generated as a size-3 candidate.
    let points = vec![
        RawPoint::new(0, "A", 0.0, 0.0),
        RawPoint::new(1, "B", 0.1, 0.0),
        RawPoint::new(2, "C", 0.0, 0.1),
        RawPoint::new(3, "D", -0.1, -0.1),
    ];
    // Radius covers A-B, A-C, B-C, A-D but not B-D or C-D.
    let config = config(0.15, 0.5);
    let patterns = colocation_core::mine(&points, &config).unwrap();

    assert!(types_of(&patterns, &["A", "B"]).is_some());
    assert!(types_of(&patterns, &["A", "C"]).is_some());
    assert!(types_of(&patterns, &["B", "C"]).is_some());
    assert!(types_of(&patterns, &["A", "D"]).is_some());
    assert!(types_of(&patterns, &["B", "D"]).is_none());
    assert!(types_of(&patterns, &["C", "D"]).is_none());

    assert!(types_of(&patterns, &["A", "B", "C"]).is_some());
    assert!(types_of(&patterns, &["A", "B", "D"]).is_none());
    assert!(types_of(&patterns, &["A", "C", "D"]).is_none());
    assert!(types_of(&patterns, &["B", "C", "D"]).is_none());
}

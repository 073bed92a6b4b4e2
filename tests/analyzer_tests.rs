mod common;

use common::standard_geometry;
use keyrank::analyzer::{analyze, Analyzer, DirectionKind, EffortModel, RepeatKind, RowDiffKind};
use keyrank::geometry::{Finger, GeometryModel, Hand};
use keyrank::{KeyRankError, Ngram};
use rstest::rstest;

fn ngram(geom: &GeometryModel, symbols: &str) -> Ngram {
    geom.ngram_from_symbols(symbols).unwrap()
}

// --- SFB ---
#[rstest]
#[case("qa", true)] // Pinky top -> pinky home
#[case("fr", true)] // Index home -> index top
#[case("fg", true)] // Index home -> index stretch
#[case("ff", false)] // Same key is a repeat, not an SFB
#[case("fj", false)] // Left index -> right index
#[case("sd", false)] // Ring -> middle
#[case("a", false)]
#[case("fdr", false)] // Index keys are not consecutive
#[case("dfr", true)]
fn test_same_finger_bigram(#[case] symbols: &str, #[case] expected: bool) {
    let geom = standard_geometry();
    let facts = analyze(&ngram(&geom, symbols), &geom).unwrap();
    assert_eq!(facts.is_same_finger_bigram, expected, "SFB check failed for {}", symbols);
}

#[rstest]
#[case("a", 0)]
#[case("as", 0)]
#[case("qz", 2)]
#[case("qaz", 1)]
#[case("azq", 2)]
fn test_row_delta(#[case] symbols: &str, #[case] expected: u32) {
    let geom = standard_geometry();
    let facts = analyze(&ngram(&geom, symbols), &geom).unwrap();
    assert_eq!(facts.row_delta, expected);
}

// --- REDIRECTS (column reversal on one hand) ---
#[rstest]
#[case("sfd", true)]
#[case("fsd", true)]
#[case("asd", false)] // Roll
#[case("dsa", false)]
#[case("sdd", false)] // Second move has no column change
#[case("sd", false)]
fn test_redirect(#[case] symbols: &str, #[case] expected: bool) {
    let geom = standard_geometry();
    let facts = analyze(&ngram(&geom, symbols), &geom).unwrap();
    assert_eq!(facts.is_redirect, expected, "Redirect check failed for {}", symbols);
}

#[test]
fn test_cross_hand_trigram_is_never_redirect() {
    let geom = standard_geometry();
    // Columns go right, then left again, but the middle key is on the other hand.
    let facts = analyze(&ngram(&geom, "sjd"), &geom).unwrap();
    assert!(!facts.is_redirect);
    assert_eq!(facts.hand_pattern, vec![Hand::Left, Hand::Right, Hand::Left]);
    assert_eq!(facts.alternations(), 2);
    assert_eq!(facts.direction, None);
    assert_eq!(facts.repeat, None);
}

#[test]
fn test_order_sensitive() {
    let geom = standard_geometry();
    let ad = analyze(&ngram(&geom, "qd"), &geom).unwrap();
    let da = analyze(&ngram(&geom, "dq"), &geom).unwrap();
    assert_eq!(ad.direction, Some(DirectionKind::InwardsPinkyMiddle));
    assert_eq!(da.direction, Some(DirectionKind::OutwardsMiddlePinky));
}

// --- REPEATS ---
#[rstest]
#[case("ff", Some((RepeatKind::Rep, Finger::Index)))]
#[case("fr", Some((RepeatKind::Sfb, Finger::Index)))]
#[case("fdf", Some((RepeatKind::Sfs, Finger::Index)))]
#[case("frv", Some((RepeatKind::Sft, Finger::Index)))]
#[case("ffr", Some((RepeatKind::Rsft, Finger::Index)))]
#[case("fff", Some((RepeatKind::Rep, Finger::Index)))]
// A repeated key next to another finger counts as a repeat on either side
#[case("ffd", Some((RepeatKind::Rep, Finger::Index)))]
#[case("dff", Some((RepeatKind::Rep, Finger::Index)))]
#[case("sdf", None)]
#[case("fj", None)]
fn test_repeat(#[case] symbols: &str, #[case] expected: Option<(RepeatKind, Finger)>) {
    let geom = standard_geometry();
    let facts = analyze(&ngram(&geom, symbols), &geom).unwrap();
    assert_eq!(facts.repeat, expected, "Repeat check failed for {}", symbols);
}

// --- ROW DIFFS ---
#[rstest]
#[case("ec", vec![RowDiffKind::RowDiff2u])] // Same finger, two rows
#[case("qd", vec![RowDiffKind::MiddleBelowPinky1u])]
#[case("cr", vec![RowDiffKind::MiddleBelowIndex2u])]
#[case("cq", vec![RowDiffKind::MiddleBelowPinky2u])]
#[case("da", vec![])] // Same row
#[case("xq", vec![RowDiffKind::RingBelowPinky2u])]
#[case("xqc", vec![RowDiffKind::RingBelowPinky2u, RowDiffKind::MiddleBelowPinky2u])]
fn test_row_diffs(#[case] symbols: &str, #[case] expected: Vec<RowDiffKind>) {
    let geom = standard_geometry();
    let facts = analyze(&ngram(&geom, symbols), &geom).unwrap();
    assert_eq!(facts.row_diffs, expected, "Row diff check failed for {}", symbols);
}

// --- DIRECTIONS ---
#[rstest]
#[case("sfd", Some(DirectionKind::Redirect1))]
#[case("dfa", Some(DirectionKind::Redirect2))]
#[case("fad", Some(DirectionKind::Redirect3))]
#[case("ads", Some(DirectionKind::Redirect4))]
#[case("asa", Some(DirectionKind::OutwardsRingPinky))]
#[case("sdf", None)] // Plain roll
#[case("as", Some(DirectionKind::InwardsPinkyRing))]
#[case("f", None)]
fn test_direction(#[case] symbols: &str, #[case] expected: Option<DirectionKind>) {
    let geom = standard_geometry();
    let facts = analyze(&ngram(&geom, symbols), &geom).unwrap();
    assert_eq!(facts.direction, expected, "Direction check failed for {}", symbols);
}

#[test]
fn test_display_cells_follow_keys() {
    let geom = standard_geometry();
    let facts = analyze(&ngram(&geom, "qa"), &geom).unwrap();
    assert_eq!(facts.symbols, "qa");
    assert_eq!(facts.display_cells.len(), 2);
    assert_eq!(facts.display_cells[0].color, "orange3");
    assert_eq!(facts.display_cells[1].color, "chartreuse3");
    assert_eq!(facts.fingers_str(), "pp");
    assert_eq!(facts.hand_pattern_str(), "LL");
}

#[test]
fn test_unknown_key() {
    let geom = standard_geometry();
    let result = analyze(&Ngram::bigram(0, 99), &geom);
    assert!(matches!(result, Err(KeyRankError::UnknownKey { index: 99, .. })));
}

#[test]
fn test_analyze_all_keeps_order() {
    let geom = standard_geometry();
    let analyzer = Analyzer::new(geom.clone());
    let ngrams: Vec<Ngram> = ["as", "qa", "f", "sfd"].iter().map(|s| ngram(&geom, s)).collect();

    let facts = analyzer.analyze_all(&ngrams).unwrap();
    let symbols: Vec<&str> = facts.iter().map(|f| f.symbols.as_str()).collect();
    assert_eq!(symbols, vec!["as", "qa", "f", "sfd"]);
}

#[test]
fn test_effort_hint_orders_obvious_cases() {
    let geom = standard_geometry();
    let analyzer = Analyzer::new(geom.clone());
    let model = EffortModel::default();
    let hint = |s: &str| {
        let facts = analyzer.analyze(&ngram(&geom, s)).unwrap();
        analyzer.effort_hint(&facts, &model)
    };

    assert!(hint("f") < hint("a"), "index is easier than pinky");
    assert!(hint("fj") < hint("fr"), "alternation beats an SFB");
    assert!(hint("df") < hint("qz"), "home roll beats a pinky jump");
    assert!(hint("sdf") < hint("sfd"), "roll beats redirect");
}

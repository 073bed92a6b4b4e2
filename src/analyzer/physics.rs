use super::types::{RepeatKind, RowDiffKind};
use crate::geometry::{Finger, KeySpec};

/// Classifies same-finger repetition. Expects keys typed by one hand.
pub fn repeat_kind(keys: &[&KeySpec]) -> Option<(RepeatKind, Finger)> {
    match keys {
        [k1, k2] => {
            if !k1.same_finger(k2) {
                return None;
            }
            if k1.index == k2.index {
                Some((RepeatKind::Rep, k1.finger))
            } else {
                Some((RepeatKind::Sfb, k1.finger))
            }
        }
        [k1, k2, k3] => {
            let f12 = k1.same_finger(k2);
            let f23 = k2.same_finger(k3);
            let f13 = k1.same_finger(k3);

            if f13 && !f12 {
                return Some((RepeatKind::Sfs, k1.finger));
            }
            if f12 && f23 {
                let kind = if k1.index == k2.index && k2.index == k3.index {
                    RepeatKind::Rep
                } else if k1.index == k2.index || k2.index == k3.index {
                    RepeatKind::Rsft
                } else {
                    RepeatKind::Sft
                };
                return Some((kind, k1.finger));
            }
            if f12 {
                return Some((pair_kind(k1, k2), k1.finger));
            }
            if f23 {
                return Some((pair_kind(k2, k3), k3.finger));
            }
            None
        }
        _ => None,
    }
}

#[inline]
fn pair_kind(a: &KeySpec, b: &KeySpec) -> RepeatKind {
    if a.index == b.index {
        RepeatKind::Rep
    } else {
        RepeatKind::Sfb
    }
}

/// Row difference class of a bigram. Rows grow downwards.
pub fn row_diff_for_bigram(
    finger1: Finger,
    row1: i32,
    finger2: Finger,
    row2: i32,
) -> Option<RowDiffKind> {
    use Finger::*;
    use RowDiffKind::*;

    let diff = (row1 - row2).abs();
    if diff == 0 {
        return None;
    }
    let (lower, higher) = if row1 > row2 {
        (finger1, finger2)
    } else {
        (finger2, finger1)
    };

    match (lower, higher, diff) {
        (Middle, Index, 2) => Some(MiddleBelowIndex2u),
        (Middle, Index, _) => None,
        (Middle, Pinky, 1) => Some(MiddleBelowPinky1u),
        (Middle, Pinky, 2) => Some(MiddleBelowPinky2u),
        (Middle, Pinky, _) => None,
        (Pinky, Ring, 2) => Some(PinkyBelowRing2u),
        (Pinky, Ring, _) => None,
        (Ring, Pinky, 1) => Some(RingBelowPinky1u),
        (Ring, Pinky, 2) => Some(RingBelowPinky2u),
        (Ring, Pinky, _) => None,
        (Index, Pinky, 2) => Some(IndexBelowPinky2u),
        (Index, Pinky, _) => None,
        (Middle, Ring, 2) => Some(MiddleBelowRing2u),
        (Middle, Ring, _) => None,
        (_, _, 2) => Some(RowDiff2u),
        _ => None,
    }
}

/// Row difference classes for each consecutive pair that has one.
pub fn row_diffs(keys: &[&KeySpec]) -> Vec<RowDiffKind> {
    keys.windows(2)
        .filter_map(|w| row_diff_for_bigram(w[0].finger, w[0].row, w[1].finger, w[1].row))
        .collect()
}

/// Largest absolute row distance between consecutive keys.
pub fn row_delta(keys: &[&KeySpec]) -> u32 {
    keys.windows(2)
        .map(|w| w[0].row.abs_diff(w[1].row))
        .max()
        .unwrap_or(0)
}

/// True when consecutive keys share a finger but are different keys.
pub fn is_same_finger_bigram(keys: &[&KeySpec]) -> bool {
    keys.windows(2)
        .any(|w| w[0].same_finger(w[1]) && w[0].index != w[1].index)
}

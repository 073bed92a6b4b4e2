use super::types::DirectionKind;
use crate::geometry::{Finger, KeySpec};

/// Trigram redirect: the column direction reverses on the second move.
///
/// Only same-hand trigrams qualify. A move that stays in the same column has no
/// direction and therefore cannot take part in a reversal.
pub fn is_redirect(keys: &[&KeySpec]) -> bool {
    let [k1, k2, k3] = keys else {
        return false;
    };

    if k1.hand != k2.hand || k2.hand != k3.hand {
        return false;
    }

    let dir1 = k2.col - k1.col;
    let dir2 = k3.col - k2.col;

    dir1 != 0 && dir2 != 0 && dir1.signum() != dir2.signum()
}

/// Pinky roll class of a same-hand bigram.
pub fn direction_for_bigram(f1: Finger, f2: Finger) -> Option<DirectionKind> {
    use DirectionKind::*;
    use Finger::*;

    match (f1, f2) {
        (Pinky, Ring) => Some(InwardsPinkyRing),
        (Pinky, Middle) => Some(InwardsPinkyMiddle),
        (Middle, Pinky) => Some(OutwardsMiddlePinky),
        (Ring, Pinky) => Some(OutwardsRingPinky),
        _ => None,
    }
}

/// Redirect level of a same-hand finger trigram, falling back to the harder of
/// its two bigram directions.
pub fn direction_for_trigram(f1: Finger, f2: Finger, f3: Finger) -> Option<DirectionKind> {
    use DirectionKind::*;
    use Finger::*;

    let redirect = match (f1, f2, f3) {
        (Ring, Index, Middle) | (Middle, Ring, Index) | (Index, Ring, Middle)
        | (Middle, Index, Ring) => Some(Redirect1),

        (Middle, Index, Pinky) | (Ring, Index, Pinky) | (Pinky, Index, Middle)
        | (Pinky, Index, Ring) => Some(Redirect2),

        (Index, Pinky, Middle) | (Middle, Pinky, Index) | (Index, Pinky, Ring)
        | (Ring, Pinky, Index) => Some(Redirect3),

        (Pinky, Middle, Ring) | (Middle, Pinky, Ring) | (Ring, Pinky, Middle)
        | (Ring, Middle, Pinky) => Some(Redirect4),

        _ => None,
    };

    redirect.or_else(|| direction_for_bigram(f1, f2).max(direction_for_bigram(f2, f3)))
}

/// Direction class of an ngram. `None` for unigrams and ngrams spanning both hands.
pub fn direction(keys: &[&KeySpec]) -> Option<DirectionKind> {
    if keys.windows(2).any(|w| w[0].hand != w[1].hand) {
        return None;
    }
    match keys {
        [k1, k2] => direction_for_bigram(k1.finger, k2.finger),
        [k1, k2, k3] => direction_for_trigram(k1.finger, k2.finger, k3.finger),
        _ => None,
    }
}

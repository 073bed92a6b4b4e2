use super::types::NgramFacts;
use crate::config::RuleWeights;
use crate::geometry::Finger;
use crate::KrResult;

/// Numeric effort estimate used by the automated judge.
///
/// The hint is only meaningful relative to other hints from the same model;
/// it orders ngrams, it does not measure anything physical.
#[derive(Debug, Clone)]
pub struct EffortModel {
    finger_scale: [f32; 5],
    repeat_penalties: [f32; 5],
    penalty_row_delta: f32,
    penalty_row_diff: f32,
    weight_direction: f32,
    penalty_redirect: f32,
    bonus_alternation: f32,
    pub tie_tolerance: f32,
}

impl Default for EffortModel {
    fn default() -> Self {
        // The built-in weight strings always parse.
        Self::from_weights(&RuleWeights::default()).unwrap_or(Self {
            finger_scale: [0.5, 1.0, 1.1, 1.3, 1.6],
            repeat_penalties: [0.2, 1.0, 2.5, 3.0, 4.0],
            penalty_row_delta: 0.4,
            penalty_row_diff: 0.3,
            weight_direction: 0.25,
            penalty_redirect: 1.5,
            bonus_alternation: 0.3,
            tie_tolerance: 0.05,
        })
    }
}

impl EffortModel {
    pub fn from_weights(weights: &RuleWeights) -> KrResult<Self> {
        Ok(Self {
            finger_scale: weights.get_finger_effort_scale()?,
            repeat_penalties: weights.get_repeat_penalties()?,
            penalty_row_delta: weights.penalty_row_delta,
            penalty_row_diff: weights.penalty_row_diff,
            weight_direction: weights.weight_direction,
            penalty_redirect: weights.penalty_redirect,
            bonus_alternation: weights.bonus_alternation,
            tie_tolerance: weights.tie_tolerance.max(0.0),
        })
    }

    #[inline]
    fn finger_cost(&self, finger: Finger) -> f32 {
        self.finger_scale[finger as usize]
    }

    pub fn effort_hint(&self, facts: &NgramFacts) -> f32 {
        let mut effort: f32 = facts.fingers.iter().map(|&f| self.finger_cost(f)).sum();

        if let Some((kind, finger)) = facts.repeat {
            // Weak fingers make repeats worse
            effort += self.repeat_penalties[kind as usize] * self.finger_cost(finger);
        }

        effort += facts.row_delta as f32 * self.penalty_row_delta;

        // Row diff classes are declared from least to most awkward
        effort += facts
            .row_diffs
            .iter()
            .map(|&d| (d as usize + 1) as f32 * self.penalty_row_diff)
            .sum::<f32>();

        if let Some(dir) = facts.direction {
            effort += dir.weight() * self.weight_direction;
        }
        if facts.is_redirect {
            effort += self.penalty_redirect;
        }

        effort -= facts.alternations() as f32 * self.bonus_alternation;
        effort
    }

    /// True when two hints are close enough to count as equal effort.
    pub fn is_tie(&self, a: f32, b: f32) -> bool {
        (a - b).abs() <= self.tie_tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_scale() {
        let weights = RuleWeights {
            finger_effort_scale: "1.0,2.0".into(),
            ..Default::default()
        };
        assert!(EffortModel::from_weights(&weights).is_err());

        let weights = RuleWeights {
            repeat_penalties: "1,2,x,4,5".into(),
            ..Default::default()
        };
        assert!(EffortModel::from_weights(&weights).is_err());
    }

    #[test]
    fn test_tie_tolerance() {
        let model = EffortModel::default();
        assert!(model.is_tie(1.0, 1.04));
        assert!(!model.is_tie(1.0, 1.2));
    }
}

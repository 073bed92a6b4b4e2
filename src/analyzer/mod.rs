pub mod effort;
pub mod flow;
pub mod physics;
pub mod types;

pub use self::effort::EffortModel;
pub use self::types::{DirectionKind, DisplayCell, NgramFacts, RepeatKind, RowDiffKind};

use crate::geometry::GeometryModel;
use crate::ngram::Ngram;
use crate::KrResult;
use rayon::prelude::*;
use std::sync::Arc;

/// Derives the structural facts of one ngram. Pure and order-sensitive.
pub fn analyze(ngram: &Ngram, geometry: &GeometryModel) -> KrResult<NgramFacts> {
    let keys = geometry.resolve(ngram)?;
    let single_hand = keys.windows(2).all(|w| w[0].hand == w[1].hand);

    let display_cells = keys
        .iter()
        .map(|k| DisplayCell {
            glyph: k.category.clone(),
            color: geometry.color(k).to_string(),
        })
        .collect();

    // Effort classifications describe one hand's movement only
    let (repeat, row_diffs, direction) = if single_hand {
        (
            physics::repeat_kind(&keys),
            physics::row_diffs(&keys),
            flow::direction(&keys),
        )
    } else {
        (None, Vec::new(), None)
    };

    Ok(NgramFacts {
        ngram: *ngram,
        symbols: keys.iter().map(|k| k.symbol.as_str()).collect(),
        is_same_finger_bigram: physics::is_same_finger_bigram(&keys),
        row_delta: physics::row_delta(&keys),
        hand_pattern: keys.iter().map(|k| k.hand).collect(),
        fingers: keys.iter().map(|k| k.finger).collect(),
        is_redirect: flow::is_redirect(&keys),
        display_cells,
        repeat,
        row_diffs,
        direction,
    })
}

/// Shares one geometry between every caller that needs ngram facts.
#[derive(Debug, Clone)]
pub struct Analyzer {
    geometry: Arc<GeometryModel>,
}

impl Analyzer {
    pub fn new(geometry: Arc<GeometryModel>) -> Self {
        Self { geometry }
    }

    pub fn geometry(&self) -> &Arc<GeometryModel> {
        &self.geometry
    }

    pub fn analyze(&self, ngram: &Ngram) -> KrResult<NgramFacts> {
        analyze(ngram, &self.geometry)
    }

    /// Facts for many ngrams at once, in input order.
    pub fn analyze_all(&self, ngrams: &[Ngram]) -> KrResult<Vec<NgramFacts>> {
        ngrams
            .par_iter()
            .map(|n| analyze(n, &self.geometry))
            .collect()
    }

    pub fn effort_hint(&self, facts: &NgramFacts, model: &EffortModel) -> f32 {
        model.effort_hint(facts)
    }
}

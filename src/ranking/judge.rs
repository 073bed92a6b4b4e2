use super::session::{SearchWindow, Verdict};
use crate::analyzer::{Analyzer, EffortModel};
use crate::ngram::Ngram;
use crate::KrResult;

/// Decides how a new ngram compares to a ranked candidate.
pub trait Judge {
    fn judge(&mut self, new: &Ngram, candidate: &Ngram) -> KrResult<Verdict>;
}

/// Receives engine events. Every method defaults to doing nothing.
pub trait RankingObserver {
    fn on_comparison(&mut self, _new: &Ngram, _candidate: &Ngram, _window: &SearchWindow) {}
    fn on_decision(&mut self, _ngram: &Ngram, _rank: usize) {}
    fn on_commit(&mut self, _ngram: &Ngram, _rank: usize, _total: usize) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl RankingObserver for NoopObserver {}

/// Automated judge comparing analyzer effort hints.
pub struct RuleJudge {
    analyzer: Analyzer,
    model: EffortModel,
}

impl RuleJudge {
    pub fn new(analyzer: Analyzer, model: EffortModel) -> Self {
        Self { analyzer, model }
    }

    pub fn hint(&self, ngram: &Ngram) -> KrResult<f32> {
        let facts = self.analyzer.analyze(ngram)?;
        Ok(self.analyzer.effort_hint(&facts, &self.model))
    }
}

impl Judge for RuleJudge {
    fn judge(&mut self, new: &Ngram, candidate: &Ngram) -> KrResult<Verdict> {
        let a = self.hint(new)?;
        let b = self.hint(candidate)?;

        Ok(if self.model.is_tie(a, b) {
            Verdict::Equal
        } else if a > b {
            Verdict::Harder
        } else {
            Verdict::Easier
        })
    }
}

/// Adapts a closure into a `Judge`.
pub struct FnJudge<F>(pub F);

impl<F> Judge for FnJudge<F>
where
    F: FnMut(&Ngram, &Ngram) -> Verdict,
{
    fn judge(&mut self, new: &Ngram, candidate: &Ngram) -> KrResult<Verdict> {
        Ok((self.0)(new, candidate))
    }
}

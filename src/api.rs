use crate::analyzer::{Analyzer, NgramFacts};
use crate::config::NgramParams;
use crate::geometry::GeometryModel;
use crate::ngram::{self, Ngram};
use crate::ranking::{Judge, NoopObserver, Ranker, RankingObserver, SessionState};
use crate::store::OrderedList;
use crate::{KeyRankError, KrResult};
use serde::Serialize;
use std::collections::{HashSet, VecDeque};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub placed: usize,
    pub total: usize,
}

/// A ranked ngram with its facts, as shown by viewers.
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RankedRow {
    pub rank: usize,
    pub facts: NgramFacts,
}

/// Ranked entries that do not fit the geometry.
pub fn audit_store(geometry: &GeometryModel, store: &OrderedList) -> Vec<(usize, KeyRankError)> {
    store
        .iter()
        .enumerate()
        .filter_map(|(rank, n)| geometry.validate_ngram(n).err().map(|e| (rank, e)))
        .collect()
}

/// Everything a UI needs to run a ranking session: the geometry, the engine
/// over its store, and the queue of ngrams still waiting to be ranked.
pub struct Workbench<O: RankingObserver = NoopObserver> {
    analyzer: Analyzer,
    ranker: Ranker<O>,
    pending: VecDeque<Ngram>,
    total: usize,
}

impl Workbench<NoopObserver> {
    pub fn open<P: AsRef<Path>>(
        geometry: Arc<GeometryModel>,
        store_path: P,
        params: &NgramParams,
    ) -> KrResult<Self> {
        Self::open_with_observer(geometry, store_path, params, NoopObserver)
    }
}

impl<O: RankingObserver> Workbench<O> {
    pub fn open_with_observer<P: AsRef<Path>>(
        geometry: Arc<GeometryModel>,
        store_path: P,
        params: &NgramParams,
        observer: O,
    ) -> KrResult<Self> {
        let store = OrderedList::open(store_path)?;

        // A ranking built for another keyboard is not usable here
        if let Some((rank, err)) = audit_store(&geometry, &store).into_iter().next() {
            return Err(KeyRankError::Config(format!(
                "Ranking {:?} does not match the geometry (rank {}): {}",
                store.path(),
                rank,
                err
            )));
        }

        let lengths = params.get_lengths()?;
        let candidates = ngram::candidates(&geometry, &lengths, params.cross_hand)?;

        let known: HashSet<Ngram> = candidates.iter().copied().collect();
        let extra = store.iter().filter(|n| !known.contains(n)).count();
        if extra > 0 {
            warn!(
                "{} ranked ngrams are outside the current candidate set",
                extra
            );
        }
        let total = candidates.len() + extra;

        let mut pending: Vec<Ngram> = candidates
            .into_iter()
            .filter(|n| !store.contains(n))
            .collect();

        if params.shuffle {
            let mut rng = match params.seed {
                Some(seed) => fastrand::Rng::with_seed(seed),
                None => fastrand::Rng::new(),
            };
            rng.shuffle(&mut pending);
        }

        info!(
            "Workbench ready: {} of {} ngrams ranked, {} pending",
            store.len(),
            total,
            pending.len()
        );

        Ok(Self {
            analyzer: Analyzer::new(geometry),
            ranker: Ranker::with_observer(store, observer),
            pending: pending.into(),
            total,
        })
    }

    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    pub fn geometry(&self) -> &Arc<GeometryModel> {
        self.analyzer.geometry()
    }

    pub fn ranker(&self) -> &Ranker<O> {
        &self.ranker
    }

    pub fn ranker_mut(&mut self) -> &mut Ranker<O> {
        &mut self.ranker
    }

    pub fn store(&self) -> &OrderedList {
        self.ranker.store()
    }

    pub fn progress(&self) -> Progress {
        Progress {
            placed: self.ranker.store().len(),
            total: self.total,
        }
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Pending ngrams in presentation order.
    pub fn pending(&self) -> impl Iterator<Item = Ngram> + '_ {
        self.pending.iter().copied()
    }

    pub fn next_pending(&self) -> Option<Ngram> {
        self.pending.front().copied()
    }

    /// Starts placing the next pending ngram. `None` once everything is ranked.
    pub fn submit_next(&mut self) -> KrResult<Option<SessionState>> {
        let Some(ngram) = self.pending.pop_front() else {
            return Ok(None);
        };
        match self.ranker.submit(ngram) {
            Ok(state) => Ok(Some(state)),
            Err(e) => {
                self.pending.push_front(ngram);
                Err(e)
            }
        }
    }

    /// Abandons the current placement; its ngram goes back to the front of the queue.
    pub fn cancel(&mut self) {
        if let SessionState::AwaitingComparison { ngram, .. } | SessionState::Decided { ngram, .. } =
            self.ranker.state()
        {
            self.pending.push_front(ngram);
        }
        self.ranker.cancel();
    }

    /// Places the next pending ngram with `judge`. Returns what was placed and where.
    pub fn place_next_with<J: Judge>(&mut self, judge: &mut J) -> KrResult<Option<(Ngram, usize)>> {
        let Some(ngram) = self.pending.pop_front() else {
            return Ok(None);
        };
        match self.ranker.place_with(ngram, judge) {
            Ok(Some(rank)) => Ok(Some((ngram, rank))),
            Ok(None) => {
                self.pending.push_front(ngram);
                Ok(None)
            }
            Err(e) => {
                // A failed commit leaves the placement decided
                if matches!(self.ranker.state(), SessionState::Decided { ngram: n, .. } if n == ngram)
                {
                    self.ranker.cancel();
                }
                self.pending.push_front(ngram);
                Err(e)
            }
        }
    }

    /// Ranked rows with facts, starting at `start`.
    pub fn rows(&self, start: usize, limit: Option<usize>) -> KrResult<Vec<RankedRow>> {
        rows(&self.analyzer, self.store(), start, limit)
    }
}

/// Ranked rows of any store, for read-only viewers.
pub fn rows(
    analyzer: &Analyzer,
    store: &OrderedList,
    start: usize,
    limit: Option<usize>,
) -> KrResult<Vec<RankedRow>> {
    let ranked = store.as_slice();
    let start = start.min(ranked.len());
    let end = limit.map_or(ranked.len(), |l| start.saturating_add(l).min(ranked.len()));

    let facts = analyzer.analyze_all(&ranked[start..end])?;
    Ok(facts
        .into_iter()
        .enumerate()
        .map(|(i, facts)| RankedRow {
            rank: start + i,
            facts,
        })
        .collect())
}

use super::judge::{Judge, NoopObserver, RankingObserver};
use super::session::{Comparison, InsertionSession, SearchWindow, SessionState};
use crate::ngram::Ngram;
use crate::store::OrderedList;
use crate::{KeyRankError, KrResult};
use tracing::{debug, info};

/// Places ngrams into an `OrderedList` by binary insertion driven by comparisons.
///
/// At most one ngram is being placed at a time. Only `commit` writes to the store;
/// everything before it can be cancelled without trace.
pub struct Ranker<O: RankingObserver = NoopObserver> {
    store: OrderedList,
    session: Option<InsertionSession>,
    observer: O,
}

impl Ranker<NoopObserver> {
    pub fn new(store: OrderedList) -> Self {
        Self::with_observer(store, NoopObserver)
    }
}

impl<O: RankingObserver> Ranker<O> {
    pub fn with_observer(store: OrderedList, observer: O) -> Self {
        Self {
            store,
            session: None,
            observer,
        }
    }

    pub fn store(&self) -> &OrderedList {
        &self.store
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn into_store(self) -> OrderedList {
        self.store
    }

    pub fn state(&self) -> SessionState {
        let Some(session) = &self.session else {
            return SessionState::Idle;
        };
        match (session.decided(), self.current_comparison_pair()) {
            (Some(rank), _) => SessionState::Decided {
                ngram: session.ngram(),
                rank,
            },
            (None, Some((ngram, candidate))) => {
                let (low, high) = session.bounds();
                SessionState::AwaitingComparison {
                    ngram,
                    candidate,
                    low,
                    high,
                }
            }
            (None, None) => SessionState::Idle,
        }
    }

    /// Starts placing `ngram`. An empty ranking decides immediately at rank 0.
    pub fn submit(&mut self, ngram: Ngram) -> KrResult<SessionState> {
        if let Some(active) = &self.session {
            return Err(KeyRankError::Validation(format!(
                "Cannot submit {} while {} is still being placed",
                ngram,
                active.ngram()
            )));
        }
        if self.store.contains(&ngram) {
            return Err(KeyRankError::DuplicateNgram(ngram));
        }

        debug!("Placing {} among {} ranked ngrams", ngram, self.store.len());
        self.session = Some(InsertionSession::new(ngram, self.store.len()));
        self.notify();
        Ok(self.state())
    }

    /// Applies the answer for the current comparison pair.
    pub fn answer(&mut self, comparison: Comparison) -> KrResult<SessionState> {
        let Some(session) = self.session.as_mut() else {
            return Err(KeyRankError::Validation("No ngram is being placed".into()));
        };
        if session.decided().is_some() {
            return Err(KeyRankError::Validation(format!(
                "{} is already decided; commit or undo first",
                session.ngram()
            )));
        }

        session.answer(comparison);
        debug!(
            "Answer {} for {} -> bounds {:?}",
            comparison,
            session.ngram(),
            session.bounds()
        );
        self.notify();
        Ok(self.state())
    }

    /// The new ngram and the ranked candidate it must be compared with.
    pub fn current_comparison_pair(&self) -> Option<(Ngram, Ngram)> {
        let session = self.session.as_ref()?;
        let mid = session.mid()?;
        let candidate = self.store.get(mid)?;
        Some((session.ngram(), *candidate))
    }

    /// Drops the current placement. Calling it again, or with nothing active, is a no-op.
    pub fn cancel(&mut self) {
        if let Some(session) = self.session.take() {
            debug!("Cancelled placement of {}", session.ngram());
        }
    }

    pub fn is_decided(&self) -> bool {
        self.decided_rank().is_some()
    }

    pub fn decided_rank(&self) -> Option<usize> {
        self.session.as_ref().and_then(InsertionSession::decided)
    }

    /// Inserts the decided ngram into the store.
    ///
    /// If persisting fails the placement stays decided so the commit can be retried.
    pub fn commit(&mut self) -> KrResult<usize> {
        let (ngram, rank) = match &self.session {
            Some(s) => match s.decided() {
                Some(rank) => (s.ngram(), rank),
                None => {
                    return Err(KeyRankError::Validation(format!(
                        "{} still needs comparisons before it can be committed",
                        s.ngram()
                    )))
                }
            },
            None => return Err(KeyRankError::Validation("Nothing to commit".into())),
        };

        self.store.append_at(rank, ngram)?;
        self.session = None;

        info!("Ranked {} at {} of {}", ngram, rank, self.store.len());
        self.observer.on_commit(&ngram, rank, self.store.len());
        Ok(rank)
    }

    /// Takes back the last answer of the current placement.
    pub fn undo(&mut self) -> bool {
        let undone = self.session.as_mut().is_some_and(InsertionSession::undo);
        if undone {
            self.notify();
        }
        undone
    }

    /// Starts the current placement over, forgetting every answer.
    pub fn restart(&mut self) -> bool {
        match self.session.as_mut() {
            Some(session) => {
                session.restart();
                self.notify();
                true
            }
            None => false,
        }
    }

    pub fn search_window(&self) -> Option<SearchWindow> {
        self.session.as_ref().map(InsertionSession::window)
    }

    pub fn comparisons_made(&self) -> usize {
        self.session
            .as_ref()
            .map(InsertionSession::comparisons)
            .unwrap_or(0)
    }

    /// Places `ngram` with answers from `judge` and commits it.
    ///
    /// Returns the rank, or `None` when the judge abandoned the placement.
    pub fn place_with<J: Judge>(&mut self, ngram: Ngram, judge: &mut J) -> KrResult<Option<usize>> {
        self.submit(ngram)?;

        while let Some((new, candidate)) = self.current_comparison_pair() {
            let verdict = match judge.judge(&new, &candidate) {
                Ok(v) => v,
                Err(e) => {
                    self.cancel();
                    return Err(e);
                }
            };
            match verdict.comparison() {
                Some(comparison) => {
                    self.answer(comparison)?;
                }
                None => {
                    debug!("Judge abandoned {}", new);
                    self.cancel();
                    return Ok(None);
                }
            }
        }

        self.commit().map(Some)
    }

    fn notify(&mut self) {
        let Some(session) = &self.session else {
            return;
        };
        let ngram = session.ngram();
        let window = session.window();

        if let Some(rank) = session.decided() {
            self.observer.on_decision(&ngram, rank);
        } else if let Some((new, candidate)) = self.current_comparison_pair() {
            self.observer.on_comparison(&new, &candidate, &window);
        }
    }
}

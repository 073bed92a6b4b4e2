use crate::ngram::Ngram;
use serde::Serialize;
use strum_macros::{Display, EnumString};

/// Answer to "how does the new ngram compare to the candidate?".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize)]
#[strum(ascii_case_insensitive)]
pub enum Comparison {
    /// The new ngram takes more effort than the candidate.
    #[strum(to_string = "harder", serialize = "l", serialize = ">")]
    Harder,
    #[strum(to_string = "easier", serialize = "h", serialize = "<")]
    Easier,
    #[strum(to_string = "equal", serialize = "=")]
    Equal,
}

/// What a `Judge` returns: an answer, or a request to stop placing the ngram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Harder,
    Easier,
    Equal,
    Abandon,
}

impl Verdict {
    pub fn comparison(self) -> Option<Comparison> {
        match self {
            Verdict::Harder => Some(Comparison::Harder),
            Verdict::Easier => Some(Comparison::Easier),
            Verdict::Equal => Some(Comparison::Equal),
            Verdict::Abandon => None,
        }
    }
}

impl From<Comparison> for Verdict {
    fn from(c: Comparison) -> Self {
        match c {
            Comparison::Harder => Verdict::Harder,
            Comparison::Easier => Verdict::Easier,
            Comparison::Equal => Verdict::Equal,
        }
    }
}

/// Externally visible state of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum SessionState {
    Idle,
    AwaitingComparison {
        ngram: Ngram,
        candidate: Ngram,
        low: usize,
        high: usize,
    },
    Decided {
        ngram: Ngram,
        rank: usize,
    },
}

/// Widths of the four segments of a position bar over the ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SearchWindow {
    /// Ranks already known to be easier than the new ngram.
    pub excluded_below: usize,
    /// Open ranks below the current candidate.
    pub open_below: usize,
    /// Open ranks from the current candidate up.
    pub open_above: usize,
    /// Ranks already known to be harder than the new ngram.
    pub excluded_above: usize,
}

/// Binary search state for inserting one ngram into a list of `len` items.
///
/// The open interval `[low, high)` shrinks on every answer, so answers given within
/// one session can never contradict each other.
#[derive(Debug, Clone)]
pub(crate) struct InsertionSession {
    ngram: Ngram,
    len: usize,
    low: usize,
    high: usize,
    decided: Option<usize>,
    history: Vec<(usize, usize)>,
}

impl InsertionSession {
    pub fn new(ngram: Ngram, len: usize) -> Self {
        Self {
            ngram,
            len,
            low: 0,
            high: len,
            decided: if len == 0 { Some(0) } else { None },
            history: Vec::new(),
        }
    }

    pub fn ngram(&self) -> Ngram {
        self.ngram
    }

    pub fn decided(&self) -> Option<usize> {
        self.decided
    }

    pub fn bounds(&self) -> (usize, usize) {
        (self.low, self.high)
    }

    /// Rank of the next candidate, while undecided.
    pub fn mid(&self) -> Option<usize> {
        match self.decided {
            Some(_) => None,
            None => Some((self.low + self.high) / 2),
        }
    }

    /// Answers given so far in this session.
    pub fn comparisons(&self) -> usize {
        self.history.len()
    }

    /// Applies one answer. Returns the rank once the search is decided.
    pub fn answer(&mut self, comparison: Comparison) -> Option<usize> {
        let mid = self.mid()?;
        self.history.push((self.low, self.high));

        match comparison {
            Comparison::Harder => self.low = mid + 1,
            Comparison::Easier => self.high = mid,
            // Insert after the equal item
            Comparison::Equal => {
                self.decided = Some(mid + 1);
                return self.decided;
            }
        }

        if self.low >= self.high {
            self.decided = Some(self.low);
        }
        self.decided
    }

    /// Takes back the last answer. False when there is nothing to take back.
    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some((low, high)) => {
                self.low = low;
                self.high = high;
                self.decided = None;
                true
            }
            None => false,
        }
    }

    pub fn restart(&mut self) {
        *self = Self::new(self.ngram, self.len);
    }

    pub fn window(&self) -> SearchWindow {
        match self.decided {
            Some(rank) => SearchWindow {
                excluded_below: rank,
                open_below: 0,
                open_above: 0,
                excluded_above: self.len - rank,
            },
            None => {
                let mid = (self.low + self.high) / 2;
                SearchWindow {
                    excluded_below: self.low,
                    open_below: mid - self.low,
                    open_above: self.high - mid,
                    excluded_above: self.len - self.high,
                }
            }
        }
    }
}

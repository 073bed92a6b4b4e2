use crate::geometry::{Finger, Hand};
use crate::ngram::Ngram;
use serde::Serialize;
use strum_macros::{Display, EnumCount, EnumIter};

/// Same-finger repetition, from least to most effort.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, EnumCount, Serialize,
)]
pub enum RepeatKind {
    /// The same key pressed again.
    #[strum(to_string = "REP")]
    Rep,
    /// Same finger skipgram: first and last key share a finger.
    #[strum(to_string = "SFS")]
    Sfs,
    /// Same finger bigram.
    #[strum(to_string = "SFB")]
    Sfb,
    /// Same finger trigram with a repeated key.
    #[strum(to_string = "RSFT")]
    Rsft,
    /// Same finger trigram.
    #[strum(to_string = "SFT")]
    Sft,
}

impl RepeatKind {
    pub fn color(self) -> &'static str {
        match self {
            RepeatKind::Rep => "grey",
            RepeatKind::Sfs => "royal_blue1",
            RepeatKind::Sfb => "#e36f42",
            RepeatKind::Rsft => "deep_pink3",
            RepeatKind::Sft => "deep_pink2",
        }
    }
}

/// Uncomfortable vertical movement between two consecutive keys, from least to most
/// effort. Only differences that matter for the finger pair are classified.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, EnumCount, Serialize,
)]
pub enum RowDiffKind {
    #[strum(to_string = "2u")]
    RowDiff2u,
    #[strum(to_string = "mi2u")]
    MiddleBelowIndex2u,
    #[strum(to_string = "mp1u")]
    MiddleBelowPinky1u,
    #[strum(to_string = "ip2u")]
    IndexBelowPinky2u,
    #[strum(to_string = "mr2u")]
    MiddleBelowRing2u,
    #[strum(to_string = "pr2u")]
    PinkyBelowRing2u,
    #[strum(to_string = "mp2u")]
    MiddleBelowPinky2u,
    #[strum(to_string = "rp1u")]
    RingBelowPinky1u,
    #[strum(to_string = "rp2u")]
    RingBelowPinky2u,
}

impl RowDiffKind {
    pub fn color(self) -> &'static str {
        match self {
            RowDiffKind::RowDiff2u => "grey",
            RowDiffKind::MiddleBelowIndex2u => "dodger_blue2",
            RowDiffKind::MiddleBelowPinky1u => "spring_green3",
            RowDiffKind::IndexBelowPinky2u => "yellow1",
            RowDiffKind::MiddleBelowRing2u => "dark_orange",
            RowDiffKind::PinkyBelowRing2u => "red",
            RowDiffKind::MiddleBelowPinky2u => "purple",
            RowDiffKind::RingBelowPinky1u => "deep_pink2",
            RowDiffKind::RingBelowPinky2u => "deep_pink3",
        }
    }
}

/// Horizontal movement classes: pinky rolls for bigrams, redirect levels for trigrams.
/// Declared in order of effort; `weight` gives the approximate scale.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, EnumCount, Serialize,
)]
pub enum DirectionKind {
    /// No pinky involved.
    #[strum(to_string = "redir1")]
    Redirect1,
    #[strum(to_string = "in(pm)")]
    InwardsPinkyMiddle,
    #[strum(to_string = "in(pr)")]
    InwardsPinkyRing,
    #[strum(to_string = "out(mp)")]
    OutwardsMiddlePinky,
    /// Pinky involved, index in the middle.
    #[strum(to_string = "redir2")]
    Redirect2,
    #[strum(to_string = "out(rp)")]
    OutwardsRingPinky,
    /// Pinky involved, index at either end.
    #[strum(to_string = "redir3")]
    Redirect3,
    /// Index not involved.
    #[strum(to_string = "redir4")]
    Redirect4,
}

impl DirectionKind {
    pub fn weight(self) -> f32 {
        match self {
            DirectionKind::Redirect1 => 0.4,
            DirectionKind::InwardsPinkyMiddle => 0.8,
            DirectionKind::InwardsPinkyRing => 1.5,
            DirectionKind::OutwardsMiddlePinky => 2.5,
            DirectionKind::Redirect2 => 3.1,
            DirectionKind::OutwardsRingPinky => 7.0,
            DirectionKind::Redirect3 => 10.0,
            DirectionKind::Redirect4 => 25.0,
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            DirectionKind::Redirect1 => "#7d807d",
            DirectionKind::InwardsPinkyMiddle => "#3b6bdb",
            DirectionKind::InwardsPinkyRing => "#46e3db",
            DirectionKind::OutwardsMiddlePinky => "#56e04c",
            DirectionKind::Redirect2 => "#edd928",
            DirectionKind::OutwardsRingPinky => "dark_orange3",
            DirectionKind::Redirect3 => "red",
            DirectionKind::Redirect4 => "deep_pink3",
        }
    }
}

/// Visual category glyph and resolved color of one key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayCell {
    pub glyph: String,
    pub color: String,
}

/// Structural facts about one ngram. Derived on demand, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NgramFacts {
    pub ngram: Ngram,
    pub symbols: String,

    pub is_same_finger_bigram: bool,
    pub row_delta: u32,
    pub hand_pattern: Vec<Hand>,
    pub fingers: Vec<Finger>,
    pub is_redirect: bool,
    pub display_cells: Vec<DisplayCell>,

    // Single-hand classifications (empty for ngrams spanning both hands)
    pub repeat: Option<(RepeatKind, Finger)>,
    pub row_diffs: Vec<RowDiffKind>,
    pub direction: Option<DirectionKind>,
}

impl NgramFacts {
    pub fn is_single_hand(&self) -> bool {
        self.hand_pattern.windows(2).all(|w| w[0] == w[1])
    }

    /// Number of hand switches between consecutive keys.
    pub fn alternations(&self) -> usize {
        self.hand_pattern.windows(2).filter(|w| w[0] != w[1]).count()
    }

    /// Compact hand pattern such as `"LLR"`.
    pub fn hand_pattern_str(&self) -> String {
        self.hand_pattern.iter().map(|h| h.initial()).collect()
    }

    /// Finger codes such as `"mmi"`.
    pub fn fingers_str(&self) -> String {
        self.fingers.iter().map(|f| f.to_string()).collect()
    }

    pub fn repeat_label(&self) -> String {
        match self.repeat {
            Some((kind, finger)) => format!("{}({})", kind, finger),
            None => String::new(),
        }
    }

    pub fn row_diff_label(&self) -> String {
        self.row_diffs
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

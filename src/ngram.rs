use crate::geometry::GeometryModel;
use crate::{KeyRankError, KrResult};
use itertools::Itertools;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Identifier of a physical key, as written in `key_indices`.
pub type KeyIndex = u32;

/// Longest sequence that can be ranked (trigrams).
pub const MAX_NGRAM_LEN: usize = 3;

/// An ordered sequence of 1 to 3 key indices.
///
/// Equality is sequence equality: `[1, 2]` and `[2, 1]` are different ngrams.
/// Unused slots are always zero so the derived `Eq`/`Hash` only see the sequence.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ngram {
    keys: [KeyIndex; MAX_NGRAM_LEN],
    len: u8,
}

impl Ngram {
    pub fn new(keys: &[KeyIndex]) -> KrResult<Self> {
        if keys.is_empty() || keys.len() > MAX_NGRAM_LEN {
            return Err(KeyRankError::Validation(format!(
                "An ngram has 1 to {} keys, got {}",
                MAX_NGRAM_LEN,
                keys.len()
            )));
        }
        let mut slots = [0; MAX_NGRAM_LEN];
        slots[..keys.len()].copy_from_slice(keys);
        Ok(Self {
            keys: slots,
            len: keys.len() as u8,
        })
    }

    pub fn unigram(a: KeyIndex) -> Self {
        Self {
            keys: [a, 0, 0],
            len: 1,
        }
    }

    pub fn bigram(a: KeyIndex, b: KeyIndex) -> Self {
        Self {
            keys: [a, b, 0],
            len: 2,
        }
    }

    pub fn trigram(a: KeyIndex, b: KeyIndex, c: KeyIndex) -> Self {
        Self {
            keys: [a, b, c],
            len: 3,
        }
    }

    #[inline]
    pub fn keys(&self) -> &[KeyIndex] {
        &self.keys[..self.len as usize]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Always false; an ngram holds at least one key.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Consecutive key pairs (none for unigrams).
    pub fn pairs(&self) -> impl Iterator<Item = (KeyIndex, KeyIndex)> + '_ {
        self.keys().windows(2).map(|w| (w[0], w[1]))
    }
}

impl fmt::Display for Ngram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keys().iter().join(","))
    }
}

impl fmt::Debug for Ngram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ngram({})", self)
    }
}

impl FromStr for Ngram {
    type Err = KeyRankError;

    /// Parses the persisted form, e.g. `"0,2,1"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let keys = s
            .split(',')
            .map(|part| {
                part.trim().parse::<KeyIndex>().map_err(|_| {
                    KeyRankError::Validation(format!("'{}' is not a key index", part.trim()))
                })
            })
            .collect::<KrResult<Vec<_>>>()?;
        Self::new(&keys)
    }
}

impl Serialize for Ngram {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.keys())
    }
}

impl<'de> Deserialize<'de> for Ngram {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let keys = Vec::<KeyIndex>::deserialize(deserializer)?;
        Ngram::new(&keys).map_err(D::Error::custom)
    }
}

/// Enumerates every ngram of the requested lengths over the geometry's keys.
///
/// Keys are taken in ascending index order and sequences are produced in lexicographic
/// order per length. Unless `include_cross_hand` is set, only sequences typable by a
/// single hand are kept.
pub fn candidates(
    geometry: &GeometryModel,
    lengths: &[usize],
    include_cross_hand: bool,
) -> KrResult<Vec<Ngram>> {
    let indices: Vec<KeyIndex> = geometry.keys().iter().map(|k| k.index).collect();
    let mut out = Vec::new();

    for &len in lengths {
        if len == 0 || len > MAX_NGRAM_LEN {
            return Err(KeyRankError::Validation(format!(
                "Ngram length {} is outside 1..={}",
                len, MAX_NGRAM_LEN
            )));
        }
        for seq in (0..len)
            .map(|_| indices.iter().copied())
            .multi_cartesian_product()
        {
            let ngram = Ngram::new(&seq)?;
            if include_cross_hand || geometry.is_single_hand(&ngram)? {
                out.push(ngram);
            }
        }
    }

    Ok(out)
}

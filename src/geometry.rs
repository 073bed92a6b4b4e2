use crate::ngram::{KeyIndex, Ngram};
use crate::{KeyRankError, KrResult};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use strum_macros::{Display, EnumIter, EnumString};
use tracing::{debug, info};

pub mod layout_file;

pub use layout_file::LayoutFile;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum Hand {
    Left,
    Right,
}

impl Hand {
    /// Single letter used in compact hand patterns ("LLR").
    pub fn initial(self) -> char {
        match self {
            Hand::Left => 'L',
            Hand::Right => 'R',
        }
    }
}

/// Fingers ordered from least to most effort.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum Finger {
    #[strum(to_string = "t", serialize = "thumb")]
    Thumb,
    #[strum(to_string = "i", serialize = "index")]
    Index,
    #[strum(to_string = "m", serialize = "middle")]
    Middle,
    #[strum(to_string = "r", serialize = "ring")]
    Ring,
    #[strum(to_string = "p", serialize = "pinky")]
    Pinky,
}

/// One physical key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySpec {
    pub index: KeyIndex,
    pub symbol: String,
    pub hand: Hand,
    pub finger: Finger,
    pub col: i32,
    pub row: i32,
    /// Single glyph shown for the key in fact tables.
    pub category: String,
    /// Key into the geometry's color mapping.
    pub color_key: String,
}

impl KeySpec {
    pub fn position(&self) -> (i32, i32) {
        (self.col, self.row)
    }

    /// True when both keys are pressed by the same physical finger.
    #[inline]
    pub fn same_finger(&self, other: &KeySpec) -> bool {
        self.hand == other.hand && self.finger == other.finger
    }
}

/// Immutable keyboard model, built once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct GeometryModel {
    keys: Vec<KeySpec>,
    by_index: HashMap<KeyIndex, usize>,
    by_symbol: HashMap<String, usize>,
    color_mapping: HashMap<String, String>,
}

impl GeometryModel {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> KrResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            KeyRankError::Config(format!("Failed to read geometry file {:?}: {}", path, e))
        })?;
        let doc = LayoutFile::from_yaml(&content)?;
        let model = Self::load(&doc)?;
        info!("Loaded geometry {:?}: {} keys", path, model.key_count());
        Ok(model)
    }

    /// Builds the model from an already-parsed layout document.
    pub fn load(doc: &LayoutFile) -> KrResult<Self> {
        let keys = doc.key_specs()?;
        Self::from_keys(keys, doc.color_table())
    }

    /// Validates and indexes a list of keys.
    pub fn from_keys(
        mut keys: Vec<KeySpec>,
        color_mapping: HashMap<String, String>,
    ) -> KrResult<Self> {
        if keys.is_empty() {
            return Err(KeyRankError::Config("The layout defines no keys".into()));
        }

        keys.sort_by_key(|k| k.index);

        let mut by_index = HashMap::with_capacity(keys.len());
        let mut by_symbol = HashMap::with_capacity(keys.len());
        let mut slots = HashSet::with_capacity(keys.len());

        for (i, key) in keys.iter().enumerate() {
            if by_index.insert(key.index, i).is_some() {
                return Err(KeyRankError::Config(format!(
                    "Duplicate key index {}",
                    key.index
                )));
            }
            if by_symbol.insert(key.symbol.clone(), i).is_some() {
                return Err(KeyRankError::Config(format!(
                    "Duplicate symbol '{}'",
                    key.symbol
                )));
            }
            if !slots.insert(key.position()) {
                return Err(KeyRankError::Config(format!(
                    "Two keys share matrix position ({}, {})",
                    key.col, key.row
                )));
            }
            if !color_mapping.contains_key(&key.color_key) {
                return Err(KeyRankError::Config(format!(
                    "Color key '{}' of key {} has no entry in color_mapping",
                    key.color_key, key.index
                )));
            }
        }

        debug!(
            "Geometry indexed: {} keys, {} colors",
            keys.len(),
            color_mapping.len()
        );

        Ok(Self {
            keys,
            by_index,
            by_symbol,
            color_mapping,
        })
    }

    /// All keys, ascending by index.
    pub fn keys(&self) -> &[KeySpec] {
        &self.keys
    }

    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    pub fn key(&self, index: KeyIndex) -> Option<&KeySpec> {
        self.by_index.get(&index).map(|&i| &self.keys[i])
    }

    pub fn key_by_symbol(&self, symbol: &str) -> Option<&KeySpec> {
        self.by_symbol.get(symbol).map(|&i| &self.keys[i])
    }

    pub fn keys_on(&self, hand: Hand) -> impl Iterator<Item = &KeySpec> + '_ {
        self.keys.iter().filter(move |k| k.hand == hand)
    }

    pub fn indices_on(&self, hand: Hand) -> Vec<KeyIndex> {
        self.keys_on(hand).map(|k| k.index).collect()
    }

    /// Color name for a key. Always present: unknown color keys are rejected at load.
    pub fn color(&self, key: &KeySpec) -> &str {
        self.color_mapping
            .get(&key.color_key)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Resolves every key of the ngram, failing on the first unknown index.
    pub fn resolve(&self, ngram: &Ngram) -> KrResult<Vec<&KeySpec>> {
        ngram
            .keys()
            .iter()
            .map(|&index| {
                self.key(index).ok_or_else(|| KeyRankError::UnknownKey {
                    index,
                    ngram: ngram.to_string(),
                })
            })
            .collect()
    }

    pub fn validate_ngram(&self, ngram: &Ngram) -> KrResult<()> {
        self.resolve(ngram).map(|_| ())
    }

    pub fn is_single_hand(&self, ngram: &Ngram) -> KrResult<bool> {
        let keys = self.resolve(ngram)?;
        Ok(keys.iter().all(|k| k.hand == keys[0].hand))
    }

    pub fn symbols_of(&self, ngram: &Ngram) -> KrResult<String> {
        Ok(self
            .resolve(ngram)?
            .iter()
            .map(|k| k.symbol.as_str())
            .collect())
    }

    /// Parses an ngram written with key symbols (e.g. `"th"`), one character per key.
    pub fn ngram_from_symbols(&self, text: &str) -> KrResult<Ngram> {
        let keys = text
            .chars()
            .map(|c| {
                let s = c.to_string();
                self.key_by_symbol(&s)
                    .map(|k| k.index)
                    .ok_or_else(|| KeyRankError::Validation(format!("Unknown symbol '{}'", s)))
            })
            .collect::<KrResult<Vec<_>>>()?;
        Ngram::new(&keys)
    }
}

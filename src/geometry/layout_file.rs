use super::{Finger, Hand, KeySpec};
use crate::ngram::KeyIndex;
use crate::{KeyRankError, KrResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A YAML scalar used as a label. Symbols such as `1` or `0` arrive as integers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Label {
    Int(i64),
    Bool(bool),
    Text(String),
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Int(i) => write!(f, "{}", i),
            Label::Bool(b) => write!(f, "{}", b),
            Label::Text(s) => f.write_str(s),
        }
    }
}

type Matrix<T> = Vec<Vec<Option<T>>>;

/// The keyboard description document.
///
/// Every matrix is a list of rows aligned cell by cell. A `~` cell is a placeholder
/// for "no key" and has to appear in all matrices at the same cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutFile {
    pub key_indices: Matrix<KeyIndex>,
    pub symbols: Matrix<Label>,
    pub hands: Matrix<String>,
    pub finger_matrix: Matrix<String>,
    pub key_category_matrix: Matrix<Label>,
    pub color_matrix: Matrix<Label>,
    pub matrix_positions: Matrix<(i32, i32)>,
    pub color_mapping: HashMap<Label, String>,
}

/// Shape of one matrix: number of cells per row.
fn shape<T>(m: &Matrix<T>) -> Vec<usize> {
    m.iter().map(Vec::len).collect()
}

impl LayoutFile {
    pub fn from_yaml(content: &str) -> KrResult<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| KeyRankError::Config(format!("Invalid layout document: {}", e)))
    }

    pub fn color_table(&self) -> HashMap<String, String> {
        self.color_mapping
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn check_shapes(&self) -> KrResult<()> {
        let expected = shape(&self.key_indices);
        let others = [
            ("symbols", shape(&self.symbols)),
            ("hands", shape(&self.hands)),
            ("finger_matrix", shape(&self.finger_matrix)),
            ("key_category_matrix", shape(&self.key_category_matrix)),
            ("color_matrix", shape(&self.color_matrix)),
            ("matrix_positions", shape(&self.matrix_positions)),
        ];

        for (name, got) in others {
            if got.len() != expected.len() {
                return Err(KeyRankError::Config(format!(
                    "'{}' has {} rows but 'key_indices' has {}",
                    name,
                    got.len(),
                    expected.len()
                )));
            }
            if let Some(row) = (0..got.len()).find(|&r| got[r] != expected[r]) {
                return Err(KeyRankError::Config(format!(
                    "Row {} of '{}' has {} cells but 'key_indices' has {}",
                    row, name, got[row], expected[row]
                )));
            }
        }
        Ok(())
    }

    /// Flattens the parallel matrices into one `KeySpec` per non-placeholder cell.
    pub fn key_specs(&self) -> KrResult<Vec<KeySpec>> {
        self.check_shapes()?;

        let mut keys = Vec::new();
        for (r, row) in self.key_indices.iter().enumerate() {
            for (c, index) in row.iter().enumerate() {
                let present = [
                    ("key_indices", index.is_some()),
                    ("symbols", self.symbols[r][c].is_some()),
                    ("hands", self.hands[r][c].is_some()),
                    ("finger_matrix", self.finger_matrix[r][c].is_some()),
                    ("key_category_matrix", self.key_category_matrix[r][c].is_some()),
                    ("color_matrix", self.color_matrix[r][c].is_some()),
                    ("matrix_positions", self.matrix_positions[r][c].is_some()),
                ];

                if present.iter().all(|(_, p)| !p) {
                    continue;
                }
                if let Some((name, _)) = present.iter().find(|(_, p)| !p) {
                    return Err(KeyRankError::Config(format!(
                        "Row {}, cell {}: '{}' has a placeholder where other matrices define a key",
                        r, c, name
                    )));
                }

                keys.push(self.key_at(r, c)?);
            }
        }
        Ok(keys)
    }

    fn key_at(&self, r: usize, c: usize) -> KrResult<KeySpec> {
        let cell_err = |what: String| {
            KeyRankError::Config(format!("Row {}, cell {}: {}", r, c, what))
        };

        // Presence was checked by the caller.
        let (
            Some(index),
            Some(symbol),
            Some(hand),
            Some(finger),
            Some(category),
            Some(color),
            Some((col, row)),
        ) = (
            self.key_indices[r][c],
            &self.symbols[r][c],
            &self.hands[r][c],
            &self.finger_matrix[r][c],
            &self.key_category_matrix[r][c],
            &self.color_matrix[r][c],
            self.matrix_positions[r][c],
        )
        else {
            return Err(cell_err("incomplete key definition".into()));
        };

        let hand: Hand = hand
            .trim()
            .parse()
            .map_err(|_| cell_err(format!("invalid hand '{}'", hand)))?;
        let finger: Finger = finger
            .trim()
            .parse()
            .map_err(|_| cell_err(format!("invalid finger '{}'", finger)))?;

        let symbol = symbol.to_string();
        if symbol.is_empty() {
            return Err(cell_err("empty symbol".into()));
        }
        let category = category.to_string();
        if category.chars().count() != 1 {
            return Err(cell_err(format!(
                "key category '{}' must be a single glyph",
                category
            )));
        }

        Ok(KeySpec {
            index,
            symbol,
            hand,
            finger,
            col,
            row,
            category,
            color_key: color.to_string(),
        })
    }
}

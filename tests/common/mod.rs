#![allow(dead_code)]

use keyrank::geometry::{Finger, GeometryModel, Hand, KeySpec};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

/// Builder for KeySpec to keep tests short
pub struct KeyBuilder {
    key: KeySpec,
}

impl KeyBuilder {
    pub fn new(index: u32, col: i32, row: i32) -> Self {
        Self {
            key: KeySpec {
                index,
                symbol: format!("k{}", index),
                hand: if col < 5 { Hand::Left } else { Hand::Right },
                finger: Finger::Index,
                col,
                row,
                category: "x".to_string(),
                color_key: "g".to_string(),
            },
        }
    }

    pub fn symbol(mut self, symbol: &str) -> Self {
        self.key.symbol = symbol.to_string();
        self
    }

    pub fn hand(mut self, hand: Hand) -> Self {
        self.key.hand = hand;
        self
    }

    pub fn finger(mut self, finger: Finger) -> Self {
        self.key.finger = finger;
        self
    }

    pub fn category(mut self, glyph: &str) -> Self {
        self.key.category = glyph.to_string();
        self
    }

    pub fn color(mut self, color_key: &str) -> Self {
        self.key.color_key = color_key.to_string();
        self
    }

    pub fn build(self) -> KeySpec {
        self.key
    }
}

pub fn colors() -> HashMap<String, String> {
    HashMap::from([
        ("g".to_string(), "chartreuse3".to_string()),
        ("o".to_string(), "orange3".to_string()),
    ])
}

// --- Standard split 3x10 grid, same as data/keyseq_effort.yml ---
// Row 0: q w e r t | y u i o p   (indices 0..9)
// Row 1: a s d f g | h j k l ;   (indices 10..19)
// Row 2: z x c v b | n m , . /   (indices 20..29)
pub const SYMBOLS: [&str; 30] = [
    "q", "w", "e", "r", "t", "y", "u", "i", "o", "p", "a", "s", "d", "f", "g", "h", "j", "k",
    "l", ";", "z", "x", "c", "v", "b", "n", "m", ",", ".", "/",
];

const FINGERS: [Finger; 10] = [
    Finger::Pinky,
    Finger::Ring,
    Finger::Middle,
    Finger::Index,
    Finger::Index,
    Finger::Index,
    Finger::Index,
    Finger::Middle,
    Finger::Ring,
    Finger::Pinky,
];

pub fn standard_keys() -> Vec<KeySpec> {
    (0..30u32)
        .map(|i| {
            let row = (i / 10) as i32;
            let c = (i % 10) as i32;
            // Gap between the halves
            let col = if c < 5 { c } else { c + 1 };
            KeyBuilder::new(i, col, row)
                .symbol(SYMBOLS[i as usize])
                .hand(if c < 5 { Hand::Left } else { Hand::Right })
                .finger(FINGERS[c as usize])
                .color(if row == 1 { "g" } else { "o" })
                .build()
        })
        .collect()
}

pub fn standard_geometry() -> Arc<GeometryModel> {
    Arc::new(GeometryModel::from_keys(standard_keys(), colors()).unwrap())
}

/// A geometry with `n` left-hand index keys in one row.
pub fn row_geometry(n: u32) -> Arc<GeometryModel> {
    let keys = (0..n)
        .map(|i| KeyBuilder::new(i, i as i32, 0).hand(Hand::Left).build())
        .collect();
    Arc::new(GeometryModel::from_keys(keys, colors()).unwrap())
}

pub fn sample_geometry_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/keyseq_effort.yml")
}

pub struct TempRanking {
    pub dir: TempDir,
    pub path: PathBuf,
}

pub fn temp_ranking() -> TempRanking {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("ranking.txt");
    TempRanking { dir, path }
}

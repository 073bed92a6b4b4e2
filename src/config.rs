use crate::ngram::MAX_NGRAM_LEN;
use crate::{KeyRankError, KrResult};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub ngrams: NgramParams,
    #[command(flatten)]
    pub rules: RuleWeights,
}

/// Which ngrams are queued for ranking and in what order.
#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NgramParams {
    /// Comma separated ngram lengths to enumerate
    #[arg(long, default_value = "1,2,3")]
    pub lengths: String,

    /// Also enumerate ngrams that alternate hands
    #[arg(long, default_value_t = false)]
    pub cross_hand: bool,

    /// Present pending ngrams in random order
    #[arg(long, default_value_t = false)]
    pub shuffle: bool,

    #[arg(long)]
    pub seed: Option<u64>,
}

impl Default for NgramParams {
    fn default() -> Self {
        Self {
            lengths: "1,2,3".to_string(),
            cross_hand: false,
            shuffle: false,
            seed: None,
        }
    }
}

/// Weights of the automated comparison rule (`sort --auto`).
#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleWeights {
    // Thumb, index, middle, ring, pinky
    #[arg(long, default_value = "0.5,1.0,1.1,1.3,1.6")]
    pub finger_effort_scale: String,

    // REP, SFS, SFB, RSFT, SFT
    #[arg(long, default_value = "0.2,1.0,2.5,3.0,4.0")]
    pub repeat_penalties: String,

    #[arg(long, default_value_t = 0.4)]
    pub penalty_row_delta: f32,

    // Scaled by how awkward the row difference class is
    #[arg(long, default_value_t = 0.3)]
    pub penalty_row_diff: f32,

    #[arg(long, default_value_t = 0.25)]
    pub weight_direction: f32,

    #[arg(long, default_value_t = 1.5)]
    pub penalty_redirect: f32,

    #[arg(long, default_value_t = 0.3)]
    pub bonus_alternation: f32,

    // Hints closer than this count as equal effort
    #[arg(long, default_value_t = 0.05)]
    pub tie_tolerance: f32,
}

impl Default for RuleWeights {
    fn default() -> Self {
        Self {
            finger_effort_scale: "0.5,1.0,1.1,1.3,1.6".to_string(),
            repeat_penalties: "0.2,1.0,2.5,3.0,4.0".to_string(),
            penalty_row_delta: 0.4,
            penalty_row_diff: 0.3,
            weight_direction: 0.25,
            penalty_redirect: 1.5,
            bonus_alternation: 0.3,
            tie_tolerance: 0.05,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> KrResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            KeyRankError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            KeyRankError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })
    }

    /// Overrides file values with every flag that was given explicitly on the command line.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($group:ident . $field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$group.$field = cli.$group.$field.clone();
                }
            };
        }

        update_if_present!(ngrams.lengths);
        update_if_present!(ngrams.cross_hand);
        update_if_present!(ngrams.shuffle);
        update_if_present!(ngrams.seed);

        update_if_present!(rules.finger_effort_scale);
        update_if_present!(rules.repeat_penalties);
        update_if_present!(rules.penalty_row_delta);
        update_if_present!(rules.penalty_row_diff);
        update_if_present!(rules.weight_direction);
        update_if_present!(rules.penalty_redirect);
        update_if_present!(rules.bonus_alternation);
        update_if_present!(rules.tie_tolerance);
    }
}

impl NgramParams {
    pub fn get_lengths(&self) -> KrResult<Vec<usize>> {
        let mut lengths = Vec::new();
        for part in self.lengths.split(',') {
            let len: usize = part.trim().parse().map_err(|_| {
                KeyRankError::Config(format!("Invalid ngram length '{}'", part.trim()))
            })?;
            if len == 0 || len > MAX_NGRAM_LEN {
                return Err(KeyRankError::Config(format!(
                    "Ngram length {} is outside 1..={}",
                    len, MAX_NGRAM_LEN
                )));
            }
            if !lengths.contains(&len) {
                lengths.push(len);
            }
        }
        Ok(lengths)
    }
}

impl RuleWeights {
    pub fn get_finger_effort_scale(&self) -> KrResult<[f32; 5]> {
        parse_f32_array::<5>(&self.finger_effort_scale, "finger_effort_scale")
    }

    pub fn get_repeat_penalties(&self) -> KrResult<[f32; 5]> {
        parse_f32_array::<5>(&self.repeat_penalties, "repeat_penalties")
    }
}

pub fn parse_f32_array<const N: usize>(s: &str, name: &str) -> KrResult<[f32; N]> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != N {
        return Err(KeyRankError::Config(format!(
            "--{} requires {} values, got {}",
            name,
            N,
            parts.len()
        )));
    }
    let mut arr = [0.0; N];
    for (i, p) in parts.iter().enumerate() {
        arr[i] = p.trim().parse().map_err(|_| {
            KeyRankError::Config(format!("Invalid number '{}' in {}", p.trim(), name))
        })?;
    }
    Ok(arr)
}

use crate::ngram::Ngram;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KeyRankError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML Parsing Error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Unknown key index {index} in ngram {ngram}")]
    UnknownKey { index: u32, ngram: String },

    #[error(
        "Corrupt ranking file {path:?} (line {line}): {reason}. \
         Restore it from a backup; it will not be repaired automatically."
    )]
    CorruptStore {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("Ngram {0} is already ranked")]
    DuplicateNgram(Ngram),

    #[error("Ranking file {0:?} was modified by another process since it was opened")]
    StoreModified(PathBuf),

    #[error("Data Validation Error: {0}")]
    Validation(String),
}

pub type KrResult<T> = Result<T, KeyRankError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corrupt_store_message_points_to_backup() {
        let err = KeyRankError::CorruptStore {
            path: PathBuf::from("ranking.txt"),
            line: 3,
            reason: "'x' is not a key index".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("line 3"), "{}", msg);
        assert!(msg.contains("backup"), "{}", msg);
    }

    #[test]
    fn test_io_errors_convert() {
        fn open_missing() -> KrResult<Vec<u8>> {
            Ok(std::fs::read("/definitely/not/here/ranking.txt")?)
        }
        assert!(matches!(open_missing(), Err(KeyRankError::Io(_))));
    }
}

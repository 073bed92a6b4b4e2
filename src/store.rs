use crate::ngram::{KeyIndex, Ngram};
use crate::util::{atomic_write, calculate_file_hash, hash_bytes};
use crate::{KeyRankError, KrResult};
use csv::{ReaderBuilder, Terminator, Trim, WriterBuilder};
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// The persisted ranking: ngrams from lowest to highest effort.
///
/// One ngram per line, key indices separated by commas (`0,2,1`). Every successful
/// insertion rewrites the whole file atomically, so the file on disk always matches
/// the last committed state.
#[derive(Debug)]
pub struct OrderedList {
    path: PathBuf,
    items: Vec<Ngram>,
    index: HashSet<Ngram>,
    // SHA-256 of the file content last read or written; None while the file does not exist.
    fingerprint: Option<String>,
}

impl OrderedList {
    /// Opens the ranking at `path`. A missing file is an empty ranking.
    pub fn open<P: AsRef<Path>>(path: P) -> KrResult<Self> {
        let path = path.as_ref().to_path_buf();

        let (items, fingerprint) = match fs::read(&path) {
            Ok(bytes) => (parse_records(&path, &bytes)?, Some(hash_bytes(&bytes))),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No ranking at {:?}, starting empty", path);
                (Vec::new(), None)
            }
            Err(e) => return Err(e.into()),
        };

        let index = items.iter().copied().collect();
        info!("Opened ranking {:?}: {} ngrams", path, items.len());

        Ok(Self {
            path,
            items,
            index,
            fingerprint,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, rank: usize) -> Option<&Ngram> {
        self.items.get(rank)
    }

    pub fn contains(&self, ngram: &Ngram) -> bool {
        self.index.contains(ngram)
    }

    pub fn rank_of(&self, ngram: &Ngram) -> Option<usize> {
        if !self.contains(ngram) {
            return None;
        }
        self.items.iter().position(|n| n == ngram)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Ngram> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Ngram] {
        &self.items
    }

    /// Key index sequences in rank order.
    pub fn to_records(&self) -> Vec<Vec<KeyIndex>> {
        self.items.iter().map(|n| n.keys().to_vec()).collect()
    }

    /// Inserts `ngram` at `position` (0 = lowest effort) and persists before returning.
    ///
    /// On failure neither the in-memory list nor the file changes.
    pub fn append_at(&mut self, position: usize, ngram: Ngram) -> KrResult<()> {
        if self.contains(&ngram) {
            return Err(KeyRankError::DuplicateNgram(ngram));
        }
        if position > self.items.len() {
            return Err(KeyRankError::Validation(format!(
                "Insert position {} is past the end of a ranking with {} ngrams",
                position,
                self.items.len()
            )));
        }
        self.check_unmodified()?;

        self.items.insert(position, ngram);
        let persisted = encode_records(&self.items).and_then(|bytes| {
            atomic_write(&self.path, &bytes)?;
            Ok(bytes)
        });

        match persisted {
            Ok(bytes) => {
                self.index.insert(ngram);
                self.fingerprint = Some(hash_bytes(&bytes));
                debug!(
                    "Persisted {} at rank {} ({} total)",
                    ngram,
                    position,
                    self.items.len()
                );
                Ok(())
            }
            Err(e) => {
                self.items.remove(position);
                warn!("Failed to persist ranking {:?}: {}", self.path, e);
                Err(e)
            }
        }
    }

    /// Writes a copy of the ranking to another file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> KrResult<()> {
        let bytes = encode_records(&self.items)?;
        atomic_write(path, bytes)?;
        Ok(())
    }

    /// Fails with `StoreModified` if the file changed since it was last read or written here.
    fn check_unmodified(&self) -> KrResult<()> {
        let current = match calculate_file_hash(&self.path) {
            Ok(hash) => Some(hash),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };
        if current != self.fingerprint {
            return Err(KeyRankError::StoreModified(self.path.clone()));
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a OrderedList {
    type Item = &'a Ngram;
    type IntoIter = std::slice::Iter<'a, Ngram>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

fn parse_records(path: &Path, bytes: &[u8]) -> KrResult<Vec<Ngram>> {
    let corrupt = |line: u64, reason: String| KeyRankError::CorruptStore {
        path: path.to_path_buf(),
        line: line as usize,
        reason,
    };

    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(bytes);

    let mut items = Vec::new();
    let mut seen = HashSet::new();

    for result in rdr.records() {
        let record = result.map_err(|e| {
            let line = e.position().map(|p| p.line()).unwrap_or(0);
            corrupt(line, e.to_string())
        })?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        let mut keys = Vec::with_capacity(record.len());
        for field in record.iter() {
            if field.is_empty() {
                return Err(corrupt(line, "empty field".into()));
            }
            let key = field
                .parse::<KeyIndex>()
                .map_err(|_| corrupt(line, format!("'{}' is not a key index", field)))?;
            keys.push(key);
        }

        let ngram = Ngram::new(&keys).map_err(|e| corrupt(line, e.to_string()))?;
        if !seen.insert(ngram) {
            return Err(corrupt(line, format!("ngram {} appears twice", ngram)));
        }
        items.push(ngram);
    }

    Ok(items)
}

fn encode_records(items: &[Ngram]) -> KrResult<Vec<u8>> {
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    for ngram in items {
        wtr.write_record(ngram.keys().iter().map(|k| k.to_string()))?;
    }

    wtr.into_inner().map_err(|e| e.into_error().into())
}

use sha2::{Digest, Sha256};
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

pub fn calculate_file_hash<P: AsRef<Path>>(path: P) -> Result<String, std::io::Error> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = [0; 4096];

    loop {
        let n = file.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// Same digest as `calculate_file_hash`, for content already in memory.
pub fn hash_bytes(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// `ranking.txt` -> `ranking.txt.tmp`, next to the target so the rename stays on one filesystem.
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("out"));
    name.push(".tmp");
    path.with_file_name(name)
}

/// Replaces `path` with `contents` so readers see either the old or the new file.
/// 1. Write to {filename}.tmp
/// 2. Sync to disk
/// 3. Rename over {filename}
pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> std::io::Result<()> {
    let path = path.as_ref();
    let temp_path = temp_path_for(path);

    let written = (|| {
        let mut file = File::create(&temp_path)?;
        file.write_all(contents.as_ref())?;
        file.sync_all()?;
        fs::rename(&temp_path, path)
    })();

    if written.is_err() {
        // The target is untouched; only the partial temp file needs to go.
        let _ = fs::remove_file(&temp_path);
    }
    written
}

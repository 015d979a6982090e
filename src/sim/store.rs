/// Durable high-score storage.
///
/// The game only ever needs one scalar, read at startup and on reset,
/// written when a game ends with a new best. It is kept as a tiny
/// key-value file:
///
///   highestScore=42
///
/// The file is owned by the game and rewritten whole from the in-memory
/// map; malformed lines are dropped.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub const HIGHEST_SCORE: &str = "highestScore";

const STORE_FILE: &str = "highscore.dat";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Get/set access to persisted integers.
pub trait ScoreStore {
    fn get(&self, key: &str) -> Option<i64>;
    fn set(&mut self, key: &str, value: i64) -> Result<(), StoreError>;
}

// ══════════════════════════════════════════════════════════════
// In-memory store
// ══════════════════════════════════════════════════════════════

#[cfg(test)]
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, i64>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(key: &str, value: i64) -> Self {
        let mut s = Self::default();
        s.values.insert(key.to_string(), value);
        s
    }
}

#[cfg(test)]
impl ScoreStore for MemoryStore {
    fn get(&self, key: &str) -> Option<i64> {
        self.values.get(key).copied()
    }

    fn set(&mut self, key: &str, value: i64) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

// ══════════════════════════════════════════════════════════════
// File store
// ══════════════════════════════════════════════════════════════

/// Key-value file store. The file is read once on open; every `set`
/// rewrites it.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, i64>,
}

impl FileStore {
    /// Open (or lazily create) the store file in the data directory.
    pub fn open_default() -> Self {
        Self::open(data_dir().join(STORE_FILE))
    }

    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(text) => parse(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                tracing::warn!("could not read {}: {e}", path.display());
                BTreeMap::new()
            }
        };
        FileStore { path, values }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for FileStore {
    fn get(&self, key: &str) -> Option<i64> {
        self.values.get(key).copied()
    }

    fn set(&mut self, key: &str, value: i64) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value);
        std::fs::write(&self.path, serialize(&self.values)).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

fn serialize(values: &BTreeMap<String, i64>) -> String {
    let mut out = String::new();
    for (k, v) in values {
        out.push_str(&format!("{}={}\n", k, v));
    }
    out
}

fn parse(content: &str) -> BTreeMap<String, i64> {
    let mut values = BTreeMap::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, val)) = line.split_once('=') else {
            tracing::debug!("ignoring store line {line:?}");
            continue;
        };
        match val.trim().parse::<i64>() {
            Ok(v) => {
                values.insert(key.trim().to_string(), v);
            }
            Err(_) => tracing::debug!("ignoring non-integer value for {key:?}"),
        }
    }
    values
}

// ══════════════════════════════════════════════════════════════
// Paths
// ══════════════════════════════════════════════════════════════

/// Where the store file and the log live.
pub fn data_dir() -> PathBuf {
    // 1. Exe directory, if writable (portable installs)
    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            let test_path = parent.join(".write_test_dotbounce");
            if std::fs::write(&test_path, "").is_ok() {
                let _ = std::fs::remove_file(&test_path);
                return parent.to_path_buf();
            }
        }
    }

    // 2. XDG data home (~/.local/share/dotbounce)
    if let Ok(home) = std::env::var("HOME") {
        let xdg = PathBuf::from(&home).join(".local/share/dotbounce");
        if std::fs::create_dir_all(&xdg).is_ok() {
            return xdg;
        }
    }

    // 3. Fallback to CWD
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_get_set() {
        let mut s = MemoryStore::new();
        assert_eq!(s.get(HIGHEST_SCORE), None);
        s.set(HIGHEST_SCORE, 7).unwrap();
        assert_eq!(s.get(HIGHEST_SCORE), Some(7));
    }

    #[test]
    fn file_store_absent_file_reads_none() {
        let dir = tempfile::tempdir().unwrap();
        let s = FileStore::open(dir.path().join("missing.dat"));
        assert_eq!(s.get(HIGHEST_SCORE), None);
    }

    #[test]
    fn file_store_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(STORE_FILE);
        {
            let mut s = FileStore::open(&path);
            s.set(HIGHEST_SCORE, 42).unwrap();
        }
        let s = FileStore::open(&path);
        assert_eq!(s.get(HIGHEST_SCORE), Some(42));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "highestScore=42\n");
    }

    #[test]
    fn parse_skips_junk() {
        let v = parse("# best\nhighestScore = 12\nbogus\nother=abc\n\n");
        assert_eq!(v.get(HIGHEST_SCORE), Some(&12));
        assert_eq!(v.len(), 1);
    }

    #[test]
    fn write_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be written as a file.
        let mut s = FileStore::open(dir.path());
        let err = s.set(HIGHEST_SCORE, 1).unwrap_err();
        assert!(matches!(err, StoreError::Write { .. }));
    }
}

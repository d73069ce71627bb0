//! Best-score storage
//!
//! The only persisted game state is one non-negative integer, stored as plain
//! decimal text. Writes go to a temp file first and are renamed into place.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::PersistenceError;

/// Where the best score lives
pub trait ScoreStore {
    /// Stored best, `Ok(0)` when nothing has been stored yet
    fn load(&self) -> Result<u64, PersistenceError>;
    /// Overwrite the stored best. Writing the same value twice is harmless.
    fn save(&mut self, best: u64) -> Result<(), PersistenceError>;
}

/// Plain-text file store (`highscore.txt`)
#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for FileScoreStore {
    fn load(&self) -> Result<u64, PersistenceError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(source) => {
                return Err(PersistenceError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        parse_score(&contents).ok_or_else(|| PersistenceError::Malformed {
            path: self.path.clone(),
            contents: contents.trim().to_string(),
        })
    }

    fn save(&mut self, best: u64) -> Result<(), PersistenceError> {
        let io_err = |source| PersistenceError::Io {
            path: self.path.clone(),
            source,
        };
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, best.to_string()).map_err(io_err)?;
        if let Err(source) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(io_err(source));
        }
        log::info!("Highscore {} saved to {}", best, self.path.display());
        Ok(())
    }
}

/// In-memory store; counts writes so callers can check write discipline
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    best: u64,
    writes: u32,
    fail_writes: bool,
}

impl MemoryScoreStore {
    pub fn with_best(best: u64) -> Self {
        Self {
            best,
            ..Default::default()
        }
    }

    /// Every save fails (simulates a read-only disk)
    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Default::default()
        }
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    pub fn writes(&self) -> u32 {
        self.writes
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> Result<u64, PersistenceError> {
        Ok(self.best)
    }

    fn save(&mut self, best: u64) -> Result<(), PersistenceError> {
        if self.fail_writes {
            return Err(PersistenceError::Io {
                path: PathBuf::from("<memory>"),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "store is read-only"),
            });
        }
        self.best = best;
        self.writes += 1;
        Ok(())
    }
}

impl<S: ScoreStore + ?Sized> ScoreStore for Box<S> {
    fn load(&self) -> Result<u64, PersistenceError> {
        (**self).load()
    }

    fn save(&mut self, best: u64) -> Result<(), PersistenceError> {
        (**self).save(best)
    }
}

/// Decimal text, surrounding whitespace allowed; empty means 0
pub fn parse_score(text: &str) -> Option<u64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(0);
    }
    trimmed.parse().ok()
}

/// Load the best score, treating any failure as 0
pub fn load_or_zero(store: &dyn ScoreStore) -> u64 {
    match store.load() {
        Ok(best) => best,
        Err(e) => {
            log::warn!("Could not read highscore, starting from 0: {}", e);
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("ong-jump-test-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir.join(name)
    }

    #[test]
    fn test_parse_score() {
        assert_eq!(parse_score("42"), Some(42));
        assert_eq!(parse_score("  17\n"), Some(17));
        assert_eq!(parse_score(""), Some(0));
        assert_eq!(parse_score("-3"), None);
        assert_eq!(parse_score("lots"), None);
    }

    #[test]
    fn test_file_store_round_trip() {
        let path = temp_path("round_trip.txt");
        let _ = fs::remove_file(&path);
        let mut store = FileScoreStore::new(&path);
        assert_eq!(store.load().unwrap(), 0);

        store.save(61).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "61");
        assert_eq!(store.load().unwrap(), 61);

        // Idempotent
        store.save(61).unwrap();
        assert_eq!(store.load().unwrap(), 61);
    }

    #[test]
    fn test_malformed_file_reads_as_zero() {
        let path = temp_path("malformed.txt");
        fs::write(&path, "not a number").unwrap();
        let store = FileScoreStore::new(&path);
        assert!(matches!(
            store.load(),
            Err(PersistenceError::Malformed { .. })
        ));
        assert_eq!(load_or_zero(&store), 0);
    }

    #[test]
    fn test_unwritable_location_errors() {
        let mut store = FileScoreStore::new("/nonexistent-dir/ong-jump/highscore.txt");
        assert!(matches!(store.save(5), Err(PersistenceError::Io { .. })));
    }

    #[test]
    fn test_failed_rename_leaves_no_temp_file() {
        // A directory where the file should be makes the rename fail
        let path = temp_path("blocked.txt");
        fs::create_dir_all(path.join("inner")).unwrap();
        let mut store = FileScoreStore::new(&path);

        assert!(matches!(store.save(5), Err(PersistenceError::Io { .. })));
        assert!(!path.with_extension("tmp").exists());
        assert!(path.is_dir());
    }

    #[test]
    fn test_memory_store_counts_writes() {
        let mut store = MemoryScoreStore::with_best(50);
        assert_eq!(store.load().unwrap(), 50);
        store.save(61).unwrap();
        assert_eq!((store.best(), store.writes()), (61, 1));

        let mut failing = MemoryScoreStore::failing();
        assert!(failing.save(1).is_err());
        assert_eq!(failing.writes(), 0);
    }
}

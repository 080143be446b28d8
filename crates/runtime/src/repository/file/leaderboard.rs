//! File-based LeaderboardRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{read_json, write_json};
use crate::repository::{LeaderboardEntry, LeaderboardRepository, RepositoryError, Result};

/// Keeps every entry in one `leaderboard.json` array.
///
/// Appends are read-modify-write under a mutex, so concurrent sessions in the
/// same process never drop each other's entries.
pub struct FileLeaderboardRepository {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileLeaderboardRepository {
    pub const FILE: &'static str = "leaderboard.json";

    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        fs::create_dir_all(base_dir)?;
        Ok(Self {
            path: base_dir.join(Self::FILE),
            write_lock: Mutex::new(()),
        })
    }
}

impl LeaderboardRepository for FileLeaderboardRepository {
    fn record(&self, entry: &LeaderboardEntry) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        let mut entries: Vec<LeaderboardEntry> = read_json(&self.path)?.unwrap_or_default();
        entries.push(entry.clone());
        write_json(&self.path, &entries)
    }

    fn entries(&self) -> Result<Vec<LeaderboardEntry>> {
        Ok(read_json(&self.path)?.unwrap_or_default())
    }
}

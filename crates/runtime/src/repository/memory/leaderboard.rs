//! In-memory LeaderboardRepository implementation.

use std::sync::RwLock;

use crate::repository::{LeaderboardEntry, LeaderboardRepository, RepositoryError, Result};

#[derive(Debug, Default)]
pub struct InMemoryLeaderboard {
    entries: RwLock<Vec<LeaderboardEntry>>,
}

impl InMemoryLeaderboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LeaderboardRepository for InMemoryLeaderboard {
    fn record(&self, entry: &LeaderboardEntry) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        entries.push(entry.clone());
        Ok(())
    }

    fn entries(&self) -> Result<Vec<LeaderboardEntry>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(entries.clone())
    }
}

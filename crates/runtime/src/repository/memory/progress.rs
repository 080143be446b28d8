//! In-memory ProgressRepository implementation for tests and local runs.

use std::sync::RwLock;

use quiz_core::LifelineInventory;

use crate::repository::{ProgressRepository, RepositoryError, Result};

#[derive(Debug, Default)]
struct Stored {
    coins: Option<u64>,
    lifelines: Option<LifelineInventory>,
    unlocks: Option<Vec<String>>,
}

/// In-memory implementation of ProgressRepository.
///
/// Starts empty, so the runtime treats it as a new player.
#[derive(Debug, Default)]
pub struct InMemoryProgressRepository {
    stored: RwLock<Stored>,
}

impl InMemoryProgressRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with existing progress, as if loaded from a previous run.
    pub fn with_progress(coins: u64, lifelines: LifelineInventory, unlocks: Vec<String>) -> Self {
        Self {
            stored: RwLock::new(Stored {
                coins: Some(coins),
                lifelines: Some(lifelines),
                unlocks: Some(unlocks),
            }),
        }
    }

    fn read<T>(&self, f: impl FnOnce(&Stored) -> T) -> Result<T> {
        let stored = self
            .stored
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(f(&stored))
    }

    fn write(&self, f: impl FnOnce(&mut Stored)) -> Result<()> {
        let mut stored = self
            .stored
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        f(&mut stored);
        Ok(())
    }
}

impl ProgressRepository for InMemoryProgressRepository {
    fn load_coins(&self) -> Result<Option<u64>> {
        self.read(|stored| stored.coins)
    }

    fn save_coins(&self, balance: u64) -> Result<()> {
        self.write(|stored| stored.coins = Some(balance))
    }

    fn load_lifelines(&self) -> Result<Option<LifelineInventory>> {
        self.read(|stored| stored.lifelines.clone())
    }

    fn save_lifelines(&self, inventory: &LifelineInventory) -> Result<()> {
        self.write(|stored| stored.lifelines = Some(inventory.clone()))
    }

    fn load_unlocks(&self) -> Result<Option<Vec<String>>> {
        self.read(|stored| stored.unlocks.clone())
    }

    fn save_unlocks(&self, flags: &[String]) -> Result<()> {
        self.write(|stored| stored.unlocks = Some(flags.to_vec()))
    }
}

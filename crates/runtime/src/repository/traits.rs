//! Repository contracts for player progress that outlives a session.
//!
//! Each value is loaded once when the runtime starts and written back after
//! every change. `None` from a `load_*` call means nothing has been stored yet
//! (a new player).

use quiz_core::LifelineInventory;

use super::Result;
use super::types::LeaderboardEntry;

/// Repository for the player's coins, lifelines, and unlocked tiers.
pub trait ProgressRepository: Send + Sync {
    fn load_coins(&self) -> Result<Option<u64>>;

    fn save_coins(&self, balance: u64) -> Result<()>;

    /// Lifeline counts keyed by kind.
    fn load_lifelines(&self) -> Result<Option<LifelineInventory>>;

    fn save_lifelines(&self, inventory: &LifelineInventory) -> Result<()>;

    /// Unlocked tiers as `"category/difficulty"` flags.
    fn load_unlocks(&self) -> Result<Option<Vec<String>>>;

    fn save_unlocks(&self, flags: &[String]) -> Result<()>;
}

/// Append-only store of finished sessions for ranking.
pub trait LeaderboardRepository: Send + Sync {
    fn record(&self, entry: &LeaderboardEntry) -> Result<()>;

    /// Every recorded entry in insertion order.
    fn entries(&self) -> Result<Vec<LeaderboardEntry>>;

    fn len(&self) -> Result<usize> {
        Ok(self.entries()?.len())
    }
}

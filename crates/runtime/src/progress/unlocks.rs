//! Persistent difficulty unlocks.

use std::sync::{Arc, RwLock};

use quiz_core::{Category, Difficulty, DifficultyUnlockTracker, SessionResult, UnlockPolicy};
use tracing::{info, warn};

use crate::events::{EventBus, ProgressEvent};
use crate::repository::{ProgressRepository, RepositoryError, Result};

/// Unlocked tiers per category, plus the rule that grows them.
///
/// The set only grows; nothing here removes an unlock.
pub struct UnlockStore {
    tracker: RwLock<DifficultyUnlockTracker>,
    policy: UnlockPolicy,
    repository: Arc<dyn ProgressRepository>,
    events: EventBus,
}

impl UnlockStore {
    pub fn load(
        repository: Arc<dyn ProgressRepository>,
        events: EventBus,
        policy: UnlockPolicy,
    ) -> Result<Self> {
        let flags = repository.load_unlocks()?.unwrap_or_default();
        let tracker = DifficultyUnlockTracker::from_flags(&flags)
            .map_err(|e| RepositoryError::CorruptedData(e.to_string()))?;

        Ok(Self {
            tracker: RwLock::new(tracker),
            policy,
            repository,
            events,
        })
    }

    pub fn policy(&self) -> UnlockPolicy {
        self.policy
    }

    /// Copy of the current tracker.
    pub fn tracker(&self) -> Result<DifficultyUnlockTracker> {
        self.tracker
            .read()
            .map(|tracker| tracker.clone())
            .map_err(|_| RepositoryError::LockPoisoned)
    }

    pub fn is_playable(&self, category: Category, difficulty: Difficulty) -> Result<bool> {
        Ok(self.tracker()?.is_playable(category, difficulty))
    }

    /// Applies the unlock policy to a finished session and persists any new
    /// tier. Returns the tier that was unlocked, if any.
    pub fn apply_result(&self, result: &SessionResult) -> Result<Option<Difficulty>> {
        let unlocked = {
            let mut tracker = self
                .tracker
                .write()
                .map_err(|_| RepositoryError::LockPoisoned)?;
            let Some(difficulty) = self.policy.apply(&mut tracker, result) else {
                return Ok(None);
            };
            // Saved under the guard so a later unlock never lands first.
            if let Err(err) = self.repository.save_unlocks(&tracker.to_flags()) {
                warn!(%err, "failed to persist unlocks");
            }
            difficulty
        };

        info!(category = %result.category, difficulty = %unlocked, "difficulty unlocked");
        self.events.publish(ProgressEvent::DifficultyUnlocked {
            category: result.category,
            difficulty: unlocked,
        });

        Ok(Some(unlocked))
    }
}

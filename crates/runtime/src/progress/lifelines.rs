//! Persistent lifeline inventory.

use std::sync::{Arc, PoisonError, RwLock, RwLockWriteGuard};

use quiz_core::{LifelineError, LifelineInventory, LifelineKind, LifelineLedger};
use tracing::warn;

use crate::events::{EventBus, ProgressEvent};
use crate::repository::{ProgressRepository, Result};

/// Process-wide lifeline counters, shared by sessions, the shop, and ad
/// rewards.
///
/// A change is saved before the write guard is released, so stored copies
/// land in the same order as the changes themselves.
pub struct LifelineStore {
    inventory: RwLock<LifelineInventory>,
    repository: Arc<dyn ProgressRepository>,
    events: EventBus,
}

impl LifelineStore {
    /// Loads the stored inventory, or grants `starter` to a new player.
    pub fn load(
        repository: Arc<dyn ProgressRepository>,
        events: EventBus,
        starter: LifelineInventory,
    ) -> Result<Self> {
        let inventory = match repository.load_lifelines()? {
            Some(inventory) => inventory,
            None => {
                repository.save_lifelines(&starter)?;
                starter
            }
        };

        Ok(Self {
            inventory: RwLock::new(inventory),
            repository,
            events,
        })
    }

    /// Copy of every counter.
    pub fn snapshot(&self) -> LifelineInventory {
        self.inventory
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn write(&self) -> RwLockWriteGuard<'_, LifelineInventory> {
        self.inventory.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Saves `inventory` while the caller still holds its write guard.
    fn persist(&self, inventory: &LifelineInventory, kind: LifelineKind) {
        if let Err(err) = self.repository.save_lifelines(inventory) {
            warn!(%err, %kind, "failed to persist lifeline inventory");
        }
    }
}

impl LifelineLedger for LifelineStore {
    fn quantity(&self, kind: LifelineKind) -> u32 {
        self.inventory
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .quantity(kind)
    }

    fn try_consume(&self, kind: LifelineKind) -> bool {
        let quantity = {
            let mut inventory = self.write();
            if !inventory.try_consume(kind) {
                return false;
            }
            self.persist(&inventory, kind);
            inventory.quantity(kind)
        };

        self.events
            .publish(ProgressEvent::LifelinesChanged { kind, quantity });
        true
    }

    fn credit(&self, kind: LifelineKind, amount: u32) -> std::result::Result<u32, LifelineError> {
        let quantity = {
            let mut inventory = self.write();
            let quantity = inventory.credit(kind, amount)?;
            self.persist(&inventory, kind);
            quantity
        };

        self.events
            .publish(ProgressEvent::LifelinesChanged { kind, quantity });
        Ok(quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryProgressRepository;

    #[test]
    fn new_player_receives_starter_kit() {
        let repo = Arc::new(InMemoryProgressRepository::new());
        let store = LifelineStore::load(repo.clone(), EventBus::new(), LifelineInventory::uniform(1))
            .expect("load");

        assert_eq!(store.quantity(LifelineKind::Skip), 1);
        assert_eq!(
            repo.load_lifelines().expect("stored"),
            Some(LifelineInventory::uniform(1))
        );
    }

    #[test]
    fn returning_player_keeps_inventory() {
        let repo = Arc::new(InMemoryProgressRepository::with_progress(
            0,
            LifelineInventory::new(),
            Vec::new(),
        ));
        let store = LifelineStore::load(repo, EventBus::new(), LifelineInventory::uniform(5))
            .expect("load");
        assert_eq!(store.quantity(LifelineKind::FiftyFifty), 0);
        assert!(!store.try_consume(LifelineKind::FiftyFifty));
    }

    #[test]
    fn consumption_is_written_through() {
        let repo = Arc::new(InMemoryProgressRepository::new());
        let store = LifelineStore::load(repo.clone(), EventBus::new(), LifelineInventory::uniform(1))
            .expect("load");

        assert!(store.try_consume(LifelineKind::ExtraTime));
        let stored = repo.load_lifelines().expect("load").expect("stored");
        assert_eq!(stored.quantity(LifelineKind::ExtraTime), 0);
        assert_eq!(store.credit(LifelineKind::ExtraTime, 0), Err(LifelineError::ZeroAmount(LifelineKind::ExtraTime)));
    }
}

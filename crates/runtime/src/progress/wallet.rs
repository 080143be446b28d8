//! Persistent coin balance.

use std::sync::{Arc, PoisonError, RwLock, RwLockWriteGuard};

use quiz_core::CoinLedger;
use tracing::warn;

use crate::events::{EventBus, ProgressEvent};
use crate::repository::{ProgressRepository, Result};

/// The player's coin balance, shared by sessions and the shop.
///
/// Every change is written through to the repository before the balance
/// lock is released. A failed write is logged and play continues; the
/// in-memory balance stays authoritative.
pub struct Wallet {
    balance: RwLock<u64>,
    repository: Arc<dyn ProgressRepository>,
    events: EventBus,
}

impl Wallet {
    /// Loads the stored balance. New players start with zero coins.
    pub fn load(repository: Arc<dyn ProgressRepository>, events: EventBus) -> Result<Self> {
        let balance = repository.load_coins()?.unwrap_or(0);
        Ok(Self {
            balance: RwLock::new(balance),
            repository,
            events,
        })
    }

    fn write(&self) -> RwLockWriteGuard<'_, u64> {
        self.balance.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, balance: u64) {
        if let Err(err) = self.repository.save_coins(balance) {
            warn!(%err, balance, "failed to persist coin balance");
        }
    }
}

impl CoinLedger for Wallet {
    fn balance(&self) -> u64 {
        *self.balance.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn credit(&self, amount: u64) -> u64 {
        let mut balance = self.write();
        if amount == 0 {
            return *balance;
        }
        *balance = balance.saturating_add(amount);
        let updated = *balance;
        self.persist(updated);
        drop(balance);

        self.events
            .publish(ProgressEvent::CoinsChanged { balance: updated });
        updated
    }

    fn try_spend(&self, amount: u64) -> bool {
        let mut balance = self.write();
        if *balance < amount {
            return false;
        }
        if amount == 0 {
            return true;
        }
        *balance -= amount;
        let updated = *balance;
        self.persist(updated);
        drop(balance);

        self.events
            .publish(ProgressEvent::CoinsChanged { balance: updated });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryProgressRepository;

    #[test]
    fn new_player_starts_empty_and_persists_changes() {
        let repo = Arc::new(InMemoryProgressRepository::new());
        let wallet = Wallet::load(repo.clone(), EventBus::new()).expect("load");
        assert_eq!(wallet.balance(), 0);

        assert_eq!(wallet.credit(30), 30);
        assert!(wallet.try_spend(10));
        assert!(!wallet.try_spend(100));
        assert_eq!(repo.load_coins().expect("coins"), Some(20));
    }
}

//! Narrow views of the process-wide player stores.
//!
//! Sessions spend lifelines and settle coins through these traits only. The
//! stores outlive every session and may be shared with a shop or reward flow,
//! so every mutation is a single check-and-update under one lock.

use std::sync::RwLock;

use crate::state::{LifelineError, LifelineInventory, LifelineKind};

/// Shared lifeline counters.
pub trait LifelineLedger: Send + Sync {
    fn quantity(&self, kind: LifelineKind) -> u32;

    /// Spends one lifeline if available. Returns false without mutating
    /// otherwise.
    fn try_consume(&self, kind: LifelineKind) -> bool;

    /// Adds lifelines; returns the new quantity.
    fn credit(&self, kind: LifelineKind, amount: u32) -> Result<u32, LifelineError>;
}

/// Shared coin balance.
pub trait CoinLedger: Send + Sync {
    fn balance(&self) -> u64;

    /// Adds coins; returns the new balance.
    fn credit(&self, amount: u64) -> u64;

    /// Removes coins if the balance covers `amount`.
    fn try_spend(&self, amount: u64) -> bool;
}

/// Lifeline ledger without persistence.
#[derive(Debug, Default)]
pub struct InMemoryLifelines {
    inventory: RwLock<LifelineInventory>,
}

impl InMemoryLifelines {
    pub fn new(inventory: LifelineInventory) -> Self {
        Self {
            inventory: RwLock::new(inventory),
        }
    }

    /// Copy of the current counters.
    pub fn snapshot(&self) -> LifelineInventory {
        self.inventory
            .read()
            .map(|inventory| inventory.clone())
            .unwrap_or_default()
    }
}

impl LifelineLedger for InMemoryLifelines {
    fn quantity(&self, kind: LifelineKind) -> u32 {
        self.inventory
            .read()
            .map(|inventory| inventory.quantity(kind))
            .unwrap_or(0)
    }

    fn try_consume(&self, kind: LifelineKind) -> bool {
        self.inventory
            .write()
            .map(|mut inventory| inventory.try_consume(kind))
            .unwrap_or(false)
    }

    fn credit(&self, kind: LifelineKind, amount: u32) -> Result<u32, LifelineError> {
        match self.inventory.write() {
            Ok(mut inventory) => inventory.credit(kind, amount),
            Err(poisoned) => poisoned.into_inner().credit(kind, amount),
        }
    }
}

/// Coin ledger without persistence.
#[derive(Debug, Default)]
pub struct InMemoryCoins {
    balance: RwLock<u64>,
}

impl InMemoryCoins {
    pub fn new(balance: u64) -> Self {
        Self {
            balance: RwLock::new(balance),
        }
    }
}

impl CoinLedger for InMemoryCoins {
    fn balance(&self) -> u64 {
        self.balance.read().map(|balance| *balance).unwrap_or(0)
    }

    fn credit(&self, amount: u64) -> u64 {
        match self.balance.write() {
            Ok(mut balance) => {
                *balance = balance.saturating_add(amount);
                *balance
            }
            Err(poisoned) => {
                let mut balance = poisoned.into_inner();
                *balance = balance.saturating_add(amount);
                *balance
            }
        }
    }

    fn try_spend(&self, amount: u64) -> bool {
        match self.balance.write() {
            Ok(mut balance) if *balance >= amount => {
                *balance -= amount;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_lifelines_refuse_overspend() {
        let ledger = InMemoryLifelines::new(LifelineInventory::new().with(LifelineKind::Skip, 1));
        assert!(ledger.try_consume(LifelineKind::Skip));
        assert!(!ledger.try_consume(LifelineKind::Skip));
        assert_eq!(ledger.quantity(LifelineKind::Skip), 0);
        assert_eq!(ledger.credit(LifelineKind::Skip, 2), Ok(2));
    }

    #[test]
    fn coins_cannot_go_negative() {
        let coins = InMemoryCoins::new(10);
        assert!(!coins.try_spend(11));
        assert!(coins.try_spend(10));
        assert_eq!(coins.balance(), 0);
        assert_eq!(coins.credit(5), 5);
    }
}

//! Player progress shared across sessions: coins, lifelines, and unlocks.
//!
//! Each store guards its ledger with a lock, writes through to a
//! [`crate::repository::ProgressRepository`] on change, and announces the
//! change on the `Progress` topic.

mod lifelines;
mod summary;
mod unlocks;
mod wallet;

pub use lifelines::LifelineStore;
pub use summary::{CategoryProgress, ProgressSummary, TierProgress, TierStatus};
pub use unlocks::UnlockStore;
pub use wallet::Wallet;

use std::sync::Arc;

use quiz_core::{CoinLedger, LifelineInventory, QuestionOracle, SessionEnv, UnlockPolicy};

use crate::events::EventBus;
use crate::repository::{ProgressRepository, Result};

/// Handles to the three progress stores.
#[derive(Clone)]
pub struct PlayerProgress {
    pub wallet: Arc<Wallet>,
    pub lifelines: Arc<LifelineStore>,
    pub unlocks: Arc<UnlockStore>,
}

impl PlayerProgress {
    pub fn load(
        repository: Arc<dyn ProgressRepository>,
        events: &EventBus,
        starter: LifelineInventory,
        policy: UnlockPolicy,
    ) -> Result<Self> {
        Ok(Self {
            wallet: Arc::new(Wallet::load(repository.clone(), events.clone())?),
            lifelines: Arc::new(LifelineStore::load(
                repository.clone(),
                events.clone(),
                starter,
            )?),
            unlocks: Arc::new(UnlockStore::load(repository, events.clone(), policy)?),
        })
    }

    /// Ledgers for a new session. RNG and clock are left at their defaults.
    pub fn session_env(&self) -> SessionEnv {
        SessionEnv::new(self.lifelines.clone(), self.wallet.clone())
    }

    pub fn summary(&self, questions: &dyn QuestionOracle) -> Result<ProgressSummary> {
        Ok(ProgressSummary::build(
            self.wallet.balance(),
            self.lifelines.snapshot(),
            &self.unlocks.tracker()?,
            questions.questions(),
        ))
    }
}

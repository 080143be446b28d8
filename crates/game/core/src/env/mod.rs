//! Traits describing the collaborators a session talks to.
//!
//! Oracles expose the question bank, randomness, and wall-clock time; ledgers
//! expose the process-wide lifeline and coin stores. The [`SessionEnv`]
//! aggregate bundles them so the engine can reach everything it needs without
//! hard coupling to concrete implementations.
mod clock;
mod ledger;
mod questions;
mod rng;

use std::fmt;
use std::sync::Arc;

pub use clock::{ClockOracle, FixedClock, SystemClock};
pub use ledger::{CoinLedger, InMemoryCoins, InMemoryLifelines, LifelineLedger};
pub use questions::{QuestionOracle, StaticQuestionBank};
pub use rng::{PcgRng, RngOracle, compute_seed};

/// Collaborators injected into a [`crate::engine::QuizSession`].
///
/// Cloning is cheap; every field is a shared handle.
#[derive(Clone)]
pub struct SessionEnv {
    lifelines: Arc<dyn LifelineLedger>,
    coins: Arc<dyn CoinLedger>,
    rng: Arc<dyn RngOracle>,
    clock: Arc<dyn ClockOracle>,
}

impl SessionEnv {
    /// Uses [`PcgRng`] and the [`SystemClock`] by default.
    pub fn new(lifelines: Arc<dyn LifelineLedger>, coins: Arc<dyn CoinLedger>) -> Self {
        Self {
            lifelines,
            coins,
            rng: Arc::new(PcgRng),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_rng(mut self, rng: Arc<dyn RngOracle>) -> Self {
        self.rng = rng;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn ClockOracle>) -> Self {
        self.clock = clock;
        self
    }

    pub fn lifelines(&self) -> &dyn LifelineLedger {
        self.lifelines.as_ref()
    }

    pub fn coins(&self) -> &dyn CoinLedger {
        self.coins.as_ref()
    }

    pub fn rng(&self) -> &dyn RngOracle {
        self.rng.as_ref()
    }

    pub fn clock(&self) -> &dyn ClockOracle {
        self.clock.as_ref()
    }
}

impl fmt::Debug for SessionEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionEnv")
            .field("coins", &self.coins.balance())
            .finish_non_exhaustive()
    }
}

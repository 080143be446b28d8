//! Lifeline shop: coins in, lifelines out.
//!
//! Purchases and ad rewards both credit the shared [`LifelineStore`], so a
//! lifeline bought between sessions is immediately visible to the next one.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use quiz_core::{CoinLedger, LifelineKind, LifelineLedger};

use crate::api::Result;
use crate::events::{EventBus, ProgressEvent};
use crate::progress::{LifelineStore, Wallet};

/// Prices and ad rewards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopConfig {
    /// Coin price of one lifeline, per kind. Missing kinds are free.
    pub prices: BTreeMap<LifelineKind, u64>,
    /// Lifelines granted by one rewarded ad watched from the shop.
    pub ad_reward_amount: u32,
}

impl ShopConfig {
    pub const DEFAULT_AD_REWARD: u32 = 1;

    pub fn price(&self, kind: LifelineKind) -> u64 {
        self.prices.get(&kind).copied().unwrap_or(0)
    }

    pub fn with_price(mut self, kind: LifelineKind, price: u64) -> Self {
        self.prices.insert(kind, price);
        self
    }
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            prices: BTreeMap::from([
                (LifelineKind::FiftyFifty, 50),
                (LifelineKind::Skip, 75),
                (LifelineKind::ExtraTime, 30),
            ]),
            ad_reward_amount: Self::DEFAULT_AD_REWARD,
        }
    }
}

/// Result of a purchase attempt. Running short of coins is an ordinary
/// outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseOutcome {
    Purchased {
        kind: LifelineKind,
        quantity: u32,
        balance: u64,
    },
    InsufficientCoins {
        kind: LifelineKind,
        price: u64,
        balance: u64,
    },
}

impl PurchaseOutcome {
    pub fn is_purchased(&self) -> bool {
        matches!(self, PurchaseOutcome::Purchased { .. })
    }
}

pub struct LifelineShop {
    config: ShopConfig,
    wallet: Arc<Wallet>,
    lifelines: Arc<LifelineStore>,
    events: EventBus,
}

impl LifelineShop {
    pub fn new(
        config: ShopConfig,
        wallet: Arc<Wallet>,
        lifelines: Arc<LifelineStore>,
        events: EventBus,
    ) -> Self {
        Self {
            config,
            wallet,
            lifelines,
            events,
        }
    }

    pub fn config(&self) -> &ShopConfig {
        &self.config
    }

    /// Buys one lifeline of `kind` at the configured price.
    pub fn purchase(&self, kind: LifelineKind) -> Result<PurchaseOutcome> {
        let price = self.config.price(kind);
        if !self.wallet.try_spend(price) {
            return Ok(PurchaseOutcome::InsufficientCoins {
                kind,
                price,
                balance: self.wallet.balance(),
            });
        }

        let quantity = match self.lifelines.credit(kind, 1) {
            Ok(quantity) => quantity,
            Err(err) => {
                self.wallet.credit(price);
                return Err(err.into());
            }
        };

        let balance = self.wallet.balance();
        info!(%kind, price, quantity, balance, "lifeline purchased");
        self.events
            .publish(ProgressEvent::LifelinePurchased { kind, price });

        Ok(PurchaseOutcome::Purchased {
            kind,
            quantity,
            balance,
        })
    }

    /// Credits the ad reward for `kind`. Returns the new quantity.
    pub fn reward_lifeline(&self, kind: LifelineKind) -> Result<u32> {
        let amount = self.config.ad_reward_amount;
        let quantity = self.lifelines.credit(kind, amount)?;

        info!(%kind, amount, quantity, "lifeline rewarded for ad");
        self.events
            .publish(ProgressEvent::LifelineRewarded { kind, amount });

        Ok(quantity)
    }
}

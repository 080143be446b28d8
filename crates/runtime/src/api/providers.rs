//! Asynchronous abstraction over rewarded-video ads.
//!
//! The runtime only needs to know whether an ad can be shown and whether the
//! player earned the reward. Implementations wrap a real ad SDK, replay a
//! script for tests, or grant rewards instantly during development.
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

/// How a rewarded ad ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum AdOutcome {
    /// Watched to completion; the reward is granted.
    Rewarded,
    /// Closed early or failed; no reward.
    Dismissed,
}

impl AdOutcome {
    pub fn is_rewarded(&self) -> bool {
        matches!(self, AdOutcome::Rewarded)
    }
}

#[async_trait]
pub trait AdProvider: Send + Sync {
    /// Whether an ad is loaded and can be shown right now.
    fn is_ready(&self) -> bool;

    /// Shows one ad and resolves when the player closes it.
    async fn show(&self) -> AdOutcome;
}

/// Always ready; every ad is rewarded after an optional simulated duration.
#[derive(Clone, Copy, Debug, Default)]
pub struct InstantRewardAdProvider {
    duration: Duration,
}

impl InstantRewardAdProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates an ad of the given length.
    pub fn with_duration(duration: Duration) -> Self {
        Self { duration }
    }
}

#[async_trait]
impl AdProvider for InstantRewardAdProvider {
    fn is_ready(&self) -> bool {
        true
    }

    async fn show(&self) -> AdOutcome {
        if !self.duration.is_zero() {
            tokio::time::sleep(self.duration).await;
        }
        AdOutcome::Rewarded
    }
}

/// Replays queued outcomes in order. Once the script runs out every ad is
/// dismissed.
#[derive(Debug)]
pub struct ScriptedAdProvider {
    outcomes: Mutex<VecDeque<AdOutcome>>,
    ready: AtomicBool,
    shown: AtomicUsize,
}

impl ScriptedAdProvider {
    pub fn new(outcomes: impl IntoIterator<Item = AdOutcome>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into_iter().collect()),
            ready: AtomicBool::new(true),
            shown: AtomicUsize::new(0),
        }
    }

    /// A provider that never has an ad loaded.
    pub fn not_ready() -> Self {
        let provider = Self::new([]);
        provider.set_ready(false);
        provider
    }

    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::SeqCst);
    }

    pub fn push(&self, outcome: AdOutcome) {
        if let Ok(mut outcomes) = self.outcomes.lock() {
            outcomes.push_back(outcome);
        }
    }

    /// Number of ads shown so far.
    pub fn shown(&self) -> usize {
        self.shown.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AdProvider for ScriptedAdProvider {
    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    async fn show(&self) -> AdOutcome {
        self.shown.fetch_add(1, Ordering::SeqCst);
        self.outcomes
            .lock()
            .ok()
            .and_then(|mut outcomes| outcomes.pop_front())
            .unwrap_or(AdOutcome::Dismissed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn script_plays_in_order_then_dismisses() {
        let ads = ScriptedAdProvider::new([AdOutcome::Dismissed, AdOutcome::Rewarded]);
        assert_eq!(ads.show().await, AdOutcome::Dismissed);
        assert_eq!(ads.show().await, AdOutcome::Rewarded);
        assert_eq!(ads.show().await, AdOutcome::Dismissed);
        assert_eq!(ads.shown(), 3);
    }

    #[tokio::test]
    async fn instant_provider_always_rewards() {
        let ads = InstantRewardAdProvider::new();
        assert!(ads.is_ready());
        assert!(ads.show().await.is_rewarded());
    }
}

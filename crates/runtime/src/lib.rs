//! Runtime orchestration for quiz sessions.
//!
//! This crate wires the `quiz-core` engine to persistence, the player's
//! shared progress (coins, lifelines, unlocks), the lifeline shop, rewarded
//! ads, and the leaderboard. Consumers build a [`Runtime`], start sessions,
//! and drive each one through its [`SessionHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`progress`], [`shop`], and [`leaderboard`] hold cross-session state
//! - [`repository`] provides persistence adapters reused by other crates
//! - `workers` keeps the per-session tasks internal to the crate
pub mod api;
pub mod events;
pub mod leaderboard;
pub mod progress;
pub mod repository;
pub mod runtime;
pub mod shop;

mod workers;

pub use api::{
    AdOutcome, AdProvider, InstantRewardAdProvider, Result, RuntimeError, ScriptedAdProvider,
    SessionHandle, SessionUpdate,
};
pub use events::{Event, EventBus, ProgressEvent, SessionId, SessionNotice, SessionStarted, Topic};
pub use leaderboard::Leaderboard;
pub use progress::{
    CategoryProgress, LifelineStore, PlayerProgress, ProgressSummary, TierProgress, TierStatus,
    UnlockStore, Wallet,
};
pub use repository::{
    FileLeaderboardRepository, FileProgressRepository, InMemoryLeaderboard,
    InMemoryProgressRepository, LeaderboardEntry, LeaderboardFilter, LeaderboardRepository,
    ProgressRepository, RepositoryError,
};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use shop::{LifelineShop, PurchaseOutcome, ShopConfig};

//! Repository layer for player data that outlives a session.
//!
//! Repositories handle data that CHANGES as the player plays:
//! - Coins, lifeline inventory, unlocked tiers
//! - Leaderboard entries
//!
//! The question bank is static content served by the `QuestionOracle`, not a
//! repository.

mod error;
mod file;
mod memory;
mod traits;
mod types;

pub use error::{RepositoryError, Result};
pub use file::{FileLeaderboardRepository, FileProgressRepository};
pub use memory::{InMemoryLeaderboard, InMemoryProgressRepository};
pub use traits::{LeaderboardRepository, ProgressRepository};
pub use types::{LeaderboardEntry, LeaderboardFilter, rank_entries};

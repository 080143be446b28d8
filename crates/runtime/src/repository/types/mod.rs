//! Shared data types persisted by repositories.

mod leaderboard;

pub use leaderboard::{LeaderboardEntry, LeaderboardFilter, rank_entries};

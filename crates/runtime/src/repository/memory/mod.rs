//! In-memory repository implementations for testing and development.

mod leaderboard;
mod progress;

pub use leaderboard::InMemoryLeaderboard;
pub use progress::InMemoryProgressRepository;

//! Leaderboard service over a [`LeaderboardRepository`].

use std::sync::Arc;

use tracing::info;

use quiz_core::SessionResult;

use crate::events::{EventBus, ProgressEvent};
use crate::repository::{
    LeaderboardEntry, LeaderboardFilter, LeaderboardRepository, Result, rank_entries,
};

pub struct Leaderboard {
    repository: Arc<dyn LeaderboardRepository>,
    events: EventBus,
}

impl Leaderboard {
    pub fn new(repository: Arc<dyn LeaderboardRepository>, events: EventBus) -> Self {
        Self { repository, events }
    }

    /// Stores the finished session and announces it.
    pub fn record(&self, player_name: &str, result: &SessionResult) -> Result<LeaderboardEntry> {
        let entry = LeaderboardEntry::from_result(player_name, result);
        self.repository.record(&entry)?;

        info!(
            player = %entry.player_name,
            category = %entry.category,
            difficulty = %entry.difficulty,
            percentage = entry.percentage,
            points = entry.points,
            "result recorded"
        );
        self.events
            .publish(ProgressEvent::ResultRecorded(entry.clone()));
        Ok(entry)
    }

    /// Best `limit` entries matching `filter`.
    pub fn top(&self, limit: usize, filter: LeaderboardFilter) -> Result<Vec<LeaderboardEntry>> {
        Ok(rank_entries(self.repository.entries()?, limit, filter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{Event, Topic};
    use crate::repository::InMemoryLeaderboard;
    use quiz_core::{Category, Difficulty};

    fn result(score: u32, points: u32, timestamp: u64) -> SessionResult {
        SessionResult::new(
            Category::Science,
            Difficulty::Rookie,
            score,
            10,
            points,
            score,
            0,
            timestamp,
        )
    }

    #[test]
    fn records_and_ranks() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe(Topic::Progress);
        let board = Leaderboard::new(Arc::new(InMemoryLeaderboard::new()), bus);

        board.record("ana", &result(6, 60, 1)).expect("record");
        board.record("bo", &result(9, 90, 2)).expect("record");
        board.record("cy", &result(9, 120, 3)).expect("record");

        let top = board.top(2, LeaderboardFilter::all()).expect("top");
        let names: Vec<_> = top.iter().map(|e| e.player_name.as_str()).collect();
        assert_eq!(names, ["cy", "bo"]);

        assert!(matches!(
            rx.try_recv(),
            Ok(Event::Progress(ProgressEvent::ResultRecorded(entry))) if entry.player_name == "ana"
        ));
    }

    #[test]
    fn filter_excludes_other_tiers() {
        let board = Leaderboard::new(Arc::new(InMemoryLeaderboard::new()), EventBus::new());
        board.record("ana", &result(6, 60, 1)).expect("record");

        let filter = LeaderboardFilter::all().difficulty(Difficulty::Legend);
        assert!(board.top(10, filter).expect("top").is_empty());
    }
}

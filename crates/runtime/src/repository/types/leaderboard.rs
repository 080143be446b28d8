//! Leaderboard records and ranking.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use quiz_core::{Category, Difficulty, SessionResult};

/// One finished session as stored on the leaderboard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub player_name: String,
    pub score: u32,
    pub total_questions: u32,
    pub category: Category,
    pub difficulty: Difficulty,
    pub percentage: u32,
    pub points: u32,
    pub timestamp: u64,
}

impl LeaderboardEntry {
    pub fn from_result(player_name: impl Into<String>, result: &SessionResult) -> Self {
        Self {
            player_name: player_name.into(),
            score: result.score,
            total_questions: result.total_questions,
            category: result.category,
            difficulty: result.difficulty,
            percentage: result.percentage,
            points: result.points,
            timestamp: result.timestamp,
        }
    }

    /// Ranking order: higher percentage, then more points, then earlier.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .percentage
            .cmp(&self.percentage)
            .then_with(|| other.points.cmp(&self.points))
            .then_with(|| self.timestamp.cmp(&other.timestamp))
    }
}

/// Optional category and difficulty restriction for ranked retrieval.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LeaderboardFilter {
    pub category: Option<Category>,
    pub difficulty: Option<Difficulty>,
}

impl LeaderboardFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: Category) -> Self {
        // `All` as a filter means no restriction.
        self.category = (!category.is_wildcard()).then_some(category);
        self
    }

    pub fn difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    pub fn matches(&self, entry: &LeaderboardEntry) -> bool {
        self.category.is_none_or(|category| category == entry.category)
            && self
                .difficulty
                .is_none_or(|difficulty| difficulty == entry.difficulty)
    }
}

/// Best `limit` entries passing `filter`, in ranking order.
pub fn rank_entries(
    entries: impl IntoIterator<Item = LeaderboardEntry>,
    limit: usize,
    filter: LeaderboardFilter,
) -> Vec<LeaderboardEntry> {
    let mut ranked: Vec<LeaderboardEntry> = entries
        .into_iter()
        .filter(|entry| filter.matches(entry))
        .collect();
    ranked.sort_by(LeaderboardEntry::rank_cmp);
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, percentage: u32, points: u32, timestamp: u64) -> LeaderboardEntry {
        LeaderboardEntry {
            player_name: name.into(),
            score: 0,
            total_questions: 10,
            category: Category::Science,
            difficulty: Difficulty::Rookie,
            percentage,
            points,
            timestamp,
        }
    }

    #[test]
    fn ranks_by_percentage_then_points_then_time() {
        let ranked = rank_entries(
            vec![
                entry("late", 90, 100, 20),
                entry("low", 50, 500, 1),
                entry("early", 90, 100, 10),
                entry("rich", 90, 200, 30),
            ],
            10,
            LeaderboardFilter::all(),
        );
        let names: Vec<&str> = ranked.iter().map(|e| e.player_name.as_str()).collect();
        assert_eq!(names, ["rich", "early", "late", "low"]);
    }

    #[test]
    fn filters_and_truncates() {
        let mut history = entry("history", 100, 0, 0);
        history.category = Category::History;
        let ranked = rank_entries(
            vec![entry("a", 10, 0, 0), entry("b", 20, 0, 0), history],
            1,
            LeaderboardFilter::all().category(Category::Science),
        );
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].player_name, "b");
    }

    #[test]
    fn wildcard_category_filter_is_unrestricted() {
        let filter = LeaderboardFilter::all().category(Category::All);
        assert_eq!(filter.category, None);
    }
}

//! Terminal summary of a finished session.

use super::{Category, Difficulty};

/// Immutable summary produced once when a session reaches `Finished`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionResult {
    pub category: Category,
    pub difficulty: Difficulty,
    /// Correctly answered questions.
    pub score: u32,
    /// Questions in the session, skipped ones included.
    pub total_questions: u32,
    /// `round(100 × score / total_questions)`.
    pub percentage: u32,
    /// Base plus streak bonus points.
    pub points: u32,
    pub best_streak: u32,
    pub coins_earned: u32,
    pub lifelines_used: u32,
    /// Unix seconds at completion.
    pub timestamp: u64,
}

impl SessionResult {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        category: Category,
        difficulty: Difficulty,
        score: u32,
        total_questions: u32,
        points: u32,
        best_streak: u32,
        coins_earned: u32,
        timestamp: u64,
    ) -> Self {
        Self {
            category,
            difficulty,
            score,
            total_questions,
            percentage: percentage(score, total_questions),
            points,
            best_streak,
            coins_earned,
            lifelines_used: 0,
            timestamp,
        }
    }

    pub fn with_lifelines_used(mut self, lifelines_used: u32) -> Self {
        self.lifelines_used = lifelines_used;
        self
    }

    pub fn is_perfect(&self) -> bool {
        self.total_questions > 0 && self.score == self.total_questions
    }
}

/// Rounded percentage, halves rounding up. Zero questions yields zero.
pub fn percentage(score: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let score = u64::from(score.min(total));
    let total = u64::from(total);
    ((200 * score + total) / (2 * total)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_rounds_half_up() {
        assert_eq!(percentage(3, 3), 100);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(1, 8), 13);
        assert_eq!(percentage(0, 5), 0);
        assert_eq!(percentage(0, 0), 0);
    }

    #[test]
    fn result_derives_percentage() {
        let result = SessionResult::new(Category::Science, Difficulty::Rookie, 7, 10, 70, 4, 35, 1);
        assert_eq!(result.percentage, 70);
        assert!(!result.is_perfect());
    }
}

//! Consecutive-correct tracking and the derived score multiplier.
//!
//! Formula:
//! - multiplier = min(1 + count / step_size, max_multiplier)
//! - bonus(base) = base × multiplier − base
//!
//! The multiplier is never stored independently of the count, so the two can
//! not drift apart.

use crate::config::QuizConfig;

/// Streak tuning: how fast the multiplier grows and where it stops.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StreakRules {
    pub step_size: u32,
    pub max_multiplier: u32,
}

impl StreakRules {
    /// Builds rules, clamping both knobs to at least 1.
    pub fn new(step_size: u32, max_multiplier: u32) -> Self {
        Self {
            step_size: step_size.max(1),
            max_multiplier: max_multiplier.max(1),
        }
    }

    pub fn from_config(config: &QuizConfig) -> Self {
        Self::new(config.streak_step_size, config.max_multiplier)
    }

    /// Multiplier for a given streak length.
    pub fn multiplier_for(&self, count: u32) -> u32 {
        (1 + count / self.step_size).min(self.max_multiplier)
    }
}

impl Default for StreakRules {
    fn default() -> Self {
        Self::from_config(&QuizConfig::default())
    }
}

/// Current streak: consecutive correct answers in this session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StreakTracker {
    rules: StreakRules,
    count: u32,
    best: u32,
}

impl StreakTracker {
    pub fn new(rules: StreakRules) -> Self {
        Self {
            rules,
            count: 0,
            best: 0,
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Longest streak seen since this tracker was created.
    pub fn best(&self) -> u32 {
        self.best
    }

    pub fn multiplier(&self) -> u32 {
        self.rules.multiplier_for(self.count)
    }

    pub fn rules(&self) -> StreakRules {
        self.rules
    }

    pub fn on_correct(&mut self) {
        self.count = self.count.saturating_add(1);
        self.best = self.best.max(self.count);
    }

    /// Wrong answers and timeouts both break the streak. Lifelines never do.
    pub fn on_incorrect_or_expired(&mut self) {
        self.count = 0;
    }

    /// Bonus portion earned on top of `base_points` at the current multiplier.
    pub fn bonus_for(&self, base_points: u32) -> u32 {
        base_points
            .saturating_mul(self.multiplier())
            .saturating_sub(base_points)
    }
}

impl Default for StreakTracker {
    fn default() -> Self {
        Self::new(StreakRules::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiplier_is_non_decreasing_and_capped() {
        let rules = StreakRules::new(3, 4);
        let mut streak = StreakTracker::new(rules);
        let mut previous = streak.multiplier();
        assert_eq!(previous, 1);

        for expected_count in 1..=20u32 {
            streak.on_correct();
            let multiplier = streak.multiplier();
            assert_eq!(streak.count(), expected_count);
            assert!(multiplier >= previous);
            assert_eq!(multiplier, (1 + expected_count / 3).min(4));
            previous = multiplier;
        }
        assert_eq!(previous, 4);
    }

    #[test]
    fn reset_clears_any_streak() {
        let mut streak = StreakTracker::new(StreakRules::new(2, 10));
        for _ in 0..9 {
            streak.on_correct();
        }
        assert_eq!(streak.multiplier(), 5);

        streak.on_incorrect_or_expired();
        assert_eq!(streak.count(), 0);
        assert_eq!(streak.multiplier(), 1);
        assert_eq!(streak.best(), 9);
    }

    #[test]
    fn bonus_is_the_amount_above_base() {
        let mut streak = StreakTracker::new(StreakRules::new(1, 3));
        assert_eq!(streak.bonus_for(10), 0);
        streak.on_correct();
        assert_eq!(streak.bonus_for(10), 10);
        streak.on_correct();
        streak.on_correct();
        assert_eq!(streak.bonus_for(10), 20);
    }

    #[test]
    fn zero_knobs_are_clamped() {
        let rules = StreakRules::new(0, 0);
        assert_eq!(rules.step_size, 1);
        assert_eq!(rules.multiplier_for(50), 1);
    }
}

//! Per-category difficulty progression.
//!
//! Rookie is implicitly unlocked everywhere. Every other tier is unlocked only
//! by clearing the tier directly below it, and once unlocked it stays unlocked.

use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use crate::error::{ErrorSeverity, QuizError};

use super::{Category, Difficulty, SessionResult};

/// Unlocked difficulty tiers for every category.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DifficultyUnlockTracker {
    unlocked: BTreeMap<Category, BTreeSet<Difficulty>>,
}

impl DifficultyUnlockTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_unlocked(&self, category: Category, difficulty: Difficulty) -> bool {
        difficulty == Difficulty::Rookie
            || self
                .unlocked
                .get(&category)
                .is_some_and(|tiers| tiers.contains(&difficulty))
    }

    /// True for Rookie and for the tier right after an unlocked one.
    ///
    /// Available is a display hint: an available but locked tier is still not
    /// playable. Use [`Self::is_playable`] to gate sessions.
    pub fn is_available(&self, category: Category, difficulty: Difficulty) -> bool {
        match difficulty.previous() {
            None => true,
            Some(previous) => self.is_unlocked(category, previous),
        }
    }

    pub fn is_playable(&self, category: Category, difficulty: Difficulty) -> bool {
        self.is_unlocked(category, difficulty)
    }

    /// Unlocks the tier after `completed`. Returns the tier if it was newly
    /// unlocked; repeated calls are no-ops.
    pub fn unlock_next(&mut self, category: Category, completed: Difficulty) -> Option<Difficulty> {
        let next = completed.next()?;
        let inserted = self.unlocked.entry(category).or_default().insert(next);
        inserted.then_some(next)
    }

    pub fn highest_unlocked(&self, category: Category) -> Difficulty {
        Difficulty::ALL
            .into_iter()
            .rev()
            .find(|&difficulty| self.is_unlocked(category, difficulty))
            .unwrap_or(Difficulty::Rookie)
    }

    /// Persistable `"category/difficulty"` flags, sorted.
    pub fn to_flags(&self) -> Vec<String> {
        self.unlocked
            .iter()
            .flat_map(|(category, tiers)| {
                tiers
                    .iter()
                    .map(move |difficulty| format!("{category}/{difficulty}"))
            })
            .collect()
    }

    pub fn from_flags<I, S>(flags: I) -> Result<Self, UnlockFlagError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tracker = Self::new();
        for flag in flags {
            let flag = flag.as_ref();
            let (category, difficulty) = flag
                .split_once('/')
                .ok_or_else(|| UnlockFlagError::Malformed(flag.to_string()))?;
            let category = Category::from_str(category)
                .map_err(|_| UnlockFlagError::UnknownCategory(category.to_string()))?;
            let difficulty = Difficulty::from_str(difficulty)
                .map_err(|_| UnlockFlagError::UnknownDifficulty(difficulty.to_string()))?;
            if difficulty != Difficulty::Rookie {
                tracker
                    .unlocked
                    .entry(category)
                    .or_default()
                    .insert(difficulty);
            }
        }
        Ok(tracker)
    }
}

/// Decides whether a finished session earns the next tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnlockPolicy {
    pub threshold_percent: u32,
}

impl UnlockPolicy {
    pub const DEFAULT_THRESHOLD_PERCENT: u32 = 70;

    pub const fn new(threshold_percent: u32) -> Self {
        Self { threshold_percent }
    }

    pub fn qualifies(&self, result: &SessionResult) -> bool {
        result.percentage >= self.threshold_percent
    }

    /// Applies a session result to the tracker. Returns the newly unlocked tier.
    pub fn apply(
        &self,
        tracker: &mut DifficultyUnlockTracker,
        result: &SessionResult,
    ) -> Option<Difficulty> {
        if !self.qualifies(result) {
            return None;
        }
        tracker.unlock_next(result.category, result.difficulty)
    }
}

impl Default for UnlockPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_THRESHOLD_PERCENT)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum UnlockFlagError {
    #[error("unlock flag '{0}' is not of the form category/difficulty")]
    Malformed(String),

    #[error("unknown category '{0}' in unlock flag")]
    UnknownCategory(String),

    #[error("unknown difficulty '{0}' in unlock flag")]
    UnknownDifficulty(String),
}

impl QuizError for UnlockFlagError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Malformed(_) => "UNLOCK_FLAG_MALFORMED",
            Self::UnknownCategory(_) => "UNLOCK_FLAG_UNKNOWN_CATEGORY",
            Self::UnknownDifficulty(_) => "UNLOCK_FLAG_UNKNOWN_DIFFICULTY",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(category: Category, difficulty: Difficulty, score: u32, total: u32) -> SessionResult {
        SessionResult::new(category, difficulty, score, total, 0, 0, 0, 0)
    }

    #[test]
    fn rookie_is_always_unlocked() {
        let tracker = DifficultyUnlockTracker::new();
        assert!(tracker.is_unlocked(Category::History, Difficulty::Rookie));
        assert!(!tracker.is_unlocked(Category::History, Difficulty::Amateur));
        assert_eq!(tracker.highest_unlocked(Category::History), Difficulty::Rookie);
    }

    #[test]
    fn next_locked_tier_is_available_but_not_playable() {
        let tracker = DifficultyUnlockTracker::new();
        assert!(tracker.is_available(Category::Science, Difficulty::Amateur));
        assert!(!tracker.is_playable(Category::Science, Difficulty::Amateur));
        assert!(!tracker.is_available(Category::Science, Difficulty::Pro));
    }

    #[test]
    fn below_threshold_changes_nothing() {
        let mut tracker = DifficultyUnlockTracker::new();
        let policy = UnlockPolicy::default();

        let unlocked = policy.apply(&mut tracker, &result(Category::Science, Difficulty::Rookie, 6, 10));

        assert_eq!(unlocked, None);
        assert!(!tracker.is_unlocked(Category::Science, Difficulty::Amateur));
    }

    #[test]
    fn at_threshold_unlocks_exactly_the_next_tier() {
        let mut tracker = DifficultyUnlockTracker::new();
        let policy = UnlockPolicy::default();

        let unlocked = policy.apply(&mut tracker, &result(Category::Science, Difficulty::Rookie, 7, 10));

        assert_eq!(unlocked, Some(Difficulty::Amateur));
        assert!(tracker.is_unlocked(Category::Science, Difficulty::Amateur));
        assert!(!tracker.is_unlocked(Category::Science, Difficulty::Pro));
        assert!(!tracker.is_unlocked(Category::History, Difficulty::Amateur));
    }

    #[test]
    fn unlocking_twice_is_idempotent() {
        let mut once = DifficultyUnlockTracker::new();
        once.unlock_next(Category::Sports, Difficulty::Rookie);

        let mut twice = DifficultyUnlockTracker::new();
        assert_eq!(
            twice.unlock_next(Category::Sports, Difficulty::Rookie),
            Some(Difficulty::Amateur)
        );
        assert_eq!(twice.unlock_next(Category::Sports, Difficulty::Rookie), None);

        assert_eq!(once, twice);
    }

    #[test]
    fn last_tier_has_nothing_to_unlock() {
        let mut tracker = DifficultyUnlockTracker::new();
        assert_eq!(tracker.unlock_next(Category::Literature, Difficulty::Genius), None);
    }

    #[test]
    fn flags_round_trip() {
        let mut tracker = DifficultyUnlockTracker::new();
        tracker.unlock_next(Category::Science, Difficulty::Rookie);
        tracker.unlock_next(Category::Science, Difficulty::Amateur);
        tracker.unlock_next(Category::History, Difficulty::Rookie);

        let flags = tracker.to_flags();
        assert_eq!(
            flags,
            vec!["science/amateur", "science/pro", "history/amateur"]
                .into_iter()
                .map(String::from)
                .collect::<Vec<_>>()
        );
        assert_eq!(DifficultyUnlockTracker::from_flags(&flags).unwrap(), tracker);
        assert_eq!(tracker.highest_unlocked(Category::Science), Difficulty::Pro);
    }

    #[test]
    fn malformed_flags_are_rejected() {
        assert!(matches!(
            DifficultyUnlockTracker::from_flags(["science-pro"]),
            Err(UnlockFlagError::Malformed(_))
        ));
        assert!(matches!(
            DifficultyUnlockTracker::from_flags(["cooking/pro"]),
            Err(UnlockFlagError::UnknownCategory(_))
        ));
    }
}

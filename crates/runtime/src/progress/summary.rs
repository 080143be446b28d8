//! Menu-facing view of the player's progress.

use std::collections::BTreeMap;

use quiz_core::{Category, Difficulty, DifficultyUnlockTracker, LifelineInventory, Question};
use strum::IntoEnumIterator;

/// Display state of one difficulty tier in one category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum TierStatus {
    /// Playable.
    Unlocked,
    /// Next in line: shown as reachable but not playable yet.
    Available,
    Locked,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TierProgress {
    pub difficulty: Difficulty,
    pub status: TierStatus,
    /// Questions in the bank for this category and tier.
    pub questions: usize,
}

impl TierProgress {
    pub fn is_playable(&self) -> bool {
        self.status == TierStatus::Unlocked && self.questions > 0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryProgress {
    pub category: Category,
    pub tiers: Vec<TierProgress>,
}

/// Coins, lifelines, and the unlock ladder for every category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressSummary {
    pub coins: u64,
    pub lifelines: LifelineInventory,
    pub categories: Vec<CategoryProgress>,
}

impl ProgressSummary {
    pub fn build(
        coins: u64,
        lifelines: LifelineInventory,
        tracker: &DifficultyUnlockTracker,
        questions: &[Question],
    ) -> Self {
        let mut counts: BTreeMap<(Category, Difficulty), usize> = BTreeMap::new();
        for question in questions {
            *counts
                .entry((question.category, question.difficulty))
                .or_default() += 1;
        }

        let categories = Category::iter()
            .map(|category| {
                let tiers = Difficulty::ALL
                    .into_iter()
                    .map(|difficulty| {
                        let status = if tracker.is_unlocked(category, difficulty) {
                            TierStatus::Unlocked
                        } else if tracker.is_available(category, difficulty) {
                            TierStatus::Available
                        } else {
                            TierStatus::Locked
                        };
                        let questions = if category.is_wildcard() {
                            counts
                                .iter()
                                .filter(|((_, tier), _)| *tier == difficulty)
                                .map(|(_, count)| count)
                                .sum::<usize>()
                        } else {
                            counts.get(&(category, difficulty)).copied().unwrap_or(0)
                        };
                        TierProgress {
                            difficulty,
                            status,
                            questions,
                        }
                    })
                    .collect();
                CategoryProgress { category, tiers }
            })
            .collect();

        Self {
            coins,
            lifelines,
            categories,
        }
    }

    pub fn category(&self, category: Category) -> Option<&CategoryProgress> {
        self.categories
            .iter()
            .find(|progress| progress.category == category)
    }
}

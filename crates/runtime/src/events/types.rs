//! Event types for different topics.

use serde::{Deserialize, Serialize};

use quiz_core::{Category, Difficulty, LifelineKind, SessionEvent};

use crate::repository::LeaderboardEntry;

/// Identifies one session started by a runtime.
pub type SessionId = u64;

/// A session engine event tagged with the session that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionNotice {
    pub session_id: SessionId,
    pub event: SessionEvent,
}

/// Emitted once when a session worker is spawned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStarted {
    pub session_id: SessionId,
    pub category: Category,
    pub difficulty: Difficulty,
    pub total_questions: usize,
}

/// Changes to the player's persistent progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgressEvent {
    CoinsChanged { balance: u64 },

    LifelinesChanged { kind: LifelineKind, quantity: u32 },

    LifelinePurchased { kind: LifelineKind, price: u64 },

    /// A rewarded ad credited lifelines outside the ad gate.
    LifelineRewarded { kind: LifelineKind, amount: u32 },

    DifficultyUnlocked {
        category: Category,
        difficulty: Difficulty,
    },

    ResultRecorded(LeaderboardEntry),
}

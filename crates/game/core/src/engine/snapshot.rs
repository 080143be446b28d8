//! Read-only view of a session for presentation layers.

use crate::state::{Category, Difficulty, SessionResult};

use super::Phase;

/// The question as the player should see it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuestionView {
    pub text: String,
    pub options: Vec<String>,
    /// Option indices removed by fifty-fifty, ascending.
    pub hidden: Vec<usize>,
    /// Only populated once the answer has been revealed.
    pub correct_index: Option<usize>,
}

impl QuestionView {
    pub fn is_hidden(&self, index: usize) -> bool {
        self.hidden.contains(&index)
    }
}

/// Immutable copy of the session after an operation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionSnapshot {
    pub phase: Phase,
    pub category: Category,
    pub difficulty: Difficulty,
    pub question_index: usize,
    pub total_questions: usize,
    pub question: Option<QuestionView>,
    pub selected_answer: Option<usize>,
    pub time_expired: bool,
    pub remaining_seconds: u32,
    pub score: u32,
    pub points: u32,
    pub bonus_points: u32,
    pub pending_coins: u32,
    pub streak: u32,
    pub multiplier: u32,
    pub result: Option<SessionResult>,
}

impl SessionSnapshot {
    /// One-based position for display, clamped to the total.
    pub fn question_number(&self) -> usize {
        (self.question_index + 1).min(self.total_questions)
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }
}

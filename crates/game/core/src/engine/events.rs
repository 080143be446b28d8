//! Events emitted by session operations.
//!
//! Every operation returns the events it produced, in order, so a UI layer can
//! redraw from them without polling the session.

use crate::state::{LifelineKind, SessionResult};

/// Why a lifeline request was refused without spending anything.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum LifelineRejection {
    /// The inventory holds none of this kind.
    NoneLeft,
    /// Fifty-fifty was already applied to this question.
    AlreadyApplied,
    /// The countdown already has the maximum time granted.
    TimeCapReached,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SessionEvent {
    /// A question is (re)presented with a fresh countdown.
    QuestionAsked {
        index: usize,
        total: usize,
        remaining: u32,
        retry: bool,
    },
    TimerTicked {
        remaining: u32,
    },
    TimerExpired {
        index: usize,
    },
    AnswerEvaluated {
        index: usize,
        selected: usize,
        correct_index: usize,
        correct: bool,
        points: u32,
        bonus: u32,
        streak: u32,
    },
    AdGateEntered {
        time_expired: bool,
    },
    /// The ad was dismissed without a reward; the gate stays closed.
    AdGateHeld,
    AdGateCleared,
    LifelineUsed {
        kind: LifelineKind,
    },
    LifelineRejected {
        kind: LifelineKind,
        reason: LifelineRejection,
    },
    OptionsHidden {
        indices: Vec<usize>,
    },
    TimeExtended {
        added: u32,
        remaining: u32,
    },
    QuestionSkipped {
        index: usize,
    },
    Finished(SessionResult),
}

impl SessionEvent {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionEvent::Finished(_))
    }
}

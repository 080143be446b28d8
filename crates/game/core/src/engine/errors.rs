//! Error types for the session state machine.

use crate::error::{ErrorSeverity, QuizError};

/// State-machine tag of a [`super::QuizSession`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Phase {
    /// A question is on screen and the countdown is running.
    Asking,
    /// The last answer was correct; waiting for the host to advance.
    AnswerRevealed,
    /// A wrong or expired answer blocks progress until an ad reward arrives.
    AdGate,
    /// Terminal. The result has been produced and coins settled.
    Finished,
}

/// Operations that can be refused for being called in the wrong phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum SessionOp {
    SelectAnswer,
    TimerExpired,
    ResolveAdGate,
    Advance,
    UseFiftyFifty,
    UseSkip,
    UseExtraTime,
}

impl SessionOp {
    /// Phases in which the operation is legal.
    pub const fn allowed_phases(&self) -> &'static [Phase] {
        match self {
            SessionOp::SelectAnswer
            | SessionOp::TimerExpired
            | SessionOp::UseFiftyFifty
            | SessionOp::UseExtraTime => &[Phase::Asking],
            SessionOp::UseSkip => &[Phase::Asking, Phase::AdGate],
            SessionOp::ResolveAdGate => &[Phase::AdGate],
            SessionOp::Advance => &[Phase::AnswerRevealed],
        }
    }

    pub fn is_allowed_in(&self, phase: Phase) -> bool {
        self.allowed_phases().contains(&phase)
    }
}

/// Errors surfaced by [`super::QuizSession`] operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SessionError {
    #[error("{operation} is not valid while the session is in phase {phase}")]
    InvalidTransition { operation: SessionOp, phase: Phase },

    #[error("answer {index} is out of range for {options} options")]
    AnswerOutOfRange { index: usize, options: usize },

    #[error("question queue is exhausted at index {index}")]
    QueueExhausted { index: usize },
}

impl SessionError {
    pub(crate) fn invalid(operation: SessionOp, phase: Phase) -> Self {
        Self::InvalidTransition { operation, phase }
    }
}

impl QuizError for SessionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidTransition { .. } => ErrorSeverity::Internal,
            Self::AnswerOutOfRange { .. } => ErrorSeverity::Validation,
            Self::QueueExhausted { .. } => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "SESSION_INVALID_TRANSITION",
            Self::AnswerOutOfRange { .. } => "SESSION_ANSWER_OUT_OF_RANGE",
            Self::QueueExhausted { .. } => "SESSION_QUEUE_EXHAUSTED",
        }
    }
}

//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, repositories, and the session
//! engine so clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use quiz_core::{
    Category, ConfigError, Difficulty, LifelineError, QueueError, QuizError, SessionError,
};

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("runtime requires a question bank to be configured before building")]
    MissingQuestions,

    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),

    #[error("{difficulty} is locked for category {category}")]
    DifficultyLocked {
        category: Category,
        difficulty: Difficulty,
    },

    #[error(transparent)]
    EmptyQueue(#[from] QueueError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Lifeline(#[from] LifelineError),

    #[error("no rewarded ad is ready to show")]
    AdNotReady,

    #[error("session worker command channel closed")]
    CommandChannelClosed,

    #[error("session worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl RuntimeError {
    /// True when the caller can carry on (pick another filter, wait for an
    /// ad, retry an answer) rather than abandon the session.
    pub fn is_recoverable(&self) -> bool {
        match self {
            RuntimeError::DifficultyLocked { .. } | RuntimeError::AdNotReady => true,
            RuntimeError::EmptyQueue(err) => err.severity().is_recoverable(),
            RuntimeError::Session(err) => !err.severity().is_internal(),
            _ => false,
        }
    }
}

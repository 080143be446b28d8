//! Session state and the value types it is built from.
//!
//! Everything here is plain data with local invariants: streak arithmetic,
//! lifeline counters, unlock sets, the question queue, and the countdown.
//! [`crate::engine::QuizSession`] composes them into the state machine.
mod catalog;
mod lifelines;
mod question;
mod queue;
mod result;
mod streak;
mod timer;
mod unlocks;

pub use catalog::{Category, Difficulty};
pub use lifelines::{LifelineError, LifelineInventory, LifelineKind};
pub use question::{Question, QuestionError};
pub use queue::{QueueError, QuestionQueue};
pub use result::{SessionResult, percentage};
pub use streak::{StreakRules, StreakTracker};
pub use timer::{SessionTimer, TickOutcome, TimerRules};
pub use unlocks::{DifficultyUnlockTracker, UnlockFlagError, UnlockPolicy};

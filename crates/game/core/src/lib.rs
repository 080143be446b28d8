//! Deterministic quiz rules and data types shared across clients.
//!
//! `quiz-core` defines the canonical session rules (queue, streaks, timer,
//! lifelines, unlocks) and exposes pure APIs that the runtime drives. All
//! session mutation flows through [`engine::QuizSession`]; supporting crates
//! depend on the types re-exported here.
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod state;

pub use config::{ConfigError, QuizConfig};
pub use engine::{
    LifelineRejection, Phase, QuestionView, QuizSession, SessionError, SessionEvent, SessionOp,
    SessionSnapshot,
};
pub use env::{
    ClockOracle, CoinLedger, FixedClock, InMemoryCoins, InMemoryLifelines, LifelineLedger,
    PcgRng, QuestionOracle, RngOracle, SessionEnv, StaticQuestionBank, SystemClock, compute_seed,
};
pub use error::{ErrorSeverity, QuizError};
pub use state::{
    Category, Difficulty, DifficultyUnlockTracker, LifelineError, LifelineInventory, LifelineKind,
    Question, QuestionError, QuestionQueue, QueueError, SessionResult, SessionTimer, StreakRules,
    StreakTracker, TickOutcome, TimerRules, UnlockFlagError, UnlockPolicy, percentage,
};

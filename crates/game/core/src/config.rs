/// Quiz engine tunables.
///
/// Every scoring and timing constant lives here so product can retune the game
/// without touching the state machine. Defaults match the shipped `config.toml`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct QuizConfig {
    /// Consecutive correct answers needed to raise the streak multiplier by one.
    pub streak_step_size: u32,
    /// Upper bound for the streak multiplier.
    pub max_multiplier: u32,
    /// Points awarded per correct answer before difficulty and streak scaling.
    pub base_points: u32,
    /// Coins accrued per correct answer before difficulty and streak scaling.
    pub coins_per_correct: u32,
    /// Countdown length whenever a question is (re)asked.
    pub question_seconds: u32,
    /// Seconds granted by one extra-time lifeline.
    pub extra_time_seconds: u32,
    /// Ceiling on the total time granted for one question.
    pub max_question_seconds: u32,
    /// Minimum session percentage that unlocks the next difficulty tier.
    pub unlock_threshold_percent: u32,
    /// Optional cap on questions drawn for one session.
    pub max_questions_per_session: Option<usize>,
}

impl QuizConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_STREAK_STEP_SIZE: u32 = 3;
    pub const DEFAULT_MAX_MULTIPLIER: u32 = 5;
    pub const DEFAULT_BASE_POINTS: u32 = 10;
    pub const DEFAULT_COINS_PER_CORRECT: u32 = 5;
    pub const DEFAULT_QUESTION_SECONDS: u32 = 30;
    pub const DEFAULT_EXTRA_TIME_SECONDS: u32 = 15;
    pub const DEFAULT_MAX_QUESTION_SECONDS: u32 = 45;
    pub const DEFAULT_UNLOCK_THRESHOLD_PERCENT: u32 = 70;

    pub fn new() -> Self {
        Self {
            streak_step_size: Self::DEFAULT_STREAK_STEP_SIZE,
            max_multiplier: Self::DEFAULT_MAX_MULTIPLIER,
            base_points: Self::DEFAULT_BASE_POINTS,
            coins_per_correct: Self::DEFAULT_COINS_PER_CORRECT,
            question_seconds: Self::DEFAULT_QUESTION_SECONDS,
            extra_time_seconds: Self::DEFAULT_EXTRA_TIME_SECONDS,
            max_question_seconds: Self::DEFAULT_MAX_QUESTION_SECONDS,
            unlock_threshold_percent: Self::DEFAULT_UNLOCK_THRESHOLD_PERCENT,
            max_questions_per_session: None,
        }
    }

    pub fn with_streak(mut self, step_size: u32, max_multiplier: u32) -> Self {
        self.streak_step_size = step_size;
        self.max_multiplier = max_multiplier;
        self
    }

    pub fn with_timing(mut self, question_seconds: u32, extra: u32, max_total: u32) -> Self {
        self.question_seconds = question_seconds;
        self.extra_time_seconds = extra;
        self.max_question_seconds = max_total;
        self
    }

    /// Checks the cross-field constraints the engine relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.streak_step_size == 0 {
            return Err(ConfigError::ZeroStreakStep);
        }
        if self.max_multiplier == 0 {
            return Err(ConfigError::ZeroMaxMultiplier);
        }
        if self.question_seconds == 0 {
            return Err(ConfigError::ZeroQuestionTime);
        }
        if self.max_question_seconds < self.question_seconds {
            return Err(ConfigError::TimeCapBelowDuration {
                duration: self.question_seconds,
                cap: self.max_question_seconds,
            });
        }
        if self.unlock_threshold_percent > 100 {
            return Err(ConfigError::ThresholdAboveHundred(
                self.unlock_threshold_percent,
            ));
        }
        if self.max_questions_per_session == Some(0) {
            return Err(ConfigError::ZeroQuestionCap);
        }
        Ok(())
    }
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Invalid combinations of [`QuizConfig`] values.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("streak_step_size must be at least 1")]
    ZeroStreakStep,

    #[error("max_multiplier must be at least 1")]
    ZeroMaxMultiplier,

    #[error("question_seconds must be at least 1")]
    ZeroQuestionTime,

    #[error("max_question_seconds ({cap}) is below question_seconds ({duration})")]
    TimeCapBelowDuration { duration: u32, cap: u32 },

    #[error("unlock_threshold_percent {0} is above 100")]
    ThresholdAboveHundred(u32),

    #[error("max_questions_per_session must be at least 1 when set")]
    ZeroQuestionCap,
}

impl crate::error::QuizError for ConfigError {
    fn severity(&self) -> crate::error::ErrorSeverity {
        crate::error::ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ZeroStreakStep => "CONFIG_ZERO_STREAK_STEP",
            Self::ZeroMaxMultiplier => "CONFIG_ZERO_MAX_MULTIPLIER",
            Self::ZeroQuestionTime => "CONFIG_ZERO_QUESTION_TIME",
            Self::TimeCapBelowDuration { .. } => "CONFIG_TIME_CAP_BELOW_DURATION",
            Self::ThresholdAboveHundred(_) => "CONFIG_THRESHOLD_ABOVE_HUNDRED",
            Self::ZeroQuestionCap => "CONFIG_ZERO_QUESTION_CAP",
        }
    }
}

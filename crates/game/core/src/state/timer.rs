//! Tick-driven countdown for a single question.
//!
//! The timer owns no clock. The host calls [`SessionTimer::tick`] once per
//! elapsed time unit; extra time can be granted up to a per-question ceiling.

use crate::config::QuizConfig;

/// Timing rules applied to every question.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimerRules {
    /// Countdown start value when a question is (re)asked.
    pub duration: u32,
    /// Time units granted by one extra-time lifeline.
    pub extra_time: u32,
    /// Ceiling on total time granted for one question.
    pub max_total: u32,
}

impl TimerRules {
    pub fn new(duration: u32, extra_time: u32, max_total: u32) -> Self {
        Self {
            duration,
            extra_time,
            max_total: max_total.max(duration),
        }
    }

    pub fn from_config(config: &QuizConfig) -> Self {
        Self::new(
            config.question_seconds,
            config.extra_time_seconds,
            config.max_question_seconds,
        )
    }
}

impl Default for TimerRules {
    fn default() -> Self {
        Self::from_config(&QuizConfig::default())
    }
}

/// Result of a single tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Time remains on the clock.
    Running { remaining: u32 },
    /// This tick reached zero.
    Expired,
    /// The timer had already expired; nothing changed.
    Idle,
}

/// Countdown for the question currently being asked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionTimer {
    rules: TimerRules,
    remaining: u32,
    granted: u32,
}

impl SessionTimer {
    /// Starts a fresh countdown at the configured duration.
    pub fn start(rules: TimerRules) -> Self {
        Self {
            rules,
            remaining: rules.duration,
            granted: rules.duration,
        }
    }

    /// Rearms the countdown for a new (or repeated) question.
    pub fn restart(&mut self) {
        *self = Self::start(self.rules);
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Total time granted for this question so far, extensions included.
    pub fn granted(&self) -> u32 {
        self.granted
    }

    pub fn rules(&self) -> TimerRules {
        self.rules
    }

    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    pub fn tick(&mut self) -> TickOutcome {
        if self.remaining == 0 {
            return TickOutcome::Idle;
        }
        self.remaining -= 1;
        if self.remaining == 0 {
            TickOutcome::Expired
        } else {
            TickOutcome::Running {
                remaining: self.remaining,
            }
        }
    }

    /// Time one extension would add right now, after the ceiling is applied.
    pub fn extension_headroom(&self) -> u32 {
        self.rules
            .extra_time
            .min(self.rules.max_total.saturating_sub(self.granted))
    }

    /// Adds one extension, clamped to the ceiling. Returns the time added.
    pub fn extend(&mut self) -> u32 {
        let added = self.extension_headroom();
        self.granted += added;
        self.remaining += added;
        added
    }
}

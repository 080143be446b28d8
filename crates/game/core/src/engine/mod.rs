//! The quiz session state machine.
//!
//! [`QuizSession`] is the authoritative reducer for one play-through. It moves
//! between [`Phase`]s only through the operations below and refuses any
//! operation called in the wrong phase with [`SessionError::InvalidTransition`].
//!
//! ```text
//! Asking ──correct──▶ AnswerRevealed ──advance──▶ Asking(next) | Finished
//!   │  └─wrong/expired─▶ AdGate ──reward──▶ Asking(same question)
//!   └─skip──────────────────────────────────────▶ Asking(next) | Finished
//! ```
//!
//! The engine is single-threaded and owns no clock: the host serialises
//! events and calls [`QuizSession::tick`] once per elapsed time unit.

mod errors;
mod events;
mod lifelines;
mod snapshot;

pub use errors::{Phase, SessionError, SessionOp};
pub use events::{LifelineRejection, SessionEvent};
pub use snapshot::{QuestionView, SessionSnapshot};

use std::collections::BTreeSet;

use crate::config::QuizConfig;
use crate::env::{QuestionOracle, SessionEnv};
use crate::state::{
    Category, Difficulty, Question, QueueError, QuestionQueue, SessionResult, SessionTimer,
    StreakRules, StreakTracker, TickOutcome, TimerRules,
};

/// One player's pass through a question queue.
#[derive(Debug)]
pub struct QuizSession {
    queue: QuestionQueue,
    env: SessionEnv,
    seed: u64,
    nonce: u64,

    phase: Phase,
    score: u32,
    points: u32,
    bonus_points: u32,
    pending_coins: u32,
    selected_answer: Option<usize>,
    hidden_options: BTreeSet<usize>,
    time_expired: bool,
    streak: StreakTracker,
    timer: SessionTimer,

    base_points: u32,
    coins_per_correct: u32,
    lifelines_used: u32,
    skipped: u32,
    settled: bool,
    result: Option<SessionResult>,
}

impl QuizSession {
    /// Creates a session in `Asking` on the first question of `queue`.
    pub fn new(queue: QuestionQueue, config: &QuizConfig, env: SessionEnv, seed: u64) -> Self {
        Self {
            queue,
            env,
            seed,
            nonce: 0,
            phase: Phase::Asking,
            score: 0,
            points: 0,
            bonus_points: 0,
            pending_coins: 0,
            selected_answer: None,
            hidden_options: BTreeSet::new(),
            time_expired: false,
            streak: StreakTracker::new(StreakRules::from_config(config)),
            timer: SessionTimer::start(TimerRules::from_config(config)),
            base_points: config.base_points,
            coins_per_correct: config.coins_per_correct,
            lifelines_used: 0,
            skipped: 0,
            settled: false,
            result: None,
        }
    }

    /// Builds the queue from the question bank and starts a session on it.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Empty`] when no question matches the filter. The
    /// host must not enter play in that case.
    pub fn start(
        bank: &dyn QuestionOracle,
        category: Category,
        difficulty: Difficulty,
        config: &QuizConfig,
        env: SessionEnv,
        seed: u64,
    ) -> Result<Self, QueueError> {
        let queue = QuestionQueue::build(
            bank.questions(),
            category,
            difficulty,
            env.rng(),
            seed,
            config.max_questions_per_session,
        )?;
        Ok(Self::new(queue, config, env, seed))
    }

    // ===== accessors =====

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn pending_coins(&self) -> u32 {
        self.pending_coins
    }

    pub fn total_questions(&self) -> usize {
        self.queue.len()
    }

    pub fn current_index(&self) -> usize {
        self.queue.index()
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.queue.current()
    }

    pub fn selected_answer(&self) -> Option<usize> {
        self.selected_answer
    }

    pub fn hidden_options(&self) -> &BTreeSet<usize> {
        &self.hidden_options
    }

    pub fn time_expired(&self) -> bool {
        self.time_expired
    }

    pub fn streak(&self) -> &StreakTracker {
        &self.streak
    }

    pub fn timer(&self) -> &SessionTimer {
        &self.timer
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }

    pub fn result(&self) -> Option<&SessionResult> {
        self.result.as_ref()
    }

    pub fn category(&self) -> Category {
        self.queue.category()
    }

    pub fn difficulty(&self) -> Difficulty {
        self.queue.difficulty()
    }

    /// Event describing the question currently on screen, if any.
    pub fn question_asked(&self) -> Option<SessionEvent> {
        (self.phase == Phase::Asking).then(|| self.asked_event(false))
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let revealed = self.phase == Phase::AnswerRevealed;
        let question = self.queue.current().map(|question| QuestionView {
            text: question.text.clone(),
            options: question.options.clone(),
            hidden: self.hidden_options.iter().copied().collect(),
            correct_index: revealed.then_some(question.correct_index),
        });

        SessionSnapshot {
            phase: self.phase,
            category: self.category(),
            difficulty: self.difficulty(),
            question_index: self.queue.index(),
            total_questions: self.queue.len(),
            question,
            selected_answer: self.selected_answer,
            time_expired: self.time_expired,
            remaining_seconds: self.timer.remaining(),
            score: self.score,
            points: self.points,
            bonus_points: self.bonus_points,
            pending_coins: self.pending_coins,
            streak: self.streak.count(),
            multiplier: self.streak.multiplier(),
            result: self.result.clone(),
        }
    }

    // ===== operations =====

    /// Records the player's answer and evaluates it.
    pub fn select_answer(&mut self, index: usize) -> Result<Vec<SessionEvent>, SessionError> {
        self.require(SessionOp::SelectAnswer)?;
        let question = self.require_question()?;
        let options = question.option_count();
        let correct_index = question.correct_index;

        if index >= options {
            return Err(SessionError::AnswerOutOfRange { index, options });
        }

        self.selected_answer = Some(index);
        let question_index = self.queue.index();

        if index == correct_index {
            self.score += 1;
            self.streak.on_correct();

            let multiplier = self.difficulty().points_multiplier();
            let base = self.base_points.saturating_mul(multiplier);
            let bonus = self.streak.bonus_for(base);
            self.points = self.points.saturating_add(base + bonus);
            self.bonus_points = self.bonus_points.saturating_add(bonus);

            let coin_base = self.coins_per_correct.saturating_mul(multiplier);
            let coins = coin_base.saturating_add(self.streak.bonus_for(coin_base));
            self.pending_coins = self.pending_coins.saturating_add(coins);

            self.phase = Phase::AnswerRevealed;

            Ok(vec![SessionEvent::AnswerEvaluated {
                index: question_index,
                selected: index,
                correct_index,
                correct: true,
                points: base,
                bonus,
                streak: self.streak.count(),
            }])
        } else {
            self.streak.on_incorrect_or_expired();
            self.time_expired = false;
            self.phase = Phase::AdGate;

            Ok(vec![
                SessionEvent::AnswerEvaluated {
                    index: question_index,
                    selected: index,
                    correct_index,
                    correct: false,
                    points: 0,
                    bonus: 0,
                    streak: 0,
                },
                SessionEvent::AdGateEntered {
                    time_expired: false,
                },
            ])
        }
    }

    /// The countdown ran out before an answer was selected.
    pub fn on_timer_expired(&mut self) -> Result<Vec<SessionEvent>, SessionError> {
        self.require(SessionOp::TimerExpired)?;
        self.require_question()?;

        self.streak.on_incorrect_or_expired();
        self.selected_answer = None;
        self.time_expired = true;
        self.phase = Phase::AdGate;

        Ok(vec![
            SessionEvent::TimerExpired {
                index: self.queue.index(),
            },
            SessionEvent::AdGateEntered { time_expired: true },
        ])
    }

    /// Advances the countdown by one unit.
    ///
    /// Ticks that arrive outside `Asking` are late deliveries from the host's
    /// timer and are ignored.
    pub fn tick(&mut self) -> Result<Vec<SessionEvent>, SessionError> {
        if self.phase != Phase::Asking {
            return Ok(Vec::new());
        }

        match self.timer.tick() {
            TickOutcome::Running { remaining } => Ok(vec![SessionEvent::TimerTicked { remaining }]),
            TickOutcome::Expired => {
                let mut events = vec![SessionEvent::TimerTicked { remaining: 0 }];
                events.extend(self.on_timer_expired()?);
                Ok(events)
            }
            TickOutcome::Idle => Ok(Vec::new()),
        }
    }

    /// Feeds the outcome of a rewarded ad into the gate.
    ///
    /// A granted reward re-arms the same question with a fresh countdown. A
    /// dismissed ad keeps the player gated.
    pub fn resolve_ad_gate(&mut self, reward_granted: bool) -> Result<Vec<SessionEvent>, SessionError> {
        self.require(SessionOp::ResolveAdGate)?;

        if !reward_granted {
            return Ok(vec![SessionEvent::AdGateHeld]);
        }

        self.selected_answer = None;
        self.time_expired = false;
        self.timer.restart();
        self.phase = Phase::Asking;

        Ok(vec![SessionEvent::AdGateCleared, self.asked_event(true)])
    }

    /// Moves past a revealed answer to the next question or to `Finished`.
    pub fn advance(&mut self) -> Result<Vec<SessionEvent>, SessionError> {
        self.require(SessionOp::Advance)?;
        Ok(self.next_question_or_finish())
    }

    // ===== internals =====

    fn require(&self, operation: SessionOp) -> Result<(), SessionError> {
        if operation.is_allowed_in(self.phase) {
            Ok(())
        } else {
            Err(SessionError::invalid(operation, self.phase))
        }
    }

    fn require_question(&self) -> Result<&Question, SessionError> {
        self.queue.current().ok_or(SessionError::QueueExhausted {
            index: self.queue.index(),
        })
    }

    fn asked_event(&self, retry: bool) -> SessionEvent {
        SessionEvent::QuestionAsked {
            index: self.queue.index(),
            total: self.queue.len(),
            remaining: self.timer.remaining(),
            retry,
        }
    }

    fn next_question_or_finish(&mut self) -> Vec<SessionEvent> {
        if self.queue.is_last() {
            return self.finish();
        }

        self.queue.advance();
        self.selected_answer = None;
        self.hidden_options.clear();
        self.time_expired = false;
        self.timer.restart();
        self.phase = Phase::Asking;

        vec![self.asked_event(false)]
    }

    /// Produces the result and settles coins. Settlement happens at most once.
    fn finish(&mut self) -> Vec<SessionEvent> {
        if self.settled {
            return Vec::new();
        }

        self.queue.advance();
        self.selected_answer = None;
        self.hidden_options.clear();
        self.time_expired = false;
        self.phase = Phase::Finished;

        let result = SessionResult::new(
            self.category(),
            self.difficulty(),
            self.score,
            self.queue.len() as u32,
            self.points,
            self.streak.best(),
            self.pending_coins,
            self.env.clock().now_unix_seconds(),
        )
        .with_lifelines_used(self.lifelines_used);

        self.env.coins().credit(u64::from(self.pending_coins));
        self.settled = true;
        self.result = Some(result.clone());

        vec![SessionEvent::Finished(result)]
    }

    fn next_draw_seed(&mut self, context: u32) -> u64 {
        let seed = crate::env::compute_seed(
            self.seed,
            self.nonce,
            self.queue.index() as u32,
            context,
        );
        self.nonce += 1;
        seed
    }
}

//! Lifeline operations on a running session.
//!
//! A lifeline is spent from the shared ledger only when it will actually take
//! effect. Refusals are reported as [`SessionEvent::LifelineRejected`] and
//! leave the inventory untouched.

use crate::state::LifelineKind;

use super::{LifelineRejection, QuizSession, SessionError, SessionEvent, SessionOp};

/// Seed context reserved for fifty-fifty picks.
const FIFTY_FIFTY_CONTEXT: u32 = 0x4646_5446;

/// Incorrect options removed by one fifty-fifty.
const FIFTY_FIFTY_HIDES: usize = 2;

impl QuizSession {
    /// Hides up to two incorrect options on the current question.
    ///
    /// The correct option is never hidden. A second use on the same question
    /// is rejected.
    pub fn use_fifty_fifty(&mut self) -> Result<Vec<SessionEvent>, SessionError> {
        const KIND: LifelineKind = LifelineKind::FiftyFifty;

        self.require(SessionOp::UseFiftyFifty)?;
        let mut candidates: Vec<usize> = self
            .require_question()?
            .incorrect_indices()
            .filter(|index| !self.hidden_options.contains(index))
            .collect();

        if !self.hidden_options.is_empty() || candidates.is_empty() {
            return Ok(vec![rejected(KIND, LifelineRejection::AlreadyApplied)]);
        }
        if !self.env.lifelines().try_consume(KIND) {
            return Ok(vec![rejected(KIND, LifelineRejection::NoneLeft)]);
        }
        self.lifelines_used += 1;

        let mut hidden = Vec::with_capacity(FIFTY_FIFTY_HIDES);
        while hidden.len() < FIFTY_FIFTY_HIDES && !candidates.is_empty() {
            let seed = self.next_draw_seed(FIFTY_FIFTY_CONTEXT);
            let last = (candidates.len() - 1) as u32;
            let pick = self.env.rng().range(seed, 0, last) as usize;
            hidden.push(candidates.swap_remove(pick));
        }
        hidden.sort_unstable();
        self.hidden_options.extend(hidden.iter().copied());

        Ok(vec![
            SessionEvent::LifelineUsed { kind: KIND },
            SessionEvent::OptionsHidden { indices: hidden },
        ])
    }

    /// Moves to the next question without changing score or streak.
    ///
    /// Also accepted at the ad gate, where it is the only way past the gate
    /// without watching an ad. Skipped questions still count toward the total.
    pub fn use_skip(&mut self) -> Result<Vec<SessionEvent>, SessionError> {
        const KIND: LifelineKind = LifelineKind::Skip;

        self.require(SessionOp::UseSkip)?;
        let index = self.queue.index();
        self.require_question()?;

        if !self.env.lifelines().try_consume(KIND) {
            return Ok(vec![rejected(KIND, LifelineRejection::NoneLeft)]);
        }
        self.lifelines_used += 1;
        self.skipped += 1;

        let mut events = vec![
            SessionEvent::LifelineUsed { kind: KIND },
            SessionEvent::QuestionSkipped { index },
        ];
        events.extend(self.next_question_or_finish());
        Ok(events)
    }

    /// Adds the configured extra time to the countdown, up to the per-question
    /// ceiling.
    pub fn use_extra_time(&mut self) -> Result<Vec<SessionEvent>, SessionError> {
        const KIND: LifelineKind = LifelineKind::ExtraTime;

        self.require(SessionOp::UseExtraTime)?;
        self.require_question()?;

        if self.timer.extension_headroom() == 0 {
            return Ok(vec![rejected(KIND, LifelineRejection::TimeCapReached)]);
        }
        if !self.env.lifelines().try_consume(KIND) {
            return Ok(vec![rejected(KIND, LifelineRejection::NoneLeft)]);
        }
        self.lifelines_used += 1;

        let added = self.timer.extend();
        Ok(vec![
            SessionEvent::LifelineUsed { kind: KIND },
            SessionEvent::TimeExtended {
                added,
                remaining: self.timer.remaining(),
            },
        ])
    }

    /// Dispatches to the operation for `kind`.
    pub fn use_lifeline(&mut self, kind: LifelineKind) -> Result<Vec<SessionEvent>, SessionError> {
        match kind {
            LifelineKind::FiftyFifty => self.use_fifty_fifty(),
            LifelineKind::Skip => self.use_skip(),
            LifelineKind::ExtraTime => self.use_extra_time(),
        }
    }

    /// Questions passed over with the skip lifeline.
    pub fn skipped(&self) -> u32 {
        self.skipped
    }

    pub fn lifelines_used(&self) -> u32 {
        self.lifelines_used
    }
}

fn rejected(kind: LifelineKind, reason: LifelineRejection) -> SessionEvent {
    SessionEvent::LifelineRejected { kind, reason }
}

//! Session worker that owns one authoritative [`QuizSession`].
//!
//! Receives commands from [`crate::api::SessionHandle`], applies them to the
//! session, drives the countdown from a tokio interval, and publishes every
//! resulting [`SessionEvent`] on the `Session` topic. When the session
//! finishes it settles unlocks and the leaderboard.

use std::future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::time::{Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use quiz_core::{
    LifelineKind, Phase, QuizSession, SessionError, SessionEvent, SessionResult, SessionSnapshot,
};

use crate::api::Result;
use crate::events::{Event, EventBus, SessionId, SessionNotice};
use crate::leaderboard::Leaderboard;
use crate::progress::UnlockStore;

/// Events produced by one command and the session state after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUpdate {
    pub events: Vec<SessionEvent>,
    pub snapshot: SessionSnapshot,
}

impl SessionUpdate {
    /// The result carried by a `Finished` event, if this update ended the
    /// session.
    pub fn finished(&self) -> Option<&SessionResult> {
        self.events.iter().find_map(|event| match event {
            SessionEvent::Finished(result) => Some(result),
            _ => None,
        })
    }
}

/// Commands that can be sent to a session worker.
pub enum Command {
    SelectAnswer {
        index: usize,
        reply: oneshot::Sender<Result<SessionUpdate>>,
    },
    UseLifeline {
        kind: LifelineKind,
        reply: oneshot::Sender<Result<SessionUpdate>>,
    },
    ResolveAdGate {
        rewarded: bool,
        reply: oneshot::Sender<Result<SessionUpdate>>,
    },
    Advance {
        reply: oneshot::Sender<Result<SessionUpdate>>,
    },
    /// One countdown unit, for hosts that drive time themselves.
    Tick {
        reply: oneshot::Sender<Result<SessionUpdate>>,
    },
    Snapshot {
        reply: oneshot::Sender<SessionSnapshot>,
    },
}

/// Services the worker settles a finished session against.
pub struct Completion {
    pub unlocks: Arc<UnlockStore>,
    pub leaderboard: Arc<Leaderboard>,
    pub player_name: String,
}

/// Background task that processes session commands.
pub struct SessionWorker {
    session_id: SessionId,
    session: QuizSession,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
    tick_interval: Option<Duration>,
    completion: Completion,
}

impl SessionWorker {
    pub fn new(
        session_id: SessionId,
        session: QuizSession,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
        tick_interval: Option<Duration>,
        completion: Completion,
    ) -> Self {
        Self {
            session_id,
            session,
            command_rx,
            event_bus,
            tick_interval,
            completion,
        }
    }

    /// Main worker loop. Exits once every handle has been dropped.
    pub async fn run(mut self) {
        let mut ticker = self.tick_interval.map(|period| {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            interval
        });

        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => match cmd {
                    Some(cmd) => {
                        if self.handle_command(cmd) {
                            if let Some(interval) = ticker.as_mut() {
                                interval.reset();
                            }
                        }
                    }
                    None => break,
                },
                _ = next_tick(&mut ticker) => {
                    if let Some(Err(err)) = self.on_interval() {
                        warn!(session_id = self.session_id, %err, "timer tick failed");
                    }
                }
            }
        }

        debug!(session_id = self.session_id, "session worker stopped");
    }

    /// One wall-clock countdown unit. Outside `Asking` the session is not
    /// touched and `None` is returned.
    fn on_interval(&mut self) -> Option<Result<SessionUpdate>> {
        if self.session.phase() != Phase::Asking {
            return None;
        }
        Some(self.apply(QuizSession::tick))
    }

    /// Returns true when a question was (re)asked, so the countdown restarts
    /// on a full period.
    fn handle_command(&mut self, cmd: Command) -> bool {
        let (result, reply) = match cmd {
            Command::SelectAnswer { index, reply } => {
                (self.apply(|session| session.select_answer(index)), reply)
            }
            Command::UseLifeline { kind, reply } => {
                (self.apply(|session| session.use_lifeline(kind)), reply)
            }
            Command::ResolveAdGate { rewarded, reply } => {
                (self.apply(|session| session.resolve_ad_gate(rewarded)), reply)
            }
            Command::Advance { reply } => (self.apply(QuizSession::advance), reply),
            Command::Tick { reply } => (self.apply(QuizSession::tick), reply),
            Command::Snapshot { reply } => {
                let _ = reply.send(self.session.snapshot());
                return false;
            }
        };

        let rearm = result.as_ref().is_ok_and(|update| {
            update
                .events
                .iter()
                .any(|event| matches!(event, SessionEvent::QuestionAsked { .. }))
        });
        let _ = reply.send(result);
        rearm
    }

    fn apply(
        &mut self,
        op: impl FnOnce(&mut QuizSession) -> std::result::Result<Vec<SessionEvent>, SessionError>,
    ) -> Result<SessionUpdate> {
        let events = op(&mut self.session)?;
        self.publish(&events);

        let update = SessionUpdate {
            events,
            snapshot: self.session.snapshot(),
        };
        if let Some(result) = update.finished() {
            self.complete(result);
        }
        Ok(update)
    }

    fn publish(&self, events: &[SessionEvent]) {
        for event in events {
            debug!(session_id = self.session_id, ?event, "session event");
            self.event_bus.publish(Event::Session(SessionNotice {
                session_id: self.session_id,
                event: event.clone(),
            }));
        }
    }

    /// Settlement after `Finished`. Failures are logged; the result itself
    /// has already been delivered to the player.
    fn complete(&self, result: &SessionResult) {
        info!(
            session_id = self.session_id,
            category = %result.category,
            difficulty = %result.difficulty,
            score = result.score,
            total = result.total_questions,
            percentage = result.percentage,
            points = result.points,
            coins = result.coins_earned,
            "session finished"
        );

        if let Err(err) = self.completion.unlocks.apply_result(result) {
            warn!(session_id = self.session_id, %err, "failed to apply unlock policy");
        }
        if let Err(err) = self
            .completion
            .leaderboard
            .record(&self.completion.player_name, result)
        {
            warn!(session_id = self.session_id, %err, "failed to record leaderboard entry");
        }
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(interval) => {
            interval.tick().await;
        }
        None => future::pending::<()>().await,
    }
}

//! Cloneable façade for issuing commands to a running session.
//!
//! [`SessionHandle`] hides channel plumbing and offers async helpers for each
//! player action, plus topic subscriptions on the shared event bus.
use std::collections::HashMap;

use tokio::sync::{broadcast, mpsc, oneshot};

use quiz_core::{LifelineKind, SessionSnapshot};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, SessionId, Topic};
use crate::workers::{Command, SessionUpdate};

/// Client-facing handle to one session worker.
#[derive(Clone)]
pub struct SessionHandle {
    session_id: SessionId,
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl SessionHandle {
    pub(crate) fn new(
        session_id: SessionId,
        command_tx: mpsc::Sender<Command>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            session_id,
            command_tx,
            event_bus,
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// Answer the current question with the option at `index`.
    pub async fn select_answer(&self, index: usize) -> Result<SessionUpdate> {
        self.request(|reply| Command::SelectAnswer { index, reply })
            .await?
    }

    /// Use a lifeline on the current question. A refusal (none left, already
    /// applied, time cap) comes back as a `LifelineRejected` event.
    pub async fn use_lifeline(&self, kind: LifelineKind) -> Result<SessionUpdate> {
        self.request(|reply| Command::UseLifeline { kind, reply })
            .await?
    }

    /// Feed an ad outcome into the gate directly.
    ///
    /// Most hosts should go through [`crate::Runtime::watch_ad_for_gate`],
    /// which shows the ad first.
    pub async fn resolve_ad_gate(&self, rewarded: bool) -> Result<SessionUpdate> {
        self.request(|reply| Command::ResolveAdGate { rewarded, reply })
            .await?
    }

    /// Move past a revealed answer.
    pub async fn advance(&self) -> Result<SessionUpdate> {
        self.request(|reply| Command::Advance { reply }).await?
    }

    /// Count down one unit. Only needed when the runtime was built without a
    /// tick interval.
    pub async fn tick(&self) -> Result<SessionUpdate> {
        self.request(|reply| Command::Tick { reply }).await?
    }

    /// Query the current session state (read-only snapshot)
    pub async fn snapshot(&self) -> Result<SessionSnapshot> {
        self.request(|reply| Command::Snapshot { reply }).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// Session events from every running session share the `Session` topic;
    /// filter on [`crate::SessionNotice::session_id`].
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    pub fn subscribe_multiple(&self, topics: &[Topic]) -> HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }
}

//! High-level runtime orchestrator.
//!
//! The runtime owns the player's progress, wires up command/event channels,
//! and spawns one worker per session. Clients configure it through
//! [`RuntimeBuilder`] and drive sessions through [`SessionHandle`].

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info};

use quiz_core::{
    Category, ClockOracle, Difficulty, LifelineInventory, LifelineKind, Phase, QuestionOracle,
    QuizConfig, QuizSession, RngOracle, SessionError, SessionOp, UnlockPolicy, compute_seed,
};

use crate::api::{
    AdProvider, InstantRewardAdProvider, Result, RuntimeError, SessionHandle, SessionUpdate,
};
use crate::events::{Event, EventBus, SessionNotice, SessionStarted, Topic};
use crate::leaderboard::Leaderboard;
use crate::progress::{PlayerProgress, ProgressSummary};
use crate::repository::{
    FileLeaderboardRepository, FileProgressRepository, InMemoryLeaderboard,
    InMemoryProgressRepository, LeaderboardEntry, LeaderboardFilter, LeaderboardRepository,
    ProgressRepository,
};
use crate::shop::{LifelineShop, PurchaseOutcome, ShopConfig};
use crate::workers::{Command, Completion, SessionWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub quiz: QuizConfig,
    pub shop: ShopConfig,
    /// Name stored with leaderboard entries.
    pub player_name: String,
    /// Lifelines of each kind granted to a new player.
    pub starter_lifelines: u32,
    /// Wall-clock length of one countdown unit. `None` leaves ticking to the
    /// host via [`SessionHandle::tick`].
    pub tick_interval: Option<Duration>,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            quiz: QuizConfig::default(),
            shop: ShopConfig::default(),
            player_name: "Player".to_string(),
            starter_lifelines: 1,
            tick_interval: Some(Duration::from_secs(1)),
            event_buffer_size: 100,
            command_buffer_size: 32,
        }
    }
}

/// Main runtime that hosts quiz sessions for one player.
pub struct Runtime {
    config: RuntimeConfig,
    questions: Arc<dyn QuestionOracle>,
    progress: PlayerProgress,
    leaderboard: Arc<Leaderboard>,
    shop: LifelineShop,
    ads: Arc<dyn AdProvider>,
    rng: Option<Arc<dyn RngOracle>>,
    clock: Option<Arc<dyn ClockOracle>>,
    seed: Option<u64>,
    event_bus: EventBus,
    next_session_id: AtomicU64,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Starts a session on `category` at `difficulty`.
    ///
    /// # Errors
    ///
    /// - [`RuntimeError::DifficultyLocked`] when the tier is not unlocked yet.
    /// - [`RuntimeError::EmptyQueue`] when no question matches the filter.
    pub fn start_session(&self, category: Category, difficulty: Difficulty) -> Result<SessionHandle> {
        if !self.progress.unlocks.is_playable(category, difficulty)? {
            return Err(RuntimeError::DifficultyLocked {
                category,
                difficulty,
            });
        }

        let session_id = self.next_session_id.fetch_add(1, Ordering::Relaxed);
        let seed = match self.seed {
            Some(base) => compute_seed(base, session_id, 0, 0),
            None => rand::random(),
        };

        let mut env = self.progress.session_env();
        if let Some(rng) = &self.rng {
            env = env.with_rng(rng.clone());
        }
        if let Some(clock) = &self.clock {
            env = env.with_clock(clock.clone());
        }

        let session = QuizSession::start(
            self.questions.as_ref(),
            category,
            difficulty,
            &self.config.quiz,
            env,
            seed,
        )?;

        info!(
            session_id,
            %category,
            %difficulty,
            total_questions = session.total_questions(),
            "session started"
        );
        self.event_bus.publish(Event::SessionStarted(SessionStarted {
            session_id,
            category,
            difficulty,
            total_questions: session.total_questions(),
        }));
        if let Some(event) = session.question_asked() {
            self.event_bus
                .publish(Event::Session(SessionNotice { session_id, event }));
        }

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let worker = SessionWorker::new(
            session_id,
            session,
            command_rx,
            self.event_bus.clone(),
            self.config.tick_interval,
            Completion {
                unlocks: self.progress.unlocks.clone(),
                leaderboard: self.leaderboard.clone(),
                player_name: self.config.player_name.clone(),
            },
        );
        tokio::spawn(async move {
            worker.run().await;
        });

        Ok(SessionHandle::new(
            session_id,
            command_tx,
            self.event_bus.clone(),
        ))
    }

    /// Shows a rewarded ad and feeds its outcome into the session's ad gate.
    ///
    /// # Errors
    ///
    /// - [`RuntimeError::Session`] when the session is not gated; no ad is
    ///   shown in that case.
    /// - [`RuntimeError::AdNotReady`] when the provider has nothing to show.
    pub async fn watch_ad_for_gate(&self, handle: &SessionHandle) -> Result<SessionUpdate> {
        let phase = handle.snapshot().await?.phase;
        if phase != Phase::AdGate {
            return Err(SessionError::InvalidTransition {
                operation: SessionOp::ResolveAdGate,
                phase,
            }
            .into());
        }
        if !self.ads.is_ready() {
            return Err(RuntimeError::AdNotReady);
        }

        let outcome = self.ads.show().await;
        debug!(session_id = handle.session_id(), ?outcome, "ad finished at gate");
        handle.resolve_ad_gate(outcome.is_rewarded()).await
    }

    /// Shows a rewarded ad outside a session in exchange for lifelines.
    ///
    /// Returns the new quantity, or `None` when the ad was dismissed.
    pub async fn watch_ad_for_lifeline(&self, kind: LifelineKind) -> Result<Option<u32>> {
        if !self.ads.is_ready() {
            return Err(RuntimeError::AdNotReady);
        }

        match self.ads.show().await {
            outcome if outcome.is_rewarded() => self.shop.reward_lifeline(kind).map(Some),
            outcome => {
                debug!(%kind, ?outcome, "lifeline ad not rewarded");
                Ok(None)
            }
        }
    }

    pub fn purchase(&self, kind: LifelineKind) -> Result<PurchaseOutcome> {
        self.shop.purchase(kind)
    }

    pub fn shop_config(&self) -> &ShopConfig {
        self.shop.config()
    }

    /// Coins, lifelines, and tier status per category for menus.
    pub fn progress_summary(&self) -> Result<ProgressSummary> {
        Ok(self.progress.summary(self.questions.as_ref())?)
    }

    pub fn leaderboard(&self, limit: usize, filter: LeaderboardFilter) -> Result<Vec<LeaderboardEntry>> {
        Ok(self.leaderboard.top(limit, filter)?)
    }

    pub fn ad_ready(&self) -> bool {
        self.ads.is_ready()
    }

    /// Subscribe to events from a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    questions: Option<Arc<dyn QuestionOracle>>,
    progress_repository: Option<Arc<dyn ProgressRepository>>,
    leaderboard_repository: Option<Arc<dyn LeaderboardRepository>>,
    persistence_dir: Option<PathBuf>,
    ads: Option<Arc<dyn AdProvider>>,
    rng: Option<Arc<dyn RngOracle>>,
    clock: Option<Arc<dyn ClockOracle>>,
    seed: Option<u64>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            questions: None,
            progress_repository: None,
            leaderboard_repository: None,
            persistence_dir: None,
            ads: None,
            rng: None,
            clock: None,
            seed: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Override only the engine configuration
    pub fn quiz_config(mut self, quiz: QuizConfig) -> Self {
        self.config.quiz = quiz;
        self
    }

    pub fn player_name(mut self, name: impl Into<String>) -> Self {
        self.config.player_name = name.into();
        self
    }

    pub fn tick_interval(mut self, interval: Option<Duration>) -> Self {
        self.config.tick_interval = interval;
        self
    }

    /// Set required question bank
    pub fn questions(mut self, questions: impl QuestionOracle + 'static) -> Self {
        self.questions = Some(Arc::new(questions));
        self
    }

    pub fn progress_repository(mut self, repository: Arc<dyn ProgressRepository>) -> Self {
        self.progress_repository = Some(repository);
        self
    }

    pub fn leaderboard_repository(mut self, repository: Arc<dyn LeaderboardRepository>) -> Self {
        self.leaderboard_repository = Some(repository);
        self
    }

    /// Persist progress and the leaderboard as JSON under `dir`.
    ///
    /// Explicitly set repositories take precedence. Without either, the
    /// runtime keeps everything in memory.
    pub fn persistence_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.persistence_dir = Some(dir.into());
        self
    }

    /// Set the rewarded-ad provider (default: [`InstantRewardAdProvider`])
    pub fn ad_provider(mut self, provider: impl AdProvider + 'static) -> Self {
        self.ads = Some(Arc::new(provider));
        self
    }

    /// Shared-ownership variant of [`Self::ad_provider`], for callers that keep
    /// a handle to the provider.
    pub fn ad_provider_arc(mut self, provider: Arc<dyn AdProvider>) -> Self {
        self.ads = Some(provider);
        self
    }

    pub fn rng(mut self, rng: impl RngOracle + 'static) -> Self {
        self.rng = Some(Arc::new(rng));
        self
    }

    pub fn clock(mut self, clock: impl ClockOracle + 'static) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }

    /// Derive every session seed from `seed` instead of OS randomness.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build the runtime
    ///
    /// A zero tick interval means no wall-clock timer, and a zero command
    /// buffer is raised to one.
    pub fn build(mut self) -> Result<Runtime> {
        self.config.quiz.validate()?;
        self.config.tick_interval = self.config.tick_interval.filter(|period| !period.is_zero());
        self.config.command_buffer_size = self.config.command_buffer_size.max(1);
        let questions = self.questions.ok_or(RuntimeError::MissingQuestions)?;

        let progress_repository: Arc<dyn ProgressRepository> =
            match (self.progress_repository, &self.persistence_dir) {
                (Some(repository), _) => repository,
                (None, Some(dir)) => Arc::new(FileProgressRepository::new(dir)?),
                (None, None) => Arc::new(InMemoryProgressRepository::new()),
            };
        let leaderboard_repository: Arc<dyn LeaderboardRepository> =
            match (self.leaderboard_repository, &self.persistence_dir) {
                (Some(repository), _) => repository,
                (None, Some(dir)) => Arc::new(FileLeaderboardRepository::new(dir)?),
                (None, None) => Arc::new(InMemoryLeaderboard::new()),
            };

        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);
        let progress = PlayerProgress::load(
            progress_repository,
            &event_bus,
            LifelineInventory::uniform(self.config.starter_lifelines),
            UnlockPolicy::new(self.config.quiz.unlock_threshold_percent),
        )?;
        let shop = LifelineShop::new(
            self.config.shop.clone(),
            progress.wallet.clone(),
            progress.lifelines.clone(),
            event_bus.clone(),
        );
        let leaderboard = Arc::new(Leaderboard::new(leaderboard_repository, event_bus.clone()));

        info!(
            player = %self.config.player_name,
            questions = questions.questions().len(),
            persistent = self.persistence_dir.is_some(),
            "runtime ready"
        );

        let ads: Arc<dyn AdProvider> = match self.ads {
            Some(ads) => ads,
            None => Arc::new(InstantRewardAdProvider::new()),
        };

        Ok(Runtime {
            config: self.config,
            questions,
            progress,
            leaderboard,
            shop,
            ads,
            rng: self.rng,
            clock: self.clock,
            seed: self.seed,
            event_bus,
            next_session_id: AtomicU64::new(1),
        })
    }
}

//! Line-oriented terminal frontend.
//!
//! Reads one command per line and prints plain text, so it works over any
//! terminal or pipe. While a question is on screen the prompt also listens
//! for the session's `TimerExpired` event and moves on when time runs out.

use std::future;
use std::io::Write;

use anyhow::Result;
use quiz_core::{
    Category, Difficulty, LifelineKind, LifelineRejection, Phase, SessionEvent, SessionResult,
};
use runtime::{
    Event, LeaderboardFilter, ProgressEvent, PurchaseOutcome, Runtime, RuntimeError, SessionHandle,
    SessionId, SessionNotice, SessionUpdate, Topic,
};
use strum::IntoEnumIterator;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, info};

use crate::input::{PlayInput, menu_choice};
use crate::render;

const LEADERBOARD_SIZE: usize = 10;

enum Prompted {
    Line(Option<String>),
    Expired,
}

pub struct TerminalApp<R, W> {
    runtime: Runtime,
    lines: Lines<R>,
    out: W,
}

impl<R, W> TerminalApp<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(runtime: Runtime, input: R, out: W) -> Self {
        Self {
            runtime,
            lines: input.lines(),
            out,
        }
    }

    /// Main menu loop. Returns when the player quits or input ends.
    pub async fn run(mut self) -> Result<()> {
        self.say("Welcome to Quiz!")?;

        loop {
            let summary = self.runtime.progress_summary()?;
            self.say(&format!(
                "\nCoins: {}   {}",
                summary.coins,
                render::lifelines(&summary.lifelines)
            ))?;
            self.say("  1. Play\n  2. Leaderboard\n  3. Shop\n  4. Quit")?;

            let Some(line) = self.prompt("> ").await? else {
                break;
            };
            match menu_choice(&line, 4) {
                Some(0) => {
                    if !self.play().await? {
                        break;
                    }
                }
                Some(1) => self.show_leaderboard()?,
                Some(2) => {
                    if !self.shop().await? {
                        break;
                    }
                }
                Some(3) => break,
                _ => self.say("Pick 1-4.")?,
            }
        }

        self.say("Goodbye!")?;
        Ok(())
    }

    // ===== play =====

    /// Returns false when input ended.
    async fn play(&mut self) -> Result<bool> {
        let categories: Vec<Category> = Category::iter().collect();
        self.say("\nCategory:")?;
        for (index, category) in categories.iter().enumerate() {
            let name = if category.is_wildcard() {
                "Mixed (all categories)".to_string()
            } else {
                render::title(category.as_ref())
            };
            self.say(&format!("  {}. {name}", index + 1))?;
        }

        let Some(line) = self.prompt("> ").await? else {
            return Ok(false);
        };
        let Some(category) = menu_choice(&line, categories.len()).map(|index| categories[index])
        else {
            self.say("No such category.")?;
            return Ok(true);
        };

        let summary = self.runtime.progress_summary()?;
        let Some(progress) = summary.category(category) else {
            return Ok(true);
        };
        self.say("\nDifficulty:")?;
        let threshold = self.runtime.config().quiz.unlock_threshold_percent;
        self.say(render::tiers(progress, threshold).trim_end())?;

        let Some(line) = self.prompt("> ").await? else {
            return Ok(false);
        };
        let Some(tier) = menu_choice(&line, progress.tiers.len()).map(|index| &progress.tiers[index])
        else {
            self.say("No such difficulty.")?;
            return Ok(true);
        };
        if !tier.is_playable() {
            self.say("That difficulty is not playable yet.")?;
            return Ok(true);
        }

        let difficulty = tier.difficulty;
        match self.runtime.start_session(category, difficulty) {
            Ok(handle) => self.play_session(handle, category, difficulty).await,
            Err(err) if err.is_recoverable() => {
                self.say(&err.to_string())?;
                Ok(true)
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn play_session(
        &mut self,
        handle: SessionHandle,
        category: Category,
        difficulty: Difficulty,
    ) -> Result<bool> {
        info!(session_id = handle.session_id(), %category, %difficulty, "playing session");
        let mut session_events = handle.subscribe(Topic::Session);
        let mut progress_events = self.runtime.subscribe(Topic::Progress);

        loop {
            let snapshot = handle.snapshot().await?;
            match snapshot.phase {
                Phase::Asking => {
                    drain(&mut session_events);
                    self.say(render::question(&snapshot).trim_end())?;
                    let lifelines = self.runtime.progress_summary()?.lifelines;
                    self.say(&format!("Lifelines: {}", render::lifelines(&lifelines)))?;
                    self.write_prompt("Answer (A-D), 50, skip, time, or q: ")?;

                    let prompted = tokio::select! {
                        line = self.lines.next_line() => Prompted::Line(line?),
                        () = timer_expired(&mut session_events, handle.session_id()) => Prompted::Expired,
                    };

                    let line = match prompted {
                        Prompted::Expired => {
                            self.say("\nTime's up!")?;
                            continue;
                        }
                        Prompted::Line(None) => return Ok(false),
                        Prompted::Line(Some(line)) => line,
                    };

                    let options = snapshot
                        .question
                        .as_ref()
                        .map_or(0, |view| view.options.len());
                    match PlayInput::parse(&line, options) {
                        PlayInput::Answer(index) => {
                            let outcome = handle.select_answer(index).await;
                            self.report(outcome)?;
                        }
                        PlayInput::Lifeline(kind) => {
                            let outcome = handle.use_lifeline(kind).await;
                            self.report(outcome)?;
                        }
                        PlayInput::Quit => return Ok(true),
                        PlayInput::Unknown => self.say("Type a letter, 50, skip, time, or q.")?,
                    }
                }
                Phase::AnswerRevealed => {
                    if self.prompt("Press Enter to continue ").await?.is_none() {
                        return Ok(false);
                    }
                    let outcome = handle.advance().await;
                    self.report(outcome)?;
                }
                Phase::AdGate => {
                    self.say("Watch an ad to retry this question, or use a skip.")?;
                    let Some(line) = self.prompt("[w]atch ad, [s]kip, [q]uit: ").await? else {
                        return Ok(false);
                    };
                    match line.trim().to_ascii_lowercase().as_str() {
                        "w" | "watch" => {
                            let outcome = self.runtime.watch_ad_for_gate(&handle).await;
                            self.report(outcome)?;
                        }
                        "s" | "skip" => {
                            let outcome = handle.use_lifeline(LifelineKind::Skip).await;
                            self.report(outcome)?;
                        }
                        "q" | "quit" => return Ok(true),
                        _ => self.say("Type w, s, or q.")?,
                    }
                }
                Phase::Finished => {
                    if let Some(result) = &snapshot.result {
                        self.finish(result, &mut progress_events)?;
                    }
                    return Ok(true);
                }
            }
        }
    }

    fn finish(&mut self, result: &SessionResult, progress: &mut broadcast::Receiver<Event>) -> Result<()> {
        self.say(render::result(result).trim_end())?;

        while let Ok(event) = progress.try_recv() {
            if let Event::Progress(ProgressEvent::DifficultyUnlocked { difficulty, .. }) = event {
                self.say(&format!(
                    "New tier unlocked: {}!",
                    render::title(difficulty.as_ref())
                ))?;
            }
        }
        Ok(())
    }

    /// Prints the player-facing outcome of a session command.
    ///
    /// Invalid transitions can happen when the timer expires while the
    /// player is typing; they are shown, not treated as fatal.
    fn report(&mut self, outcome: runtime::Result<SessionUpdate>) -> Result<()> {
        let update = match outcome {
            Ok(update) => update,
            Err(err @ (RuntimeError::Session(_) | RuntimeError::AdNotReady)) => {
                debug!(%err, "command refused");
                let message = match err {
                    RuntimeError::AdNotReady => "No ad is available right now.".to_string(),
                    err => err.to_string(),
                };
                return self.say(&message);
            }
            Err(err) => return Err(err.into()),
        };

        for event in &update.events {
            let message = match event {
                SessionEvent::AnswerEvaluated {
                    correct: true,
                    points,
                    bonus,
                    ..
                } if *bonus > 0 => format!("Correct! +{points} points, +{bonus} streak bonus"),
                SessionEvent::AnswerEvaluated {
                    correct: true,
                    points,
                    ..
                } => format!("Correct! +{points} points"),
                SessionEvent::AnswerEvaluated { correct: false, .. } => "Wrong answer.".to_string(),
                SessionEvent::OptionsHidden { indices } => {
                    format!("Removed {} wrong answers.", indices.len())
                }
                SessionEvent::TimeExtended { added, remaining } => {
                    format!("+{added}s ({remaining}s left)")
                }
                SessionEvent::QuestionSkipped { .. } => "Question skipped.".to_string(),
                SessionEvent::AdGateHeld => "The ad was closed early. No reward.".to_string(),
                SessionEvent::AdGateCleared => "Reward granted. Try again!".to_string(),
                SessionEvent::LifelineRejected { kind, reason } => rejection(*kind, *reason),
                _ => continue,
            };
            self.say(&message)?;
        }
        Ok(())
    }

    // ===== leaderboard =====

    fn show_leaderboard(&mut self) -> Result<()> {
        let entries = self
            .runtime
            .leaderboard(LEADERBOARD_SIZE, LeaderboardFilter::all())?;
        self.say("\n=== Leaderboard ===")?;
        self.say(render::leaderboard(&entries).trim_end())
    }

    // ===== shop =====

    /// Returns false when input ended.
    async fn shop(&mut self) -> Result<bool> {
        loop {
            let summary = self.runtime.progress_summary()?;
            self.say(&format!("\n=== Shop ===   Coins: {}", summary.coins))?;
            for (index, kind) in LifelineKind::ALL.iter().enumerate() {
                self.say(&format!(
                    "  {}. {} - {} coins (you have {})",
                    index + 1,
                    render::title(kind.as_ref()),
                    self.runtime.shop_config().price(*kind),
                    summary.lifelines.quantity(*kind),
                ))?;
            }
            let ad_item = LifelineKind::ALL.len();
            self.say(&format!(
                "  {}. Watch an ad for a free lifeline\n  {}. Back",
                ad_item + 1,
                ad_item + 2
            ))?;

            let Some(line) = self.prompt("> ").await? else {
                return Ok(false);
            };
            match menu_choice(&line, ad_item + 2) {
                Some(index) if index < ad_item => {
                    let message = match self.runtime.purchase(LifelineKind::ALL[index])? {
                        PurchaseOutcome::Purchased { kind, quantity, .. } => format!(
                            "Bought {}. You now have {quantity}.",
                            render::title(kind.as_ref())
                        ),
                        PurchaseOutcome::InsufficientCoins { price, balance, .. } => {
                            format!("Need {price} coins, you have {balance}.")
                        }
                    };
                    self.say(&message)?;
                }
                Some(index) if index == ad_item => {
                    if !self.ad_for_lifeline().await? {
                        return Ok(false);
                    }
                }
                Some(_) => return Ok(true),
                None => self.say("Pick a number from the list.")?,
            }
        }
    }

    async fn ad_for_lifeline(&mut self) -> Result<bool> {
        self.say("Which lifeline?")?;
        for (index, kind) in LifelineKind::ALL.iter().enumerate() {
            self.say(&format!("  {}. {}", index + 1, render::title(kind.as_ref())))?;
        }
        let Some(line) = self.prompt("> ").await? else {
            return Ok(false);
        };
        let Some(kind) = menu_choice(&line, LifelineKind::ALL.len()).map(|i| LifelineKind::ALL[i])
        else {
            self.say("No such lifeline.")?;
            return Ok(true);
        };

        let message = match self.runtime.watch_ad_for_lifeline(kind).await {
            Ok(Some(quantity)) => format!(
                "Reward granted. You now have {quantity} {}.",
                render::title(kind.as_ref())
            ),
            Ok(None) => "The ad was closed early. No reward.".to_string(),
            Err(RuntimeError::AdNotReady) => "No ad is available right now.".to_string(),
            Err(err) => return Err(err.into()),
        };
        self.say(&message)?;
        Ok(true)
    }

    // ===== io =====

    fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{text}")?;
        self.out.flush()?;
        Ok(())
    }

    fn write_prompt(&mut self, prompt: &str) -> Result<()> {
        write!(self.out, "{prompt}")?;
        self.out.flush()?;
        Ok(())
    }

    async fn prompt(&mut self, prompt: &str) -> Result<Option<String>> {
        self.write_prompt(prompt)?;
        Ok(self.lines.next_line().await?)
    }
}

fn rejection(kind: LifelineKind, reason: LifelineRejection) -> String {
    let name = render::title(kind.as_ref());
    match reason {
        LifelineRejection::NoneLeft => format!("No {name} left. Buy more in the shop."),
        LifelineRejection::AlreadyApplied => format!("{name} is already in effect."),
        LifelineRejection::TimeCapReached => "The timer is already at its maximum.".to_string(),
    }
}

/// Resolves when `session_id` reports an expired timer.
async fn timer_expired(events: &mut broadcast::Receiver<Event>, session_id: SessionId) {
    loop {
        match events.recv().await {
            Ok(Event::Session(SessionNotice {
                session_id: id,
                event: SessionEvent::TimerExpired { .. },
            })) if id == session_id => return,
            Ok(_) | Err(RecvError::Lagged(_)) => continue,
            Err(RecvError::Closed) => future::pending::<()>().await,
        }
    }
}

/// Drops notices left over from earlier questions.
fn drain(events: &mut broadcast::Receiver<Event>) {
    while let Ok(_) | Err(broadcast::error::TryRecvError::Lagged(_)) = events.try_recv() {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::{Question, StaticQuestionBank};

    fn runtime() -> Runtime {
        let bank = StaticQuestionBank::new(vec![
            Question::new(
                "Which planet is known as the red planet?",
                vec!["Venus".into(), "Mars".into(), "Jupiter".into(), "Saturn".into()],
                1,
                Category::Science,
                Difficulty::Rookie,
            )
            .expect("valid question"),
        ]);
        Runtime::builder()
            .questions(bank)
            .tick_interval(None)
            .player_name("Ada")
            .build()
            .expect("runtime")
    }

    async fn run_script(script: &str) -> String {
        let mut out = Vec::new();
        TerminalApp::new(runtime(), script.as_bytes(), &mut out)
            .run()
            .await
            .expect("app runs");
        String::from_utf8(out).expect("utf8 output")
    }

    #[tokio::test]
    async fn perfect_session_shows_result_and_unlock() {
        // Play → Science (3rd entry) → Rookie → B → continue → Quit
        let output = run_script("1\n3\n1\nb\n\n4\n").await;

        assert!(output.contains("Which planet is known as the red planet?"));
        assert!(output.contains("Correct! +10 points"));
        assert!(output.contains("Score: 1/1 (100%)"));
        assert!(output.contains("New tier unlocked: Amateur!"));
        assert!(output.contains("Goodbye!"));
    }

    #[tokio::test]
    async fn shop_refuses_purchase_without_coins() {
        let output = run_script("3\n1\n5\n4\n").await;
        assert!(output.contains("Need 50 coins, you have 0."));
    }

    #[tokio::test]
    async fn wrong_answer_then_ad_retry() {
        // Play → Science → Rookie → A (wrong) → watch ad → B → continue
        let output = run_script("1\n3\n1\na\nw\nb\n\n").await;

        assert!(output.contains("Wrong answer."));
        assert!(output.contains("Reward granted. Try again!"));
        assert!(output.contains("Score: 1/1 (100%)"));
    }

    #[tokio::test]
    async fn leaderboard_starts_empty_and_input_end_quits() {
        let output = run_script("2\n").await;
        assert!(output.contains("No results yet."));
        assert!(output.contains("Goodbye!"));
    }
}

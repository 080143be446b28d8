//! End-to-end session flows through the runtime: worker, ads, progress, and
//! leaderboard together.

use std::sync::Arc;

use quiz_core::{
    Category, Difficulty, FixedClock, LifelineKind, LifelineRejection, Phase, Question, QuizConfig,
    SessionEvent, SessionSnapshot, StaticQuestionBank,
};
use runtime::{
    AdOutcome, Event, LeaderboardFilter, ProgressEvent, PurchaseOutcome, Runtime, RuntimeError,
    ScriptedAdProvider, SessionHandle, TierStatus, Topic,
};

const RIGHT: &str = "right";

fn question(text: &str, category: Category, difficulty: Difficulty) -> Question {
    Question::new(
        text,
        vec!["wrong a".into(), RIGHT.into(), "wrong b".into(), "wrong c".into()],
        1,
        category,
        difficulty,
    )
    .expect("valid question")
}

fn bank() -> StaticQuestionBank {
    StaticQuestionBank::new(vec![
        question("s1", Category::Science, Difficulty::Rookie),
        question("s2", Category::Science, Difficulty::Rookie),
        question("s3", Category::Science, Difficulty::Rookie),
        question("s4", Category::Science, Difficulty::Amateur),
        question("h1", Category::History, Difficulty::Rookie),
    ])
}

fn runtime_with(ads: Arc<ScriptedAdProvider>) -> Runtime {
    Runtime::builder()
        .questions(bank())
        .tick_interval(None)
        .seed(7)
        .clock(FixedClock(1_700_000_000))
        .player_name("tester")
        .ad_provider_arc(ads)
        .build()
        .expect("runtime builds")
}

fn right_option(snapshot: &SessionSnapshot) -> usize {
    snapshot
        .question
        .as_ref()
        .and_then(|view| view.options.iter().position(|option| option == RIGHT))
        .expect("question on screen")
}

fn wrong_option(snapshot: &SessionSnapshot) -> usize {
    (right_option(snapshot) + 1) % 4
}

async fn answer_right(handle: &SessionHandle) -> Vec<SessionEvent> {
    let snapshot = handle.snapshot().await.expect("snapshot");
    let update = handle
        .select_answer(right_option(&snapshot))
        .await
        .expect("answer");
    assert_eq!(update.snapshot.phase, Phase::AnswerRevealed);
    handle.advance().await.expect("advance").events
}

#[tokio::test]
async fn perfect_run_settles_coins_unlocks_and_leaderboard() {
    let runtime = runtime_with(Arc::new(ScriptedAdProvider::new([])));
    let mut progress_rx = runtime.subscribe(Topic::Progress);

    let handle = runtime
        .start_session(Category::Science, Difficulty::Rookie)
        .expect("start");
    assert_eq!(handle.snapshot().await.expect("snapshot").total_questions, 3);

    answer_right(&handle).await;
    answer_right(&handle).await;
    let events = answer_right(&handle).await;

    let result = events
        .iter()
        .find_map(|event| match event {
            SessionEvent::Finished(result) => Some(result.clone()),
            _ => None,
        })
        .expect("finished");
    assert_eq!(result.score, 3);
    assert_eq!(result.percentage, 100);
    assert_eq!(result.timestamp, 1_700_000_000);

    let summary = runtime.progress_summary().expect("summary");
    assert_eq!(summary.coins, u64::from(result.coins_earned));
    let science = summary.category(Category::Science).expect("science");
    assert_eq!(science.tiers[1].difficulty, Difficulty::Amateur);
    assert_eq!(science.tiers[1].status, TierStatus::Unlocked);
    assert_eq!(science.tiers[2].status, TierStatus::Available);

    let board = runtime
        .leaderboard(10, LeaderboardFilter::all())
        .expect("leaderboard");
    assert_eq!(board.len(), 1);
    assert_eq!(board[0].player_name, "tester");
    assert_eq!(board[0].percentage, 100);

    let mut unlocked = false;
    let mut recorded = false;
    while let Ok(event) = progress_rx.try_recv() {
        match event {
            Event::Progress(ProgressEvent::DifficultyUnlocked {
                category,
                difficulty,
            }) => {
                assert_eq!((category, difficulty), (Category::Science, Difficulty::Amateur));
                unlocked = true;
            }
            Event::Progress(ProgressEvent::ResultRecorded(_)) => recorded = true,
            _ => {}
        }
    }
    assert!(unlocked && recorded);

    runtime
        .start_session(Category::Science, Difficulty::Amateur)
        .expect("amateur now playable");
}

#[tokio::test]
async fn locked_tier_and_empty_filter_are_refused() {
    let runtime = runtime_with(Arc::new(ScriptedAdProvider::new([])));

    let err = runtime
        .start_session(Category::Science, Difficulty::Amateur)
        .err()
        .expect("locked");
    assert!(matches!(err, RuntimeError::DifficultyLocked { .. }));
    assert!(err.is_recoverable());

    let err = runtime
        .start_session(Category::Sports, Difficulty::Rookie)
        .err()
        .expect("no sports questions");
    assert!(matches!(err, RuntimeError::EmptyQueue(_)));
}

#[tokio::test]
async fn ad_gate_holds_on_dismissal_and_retries_on_reward() {
    let ads = Arc::new(ScriptedAdProvider::new([
        AdOutcome::Dismissed,
        AdOutcome::Rewarded,
    ]));
    let runtime = runtime_with(ads.clone());
    let handle = runtime
        .start_session(Category::History, Difficulty::Rookie)
        .expect("start");

    let snapshot = handle.snapshot().await.expect("snapshot");
    let update = handle
        .select_answer(wrong_option(&snapshot))
        .await
        .expect("answer");
    assert_eq!(update.snapshot.phase, Phase::AdGate);
    assert_eq!(update.snapshot.streak, 0);

    let held = runtime.watch_ad_for_gate(&handle).await.expect("ad");
    assert_eq!(held.events, vec![SessionEvent::AdGateHeld]);
    assert_eq!(held.snapshot.phase, Phase::AdGate);

    let cleared = runtime.watch_ad_for_gate(&handle).await.expect("ad");
    assert_eq!(cleared.snapshot.phase, Phase::Asking);
    assert_eq!(cleared.snapshot.question_index, 0);
    assert!(cleared.events.contains(&SessionEvent::AdGateCleared));
    assert_eq!(ads.shown(), 2);

    let events = answer_right(&handle).await;
    assert!(matches!(events.last(), Some(SessionEvent::Finished(result)) if result.score == 1));
}

#[tokio::test]
async fn ad_gate_requires_ready_provider_and_gated_session() {
    let ads = Arc::new(ScriptedAdProvider::not_ready());
    let runtime = runtime_with(ads.clone());
    let handle = runtime
        .start_session(Category::History, Difficulty::Rookie)
        .expect("start");

    let err = runtime.watch_ad_for_gate(&handle).await.err().expect("not gated");
    assert!(matches!(err, RuntimeError::Session(_)));

    let snapshot = handle.snapshot().await.expect("snapshot");
    handle
        .select_answer(wrong_option(&snapshot))
        .await
        .expect("answer");

    let err = runtime.watch_ad_for_gate(&handle).await.err().expect("no ad");
    assert!(matches!(err, RuntimeError::AdNotReady));
    assert_eq!(ads.shown(), 0);
    assert_eq!(handle.snapshot().await.expect("snapshot").phase, Phase::AdGate);
}

#[tokio::test]
async fn manual_ticks_expire_the_question() {
    let runtime = Runtime::builder()
        .questions(bank())
        .quiz_config(QuizConfig::new().with_timing(2, 1, 3))
        .tick_interval(None)
        .seed(1)
        .build()
        .expect("runtime");
    let handle = runtime
        .start_session(Category::History, Difficulty::Rookie)
        .expect("start");

    let first = handle.tick().await.expect("tick");
    assert_eq!(first.events, vec![SessionEvent::TimerTicked { remaining: 1 }]);

    let second = handle.tick().await.expect("tick");
    assert!(second.snapshot.time_expired);
    assert_eq!(second.snapshot.phase, Phase::AdGate);

    let late = handle.tick().await.expect("late tick");
    assert!(late.events.is_empty());
}

#[tokio::test]
async fn lifelines_are_shared_with_the_shop() {
    let runtime = runtime_with(Arc::new(ScriptedAdProvider::new([AdOutcome::Rewarded])));
    let handle = runtime
        .start_session(Category::Science, Difficulty::Rookie)
        .expect("start");

    let update = handle
        .use_lifeline(LifelineKind::FiftyFifty)
        .await
        .expect("fifty-fifty");
    let view = update.snapshot.question.expect("question");
    assert_eq!(view.hidden.len(), 2);
    assert!(!view.hidden.contains(&right_option(&handle.snapshot().await.expect("snapshot"))));

    answer_right(&handle).await;
    let update = handle
        .use_lifeline(LifelineKind::FiftyFifty)
        .await
        .expect("fifty-fifty");
    assert_eq!(
        update.events,
        vec![SessionEvent::LifelineRejected {
            kind: LifelineKind::FiftyFifty,
            reason: LifelineRejection::NoneLeft,
        }]
    );

    let outcome = runtime.purchase(LifelineKind::FiftyFifty).expect("purchase");
    assert!(matches!(outcome, PurchaseOutcome::InsufficientCoins { .. }));

    let quantity = runtime
        .watch_ad_for_lifeline(LifelineKind::FiftyFifty)
        .await
        .expect("ad");
    assert_eq!(quantity, Some(1));

    let update = handle
        .use_lifeline(LifelineKind::FiftyFifty)
        .await
        .expect("fifty-fifty");
    assert!(update
        .events
        .contains(&SessionEvent::LifelineUsed { kind: LifelineKind::FiftyFifty }));
}

#[tokio::test]
async fn skip_from_ad_gate_counts_toward_total() {
    let runtime = runtime_with(Arc::new(ScriptedAdProvider::new([])));
    let handle = runtime
        .start_session(Category::History, Difficulty::Rookie)
        .expect("start");

    let snapshot = handle.snapshot().await.expect("snapshot");
    handle
        .select_answer(wrong_option(&snapshot))
        .await
        .expect("answer");

    let update = handle.use_lifeline(LifelineKind::Skip).await.expect("skip");
    let result = update.finished().expect("single question session ends").clone();
    assert_eq!(result.score, 0);
    assert_eq!(result.total_questions, 1);
    assert_eq!(result.lifelines_used, 1);
}

#[tokio::test]
async fn zero_tick_interval_disables_the_timer() {
    let runtime = Runtime::builder()
        .questions(bank())
        .tick_interval(Some(std::time::Duration::ZERO))
        .seed(7)
        .build()
        .expect("runtime builds");
    assert_eq!(runtime.config().tick_interval, None);

    let handle = runtime
        .start_session(Category::Science, Difficulty::Rookie)
        .expect("start");
    let snapshot = handle.snapshot().await.expect("worker is alive");
    assert_eq!(snapshot.phase, Phase::Asking);

    let update = handle
        .select_answer(right_option(&snapshot))
        .await
        .expect("answer");
    assert_eq!(update.snapshot.phase, Phase::AnswerRevealed);
}

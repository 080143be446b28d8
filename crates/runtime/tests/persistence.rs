//! Progress written by one runtime is visible to the next one on the same
//! save directory.

use quiz_core::{Category, Difficulty, LifelineKind, Question, SessionEvent, StaticQuestionBank};
use runtime::{LeaderboardFilter, Runtime, TierStatus};
use tempfile::TempDir;

fn bank() -> StaticQuestionBank {
    StaticQuestionBank::new(vec![
        Question::new(
            "Which planet is known as the red planet?",
            vec!["Venus".into(), "Mars".into(), "Jupiter".into()],
            1,
            Category::Science,
            Difficulty::Rookie,
        )
        .expect("valid question"),
    ])
}

fn runtime_at(dir: &TempDir) -> Runtime {
    Runtime::builder()
        .questions(bank())
        .tick_interval(None)
        .persistence_dir(dir.path())
        .build()
        .expect("runtime builds")
}

#[tokio::test]
async fn progress_survives_restart() {
    let dir = TempDir::new().expect("temp dir");

    let coins = {
        let runtime = runtime_at(&dir);
        let handle = runtime
            .start_session(Category::Science, Difficulty::Rookie)
            .expect("start");

        handle
            .use_lifeline(LifelineKind::ExtraTime)
            .await
            .expect("extra time");
        handle.select_answer(1).await.expect("answer");
        let update = handle.advance().await.expect("advance");
        assert!(matches!(update.events.last(), Some(SessionEvent::Finished(_))));

        runtime.progress_summary().expect("summary").coins
    };
    assert!(coins > 0);

    let runtime = runtime_at(&dir);
    let summary = runtime.progress_summary().expect("summary");
    assert_eq!(summary.coins, coins);
    assert_eq!(summary.lifelines.quantity(LifelineKind::ExtraTime), 0);
    assert_eq!(summary.lifelines.quantity(LifelineKind::Skip), 1);

    let science = summary.category(Category::Science).expect("science");
    assert_eq!(science.tiers[1].status, TierStatus::Unlocked);

    let board = runtime
        .leaderboard(5, LeaderboardFilter::all().category(Category::Science))
        .expect("leaderboard");
    assert_eq!(board.len(), 1);
    assert_eq!(board[0].score, 1);
}

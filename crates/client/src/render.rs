//! Plain-text screens.

use std::fmt::Write;

use chrono::{DateTime, Local};
use quiz_core::{LifelineInventory, LifelineKind, SessionResult, SessionSnapshot};
use runtime::{CategoryProgress, LeaderboardEntry, TierStatus};

use crate::input::option_label;

/// `fifty_fifty` → `Fifty Fifty`.
pub fn title(name: &str) -> String {
    name.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn question(snapshot: &SessionSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "\nQuestion {}/{}  [{} · {}]  {}s left",
        snapshot.question_number(),
        snapshot.total_questions,
        title(snapshot.category.as_ref()),
        title(snapshot.difficulty.as_ref()),
        snapshot.remaining_seconds,
    );
    let _ = writeln!(
        out,
        "Score {}  Points {}  Streak {} (x{})",
        snapshot.score, snapshot.points, snapshot.streak, snapshot.multiplier,
    );

    if let Some(view) = &snapshot.question {
        let _ = writeln!(out, "\n{}", view.text);
        for (index, option) in view.options.iter().enumerate() {
            let label = option_label(index);
            if view.is_hidden(index) {
                let _ = writeln!(out, "  {label}) ----");
            } else {
                let _ = writeln!(out, "  {label}) {option}");
            }
        }
    }
    out
}

pub fn lifelines(inventory: &LifelineInventory) -> String {
    LifelineKind::ALL
        .iter()
        .map(|kind| format!("{} x{}", title(kind.as_ref()), inventory.quantity(*kind)))
        .collect::<Vec<_>>()
        .join("  ")
}

pub fn result(result: &SessionResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n=== Session complete ===");
    let _ = writeln!(
        out,
        "{} · {}",
        title(result.category.as_ref()),
        title(result.difficulty.as_ref())
    );
    let _ = writeln!(
        out,
        "Score: {}/{} ({}%)",
        result.score, result.total_questions, result.percentage
    );
    let _ = writeln!(out, "Points: {}  Best streak: {}", result.points, result.best_streak);
    let _ = writeln!(
        out,
        "Coins earned: {}  Lifelines used: {}",
        result.coins_earned, result.lifelines_used
    );
    if result.is_perfect() {
        let _ = writeln!(out, "Perfect run!");
    }
    out
}

/// Unlock ladder for one category. Locked tiers are listed but not numbered.
pub fn tiers(progress: &CategoryProgress, threshold_percent: u32) -> String {
    let mut out = String::new();
    for (index, tier) in progress.tiers.iter().enumerate() {
        let name = title(tier.difficulty.as_ref());
        let line = match tier.status {
            TierStatus::Unlocked if tier.questions == 0 => format!("  -  {name} (no questions)"),
            TierStatus::Unlocked => format!("  {}. {name} ({} questions)", index + 1, tier.questions),
            TierStatus::Available => format!("  -  {name} (score {threshold_percent}%+ on the tier before)"),
            TierStatus::Locked => format!("  -  {name} (locked)"),
        };
        let _ = writeln!(out, "{line}");
    }
    out
}

pub fn leaderboard(entries: &[LeaderboardEntry]) -> String {
    if entries.is_empty() {
        return "No results yet.\n".to_string();
    }

    let mut out = String::new();
    for (rank, entry) in entries.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>2}. {:<12} {:>3}%  {:>5} pts  {:>2}/{:<2}  {} · {}  {}",
            rank + 1,
            entry.player_name,
            entry.percentage,
            entry.points,
            entry.score,
            entry.total_questions,
            title(entry.category.as_ref()),
            title(entry.difficulty.as_ref()),
            timestamp(entry.timestamp),
        );
    }
    out
}

/// Local date and time for a Unix timestamp.
pub fn timestamp(seconds: u64) -> String {
    i64::try_from(seconds)
        .ok()
        .and_then(|seconds| DateTime::from_timestamp(seconds, 0))
        .map(|utc| utc.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::{Category, Difficulty, Phase, QuestionView};
    use runtime::TierProgress;

    fn snapshot() -> SessionSnapshot {
        SessionSnapshot {
            phase: Phase::Asking,
            category: Category::Science,
            difficulty: Difficulty::Rookie,
            question_index: 0,
            total_questions: 5,
            question: Some(QuestionView {
                text: "Which planet is red?".into(),
                options: vec!["Venus".into(), "Mars".into(), "Earth".into(), "Saturn".into()],
                hidden: vec![0, 3],
                correct_index: None,
            }),
            selected_answer: None,
            time_expired: false,
            remaining_seconds: 30,
            score: 0,
            points: 0,
            bonus_points: 0,
            pending_coins: 0,
            streak: 0,
            multiplier: 1,
            result: None,
        }
    }

    #[test]
    fn titles_snake_case_names() {
        assert_eq!(title("fifty_fifty"), "Fifty Fifty");
        assert_eq!(title("science"), "Science");
    }

    #[test]
    fn hidden_options_are_masked() {
        let text = question(&snapshot());
        assert!(text.contains("Question 1/5"));
        assert!(text.contains("B) Mars"));
        assert!(text.contains("A) ----"));
        assert!(!text.contains("Saturn"));
    }

    #[test]
    fn locked_tiers_are_not_numbered() {
        let progress = CategoryProgress {
            category: Category::History,
            tiers: vec![
                TierProgress {
                    difficulty: Difficulty::Rookie,
                    status: TierStatus::Unlocked,
                    questions: 4,
                },
                TierProgress {
                    difficulty: Difficulty::Amateur,
                    status: TierStatus::Available,
                    questions: 3,
                },
            ],
        };
        let text = tiers(&progress, 70);
        assert!(text.contains("1. Rookie (4 questions)"));
        assert!(text.contains("-  Amateur (score 70%+"));
    }

    #[test]
    fn out_of_range_timestamp_renders_placeholder() {
        assert_eq!(timestamp(u64::MAX), "-");
        assert_ne!(timestamp(1_700_000_000), "-");
    }
}

//! Filtered, shuffled question sequence for one session.

use crate::env::{RngOracle, compute_seed};
use crate::error::{ErrorSeverity, QuizError};

use super::{Category, Difficulty, Question};

/// Seed context reserved for queue shuffling.
const SHUFFLE_CONTEXT: u32 = 0x5155_4555;

/// Ordered questions for a single session.
///
/// Built once; the cursor only moves forward and the queue cannot be rewound.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionQueue {
    questions: Vec<Question>,
    index: usize,
    category: Category,
    difficulty: Difficulty,
}

impl QuestionQueue {
    /// Filters `all` by exact difficulty and by category (`All` matches every
    /// category), shuffles the survivors, and optionally truncates to `limit`.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Empty`] when nothing matches the filter.
    pub fn build(
        all: &[Question],
        category: Category,
        difficulty: Difficulty,
        rng: &dyn RngOracle,
        seed: u64,
        limit: Option<usize>,
    ) -> Result<Self, QueueError> {
        let mut questions: Vec<Question> = all
            .iter()
            .filter(|question| question.difficulty == difficulty)
            .filter(|question| category.matches(question.category))
            .cloned()
            .collect();

        if questions.is_empty() {
            return Err(QueueError::Empty {
                category,
                difficulty,
            });
        }

        // Fisher-Yates, one independent roll per position.
        for position in (1..questions.len()).rev() {
            let roll_seed = compute_seed(seed, position as u64, 0, SHUFFLE_CONTEXT);
            let swap_with = rng.range(roll_seed, 0, position as u32) as usize;
            questions.swap(position, swap_with);
        }

        if let Some(limit) = limit {
            questions.truncate(limit.max(1));
        }

        Ok(Self {
            questions,
            index: 0,
            category,
            difficulty,
        })
    }

    /// Wraps an already ordered list without filtering or shuffling.
    pub fn from_ordered(
        questions: Vec<Question>,
        category: Category,
        difficulty: Difficulty,
    ) -> Result<Self, QueueError> {
        if questions.is_empty() {
            return Err(QueueError::Empty {
                category,
                difficulty,
            });
        }
        Ok(Self {
            questions,
            index: 0,
            category,
            difficulty,
        })
    }

    /// Question under the cursor, or `None` once exhausted.
    pub fn current(&self) -> Option<&Question> {
        self.questions.get(self.index)
    }

    /// Moves the cursor forward. Has no effect once exhausted.
    pub fn advance(&mut self) {
        if self.index < self.questions.len() {
            self.index += 1;
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 == self.questions.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.index >= self.questions.len()
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum QueueError {
    #[error("no {difficulty} questions available for category {category}")]
    Empty {
        category: Category,
        difficulty: Difficulty,
    },
}

impl QuizError for QueueError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Empty { .. } => "QUEUE_EMPTY",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PcgRng;

    fn question(text: &str, category: Category, difficulty: Difficulty) -> Question {
        Question::new(
            text,
            vec!["a".into(), "b".into(), "c".into(), "d".into()],
            0,
            category,
            difficulty,
        )
        .unwrap()
    }

    fn bank() -> Vec<Question> {
        vec![
            question("s1", Category::Science, Difficulty::Rookie),
            question("s2", Category::Science, Difficulty::Rookie),
            question("s3", Category::Science, Difficulty::Amateur),
            question("h1", Category::History, Difficulty::Rookie),
            question("h2", Category::History, Difficulty::Pro),
        ]
    }

    #[test]
    fn filters_by_category_and_exact_difficulty() {
        let queue = QuestionQueue::build(
            &bank(),
            Category::Science,
            Difficulty::Rookie,
            &PcgRng,
            7,
            None,
        )
        .unwrap();

        assert_eq!(queue.len(), 2);
        let mut texts: Vec<_> = queue.questions.iter().map(|q| q.text.as_str()).collect();
        texts.sort_unstable();
        assert_eq!(texts, vec!["s1", "s2"]);
    }

    #[test]
    fn wildcard_category_keeps_every_category() {
        let queue =
            QuestionQueue::build(&bank(), Category::All, Difficulty::Rookie, &PcgRng, 1, None)
                .unwrap();
        assert_eq!(queue.len(), 3);
    }

    #[test]
    fn empty_filter_is_reported() {
        let result =
            QuestionQueue::build(&bank(), Category::Sports, Difficulty::Rookie, &PcgRng, 1, None);
        assert_eq!(
            result,
            Err(QueueError::Empty {
                category: Category::Sports,
                difficulty: Difficulty::Rookie
            })
        );
    }

    #[test]
    fn shuffle_is_deterministic_per_seed_and_keeps_every_question() {
        let many: Vec<Question> = (0..12)
            .map(|n| question(&format!("q{n}"), Category::General, Difficulty::Pro))
            .collect();

        let first =
            QuestionQueue::build(&many, Category::General, Difficulty::Pro, &PcgRng, 99, None)
                .unwrap();
        let second =
            QuestionQueue::build(&many, Category::General, Difficulty::Pro, &PcgRng, 99, None)
                .unwrap();
        assert_eq!(first, second);

        let mut texts: Vec<_> = first.questions.iter().map(|q| q.text.clone()).collect();
        texts.sort();
        let mut expected: Vec<_> = many.iter().map(|q| q.text.clone()).collect();
        expected.sort();
        assert_eq!(texts, expected);
    }

    #[test]
    fn limit_truncates_after_shuffle() {
        let queue = QuestionQueue::build(
            &bank(),
            Category::All,
            Difficulty::Rookie,
            &PcgRng,
            3,
            Some(2),
        )
        .unwrap();
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn exhaustion_after_n_advances() {
        let mut queue =
            QuestionQueue::build(&bank(), Category::All, Difficulty::Rookie, &PcgRng, 5, None)
                .unwrap();
        let n = queue.len();
        let mut last_seen = 0;

        for step in 0..n {
            assert!(!queue.is_exhausted());
            assert!(queue.current().is_some());
            if queue.is_last() {
                last_seen += 1;
                assert_eq!(step, n - 1);
            }
            queue.advance();
        }

        assert!(queue.is_exhausted());
        assert!(queue.current().is_none());
        assert_eq!(last_seen, 1);

        queue.advance();
        assert_eq!(queue.index(), n);
    }
}

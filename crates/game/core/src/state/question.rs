//! Immutable multiple-choice question.

use crate::error::{ErrorSeverity, QuizError};

use super::{Category, Difficulty};

/// A multiple-choice question supplied by the question provider.
///
/// Never mutated once created. Use [`Question::new`] to get a validated value;
/// deserialised questions should be checked with [`Question::validate`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Question {
    pub text: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    pub category: Category,
    pub difficulty: Difficulty,
}

impl Question {
    pub const MIN_OPTIONS: usize = 2;

    pub fn new(
        text: impl Into<String>,
        options: Vec<String>,
        correct_index: usize,
        category: Category,
        difficulty: Difficulty,
    ) -> Result<Self, QuestionError> {
        let question = Self {
            text: text.into(),
            options,
            correct_index,
            category,
            difficulty,
        };
        question.validate()?;
        Ok(question)
    }

    /// Checks the structural invariants of a question.
    pub fn validate(&self) -> Result<(), QuestionError> {
        if self.text.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }
        if self.options.len() < Self::MIN_OPTIONS {
            return Err(QuestionError::TooFewOptions(self.options.len()));
        }
        if self.correct_index >= self.options.len() {
            return Err(QuestionError::CorrectIndexOutOfRange {
                index: self.correct_index,
                options: self.options.len(),
            });
        }
        if self.category.is_wildcard() {
            return Err(QuestionError::WildcardCategory);
        }
        Ok(())
    }

    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    pub fn is_correct(&self, index: usize) -> bool {
        index == self.correct_index
    }

    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_index]
    }

    /// Indices of every wrong option, in display order.
    pub fn incorrect_indices(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.options.len()).filter(move |&index| index != self.correct_index)
    }
}

/// Structural problems with a question definition.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum QuestionError {
    #[error("question text is empty")]
    EmptyText,

    #[error("question needs at least 2 options, found {0}")]
    TooFewOptions(usize),

    #[error("correct index {index} is out of range for {options} options")]
    CorrectIndexOutOfRange { index: usize, options: usize },

    #[error("questions cannot be tagged with the `all` category")]
    WildcardCategory,
}

impl QuizError for QuestionError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyText => "QUESTION_EMPTY_TEXT",
            Self::TooFewOptions(_) => "QUESTION_TOO_FEW_OPTIONS",
            Self::CorrectIndexOutOfRange { .. } => "QUESTION_CORRECT_INDEX_OUT_OF_RANGE",
            Self::WildcardCategory => "QUESTION_WILDCARD_CATEGORY",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|label| label.to_string()).collect()
    }

    #[test]
    fn accepts_well_formed_question() {
        let question = Question::new(
            "2 + 2?",
            options(&["3", "4", "5", "22"]),
            1,
            Category::Science,
            Difficulty::Rookie,
        )
        .unwrap();

        assert!(question.is_correct(1));
        assert_eq!(question.correct_option(), "4");
        assert_eq!(question.incorrect_indices().collect::<Vec<_>>(), vec![0, 2, 3]);
    }

    #[test]
    fn rejects_single_option() {
        let result = Question::new(
            "Only one?",
            options(&["yes"]),
            0,
            Category::General,
            Difficulty::Rookie,
        );
        assert_eq!(result, Err(QuestionError::TooFewOptions(1)));
    }

    #[test]
    fn rejects_out_of_range_answer() {
        let result = Question::new(
            "Pick",
            options(&["a", "b"]),
            2,
            Category::General,
            Difficulty::Rookie,
        );
        assert!(matches!(
            result,
            Err(QuestionError::CorrectIndexOutOfRange { index: 2, options: 2 })
        ));
    }

    #[test]
    fn rejects_wildcard_tag() {
        let result = Question::new("Pick", options(&["a", "b"]), 0, Category::All, Difficulty::Pro);
        assert_eq!(result, Err(QuestionError::WildcardCategory));
    }
}

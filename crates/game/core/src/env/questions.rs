//! Question provider contract.

use crate::state::Question;

/// Supplies the full question bank. Loaded once per process; the engine only
/// reads it to build a [`crate::state::QuestionQueue`].
pub trait QuestionOracle: Send + Sync {
    fn questions(&self) -> &[Question];
}

/// Question bank held in memory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StaticQuestionBank {
    questions: Vec<Question>,
}

impl StaticQuestionBank {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

impl QuestionOracle for StaticQuestionBank {
    fn questions(&self) -> &[Question] {
        &self.questions
    }
}

//! Question bank loader.

use std::collections::BTreeMap;
use std::path::Path;

use quiz_core::{Category, Difficulty, Question};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Question bank structure for RON files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestionCatalog {
    pub questions: Vec<Question>,
}

impl QuestionCatalog {
    /// Number of questions per (category, difficulty) pair.
    pub fn counts(&self) -> BTreeMap<(Category, Difficulty), usize> {
        let mut counts = BTreeMap::new();
        for question in &self.questions {
            *counts
                .entry((question.category, question.difficulty))
                .or_insert(0) += 1;
        }
        counts
    }
}

/// Loader for the question bank from RON files.
pub struct QuestionLoader;

impl QuestionLoader {
    /// Load the question bank from a RON file.
    ///
    /// Every question is validated; the first malformed entry fails the whole
    /// load with its position in the file.
    pub fn load(path: &Path) -> LoadResult<Vec<Question>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse and validate a question bank from a RON string.
    pub fn parse(content: &str) -> LoadResult<Vec<Question>> {
        let catalog: QuestionCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse question bank RON: {}", e))?;

        for (position, question) in catalog.questions.iter().enumerate() {
            question.validate().map_err(|e| {
                anyhow::anyhow!("Invalid question #{} ({:?}): {}", position, question.text, e)
            })?;
        }

        Ok(catalog.questions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BANK: &str = r#"(
        questions: [
            (
                text: "What is H2O?",
                options: ["Water", "Salt", "Air", "Iron"],
                correct_index: 0,
                category: Science,
                difficulty: Rookie,
            ),
            (
                text: "Who wrote Hamlet?",
                options: ["Marlowe", "Shakespeare"],
                correct_index: 1,
                category: Literature,
                difficulty: Amateur,
            ),
        ],
    )"#;

    #[test]
    fn parses_bank() {
        let questions = QuestionLoader::parse(BANK).expect("valid bank");
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[1].correct_option(), "Shakespeare");
        assert_eq!(questions[0].category, Category::Science);
    }

    #[test]
    fn rejects_out_of_range_answer() {
        let bank = r#"(questions: [(
            text: "Broken",
            options: ["a", "b"],
            correct_index: 2,
            category: General,
            difficulty: Rookie,
        )])"#;
        let err = QuestionLoader::parse(bank).expect_err("invalid");
        assert!(err.to_string().contains("Invalid question #0"));
    }

    #[test]
    fn rejects_wildcard_category() {
        let bank = r#"(questions: [(
            text: "Where?",
            options: ["a", "b"],
            correct_index: 0,
            category: All,
            difficulty: Rookie,
        )])"#;
        assert!(QuestionLoader::parse(bank).is_err());
    }

    #[test]
    fn counts_group_by_filter() {
        let catalog = QuestionCatalog {
            questions: QuestionLoader::parse(BANK).expect("valid bank"),
        };
        let counts = catalog.counts();
        assert_eq!(counts.get(&(Category::Science, Difficulty::Rookie)), Some(&1));
        assert_eq!(counts.get(&(Category::History, Difficulty::Rookie)), None);
    }
}

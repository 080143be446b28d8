//! Content factory for loading quiz data from a directory.

use std::path::{Path, PathBuf};

use quiz_core::{QuizConfig, StaticQuestionBank};

use crate::loaders::{ConfigLoader, LoadResult, QuestionLoader};

/// Content factory that loads all quiz content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// └── questions.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub const CONFIG_FILE: &'static str = "config.toml";
    pub const QUESTIONS_FILE: &'static str = "questions.ron";

    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load engine configuration from `config.toml`.
    ///
    /// A missing file yields the engine defaults.
    pub fn load_config(&self) -> LoadResult<QuizConfig> {
        let path = self.data_dir.join(Self::CONFIG_FILE);
        if !path.exists() {
            return Ok(QuizConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the question bank from `questions.ron`.
    pub fn load_question_bank(&self) -> LoadResult<StaticQuestionBank> {
        let path = self.data_dir.join(Self::QUESTIONS_FILE);
        let questions = QuestionLoader::load(&path)?;
        if questions.is_empty() {
            anyhow::bail!("Question bank {} contains no questions", path.display());
        }
        Ok(StaticQuestionBank::new(questions))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::QuestionOracle;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn loads_from_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("config.toml"), "question_seconds = 20\n")
            .expect("write config");
        std::fs::write(
            dir.path().join("questions.ron"),
            r#"(questions: [(
                text: "2 + 2?",
                options: ["3", "4"],
                correct_index: 1,
                category: General,
                difficulty: Rookie,
            )])"#,
        )
        .expect("write questions");

        let factory = ContentFactory::new(dir.path());
        assert_eq!(factory.load_config().expect("config").question_seconds, 20);
        assert_eq!(factory.load_question_bank().expect("bank").questions().len(), 1);
    }

    #[test]
    fn missing_config_uses_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let factory = ContentFactory::new(dir.path());
        assert_eq!(factory.load_config().expect("defaults"), QuizConfig::default());
        assert!(factory.load_question_bank().is_err());
    }
}

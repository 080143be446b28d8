//! Engine configuration loader.

use std::path::Path;

use quiz_core::QuizConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`QuizConfig`] from TOML files.
///
/// Missing keys fall back to the engine defaults; the loaded value is
/// validated before it is returned.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate config data from a TOML file.
    pub fn load(path: &Path) -> LoadResult<QuizConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse and validate config data from a TOML string.
    pub fn parse(content: &str) -> LoadResult<QuizConfig> {
        let config: QuizConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        config
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid quiz config: {}", e))?;

        Ok(config)
    }
}

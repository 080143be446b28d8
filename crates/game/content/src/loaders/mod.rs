//! Content loaders for reading quiz data from files.
//!
//! Loaders turn RON/TOML files into validated quiz-core values.

pub mod config;
pub mod factory;
pub mod questions;

pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use questions::{QuestionCatalog, QuestionLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

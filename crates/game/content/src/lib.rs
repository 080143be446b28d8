//! Data-driven quiz content and loaders.
//!
//! This crate houses the shipped question bank and engine tuning, and provides
//! loaders for the RON/TOML data files:
//! - Question bank (data-driven via RON)
//! - Engine configuration (data-driven via TOML)
//!
//! Content is consumed through the `QuestionOracle` and never appears in
//! session state. All loaders use quiz-core types directly with serde.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, QuestionCatalog, QuestionLoader, LoadResult};

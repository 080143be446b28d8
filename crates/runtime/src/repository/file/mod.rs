//! File-based repository implementations.
//!
//! Every document is pretty-printed JSON written to a temp file and renamed
//! into place, so a crash mid-write never leaves a truncated file behind.

mod leaderboard;
mod progress;

pub use leaderboard::FileLeaderboardRepository;
pub use progress::FileProgressRepository;

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::repository::{RepositoryError, Result};

/// Reads a JSON document; `None` when the file does not exist yet.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }

    let bytes = fs::read(path)?;
    let value = serde_json::from_slice(&bytes).map_err(|e| {
        RepositoryError::CorruptedData(format!("{}: {}", path.display(), e))
    })?;

    tracing::debug!("Loaded {}", path.display());
    Ok(Some(value))
}

/// Writes a JSON document atomically (temp file + rename).
pub(crate) fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let temp_path = path.with_extension("json.tmp");
    let bytes = serde_json::to_vec_pretty(value)?;

    fs::write(&temp_path, bytes)?;
    fs::rename(&temp_path, path)?;

    tracing::debug!("Saved {}", path.display());
    Ok(())
}

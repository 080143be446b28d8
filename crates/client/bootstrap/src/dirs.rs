//! Platform-specific directory utilities
//!
//! Follows platform conventions for cache and data directories, and locates
//! the shipped content directory for development and installed layouts.

use std::env;
use std::path::{Path, PathBuf};

const APPLICATION: &str = "quiz";

/// Relative location of the shipped content inside the workspace.
pub const CONTENT_DIR: &str = "crates/game/content/data";

/// Get the platform-specific log directory
///
/// - macOS: `~/Library/Caches/quiz/logs`
/// - Linux: `~/.cache/quiz/logs` (or `$XDG_CACHE_HOME/quiz/logs`)
/// - Windows: `%LOCALAPPDATA%\quiz\cache\logs`
/// - Fallback: `/tmp/quiz/logs`
pub fn log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", APPLICATION)
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| env::temp_dir().join(APPLICATION))
        .join("logs")
}

/// Get the platform-specific save directory
///
/// - macOS: `~/Library/Application Support/quiz`
/// - Linux: `~/.local/share/quiz` (or `$XDG_DATA_HOME/quiz`)
/// - Windows: `%APPDATA%\quiz\data`
/// - Fallback: `./save_data`
pub fn save_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", APPLICATION)
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./save_data"))
}

/// Locate the content directory when `QUIZ_DATA_DIR` is not set.
///
/// Tries, in order, the workspace layout relative to the executable
/// (`target/<profile>/quiz`) and then relative to the current directory.
pub fn content_dir() -> PathBuf {
    let from_exe = env::current_exe().ok().and_then(|exe| {
        exe.ancestors()
            .skip(1)
            .map(|dir| dir.join(CONTENT_DIR))
            .find(|candidate| candidate.is_dir())
    });

    from_exe.unwrap_or_else(|| {
        env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(CONTENT_DIR)
    })
}

/// True when `dir` looks like a content directory.
pub fn has_content(dir: &Path) -> bool {
    dir.join("questions.ron").is_file()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_dir_ends_in_logs() {
        assert!(log_dir().ends_with("logs"));
    }

    #[test]
    fn content_detection_requires_question_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        assert!(!has_content(dir.path()));

        std::fs::write(dir.path().join("questions.ron"), "[]").expect("write");
        assert!(has_content(dir.path()));
    }
}

//! Client configuration structures and loaders.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::dirs;

/// Configuration required to bootstrap a client runtime and frontend.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Directory holding `questions.ron` and `config.toml`.
    pub data_dir: PathBuf,
    pub player_name: String,
    pub enable_persistence: bool,
    /// Where progress and the leaderboard are saved when persistence is on.
    pub save_dir: Option<PathBuf>,
    /// Milliseconds per countdown unit. Zero disables the background timer.
    pub tick_millis: u64,
    /// Names the log directory; generated from the start time when absent.
    pub session_id: Option<String>,
    pub channels: ChannelConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            data_dir: dirs::content_dir(),
            player_name: "Player".to_string(),
            enable_persistence: true,
            save_dir: None,
            tick_millis: 1_000,
            session_id: None,
            channels: ChannelConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `QUIZ_DATA_DIR` - Content directory (default: discovered from the workspace layout)
    /// - `QUIZ_PLAYER_NAME` - Name recorded on the leaderboard (default: "Player")
    /// - `QUIZ_PERSISTENCE` - Save progress between runs (default: true)
    /// - `QUIZ_SAVE_DIR` - Save directory (default: platform-specific)
    /// - `QUIZ_TICK_MILLIS` - Countdown unit in milliseconds, 0 to disable (default: 1000)
    /// - `QUIZ_SESSION_ID` - Log directory name (default: auto-generated)
    /// - `QUIZ_COMMAND_BUFFER` - Session command queue size (default: 32)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("QUIZ_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }

        if let Ok(name) = env::var("QUIZ_PLAYER_NAME") {
            let name = name.trim();
            if !name.is_empty() {
                config.player_name = name.to_string();
            }
        }

        if let Some(enable) = read_flag("QUIZ_PERSISTENCE") {
            config.enable_persistence = enable;
        }

        config.save_dir = env::var("QUIZ_SAVE_DIR").ok().map(PathBuf::from);

        if let Some(millis) = read_env::<u64>("QUIZ_TICK_MILLIS") {
            config.tick_millis = millis;
        }

        config.session_id = env::var("QUIZ_SESSION_ID").ok();

        if let Some(capacity) = read_env::<usize>("QUIZ_COMMAND_BUFFER") {
            config.channels.command_buffer = capacity.max(1);
        }

        config
    }

    pub fn tick_interval(&self) -> Option<Duration> {
        (self.tick_millis > 0).then(|| Duration::from_millis(self.tick_millis))
    }

    /// Save directory to use, or `None` when persistence is off.
    pub fn resolved_save_dir(&self) -> Option<PathBuf> {
        self.enable_persistence
            .then(|| self.save_dir.clone().unwrap_or_else(dirs::save_dir))
    }
}

#[derive(Clone, Debug)]
pub struct ChannelConfig {
    pub command_buffer: usize,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self { command_buffer: 32 }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

/// Boolean variables accept `1/0`, `true/false`, `yes/no`, and `on/off`.
/// A variable that is set but empty counts as enabled.
fn read_flag(key: &str) -> Option<bool> {
    parse_flag(&env::var(key).ok()?)
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

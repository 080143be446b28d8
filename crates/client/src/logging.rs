//! File logging so the terminal stays clean for play.
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Installs the global subscriber writing to `<log_dir>/<session>/client.log`.
///
/// `RUST_LOG` overrides the default `info` level. The returned guard flushes
/// the non-blocking writer on drop and must live until the program exits.
pub fn setup_logging(session_id: Option<&str>) -> Result<(WorkerGuard, PathBuf)> {
    let session_id = session_id
        .map(str::to_string)
        .unwrap_or_else(|| format!("session_{}", chrono::Local::now().format("%Y%m%d_%H%M%S")));

    let session_log_dir = client_bootstrap::dirs::log_dir().join(&session_id);
    std::fs::create_dir_all(&session_log_dir).with_context(|| {
        format!("Failed to create log directory {}", session_log_dir.display())
    })?;

    let file_appender = tracing_appender::rolling::never(&session_log_dir, "client.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    let log_file = session_log_dir.join("client.log");
    tracing::info!(session = %session_id, log = %log_file.display(), "logging initialized");

    Ok((guard, log_file))
}

//! Quiz game client binary.
//!
//! ```bash
//! # Play with the shipped questions
//! cargo run -p quiz-client
//!
//! # No countdown, no save files
//! QUIZ_TICK_MILLIS=0 QUIZ_PERSISTENCE=false cargo run -p quiz-client
//! ```

use anyhow::Result;
use client_bootstrap::{ClientConfig, RuntimeBuilder};
use quiz_client::{TerminalApp, logging};
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // 1. Load configuration from environment
    let config = ClientConfig::from_env();

    // 2. Setup logging
    let (_guard, log_file) = logging::setup_logging(config.session_id.as_deref())?;

    tracing::info!("Starting quiz client");
    tracing::info!(player = %config.player_name, persistence = config.enable_persistence, "client config");

    // 3. Build Runtime
    let setup = RuntimeBuilder::new(config).build()?;
    tracing::info!("Runtime built successfully");

    // 4. Hand control to the terminal frontend
    let input = BufReader::new(tokio::io::stdin());
    TerminalApp::new(setup.runtime, input, std::io::stdout())
        .run()
        .await?;

    tracing::info!(log = %log_file.display(), "Client shutdown complete");
    Ok(())
}

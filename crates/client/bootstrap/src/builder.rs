//! Builds the runtime and config bundle used by front-ends.
use anyhow::{Context, Result, bail};
use quiz_content::ContentFactory;
use runtime::{Runtime, RuntimeConfig};
use tracing::{debug, info};

use crate::config::ClientConfig;
use crate::dirs;

/// Builder that assembles content, persistence, and configuration for
/// clients.
pub struct RuntimeBuilder {
    config: ClientConfig,
    runtime_config: Option<RuntimeConfig>,
}

impl RuntimeBuilder {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            runtime_config: None,
        }
    }

    /// Override the runtime configuration (shop prices, starter kit).
    ///
    /// The engine config, player name, tick interval, and command buffer are
    /// still taken from the client configuration and the content directory.
    pub fn runtime_config(mut self, runtime_config: RuntimeConfig) -> Self {
        self.runtime_config = Some(runtime_config);
        self
    }

    pub fn build(self) -> Result<RuntimeSetup> {
        let data_dir = &self.config.data_dir;
        if !dirs::has_content(data_dir) {
            bail!(
                "Content data directory not found: {}\n\
                 Set QUIZ_DATA_DIR to the directory containing questions.ron.",
                data_dir.display()
            );
        }

        let factory = ContentFactory::new(data_dir);
        let quiz = factory
            .load_config()
            .with_context(|| format!("Failed to load config from {}", data_dir.display()))?;
        let questions = factory
            .load_question_bank()
            .with_context(|| format!("Failed to load questions from {}", data_dir.display()))?;
        debug!(questions = questions.len(), "content loaded");

        let mut runtime_config = self.runtime_config.unwrap_or_default();
        runtime_config.quiz = quiz;
        runtime_config.player_name = self.config.player_name.clone();
        runtime_config.tick_interval = self.config.tick_interval();
        runtime_config.command_buffer_size = self.config.channels.command_buffer;

        let mut builder = Runtime::builder().config(runtime_config).questions(questions);

        let save_dir = self.config.resolved_save_dir();
        if let Some(dir) = &save_dir {
            builder = builder.persistence_dir(dir.clone());
        }

        let runtime = builder.build().context("Failed to build runtime")?;
        info!(
            data_dir = %data_dir.display(),
            save_dir = ?save_dir,
            "runtime assembled"
        );

        Ok(RuntimeSetup {
            config: self.config,
            runtime,
        })
    }
}

pub struct RuntimeSetup {
    pub config: ClientConfig,
    pub runtime: Runtime,
}

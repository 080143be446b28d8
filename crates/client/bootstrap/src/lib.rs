//! Shared bootstrap utilities for client front-ends.
//!
//! Provides environment configuration, platform directories, and runtime
//! setup from the shipped content so any front-end can start playing.
pub mod builder;
pub mod config;
pub mod dirs;

pub use builder::{RuntimeBuilder, RuntimeSetup};
pub use config::ClientConfig;

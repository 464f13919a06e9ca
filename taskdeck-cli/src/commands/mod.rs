//! Subcommand handlers

pub mod apply;
pub mod replay;
pub mod show;

use crate::cli::OutputFormat;
use crate::config::TaskdeckConfig;
use anyhow::{Context, Result};
use std::path::Path;
use taskdeck_board::{BoardSeed, BoardStore};
use tracing::info;

/// Board loaded when neither `--seed` nor the `seed` setting names one
pub const DEMO_BOARD: &str = include_str!("../../assets/demo-board.yaml");

/// Settings shared by every subcommand
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub config: TaskdeckConfig,
    pub format: OutputFormat,
}

impl CommandContext {
    pub fn new(config: TaskdeckConfig, format: OutputFormat) -> Self {
        Self { config, format }
    }

    /// Build the board from `--seed`, the configured seed, or the demo board
    pub fn load_board(&self, seed: Option<&Path>) -> Result<BoardStore> {
        let seed_path = seed.or(self.config.seed.as_deref());
        let board = match seed_path {
            Some(path) => BoardSeed::from_path(path)
                .and_then(|seed| seed.build())
                .with_context(|| format!("Failed to load board seed {}", path.display()))?,
            None => BoardSeed::from_yaml(DEMO_BOARD)
                .and_then(|seed| seed.build())
                .context("Failed to load the demo board")?,
        };
        let source = seed_path
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "demo".to_string());
        info!(seed = %source, tasks = board.task_count(), "board loaded");
        Ok(board)
    }
}

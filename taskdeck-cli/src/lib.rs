//! Command-line driver for taskdeck boards
//!
//! `taskdeck show` prints a board, `taskdeck replay` feeds a gesture script through
//! the drag controller against a grid layout of the board, and `taskdeck apply` runs
//! a JSON batch of operations through the operation processor.

pub mod cli;
pub mod commands;
pub mod config;
pub mod exit_codes;
pub mod layout;
pub mod logging;
pub mod render;
pub mod script;

use anyhow::Result;
use cli::{Cli, Commands};
use commands::CommandContext;
use config::TaskdeckConfig;
use std::io::Write;

/// Run a parsed command line, writing results to `out`. Returns the exit code.
pub fn run(cli: &Cli, out: &mut dyn Write) -> Result<i32> {
    let config = TaskdeckConfig::load(cli.config.as_deref())?;
    let context = CommandContext::new(config, cli.format);

    match &cli.command {
        Commands::Show { seed } => commands::show::run(&context, seed.as_deref(), out)?,
        Commands::Replay { script, seed } => {
            commands::replay::run(&context, script, seed.as_deref(), out)?
        }
        Commands::Apply { ops, seed, actor } => {
            let all_ok = commands::apply::run(&context, ops, seed.as_deref(), actor.as_deref(), out)?;
            if !all_ok {
                return Ok(exit_codes::EXIT_ERROR);
            }
        }
    }
    Ok(exit_codes::EXIT_SUCCESS)
}

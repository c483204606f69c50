//! Noughts - terminal tic-tac-toe
//!
//! Play against a friend or the computer, or watch the computer play itself.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod config;
mod selfplay;
mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use config::GameConfig;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = GameConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;

    match cli.command {
        Command::Play { mode, difficulty, seed } => {
            let config = config.with_overrides(mode, difficulty, seed);
            init_file_tracing(config.log_file())?;
            tui::run_tui(&config)
        }
        Command::Selfplay {
            games,
            x_difficulty,
            o_difficulty,
            seed,
            json,
        } => {
            init_stderr_tracing();
            let seed = seed.or(*config.seed());
            run_selfplay(games, x_difficulty, o_difficulty, seed, json)
        }
    }
}

/// Logs to a file so the TUI owns the terminal.
fn init_file_tracing(path: &Path) -> Result<()> {
    let log_file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

fn init_stderr_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// Run computer-vs-computer rounds and print the tally
#[instrument]
fn run_selfplay(
    games: u32,
    x_difficulty: noughts_core::Difficulty,
    o_difficulty: noughts_core::Difficulty,
    seed: Option<u64>,
    json: bool,
) -> Result<()> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let report = selfplay::run(games, x_difficulty, o_difficulty, &mut rng)?;
    info!(games, "Self-play complete");

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report);
    }
    Ok(())
}

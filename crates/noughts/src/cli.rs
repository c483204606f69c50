//! Command-line interface for noughts.

use clap::{Parser, Subcommand};
use noughts_core::{Difficulty, Mode};
use std::path::PathBuf;

/// Noughts - tic-tac-toe against a friend or the computer
#[derive(Parser, Debug)]
#[command(name = "noughts")]
#[command(about = "Tic-tac-toe with an unbeatable computer opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file
    #[arg(long, global = true, default_value = "noughts.toml")]
    pub config: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal UI
    Play {
        /// Game mode (two-player, vs-computer); overrides the config file
        #[arg(long)]
        mode: Option<Mode>,

        /// Computer difficulty (easy, unbeatable); overrides the config file
        #[arg(long)]
        difficulty: Option<Difficulty>,

        /// RNG seed for reproducible easy games
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Play computer-vs-computer rounds and report the tally
    Selfplay {
        /// Number of rounds
        #[arg(short, long, default_value = "100")]
        games: u32,

        /// Difficulty of the X player
        #[arg(long, default_value = "easy")]
        x_difficulty: Difficulty,

        /// Difficulty of the O player
        #[arg(long, default_value = "unbeatable")]
        o_difficulty: Difficulty,

        /// RNG seed; overrides the config file
        #[arg(long)]
        seed: Option<u64>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_play_overrides() {
        let cli = Cli::try_parse_from(["noughts", "play", "--mode", "two-player", "--seed", "5"])
            .unwrap();
        match cli.command {
            Command::Play { mode, difficulty, seed } => {
                assert_eq!(mode, Some(Mode::TwoPlayer));
                assert_eq!(difficulty, None);
                assert_eq!(seed, Some(5));
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert_eq!(cli.config, PathBuf::from("noughts.toml"));
    }

    #[test]
    fn test_parse_selfplay_defaults() {
        let cli = Cli::try_parse_from(["noughts", "selfplay", "--games", "3", "--json"]).unwrap();
        match cli.command {
            Command::Selfplay { games, x_difficulty, o_difficulty, seed, json } => {
                assert_eq!(games, 3);
                assert_eq!(x_difficulty, Difficulty::Easy);
                assert_eq!(o_difficulty, Difficulty::Unbeatable);
                assert_eq!(seed, None);
                assert!(json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_rejects_unknown_difficulty() {
        assert!(Cli::try_parse_from(["noughts", "play", "--difficulty", "hard"]).is_err());
    }
}

//! Headless computer-vs-computer rounds.

use anyhow::Result;
use noughts_core::{choose_move_for, Difficulty, MatchState, Outcome, Player, Scores};
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info, instrument};

/// Result of a self-play run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelfplayReport {
    /// Rounds played.
    pub games: u32,
    /// X's difficulty.
    pub x_difficulty: Difficulty,
    /// O's difficulty.
    pub o_difficulty: Difficulty,
    /// Final tally.
    pub scores: Scores,
}

impl std::fmt::Display for SelfplayReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{} rounds, X ({}) vs O ({})",
            self.games,
            self.x_difficulty.label(),
            self.o_difficulty.label()
        )?;
        writeln!(f, "  X wins: {}", self.scores.x)?;
        writeln!(f, "  O wins: {}", self.scores.o)?;
        write!(f, "  Draws:  {}", self.scores.draws)
    }
}

/// Plays `games` rounds with each side choosing moves by its difficulty.
#[instrument(skip(rng))]
pub fn run<R: Rng>(
    games: u32,
    x_difficulty: Difficulty,
    o_difficulty: Difficulty,
    rng: &mut R,
) -> Result<SelfplayReport> {
    info!("Starting self-play");
    let mut state = MatchState::new();

    for round in 0..games {
        let outcome = play_round(&mut state, x_difficulty, o_difficulty, rng)?;
        debug!(round, %outcome, "Round complete");
        state.reset(false);
    }

    let report = SelfplayReport {
        games,
        x_difficulty,
        o_difficulty,
        scores: *state.scores(),
    };
    info!(
        x = report.scores.x,
        o = report.scores.o,
        draws = report.scores.draws,
        "Self-play finished"
    );
    Ok(report)
}

fn play_round<R: Rng>(
    state: &mut MatchState,
    x_difficulty: Difficulty,
    o_difficulty: Difficulty,
    rng: &mut R,
) -> Result<Outcome> {
    loop {
        if let Some(outcome) = state.outcome() {
            return Ok(outcome);
        }
        let player = state.current_player();
        let difficulty = match player {
            Player::X => x_difficulty,
            Player::O => o_difficulty,
        };
        let position = choose_move_for(difficulty, state.board(), player, rng)?;
        state.apply_move(position, player)?;
    }
}

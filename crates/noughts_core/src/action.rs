//! First-class action types for tic-tac-toe.
//!
//! Moves are domain events, not side effects. The history of a match is a
//! plain list of them, which is what makes undo and replay possible.

use crate::{Player, Position};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A move in tic-tac-toe: a player placing their mark at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The player making the move.
    pub player: Player,
    /// The position where the player places their mark.
    pub position: Position,
}

impl Move {
    /// Creates a new move.
    #[instrument]
    pub fn new(player: Player, position: Position) -> Self {
        Self { player, position }
    }

    /// Returns the player making this move.
    pub fn player(&self) -> Player {
        self.player
    }

    /// Returns the position of this move.
    pub fn position(&self) -> Position {
        self.position
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.player, self.position.label())
    }
}

/// Error that can occur when applying a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The square at the position is already occupied.
    #[display("Square {} is already occupied", _0)]
    CellOccupied(Position),

    /// The round has already ended.
    #[display("Game is already over")]
    GameAlreadyOver,
}

impl std::error::Error for MoveError {}

/// Error that can occur when undoing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum UndoError {
    /// No moves have been played this round.
    #[display("Nothing to undo")]
    NothingToUndo,

    /// Finished rounds cannot be rewound.
    #[display("Game is already over")]
    GameAlreadyOver,
}

impl std::error::Error for UndoError {}

/// Error returned when a serialized match cannot be restored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum RestoreError {
    /// Move `_0` of the history was made by the wrong player.
    #[display("History move {} is out of turn", _0)]
    OutOfTurn(usize),

    /// The history itself is not a legal sequence of moves.
    #[display("History does not replay: {}", _0)]
    Replay(MoveError),

    /// The recorded board or round status disagrees with the history.
    #[display("Snapshot disagrees with its history")]
    Mismatch,
}

impl std::error::Error for RestoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Replay(e) => Some(e),
            _ => None,
        }
    }
}

//! Game rules for tic-tac-toe.
//!
//! Pure functions over arbitrary boards. They take a [`Board`](crate::Board)
//! rather than a match so the search can evaluate hypothetical positions.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{check_winner, has_line, WIN_PATTERNS};

use crate::{Board, Position};
use tracing::instrument;

/// Returns the empty positions in ascending index order.
#[instrument(skip(board))]
pub fn legal_moves(board: &Board) -> Vec<Position> {
    Position::ALL
        .iter()
        .copied()
        .filter(|pos| board.is_empty(*pos))
        .collect()
}

/// Checks whether the board is terminal: a line for either player or no
/// empty squares.
#[instrument(skip(board))]
pub fn is_terminal(board: &Board) -> bool {
    check_winner(board).is_some() || is_full(board)
}

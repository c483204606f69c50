//! Uniform random move selection.

use super::SearchError;
use crate::rules::legal_moves;
use crate::{Board, Position};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, instrument};

/// Picks uniformly among the empty squares of `board`.
///
/// # Errors
///
/// [`SearchError::NoLegalMoves`] if the board is full.
#[instrument(skip_all)]
pub fn choose_random_move<R: Rng + ?Sized>(
    board: &Board,
    rng: &mut R,
) -> Result<Position, SearchError> {
    let moves = legal_moves(board);
    let choice = moves.choose(rng).copied().ok_or(SearchError::NoLegalMoves)?;
    debug!(position = ?choice, candidates = moves.len(), "Random move chosen");
    Ok(choice)
}

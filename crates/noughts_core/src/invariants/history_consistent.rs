//! History consistency invariant: replaying the history rebuilds the board.

use super::Invariant;
use crate::{Board, MatchState, Square};

/// Invariant: history length equals the number of occupied squares, and
/// placing every recorded move on an empty board reproduces the board.
pub struct HistoryConsistentInvariant;

impl Invariant<MatchState> for HistoryConsistentInvariant {
    fn holds(state: &MatchState) -> bool {
        if state.history().len() != state.board().occupied() {
            return false;
        }

        let mut rebuilt = Board::new();
        for mv in state.history() {
            if !rebuilt.is_empty(mv.position) {
                return false;
            }
            rebuilt.set(mv.position, Square::Occupied(mv.player));
        }

        rebuilt == *state.board()
    }

    fn description() -> &'static str {
        "Replaying history reproduces the board"
    }
}

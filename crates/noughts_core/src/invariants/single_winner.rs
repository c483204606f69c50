//! Single winner invariant: never a line for both players.

use super::Invariant;
use crate::rules::has_line;
use crate::{MatchState, Player};

/// Invariant: at most one player owns a complete line.
pub struct SingleWinnerInvariant;

impl Invariant<MatchState> for SingleWinnerInvariant {
    fn holds(state: &MatchState) -> bool {
        !(has_line(state.board(), Player::X) && has_line(state.board(), Player::O))
    }

    fn description() -> &'static str {
        "At most one player has three in a row"
    }
}

//! Balanced marks invariant: X leads O by zero or one.

use super::Invariant;
use crate::{MatchState, Player};

/// Invariant: X moves first and players alternate, so the X count is equal
/// to the O count or exceeds it by one.
pub struct BalancedMarksInvariant;

impl Invariant<MatchState> for BalancedMarksInvariant {
    fn holds(state: &MatchState) -> bool {
        let x = state.board().count(Player::X);
        let o = state.board().count(Player::O);
        x == o || x == o + 1
    }

    fn description() -> &'static str {
        "X count equals O count or exceeds it by one"
    }
}

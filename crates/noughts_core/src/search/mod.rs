//! Computer move selection.
//!
//! Two policies back the two difficulties: a uniform random pick
//! ([`choose_random_move`]) and exhaustive minimax with alpha-beta pruning
//! ([`choose_optimal_move`]). Both work on any board, not just the live
//! match, and neither mutates the caller's board.

mod minimax;
mod random;

pub use minimax::{choose_optimal_move, evaluate, score_terminal, LOSS_FOR_O, WIN_FOR_O};
pub use random::choose_random_move;

use crate::session::Difficulty;
use crate::{Board, Player, Position};
use rand::Rng;
use tracing::debug;

/// Error returned when no move can be chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum SearchError {
    /// The board has no empty squares.
    #[display("No legal moves available")]
    NoLegalMoves,
}

impl std::error::Error for SearchError {}

/// Strategy for picking the computer's next move.
pub trait MovePolicy {
    /// Picks a move for `player` on `board`.
    fn choose_move(&mut self, board: &Board, player: Player) -> Result<Position, SearchError>;

    /// Short name for logging.
    fn name(&self) -> &'static str;
}

/// Picks uniformly among the empty squares.
#[derive(Debug, Clone)]
pub struct RandomPolicy<R> {
    rng: R,
}

impl<R: Rng> RandomPolicy<R> {
    /// Creates a random policy drawing from `rng`.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> MovePolicy for RandomPolicy<R> {
    fn choose_move(&mut self, board: &Board, _player: Player) -> Result<Position, SearchError> {
        choose_random_move(board, &mut self.rng)
    }

    fn name(&self) -> &'static str {
        "random"
    }
}

/// Plays the game-theoretically optimal move.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptimalPolicy;

impl MovePolicy for OptimalPolicy {
    fn choose_move(&mut self, board: &Board, player: Player) -> Result<Position, SearchError> {
        choose_optimal_move(board, player)
    }

    fn name(&self) -> &'static str {
        "minimax"
    }
}

/// Picks a move for `player` the way `difficulty` dictates.
pub fn choose_move_for<R: Rng>(
    difficulty: Difficulty,
    board: &Board,
    player: Player,
    rng: &mut R,
) -> Result<Position, SearchError> {
    match difficulty {
        Difficulty::Easy => play_policy(&mut RandomPolicy::new(rng), board, player),
        Difficulty::Unbeatable => play_policy(&mut OptimalPolicy, board, player),
    }
}

fn play_policy<P: MovePolicy>(
    policy: &mut P,
    board: &Board,
    player: Player,
) -> Result<Position, SearchError> {
    let position = policy.choose_move(board, player)?;
    debug!(policy = policy.name(), ?position, ?player, "Policy chose move");
    Ok(position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::legal_moves;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_policies_agree_with_free_functions() {
        let mut board = Board::new();
        board.set(Position::Center, crate::Square::Occupied(Player::X));

        let mut optimal = OptimalPolicy;
        assert_eq!(
            optimal.choose_move(&board, Player::O),
            choose_optimal_move(&board, Player::O)
        );

        let mut random = RandomPolicy::new(StdRng::seed_from_u64(3));
        let pick = random.choose_move(&board, Player::O).unwrap();
        assert!(legal_moves(&board).contains(&pick));

        assert_eq!(optimal.name(), "minimax");
        assert_eq!(random.name(), "random");
    }

    #[test]
    fn test_difficulty_selects_policy() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut board = Board::new();
        for pos in [Position::TopLeft, Position::TopCenter] {
            board.set(pos, crate::Square::Occupied(Player::X));
        }
        board.set(Position::Center, crate::Square::Occupied(Player::O));

        // Unbeatable must block the top row.
        assert_eq!(
            choose_move_for(Difficulty::Unbeatable, &board, Player::O, &mut rng),
            Ok(Position::TopRight)
        );
        let easy = choose_move_for(Difficulty::Easy, &board, Player::O, &mut rng).unwrap();
        assert!(board.is_empty(easy));
    }
}

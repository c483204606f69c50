//! Minimax with alpha-beta pruning.
//!
//! Scores are always from O's point of view: O maximizes, X minimizes.
//! Depth is not scored, so among equally good moves the lowest index wins.

use super::SearchError;
use crate::rules::{check_winner, has_line, legal_moves};
use crate::{Board, Player, Position, Square};
use tracing::{debug, instrument};

/// Score of a board where O has three in a row.
pub const WIN_FOR_O: i32 = 10;

/// Score of a board where X has three in a row.
pub const LOSS_FOR_O: i32 = -10;

const DRAW: i32 = 0;

/// Scores a finished board, or `None` if play can continue.
pub fn score_terminal(board: &Board) -> Option<i32> {
    if has_line(board, Player::X) {
        Some(LOSS_FOR_O)
    } else if has_line(board, Player::O) {
        Some(WIN_FOR_O)
    } else if board.occupied() == 9 {
        Some(DRAW)
    } else {
        None
    }
}

/// Value of `board` with `to_move` about to play, under optimal play by
/// both sides.
#[instrument(skip(board))]
pub fn evaluate(board: &Board, to_move: Player) -> i32 {
    let mut work = board.clone();
    minimax(&mut work, to_move, i32::MIN, i32::MAX)
}

/// Returns the move that guarantees `player` the best achievable result.
///
/// Each root move is scored with a full window; the first move (ascending
/// index) strictly better than all before it is kept.
///
/// # Errors
///
/// [`SearchError::NoLegalMoves`] if the board is full.
#[instrument(skip(board))]
pub fn choose_optimal_move(board: &Board, player: Player) -> Result<Position, SearchError> {
    debug_assert!(
        check_winner(board).is_none(),
        "optimal move requested on a board that is already won"
    );

    let mut work = board.clone();
    let mut best: Option<(Position, i32)> = None;

    for pos in legal_moves(board) {
        work.set(pos, Square::Occupied(player));
        let score = minimax(&mut work, player.opponent(), i32::MIN, i32::MAX);
        work.set(pos, Square::Empty);

        let improves = match best {
            None => true,
            Some((_, best_score)) => match player {
                Player::O => score > best_score,
                Player::X => score < best_score,
            },
        };
        if improves {
            best = Some((pos, score));
        }
    }

    let (pos, score) = best.ok_or(SearchError::NoLegalMoves)?;
    debug!(position = ?pos, score, "Optimal move chosen");
    Ok(pos)
}

/// Recursive search over `board`, which is restored before returning.
fn minimax(board: &mut Board, to_move: Player, mut alpha: i32, mut beta: i32) -> i32 {
    if let Some(score) = score_terminal(board) {
        return score;
    }

    let maximizing = to_move == Player::O;
    let mut best = if maximizing { i32::MIN } else { i32::MAX };

    for pos in Position::ALL {
        if !board.is_empty(pos) {
            continue;
        }

        board.set(pos, Square::Occupied(to_move));
        let score = minimax(board, to_move.opponent(), alpha, beta);
        board.set(pos, Square::Empty);

        if maximizing {
            best = best.max(score);
            alpha = alpha.max(score);
        } else {
            best = best.min(score);
            beta = beta.min(score);
        }
        if alpha >= beta {
            break;
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_from(marks: &str) -> Board {
        let mut board = Board::new();
        for (pos, c) in Position::ALL.iter().zip(marks.chars()) {
            match c {
                'X' => board.set(*pos, Square::Occupied(Player::X)),
                'O' => board.set(*pos, Square::Occupied(Player::O)),
                _ => {}
            }
        }
        board
    }

    #[test]
    fn test_terminal_scores() {
        assert_eq!(score_terminal(&board_from("XXXOO....")), Some(LOSS_FOR_O));
        assert_eq!(score_terminal(&board_from("OOOXX.X..")), Some(WIN_FOR_O));
        assert_eq!(score_terminal(&board_from("XOXOXXOXO")), Some(0));
        assert_eq!(score_terminal(&board_from("X........")), None);
    }

    #[test]
    fn test_empty_board_is_a_draw() {
        assert_eq!(evaluate(&Board::new(), Player::X), 0);
    }

    #[test]
    fn test_takes_immediate_win() {
        // O O _ / X X _ / X _ _ : O wins at 2, X would win at 5.
        let board = board_from("OO.XX.X..");
        assert_eq!(choose_optimal_move(&board, Player::O), Ok(Position::TopRight));
    }

    #[test]
    fn test_x_takes_immediate_win() {
        let board = board_from("XX.OO....");
        assert_eq!(choose_optimal_move(&board, Player::X), Ok(Position::TopRight));
    }

    #[test]
    fn test_blocks_column_threat() {
        // X _ _ / X _ _ / _ _ _ with O to move must block at 6.
        let board = board_from("X..X.O...");
        assert_eq!(choose_optimal_move(&board, Player::O), Ok(Position::BottomLeft));
    }

    #[test]
    fn test_answers_corner_opening_with_center() {
        // Every O reply except the center loses against a corner opening.
        let board = board_from("X........");
        assert_eq!(choose_optimal_move(&board, Player::O), Ok(Position::Center));
    }

    #[test]
    fn test_ties_resolve_to_lowest_index() {
        // Empty board: every X opening draws, so the first square is kept.
        assert_eq!(
            choose_optimal_move(&Board::new(), Player::X),
            Ok(Position::TopLeft)
        );
    }

    #[test]
    fn test_caller_board_untouched() {
        let board = board_from("X...O...X");
        let before = board.clone();
        let _ = choose_optimal_move(&board, Player::O).unwrap();
        let _ = evaluate(&board, Player::O);
        assert_eq!(board, before);
    }

    #[test]
    fn test_full_board_has_no_moves() {
        let board = board_from("XOXOXXOXO");
        assert_eq!(
            choose_optimal_move(&board, Player::O),
            Err(SearchError::NoLegalMoves)
        );
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "already won")]
    fn test_won_board_is_a_contract_violation() {
        let board = board_from("XXXOO....");
        let _ = choose_optimal_move(&board, Player::O);
    }
}

//! Tests for computer move selection.

use noughts_core::rules::{check_winner, has_line, is_full, legal_moves};
use noughts_core::search::{evaluate, score_terminal};
use noughts_core::{
    choose_optimal_move, choose_random_move, Board, MatchState, Outcome, Player, Position,
    SearchError, Square,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

/// Walks every X reply while O answers optimally; returns the worst score
/// seen from O's point of view.
fn worst_for_o(board: &mut Board, to_move: Player) -> i32 {
    if let Some(score) = score_terminal(board) {
        return score;
    }

    match to_move {
        Player::O => {
            let pos = choose_optimal_move(board, Player::O).expect("live board has a move");
            board.set(pos, Square::Occupied(Player::O));
            let score = worst_for_o(board, Player::X);
            board.set(pos, Square::Empty);
            score
        }
        Player::X => {
            let mut worst = i32::MAX;
            for pos in legal_moves(board) {
                board.set(pos, Square::Occupied(Player::X));
                worst = worst.min(worst_for_o(board, Player::O));
                board.set(pos, Square::Empty);
            }
            worst
        }
    }
}

#[test]
fn test_optimal_o_never_loses_to_any_x() {
    let mut board = Board::new();
    assert!(worst_for_o(&mut board, Player::X) >= 0);
    assert_eq!(board, Board::new());
}

#[test]
fn test_optimal_o_opening_move_never_loses() {
    let board = Board::new();
    let first = choose_optimal_move(&board, Player::O).expect("empty board has moves");
    assert_eq!(first, Position::TopLeft);

    let mut after = board.clone();
    after.set(first, Square::Occupied(Player::O));
    assert!(evaluate(&after, Player::X) >= 0);

    // Optimal play from both sides thereafter.
    let mut to_move = Player::X;
    while score_terminal(&after).is_none() {
        let pos = choose_optimal_move(&after, to_move).unwrap();
        after.set(pos, Square::Occupied(to_move));
        to_move = to_move.opponent();
    }
    assert_ne!(check_winner(&after), Some(Player::X));
}

#[test]
fn test_perfect_play_from_start_is_draw() {
    let mut state = MatchState::new();
    while !state.is_game_over() {
        let player = state.current_player();
        let pos = choose_optimal_move(state.board(), player).unwrap();
        state.apply_move(pos, player).unwrap();
    }
    assert_eq!(state.outcome(), Some(Outcome::Draw));
}

#[test]
fn test_easy_x_never_beats_unbeatable_o() {
    for seed in 0..200 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut state = MatchState::new();
        while !state.is_game_over() {
            let player = state.current_player();
            let pos = match player {
                Player::X => choose_random_move(state.board(), &mut rng).unwrap(),
                Player::O => choose_optimal_move(state.board(), player).unwrap(),
            };
            state.apply_move(pos, player).unwrap();
        }
        assert_ne!(state.winner(), Some(Player::X), "seed {seed}");
    }
}

#[test]
fn test_reachable_boards_have_at_most_one_winner() {
    fn walk(board: &mut Board, to_move: Player, seen: &mut HashSet<Board>) {
        if !seen.insert(board.clone()) {
            return;
        }
        assert!(
            !(has_line(board, Player::X) && has_line(board, Player::O)),
            "both players have a line:\n{}",
            board
        );
        if check_winner(board).is_some() || is_full(board) {
            return;
        }
        for pos in legal_moves(board) {
            board.set(pos, Square::Occupied(to_move));
            walk(board, to_move.opponent(), seen);
            board.set(pos, Square::Empty);
        }
    }

    let mut seen = HashSet::new();
    walk(&mut Board::new(), Player::X, &mut seen);
    assert_eq!(seen.len(), 5478);
}

#[test]
fn test_search_errors_on_full_board() {
    let board = Board::from_squares([
        Square::Occupied(Player::X),
        Square::Occupied(Player::O),
        Square::Occupied(Player::X),
        Square::Occupied(Player::X),
        Square::Occupied(Player::O),
        Square::Occupied(Player::O),
        Square::Occupied(Player::O),
        Square::Occupied(Player::X),
        Square::Occupied(Player::X),
    ]);
    let mut rng = StdRng::seed_from_u64(0);
    assert_eq!(choose_optimal_move(&board, Player::O), Err(SearchError::NoLegalMoves));
    assert_eq!(choose_random_move(&board, &mut rng), Err(SearchError::NoLegalMoves));
}

#[test]
fn test_forced_fork_evaluates_as_x_win() {
    // X _ _ / _ _ _ / O _ X with O to move: O must take the center, which
    // forces X to 2 and a fork on 1 and 5.
    let board = Board::from_squares([
        Square::Occupied(Player::X),
        Square::Empty,
        Square::Empty,
        Square::Empty,
        Square::Empty,
        Square::Empty,
        Square::Occupied(Player::O),
        Square::Empty,
        Square::Occupied(Player::X),
    ]);
    assert_eq!(evaluate(&board, Player::O), -10);
}

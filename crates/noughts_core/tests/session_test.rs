//! Tests for the session boundary: intents, turn orchestration and view.

use noughts_core::{Difficulty, Mode, Outcome, Player, Session, SessionError, TurnResult};

/// Plays a full round against the computer, always choosing the first
/// empty cell for the human.
fn play_round(session: &mut Session) -> Outcome {
    loop {
        let index = session
            .board()
            .squares()
            .iter()
            .position(|s| s.player().is_none())
            .expect("live round has an empty cell");

        match session.select_cell(index).expect("human move accepted") {
            TurnResult::Finished(outcome) => return outcome,
            TurnResult::ComputerToMove => {
                session.play_computer_turn().expect("computer move accepted");
                if let Some(outcome) = session.state().outcome() {
                    return outcome;
                }
            }
            TurnResult::NextPlayer(player) => panic!("unexpected human turn for {player:?}"),
        }
    }
}

#[test]
fn test_unbeatable_computer_never_loses_a_round() {
    let mut session = Session::with_seed(Mode::VsComputer, Difficulty::Unbeatable, 9);
    for _ in 0..5 {
        let outcome = play_round(&mut session);
        assert_ne!(outcome, Outcome::Winner(Player::X));
        session.play_again();
    }
    assert_eq!(session.scores().x, 0);
    assert_eq!(session.scores().rounds(), 5);
}

#[test]
fn test_easy_computer_rounds_complete() {
    let mut session = Session::with_seed(Mode::VsComputer, Difficulty::Easy, 2024);
    for _ in 0..20 {
        play_round(&mut session);
        assert!(session.is_game_over());
        assert!(!session.is_awaiting_computer());
        session.play_again();
    }
    assert_eq!(session.scores().rounds(), 20);
}

#[test]
fn test_undo_against_computer_restores_human_turn() {
    let mut session = Session::with_seed(Mode::VsComputer, Difficulty::Unbeatable, 1);
    session.select_cell(0).unwrap();
    session.play_computer_turn().unwrap();

    assert_eq!(session.undo(), Ok(2));
    assert!(session.state().history().is_empty());
    assert_eq!(session.current_player(), Player::X);
    assert!(!session.can_undo());
}

#[test]
fn test_finished_round_rejects_input() {
    let mut session = Session::with_seed(Mode::TwoPlayer, Difficulty::Easy, 1);
    for index in [0, 3, 1, 4] {
        session.select_cell(index).unwrap();
    }
    assert_eq!(
        session.select_cell(2),
        Ok(TurnResult::Finished(Outcome::Winner(Player::X)))
    );

    assert!(matches!(session.select_cell(5), Err(SessionError::Move(_))));
    assert!(matches!(session.undo(), Err(SessionError::Undo(_))));
    assert!(!session.view().can_undo);
    assert_eq!(session.view().status, "Player X wins!");
}

#[test]
fn test_difficulty_hidden_in_two_player_mode() {
    let mut session = Session::with_seed(Mode::VsComputer, Difficulty::Easy, 1);
    assert!(session.shows_difficulty());
    session.set_mode(Mode::TwoPlayer);
    assert!(!session.shows_difficulty());
    assert!(!session.view().shows_difficulty);
}

#[test]
fn test_mode_change_clears_pending_computer_turn() {
    let mut session = Session::with_seed(Mode::VsComputer, Difficulty::Easy, 1);
    session.select_cell(4).unwrap();
    assert!(session.is_awaiting_computer());

    session.set_mode(Mode::TwoPlayer);
    assert!(!session.is_awaiting_computer());
    assert_eq!(session.select_cell(4), Ok(TurnResult::NextPlayer(Player::O)));
}

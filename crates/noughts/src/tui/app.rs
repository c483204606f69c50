//! Application state and logic.

use super::input::{intent_for, move_cursor, Intent};
use crossterm::event::KeyCode;
use noughts_core::{Position, Session, TurnResult};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Main application state.
pub struct App {
    session: Session,
    cursor: Position,
    computer_delay: Duration,
    computer_due: Option<Instant>,
    notice: Option<String>,
    should_quit: bool,
}

impl App {
    /// Creates a new application around a session.
    pub fn new(session: Session, computer_delay: Duration) -> Self {
        Self {
            session,
            cursor: Position::Center,
            computer_delay,
            computer_due: None,
            notice: None,
            should_quit: false,
        }
    }

    /// Gets the session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Gets the cursor position.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Last rejected intent, shown under the status line.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// True once the user asked to leave.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// How long the event loop may block waiting for input.
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        match self.computer_due {
            Some(due) => due.saturating_duration_since(now),
            None => Duration::from_millis(250),
        }
    }

    /// Handles a key press.
    pub fn handle_key(&mut self, key: KeyCode, now: Instant) {
        let Some(intent) = intent_for(key) else {
            return;
        };
        debug!(?intent, "Key intent");

        if intent == Intent::Quit {
            info!("User quit");
            self.should_quit = true;
            return;
        }
        if let Intent::Cursor(key) = intent {
            self.cursor = move_cursor(self.cursor, key);
            return;
        }
        if self.session.is_awaiting_computer() {
            debug!(?intent, "Input ignored while computer is pending");
            return;
        }

        self.notice = None;
        match intent {
            Intent::SelectCursor => self.select(self.cursor.to_index(), now),
            Intent::SelectCell(index) => {
                if let Some(pos) = Position::from_index(index) {
                    self.cursor = pos;
                }
                self.select(index, now);
            }
            Intent::Undo => {
                if let Err(e) = self.session.undo() {
                    self.reject(e);
                }
            }
            Intent::NewGame => self.session.new_game(),
            Intent::PlayAgain => self.session.play_again(),
            Intent::ToggleMode => self.session.set_mode(self.session.mode().toggle()),
            Intent::ToggleDifficulty => {
                if self.session.shows_difficulty() {
                    self.session.set_difficulty(self.session.difficulty().toggle());
                }
            }
            Intent::Cursor(_) | Intent::Quit => {}
        }

        if !self.session.is_awaiting_computer() {
            self.computer_due = None;
        }
    }

    fn select(&mut self, index: usize, now: Instant) {
        match self.session.select_cell(index) {
            Ok(TurnResult::ComputerToMove) => {
                self.computer_due = Some(now + self.computer_delay);
            }
            Ok(_) => {}
            Err(e) => self.reject(e),
        }
    }

    fn reject(&mut self, err: impl std::fmt::Display) {
        debug!(error = %err, "Intent rejected");
        self.notice = Some(err.to_string());
    }

    /// Plays the computer's reply once its delay has passed.
    pub fn tick(&mut self, now: Instant) {
        let Some(due) = self.computer_due else {
            return;
        };
        if now < due {
            return;
        }

        self.computer_due = None;
        match self.session.play_computer_turn() {
            Ok(pos) => {
                debug!(?pos, "Computer reply applied");
            }
            Err(e) => {
                warn!(error = %e, "Computer turn failed");
                self.notice = Some(e.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use noughts_core::{Difficulty, Mode, Player};

    fn app(mode: Mode) -> App {
        App::new(
            Session::with_seed(mode, Difficulty::Unbeatable, 1),
            Duration::from_millis(300),
        )
    }

    #[test]
    fn test_computer_replies_after_delay() {
        let mut app = app(Mode::VsComputer);
        let start = Instant::now();

        app.handle_key(KeyCode::Char('1'), start);
        assert!(app.session().is_awaiting_computer());

        app.tick(start + Duration::from_millis(100));
        assert!(app.session().is_awaiting_computer());

        app.tick(start + Duration::from_millis(300));
        assert!(!app.session().is_awaiting_computer());
        assert_eq!(app.session().state().history().len(), 2);
        assert_eq!(app.session().current_player(), Player::X);
    }

    #[test]
    fn test_input_ignored_while_computer_pending() {
        let mut app = app(Mode::VsComputer);
        let start = Instant::now();

        app.handle_key(KeyCode::Char('1'), start);
        app.handle_key(KeyCode::Char('2'), start);
        app.handle_key(KeyCode::Char('u'), start);
        assert_eq!(app.session().state().history().len(), 1);

        // Cursor still moves.
        app.handle_key(KeyCode::Up, start);
        assert_eq!(app.cursor(), Position::TopLeft);
    }

    #[test]
    fn test_rejected_move_sets_notice() {
        let mut app = app(Mode::TwoPlayer);
        let now = Instant::now();

        app.handle_key(KeyCode::Enter, now);
        app.handle_key(KeyCode::Enter, now);
        assert_eq!(app.notice(), Some("Square Center is already occupied"));

        app.handle_key(KeyCode::Char('3'), now);
        assert_eq!(app.notice(), None);
    }

    #[test]
    fn test_mode_toggle_ignored_while_reply_pending() {
        let mut app = app(Mode::VsComputer);
        let start = Instant::now();

        app.handle_key(KeyCode::Char('5'), start);
        // Pending: mode toggle is ignored like any other intent.
        app.handle_key(KeyCode::Char('m'), start);
        assert_eq!(app.session().mode(), Mode::VsComputer);

        app.tick(start + Duration::from_secs(1));
        app.handle_key(KeyCode::Char('m'), start);
        assert_eq!(app.session().mode(), Mode::TwoPlayer);
        assert!(app.session().state().history().is_empty());
    }

    #[test]
    fn test_quit() {
        let mut app = app(Mode::TwoPlayer);
        app.handle_key(KeyCode::Char('q'), Instant::now());
        assert!(app.should_quit());
    }
}

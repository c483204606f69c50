//! Keyboard mapping: cursor movement and intents.

use crossterm::event::KeyCode;
use noughts_core::Position;

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Move the cursor.
    Cursor(KeyCode),
    /// Select the cell under the cursor.
    SelectCursor,
    /// Select a cell by index (0-8).
    SelectCell(usize),
    /// Undo.
    Undo,
    /// New game (scores cleared).
    NewGame,
    /// Play again (scores kept).
    PlayAgain,
    /// Switch between two-player and vs-computer.
    ToggleMode,
    /// Switch between easy and unbeatable.
    ToggleDifficulty,
    /// Leave the game.
    Quit,
}

/// Maps a key to an intent.
pub fn intent_for(key: KeyCode) -> Option<Intent> {
    match key {
        KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => Some(Intent::Cursor(key)),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Intent::SelectCursor),
        KeyCode::Char(c @ '1'..='9') => c.to_digit(10).map(|d| Intent::SelectCell(d as usize - 1)),
        KeyCode::Char('u') => Some(Intent::Undo),
        KeyCode::Char('n') => Some(Intent::NewGame),
        KeyCode::Char('r') => Some(Intent::PlayAgain),
        KeyCode::Char('m') => Some(Intent::ToggleMode),
        KeyCode::Char('d') => Some(Intent::ToggleDifficulty),
        KeyCode::Char('q') | KeyCode::Esc => Some(Intent::Quit),
        _ => None,
    }
}

/// Moves cursor based on arrow keys, stopping at the board edge.
pub fn move_cursor(cursor: Position, key: KeyCode) -> Position {
    let (row, col) = (cursor.row(), cursor.col());
    let (row, col) = match key {
        KeyCode::Up => (row.saturating_sub(1), col),
        KeyCode::Down => ((row + 1).min(2), col),
        KeyCode::Left => (row, col.saturating_sub(1)),
        KeyCode::Right => (row, (col + 1).min(2)),
        _ => (row, col),
    };
    Position::from_row_col(row, col).unwrap_or(cursor)
}

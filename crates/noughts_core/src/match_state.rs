//! Match state: board, turn, history, round result and running scores.

use crate::action::{Move, MoveError, RestoreError, UndoError};
use crate::invariants::assert_invariants;
use crate::rules;
use crate::session::Mode;
use crate::{Board, Outcome, Player, Position, Scores, Square};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Complete state of one session's tic-tac-toe match.
///
/// The board and history change only through [`MatchState::apply_move`],
/// [`MatchState::undo`] and [`MatchState::reset`]. Scores survive
/// [`MatchState::reset`] unless explicitly cleared.
///
/// Deserialization replays the recorded history and rejects snapshots whose
/// board, turn or result disagree with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MatchSnapshot")]
pub struct MatchState {
    board: Board,
    current_player: Player,
    history: Vec<Move>,
    game_over: bool,
    outcome: Option<Outcome>,
    scores: Scores,
}

impl MatchState {
    /// Creates a new match: empty board, X to move, zero scores.
    #[instrument]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_player: Player::X,
            history: Vec::new(),
            game_over: false,
            outcome: None,
            scores: Scores::default(),
        }
    }

    /// Builds a match by applying `moves` in order to a fresh state.
    #[instrument(skip(moves), fields(moves = moves.len()))]
    pub fn replay(moves: &[Move]) -> Result<Self, MoveError> {
        let mut state = Self::new();
        for mv in moves {
            state.apply_move(mv.position, mv.player)?;
        }
        Ok(state)
    }

    /// Places `player`'s mark at `position`.
    ///
    /// After the mark is written the round is resolved in order: a line for
    /// the mover wins, otherwise a full board draws, otherwise the turn
    /// passes. A line completed on the last empty square is a win.
    ///
    /// # Errors
    ///
    /// - [`MoveError::GameAlreadyOver`] if the round has ended.
    /// - [`MoveError::CellOccupied`] if the square is taken.
    ///
    /// Failed calls leave the state untouched.
    #[instrument(skip(self))]
    pub fn apply_move(&mut self, position: Position, player: Player) -> Result<(), MoveError> {
        if self.game_over {
            debug!("Rejected move: game already over");
            return Err(MoveError::GameAlreadyOver);
        }
        if !self.board.is_empty(position) {
            debug!("Rejected move: square occupied");
            return Err(MoveError::CellOccupied(position));
        }

        self.board.set(position, Square::Occupied(player));
        self.history.push(Move::new(player, position));

        if rules::has_line(&self.board, player) {
            self.finish(Outcome::Winner(player));
        } else if rules::is_full(&self.board) {
            self.finish(Outcome::Draw);
        } else {
            self.current_player = player.opponent();
        }

        assert_invariants(self);
        Ok(())
    }

    fn finish(&mut self, outcome: Outcome) {
        info!(%outcome, moves = self.history.len(), "Round finished");
        self.game_over = true;
        self.outcome = Some(outcome);
        self.scores.record(outcome);
    }

    /// Takes back the last move, or the last two in [`Mode::VsComputer`].
    ///
    /// Against the computer the human's move and the computer's reply are
    /// undone together. Afterwards the player to move is the opponent of
    /// whoever made the new last move, or X on an empty board.
    ///
    /// Returns the number of moves removed.
    ///
    /// # Errors
    ///
    /// - [`UndoError::GameAlreadyOver`] if the round has ended.
    /// - [`UndoError::NothingToUndo`] if no moves have been played.
    #[instrument(skip(self), fields(history = self.history.len()))]
    pub fn undo(&mut self, mode: Mode) -> Result<usize, UndoError> {
        if self.game_over {
            return Err(UndoError::GameAlreadyOver);
        }

        let mut undone = 0;
        if self.pop_move() {
            undone += 1;
        } else {
            return Err(UndoError::NothingToUndo);
        }

        if mode == Mode::VsComputer && self.pop_move() {
            undone += 1;
        }

        self.current_player = self
            .history
            .last()
            .map(|mv| mv.player.opponent())
            .unwrap_or(Player::X);

        debug!(undone, to_move = ?self.current_player, "Undo applied");
        assert_invariants(self);
        Ok(undone)
    }

    fn pop_move(&mut self) -> bool {
        match self.history.pop() {
            Some(mv) => {
                self.board.set(mv.position, Square::Empty);
                true
            }
            None => false,
        }
    }

    /// Starts a fresh round. Scores are cleared only when `clear_scores`.
    #[instrument(skip(self))]
    pub fn reset(&mut self, clear_scores: bool) {
        self.board = Board::new();
        self.history.clear();
        self.current_player = Player::X;
        self.game_over = false;
        self.outcome = None;
        if clear_scores {
            self.scores = Scores::default();
        }
        info!("Round reset");
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player to move.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Returns the move history, oldest first.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// True once the round has been won or drawn.
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Returns the round result, if the round has ended.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Returns the running scores.
    pub fn scores(&self) -> &Scores {
        &self.scores
    }

    /// Returns the player with three in a row, if any.
    pub fn winner(&self) -> Option<Player> {
        rules::check_winner(&self.board)
    }

    /// True if the board is full with no line.
    pub fn is_draw(&self) -> bool {
        rules::is_draw(&self.board)
    }

    /// Empty positions in ascending order.
    pub fn legal_moves(&self) -> Vec<Position> {
        rules::legal_moves(&self.board)
    }

    /// Undo is allowed while the round is live and has moves.
    pub fn can_undo(&self) -> bool {
        !self.game_over && !self.history.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new()
    }
}

/// Wire form of [`MatchState`], trusted only after replay.
#[derive(Deserialize)]
struct MatchSnapshot {
    board: Board,
    current_player: Player,
    history: Vec<Move>,
    game_over: bool,
    outcome: Option<Outcome>,
    scores: Scores,
}

impl TryFrom<MatchSnapshot> for MatchState {
    type Error = RestoreError;

    fn try_from(snapshot: MatchSnapshot) -> Result<Self, Self::Error> {
        let mut expected = Player::X;
        for (index, mv) in snapshot.history.iter().enumerate() {
            if mv.player != expected {
                return Err(RestoreError::OutOfTurn(index));
            }
            expected = expected.opponent();
        }

        let mut state = Self::replay(&snapshot.history).map_err(RestoreError::Replay)?;
        if state.board != snapshot.board
            || state.current_player != snapshot.current_player
            || state.game_over != snapshot.game_over
            || state.outcome != snapshot.outcome
        {
            return Err(RestoreError::Mismatch);
        }

        state.scores = snapshot.scores;
        Ok(state)
    }
}

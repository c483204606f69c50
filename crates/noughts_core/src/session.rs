//! Session controller: the boundary between a front-end and the engine.
//!
//! A front-end sends intents (cell selected, undo, new game, ...) and reads
//! back a [`SessionView`]. The session owns the [`MatchState`], the mode and
//! difficulty settings, and the RNG used by the easy computer.
//!
//! In [`Mode::VsComputer`] the human always plays X. After a human move that
//! leaves O to play, the session is *awaiting the computer*: further human
//! input is refused until the front-end calls
//! [`Session::play_computer_turn`], typically after a short pacing delay.

use crate::action::{MoveError, UndoError};
use crate::search::{choose_move_for, SearchError};
use crate::{Board, MatchState, Outcome, Player, Position, Scores};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

/// Who is playing.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Mode {
    /// Two humans share the board.
    TwoPlayer,
    /// Human (X) against the computer (O).
    #[default]
    VsComputer,
}

impl Mode {
    /// Returns the other mode.
    pub fn toggle(self) -> Self {
        match self {
            Self::TwoPlayer => Self::VsComputer,
            Self::VsComputer => Self::TwoPlayer,
        }
    }

    /// Returns the display label for this option.
    pub fn label(self) -> &'static str {
        match self {
            Self::TwoPlayer => "Two players",
            Self::VsComputer => "Vs computer",
        }
    }
}

/// How the computer picks its moves.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Difficulty {
    /// Uniformly random empty square.
    Easy,
    /// Exhaustive minimax; never loses.
    #[default]
    Unbeatable,
}

impl Difficulty {
    /// Returns the other difficulty.
    pub fn toggle(self) -> Self {
        match self {
            Self::Easy => Self::Unbeatable,
            Self::Unbeatable => Self::Easy,
        }
    }

    /// Returns the display label for this option.
    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Unbeatable => "Unbeatable",
        }
    }
}

/// Errors surfaced to the front-end. All are recoverable no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum SessionError {
    /// Cell index outside 0-8.
    #[display("Cell {} does not exist", _0)]
    InvalidCell(usize),

    /// Human input arrived while the computer's reply is pending.
    #[display("Waiting for the computer to move")]
    AwaitingComputer,

    /// The computer was asked to move when it is not its turn.
    #[display("It is not the computer's turn")]
    NotComputersTurn,

    /// The move was rejected.
    #[display("{}", _0)]
    Move(MoveError),

    /// The undo was rejected.
    #[display("{}", _0)]
    Undo(UndoError),

    /// The computer could not find a move.
    #[display("{}", _0)]
    Search(SearchError),
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Move(e) => Some(e),
            Self::Undo(e) => Some(e),
            Self::Search(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MoveError> for SessionError {
    fn from(err: MoveError) -> Self {
        Self::Move(err)
    }
}

impl From<UndoError> for SessionError {
    fn from(err: UndoError) -> Self {
        Self::Undo(err)
    }
}

impl From<SearchError> for SessionError {
    fn from(err: SearchError) -> Self {
        Self::Search(err)
    }
}

/// What happened after an accepted human move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnResult {
    /// The round ended on this move.
    Finished(Outcome),
    /// The computer must reply before the human can move again.
    ComputerToMove,
    /// The next human may move.
    NextPlayer(Player),
}

/// Serializable snapshot of everything a front-end renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionView {
    /// Cells in row-major order; `None` for empty.
    pub cells: [Option<Player>; 9],
    /// Player to move.
    pub current_player: Player,
    /// Running tally.
    pub scores: Scores,
    /// True once the round has ended.
    pub game_over: bool,
    /// Round result, if ended.
    pub outcome: Option<Outcome>,
    /// Status line text.
    pub status: String,
    /// Whether the undo control is enabled.
    pub can_undo: bool,
    /// Whether the difficulty controls are shown.
    pub shows_difficulty: bool,
    /// Whether the computer's reply is pending.
    pub awaiting_computer: bool,
    /// Current mode.
    pub mode: Mode,
    /// Current difficulty.
    pub difficulty: Difficulty,
}

impl SessionView {
    /// Serializes the view as JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// One player's (or two players') running session.
#[derive(Debug, Clone)]
pub struct Session {
    state: MatchState,
    mode: Mode,
    difficulty: Difficulty,
    awaiting_computer: bool,
    rng: StdRng,
}

impl Session {
    /// Creates a session seeded from system entropy.
    #[instrument]
    pub fn new(mode: Mode, difficulty: Difficulty) -> Self {
        Self::with_rng(mode, difficulty, StdRng::from_entropy())
    }

    /// Creates a session with a fixed RNG seed, for reproducible easy games.
    #[instrument]
    pub fn with_seed(mode: Mode, difficulty: Difficulty, seed: u64) -> Self {
        Self::with_rng(mode, difficulty, StdRng::seed_from_u64(seed))
    }

    fn with_rng(mode: Mode, difficulty: Difficulty, rng: StdRng) -> Self {
        info!(%mode, %difficulty, "Session started");
        Self {
            state: MatchState::new(),
            mode,
            difficulty,
            awaiting_computer: false,
            rng,
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Intents
    // ─────────────────────────────────────────────────────────────

    /// Human selects a cell (0-8) for the player to move.
    #[instrument(skip(self), fields(mode = %self.mode))]
    pub fn select_cell(&mut self, index: usize) -> Result<TurnResult, SessionError> {
        if self.awaiting_computer {
            return Err(SessionError::AwaitingComputer);
        }
        let position = Position::from_index(index).ok_or(SessionError::InvalidCell(index))?;
        let player = self.state.current_player();
        self.state.apply_move(position, player)?;
        debug!(?position, ?player, "Human move applied");

        if let Some(outcome) = self.state.outcome() {
            return Ok(TurnResult::Finished(outcome));
        }
        if self.is_computer(self.state.current_player()) {
            self.awaiting_computer = true;
            return Ok(TurnResult::ComputerToMove);
        }
        Ok(TurnResult::NextPlayer(self.state.current_player()))
    }

    /// Plays the computer's reply. Returns the square it chose.
    ///
    /// # Errors
    ///
    /// [`SessionError::NotComputersTurn`] unless a reply is pending.
    #[instrument(skip(self), fields(difficulty = %self.difficulty))]
    pub fn play_computer_turn(&mut self) -> Result<Position, SessionError> {
        if !self.awaiting_computer {
            return Err(SessionError::NotComputersTurn);
        }

        let player = self.state.current_player();
        let choice = choose_move_for(self.difficulty, self.state.board(), player, &mut self.rng);
        let position = match choice {
            Ok(position) => position,
            Err(err) => {
                error!(error = %err, "Computer asked to move on a finished board");
                self.awaiting_computer = false;
                return Err(err.into());
            }
        };

        self.state.apply_move(position, player)?;
        self.awaiting_computer = false;
        info!(?position, ?player, "Computer moved");
        Ok(position)
    }

    /// Takes back the last move (the last two against the computer).
    #[instrument(skip(self))]
    pub fn undo(&mut self) -> Result<usize, SessionError> {
        if self.awaiting_computer {
            return Err(SessionError::AwaitingComputer);
        }
        let undone = self.state.undo(self.mode)?;
        Ok(undone)
    }

    /// Clears the board and the scores.
    #[instrument(skip(self))]
    pub fn new_game(&mut self) {
        self.awaiting_computer = false;
        self.state.reset(true);
    }

    /// Clears the board, keeping the scores.
    #[instrument(skip(self))]
    pub fn play_again(&mut self) {
        self.awaiting_computer = false;
        self.state.reset(false);
    }

    /// Switches mode and starts a fresh round (scores kept).
    #[instrument(skip(self))]
    pub fn set_mode(&mut self, mode: Mode) {
        if mode != self.mode {
            info!(from = %self.mode, to = %mode, "Mode changed");
        }
        self.mode = mode;
        self.play_again();
    }

    /// Switches difficulty and starts a fresh round (scores kept).
    #[instrument(skip(self))]
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        if difficulty != self.difficulty {
            info!(from = %self.difficulty, to = %difficulty, "Difficulty changed");
        }
        self.difficulty = difficulty;
        self.play_again();
    }

    // ─────────────────────────────────────────────────────────────
    //  Queries
    // ─────────────────────────────────────────────────────────────

    fn is_computer(&self, player: Player) -> bool {
        self.mode == Mode::VsComputer && player == Player::O
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        self.state.board()
    }

    /// Returns the underlying match state.
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// Returns the player to move.
    pub fn current_player(&self) -> Player {
        self.state.current_player()
    }

    /// Returns the running scores.
    pub fn scores(&self) -> &Scores {
        self.state.scores()
    }

    /// True once the round has ended.
    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    /// Returns the mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the difficulty.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// True while the computer's reply is pending.
    pub fn is_awaiting_computer(&self) -> bool {
        self.awaiting_computer
    }

    /// Whether the undo control is enabled.
    pub fn can_undo(&self) -> bool {
        !self.awaiting_computer && self.state.can_undo()
    }

    /// Difficulty controls only matter against the computer.
    pub fn shows_difficulty(&self) -> bool {
        self.mode == Mode::VsComputer
    }

    /// Status line: result text once the round ends, otherwise whose turn.
    pub fn status_message(&self) -> String {
        if let Some(outcome) = self.state.outcome() {
            return outcome.to_string();
        }
        if self.awaiting_computer {
            return "Computer is thinking...".to_string();
        }
        format!("Player {}'s turn", self.state.current_player())
    }

    /// Snapshot for rendering.
    #[instrument(skip(self))]
    pub fn view(&self) -> SessionView {
        let mut cells = [None; 9];
        for (cell, square) in cells.iter_mut().zip(self.state.board().squares()) {
            *cell = square.player();
        }
        SessionView {
            cells,
            current_player: self.state.current_player(),
            scores: *self.state.scores(),
            game_over: self.state.is_game_over(),
            outcome: self.state.outcome(),
            status: self.status_message(),
            can_undo: self.can_undo(),
            shows_difficulty: self.shows_difficulty(),
            awaiting_computer: self.awaiting_computer,
            mode: self.mode,
            difficulty: self.difficulty,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Mode::default(), Difficulty::default())
    }
}

//! Noughts core - tic-tac-toe engine
//!
//! Board state, win/draw detection, move history with undo, and the
//! adversarial search behind the computer opponent. Everything here is
//! synchronous and owned; front-ends drive it through [`Session`].
//!
//! # Architecture
//!
//! - **Rules**: pure functions over any [`Board`] (winner, draw, legal moves)
//! - **MatchState**: one match's board, turn, history and scores
//! - **Search**: random and minimax (alpha-beta) move selection
//! - **Session**: intents in, [`SessionView`] out
//!
//! # Example
//!
//! ```
//! use noughts_core::{Difficulty, Mode, Session, TurnResult};
//!
//! let mut session = Session::with_seed(Mode::VsComputer, Difficulty::Unbeatable, 7);
//! assert_eq!(session.select_cell(0).unwrap(), TurnResult::ComputerToMove);
//! let reply = session.play_computer_turn().unwrap();
//! assert_eq!(reply.to_index(), 4);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod match_state;
mod position;
mod session;
mod types;

pub mod invariants;
pub mod rules;
pub mod search;

// Crate-level exports - Domain types
pub use position::Position;
pub use types::{Board, Outcome, Player, Scores, Square};

// Crate-level exports - Actions and errors
pub use action::{Move, MoveError, RestoreError, UndoError};

// Crate-level exports - Match state
pub use match_state::MatchState;

// Crate-level exports - Search
pub use search::{
    choose_move_for, choose_optimal_move, choose_random_move, MovePolicy, OptimalPolicy,
    RandomPolicy, SearchError,
};

// Crate-level exports - Session boundary
pub use session::{Difficulty, Mode, Session, SessionError, SessionView, TurnResult};

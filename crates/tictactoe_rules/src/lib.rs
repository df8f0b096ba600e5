//! Pure tic-tac-toe rules.
//!
//! Everything here operates on an explicit [`Board`] value and holds no
//! state between calls, so it can be used from any number of request
//! handlers at once.
//!
//! - [`outcome`] resolves a board to a winner, a draw, or in-progress.
//! - [`next_mark`] derives whose turn it is from mark counts.
//! - [`player_label`] and [`label_from_sign`] build display names.
//! - [`Encouragements`] picks random flavor text.
//! - [`play`] and [`diff_move`] validate moves before a caller persists them.
//!
//! # Example
//!
//! ```
//! use tictactoe_rules::{outcome, play, Board, Mark, Outcome};
//!
//! let board = Board::parse(&["X", "X", "", "O", "O", "", "", "", ""])?;
//! let result = play(&board, 2)?;
//! assert_eq!(result.mark, Mark::X);
//! assert_eq!(result.outcome, Outcome::Won(Mark::X));
//! assert_eq!(outcome(&board), Outcome::InProgress);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod encouragement;
mod error;
mod moves;
mod names;
mod rules;
mod turn;
mod types;

pub use encouragement::{DEFAULT_ENCOURAGEMENTS, Encouragements};
pub use error::{BoardError, EmptyEncouragements};
pub use moves::{MoveError, MoveOutcome, diff_move, play};
pub use names::{
    DEFAULT_PLAYER1_NAME, DEFAULT_PLAYER2_NAME, PlayerNames, PlayerRoster, label_from_sign,
    player_label,
};
pub use rules::{LINES, check_winner, is_draw, is_full, outcome};
pub use turn::next_mark;
pub use types::{Board, Cell, Mark, Outcome, Position};

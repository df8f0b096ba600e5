//! Game rules for tic-tac-toe.
//!
//! Pure functions evaluating a board. Win detection always runs before the
//! fullness check, so a winning move that fills the last square is a win.

mod draw;
mod win;

pub use draw::{is_draw, is_full};
pub use win::{LINES, check_winner};

use crate::{Board, Outcome};
use tracing::{instrument, trace};

/// Resolves a board to its [`Outcome`].
#[instrument(level = "trace")]
pub fn outcome(board: &Board) -> Outcome {
    let outcome = if let Some(mark) = check_winner(board) {
        Outcome::Won(mark)
    } else if is_full(board) {
        Outcome::Draw
    } else {
        Outcome::InProgress
    };
    trace!(?outcome, "Board evaluated");
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Mark;

    #[test]
    fn test_empty_board_in_progress() {
        assert_eq!(outcome(&Board::new()), Outcome::InProgress);
    }

    #[test]
    fn test_top_row_win() {
        let board = Board::parse(&["X", "X", "X", "", "", "", "", "", ""]).unwrap();
        assert_eq!(outcome(&board), Outcome::Won(Mark::X));
    }

    #[test]
    fn test_full_board_draw() {
        let board = Board::parse(&["X", "O", "X", "X", "X", "O", "O", "X", "O"]).unwrap();
        assert_eq!(outcome(&board), Outcome::Draw);
    }

    #[test]
    fn test_ongoing() {
        let board = Board::parse(&["X", "O", "X", "", "O", "X", "", "", ""]).unwrap();
        assert_eq!(outcome(&board), Outcome::InProgress);
    }

    #[test]
    fn test_win_on_last_square_beats_draw() {
        // X O X / O X O / O X X: the final X completes the main diagonal
        let board = Board::parse(&["X", "O", "X", "O", "X", "O", "O", "X", "X"]).unwrap();
        assert_eq!(outcome(&board), Outcome::Won(Mark::X));
    }
}

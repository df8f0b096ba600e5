//! Move validation.
//!
//! The rule functions are read-only; these helpers are what a caller uses
//! to reject an illegal move before writing a new board anywhere.

use crate::{Board, Cell, Mark, Outcome, Position, next_mark, outcome};
use strum::IntoEnumIterator;
use tracing::{debug, instrument};

/// Reason a move was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The game already has a winner or ended in a draw.
    #[display("Game is already over")]
    GameOver,

    /// The target square already holds a mark.
    #[display("Square {} is already occupied", _0)]
    SquareOccupied(Position),

    /// The index does not name a square.
    #[display("Position {} is out of bounds (must be 0-8)", _0)]
    OutOfBounds(usize),

    /// The submitted board is identical to the current one.
    #[display("No move was made")]
    NoChange,

    /// More than one square changed in a single update.
    #[display("Expected exactly one new mark, found {} changed squares", _0)]
    TooManyChanges(usize),

    /// A square that already held a mark was changed.
    #[display("Square {} was already occupied", _0)]
    CellOverwritten(Position),

    /// The new mark belongs to the player who is not on turn.
    #[display("It's {}'s turn, not {}'s", expected, found)]
    WrongMark {
        /// Mark whose turn it is.
        expected: Mark,
        /// Mark that was placed.
        found: Mark,
    },
}

impl std::error::Error for MoveError {}

/// A validated move and the board it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Board after the move.
    pub board: Board,
    /// Mark that was placed.
    pub mark: Mark,
    /// Square it was placed on.
    pub position: Position,
    /// Outcome re-evaluated on the new board.
    pub outcome: Outcome,
}

/// Places the next mark at `index`.
///
/// The mark is derived from the board with [`next_mark`], so callers only
/// choose the square.
///
/// # Errors
///
/// [`MoveError::OutOfBounds`] for an index past 8, [`MoveError::GameOver`]
/// once the board is won or drawn, [`MoveError::SquareOccupied`] for a
/// taken square.
#[instrument]
pub fn play(board: &Board, index: usize) -> Result<MoveOutcome, MoveError> {
    let position = Position::from_index(index).ok_or(MoveError::OutOfBounds(index))?;

    if outcome(board).is_over() {
        return Err(MoveError::GameOver);
    }
    if !board.is_empty(position) {
        return Err(MoveError::SquareOccupied(position));
    }

    let mark = next_mark(board);
    let next = board.with_mark(position, mark);
    let result = MoveOutcome {
        board: next,
        mark,
        position,
        outcome: outcome(&next),
    };
    debug!(%mark, %position, outcome = %result.outcome, "Move applied");
    Ok(result)
}

/// Checks that `after` is `before` plus exactly one legal move.
///
/// Used when a client submits a whole board instead of a single square.
///
/// # Errors
///
/// [`MoveError::GameOver`] if `before` is already decided,
/// [`MoveError::NoChange`] or [`MoveError::TooManyChanges`] unless exactly
/// one square differs, [`MoveError::CellOverwritten`] if that square was
/// taken, [`MoveError::WrongMark`] if the wrong player moved.
#[instrument]
pub fn diff_move(before: &Board, after: &Board) -> Result<MoveOutcome, MoveError> {
    if outcome(before).is_over() {
        return Err(MoveError::GameOver);
    }

    let changed: Vec<Position> = Position::iter()
        .filter(|pos| before.cell(*pos) != after.cell(*pos))
        .collect();

    let position = match changed.as_slice() {
        [] => return Err(MoveError::NoChange),
        [position] => *position,
        many => return Err(MoveError::TooManyChanges(many.len())),
    };

    if !before.is_empty(position) {
        return Err(MoveError::CellOverwritten(position));
    }

    let expected = next_mark(before);
    let Cell::Occupied(found) = after.cell(position) else {
        return Err(MoveError::CellOverwritten(position));
    };
    if found != expected {
        return Err(MoveError::WrongMark { expected, found });
    }

    let result = MoveOutcome {
        board: *after,
        mark: found,
        position,
        outcome: outcome(after),
    };
    debug!(mark = %found, %position, outcome = %result.outcome, "Board update accepted");
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(symbols: [&str; 9]) -> Board {
        Board::parse(&symbols).unwrap()
    }

    #[test]
    fn test_play_first_move_is_x() {
        let result = play(&Board::new(), 4).unwrap();
        assert_eq!(result.mark, Mark::X);
        assert_eq!(result.position, Position::Center);
        assert_eq!(result.outcome, Outcome::InProgress);
    }

    #[test]
    fn test_play_does_not_mutate_input() {
        let before = Board::new();
        let _ = play(&before, 0).unwrap();
        assert_eq!(before, Board::new());
    }

    #[test]
    fn test_play_occupied() {
        let b = board(["X", "", "", "", "", "", "", "", ""]);
        assert_eq!(play(&b, 0), Err(MoveError::SquareOccupied(Position::TopLeft)));
    }

    #[test]
    fn test_play_out_of_bounds() {
        assert_eq!(play(&Board::new(), 9), Err(MoveError::OutOfBounds(9)));
    }

    #[test]
    fn test_play_after_win_rejected() {
        let b = board(["X", "X", "X", "O", "O", "", "", "", ""]);
        assert_eq!(play(&b, 5), Err(MoveError::GameOver));
    }

    #[test]
    fn test_play_winning_move() {
        let b = board(["X", "X", "", "O", "O", "", "", "", ""]);
        let result = play(&b, 2).unwrap();
        assert_eq!(result.outcome, Outcome::Won(Mark::X));
    }

    #[test]
    fn test_diff_single_legal_move() {
        let before = board(["X", "", "", "", "", "", "", "", ""]);
        let after = board(["X", "O", "", "", "", "", "", "", ""]);
        let result = diff_move(&before, &after).unwrap();
        assert_eq!(result.mark, Mark::O);
        assert_eq!(result.position, Position::TopCenter);
    }

    #[test]
    fn test_diff_no_change() {
        let b = board(["X", "", "", "", "", "", "", "", ""]);
        assert_eq!(diff_move(&b, &b), Err(MoveError::NoChange));
    }

    #[test]
    fn test_diff_two_marks_at_once() {
        let before = Board::new();
        let after = board(["X", "O", "", "", "", "", "", "", ""]);
        assert_eq!(diff_move(&before, &after), Err(MoveError::TooManyChanges(2)));
    }

    #[test]
    fn test_diff_wrong_mark() {
        let before = Board::new();
        let after = board(["O", "", "", "", "", "", "", "", ""]);
        assert_eq!(
            diff_move(&before, &after),
            Err(MoveError::WrongMark {
                expected: Mark::X,
                found: Mark::O
            })
        );
    }

    #[test]
    fn test_diff_overwrite() {
        let before = board(["X", "", "", "", "", "", "", "", ""]);
        let after = board(["O", "", "", "", "", "", "", "", ""]);
        assert_eq!(
            diff_move(&before, &after),
            Err(MoveError::CellOverwritten(Position::TopLeft))
        );
    }

    #[test]
    fn test_diff_clearing_a_square_rejected() {
        let before = board(["X", "", "", "", "", "", "", "", ""]);
        assert_eq!(
            diff_move(&before, &Board::new()),
            Err(MoveError::CellOverwritten(Position::TopLeft))
        );
    }

    #[test]
    fn test_diff_after_draw_rejected() {
        let full = board(["X", "O", "X", "X", "X", "O", "O", "X", "O"]);
        assert_eq!(diff_move(&full, &full), Err(MoveError::GameOver));
    }
}

//! Turn derivation from mark counts.

use crate::{Board, Mark};
use tracing::instrument;

/// Returns the mark that moves next.
///
/// X opens the game. After that O moves whenever X is ahead, otherwise X
/// moves. Boards where O is ahead break the alternation precondition; they
/// still resolve to X rather than failing.
#[instrument(level = "trace")]
pub fn next_mark(board: &Board) -> Mark {
    let x = board.count(Mark::X);
    let o = board.count(Mark::O);
    if x == 0 {
        Mark::X
    } else if x > o {
        Mark::O
    } else {
        Mark::X
    }
}

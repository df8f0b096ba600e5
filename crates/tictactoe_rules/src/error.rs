//! Error types for malformed rule-engine input.

/// A board could not be built from the supplied cells.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum BoardError {
    /// The board did not have exactly nine cells.
    #[display("Invalid board: expected 9 cells, got {}", _0)]
    WrongLength(usize),

    /// A cell held something other than `""`, `"X"` or `"O"`.
    #[display("Invalid board: unknown cell symbol '{}'", _0)]
    UnknownSymbol(String),
}

impl std::error::Error for BoardError {}

/// An encouragement list was configured without any entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("Encouragement list must contain at least one entry")]
pub struct EmptyEncouragements;

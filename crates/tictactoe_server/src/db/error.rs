//! Storage errors.

use derive_more::{Display, Error};
use tracing::instrument;

/// What part of the storage layer failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum DbErrorKind {
    /// The database location is unusable.
    #[display("invalid location")]
    InvalidLocation,
    /// Opening or configuring the connection failed.
    #[display("connection")]
    Connection,
    /// A schema migration failed.
    #[display("migration")]
    Migration,
    /// A query or transaction failed.
    #[display("query")]
    Query,
    /// A stored board did not decode to nine valid cells.
    #[display("corrupt board")]
    CorruptBoard,
    /// A board could not be encoded for storage.
    #[display("encoding")]
    Encoding,
}

/// Storage failure, tagged with where in this crate it was raised.
#[derive(Debug, Clone, Display, Error)]
#[display("Database error ({}): {} at {}:{}", kind, message, file, line)]
pub struct DbError {
    /// Failure category.
    pub kind: DbErrorKind,
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl DbError {
    /// Creates an error of `kind`, recording the caller's location.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(kind: DbErrorKind, message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<diesel::result::Error> for DbError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        Self::new(DbErrorKind::Query, err.to_string())
    }
}

impl From<diesel::ConnectionError> for DbError {
    #[track_caller]
    fn from(err: diesel::ConnectionError) -> Self {
        Self::new(DbErrorKind::Connection, err.to_string())
    }
}

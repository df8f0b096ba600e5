//! SQLite persistence for game records.

mod error;
mod models;
mod repository;
mod schema;

pub use error::{DbError, DbErrorKind};
pub use models::{GameChanges, GameRecord, NewGameRecord};
pub use repository::GameRepository;

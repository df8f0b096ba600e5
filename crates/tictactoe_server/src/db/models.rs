//! Database models for stored games.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;
use tictactoe_rules::{Board, MoveOutcome, PlayerRoster};
use tracing::instrument;

use crate::db::{DbError, DbErrorKind, schema};

/// A stored game.
///
/// The board lives in `moves` as a JSON array of nine cell symbols and
/// `winner` holds `"X"`, `"O"`, `"draw"` or NULL.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Getters)]
#[diesel(table_name = schema::games)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct GameRecord {
    id: i32,
    #[getter(skip)]
    player1_name: Option<String>,
    #[getter(skip)]
    player2_name: Option<String>,
    moves: String,
    created_at: NaiveDateTime,
    winner: Option<String>,
}

impl GameRecord {
    /// Decodes the stored board.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the stored text is not a valid nine-cell board.
    #[instrument(skip(self), fields(game_id = self.id))]
    pub fn board(&self) -> Result<Board, DbError> {
        serde_json::from_str(&self.moves).map_err(|e| {
            DbError::new(DbErrorKind::CorruptBoard, format!("Game {}: {}", self.id, e))
        })
    }
}

impl PlayerRoster for GameRecord {
    fn player1_name(&self) -> Option<&str> {
        self.player1_name.as_deref()
    }

    fn player2_name(&self) -> Option<&str> {
        self.player2_name.as_deref()
    }
}

/// Insertable model for a fresh game.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::games)]
pub struct NewGameRecord {
    player1_name: Option<String>,
    player2_name: Option<String>,
    moves: String,
}

/// Board and winner written back after a move.
#[derive(Debug, Clone, PartialEq, Eq, AsChangeset, Getters)]
#[diesel(table_name = schema::games)]
#[diesel(treat_none_as_null = true)]
pub struct GameChanges {
    moves: String,
    winner: Option<String>,
}

impl GameChanges {
    /// Builds the row update for a validated move.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the board cannot be encoded.
    #[instrument(skip(result), fields(position = %result.position, outcome = %result.outcome))]
    pub fn from_move(result: &MoveOutcome) -> Result<Self, DbError> {
        let moves = encode_board(&result.board)?;
        Ok(Self {
            moves,
            winner: result.outcome.winner_value().map(str::to_string),
        })
    }
}

/// Encodes a board in its stored JSON form.
pub(crate) fn encode_board(board: &Board) -> Result<String, DbError> {
    serde_json::to_string(board).map_err(|e| {
        DbError::new(DbErrorKind::Encoding, format!("Failed to encode board: {}", e))
    })
}

//! Database repository for game records.

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tictactoe_rules::Board;
use tracing::{debug, info, instrument};

use super::models::encode_board;
use crate::db::{DbError, DbErrorKind, GameChanges, GameRecord, NewGameRecord, schema};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Milliseconds a connection waits on a locked database before failing.
const BUSY_TIMEOUT_MS: u32 = 5_000;

/// Database repository for game operations.
///
/// Each operation opens its own connection, so a repository can be cloned
/// freely into blocking tasks.
#[derive(Debug, Clone)]
pub struct GameRepository {
    database_url: String,
}

impl GameRepository {
    /// Creates a new repository for the SQLite database at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the path is empty.
    #[instrument(skip(database_url), fields(database_url = %database_url))]
    pub fn new(database_url: String) -> Result<Self, DbError> {
        if database_url.trim().is_empty() {
            return Err(DbError::new(
                DbErrorKind::InvalidLocation,
                "Database URL must not be empty",
            ));
        }
        info!(path = %database_url, "Creating GameRepository");
        Ok(Self { database_url })
    }

    /// Path of the backing database.
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.database_url, "Establishing connection");
        let mut conn = SqliteConnection::establish(&self.database_url).map_err(|e| {
            DbError::new(
                DbErrorKind::Connection,
                format!("Failed to connect to '{}': {}", self.database_url, e),
            )
        })?;
        conn.batch_execute(&format!("PRAGMA busy_timeout = {};", BUSY_TIMEOUT_MS))?;
        Ok(conn)
    }

    /// Applies any pending schema migrations, returning how many ran.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a migration fails.
    #[instrument(skip(self))]
    pub fn run_migrations(&self) -> Result<usize, DbError> {
        let mut conn = self.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| DbError::new(DbErrorKind::Migration, e.to_string()))?;
        for version in &applied {
            info!(%version, "Applied migration");
        }
        Ok(applied.len())
    }

    /// Inserts a new game with an empty board.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn create_game(
        &self,
        player1_name: Option<String>,
        player2_name: Option<String>,
    ) -> Result<GameRecord, DbError> {
        let mut conn = self.connection()?;
        let new_game = NewGameRecord::new(player1_name, player2_name, encode_board(&Board::new())?);

        let game = diesel::insert_into(schema::games::table)
            .values(&new_game)
            .returning(GameRecord::as_returning())
            .get_result(&mut conn)?;

        info!(game_id = game.id(), "Game created");
        Ok(game)
    }

    /// Gets a game by id. Returns `None` if not found.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn get_game(&self, id: i32) -> Result<Option<GameRecord>, DbError> {
        let mut conn = self.connection()?;

        let game = schema::games::table
            .find(id)
            .select(GameRecord::as_select())
            .first::<GameRecord>(&mut conn)
            .optional()?;

        debug!(found = game.is_some(), "Game lookup finished");
        Ok(game)
    }

    /// Lists all games, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn list_games(&self) -> Result<Vec<GameRecord>, DbError> {
        let mut conn = self.connection()?;

        let games = schema::games::table
            .order(schema::games::id.asc())
            .select(GameRecord::as_select())
            .load::<GameRecord>(&mut conn)?;

        info!(count = games.len(), "Games loaded");
        Ok(games)
    }

    /// Reads a game, lets `decide` compute the new row, and writes it back.
    ///
    /// Read and write share one `IMMEDIATE` transaction, so concurrent
    /// updates to the same game are serialized and `decide` always sees the
    /// latest board. Returns `Ok(None)` if the game does not exist. An error
    /// from `decide` rolls the transaction back.
    ///
    /// # Errors
    ///
    /// Whatever `decide` returns, or a database error converted into `E`.
    #[instrument(skip(self, decide))]
    pub fn update_game<F, E>(&self, id: i32, decide: F) -> Result<Option<GameRecord>, E>
    where
        F: FnOnce(&GameRecord) -> Result<GameChanges, E>,
        E: From<DbError> + From<diesel::result::Error>,
    {
        let mut conn = self.connection()?;

        conn.immediate_transaction(|conn| {
            let Some(current) = schema::games::table
                .find(id)
                .select(GameRecord::as_select())
                .first::<GameRecord>(conn)
                .optional()?
            else {
                debug!("Game not found, nothing to update");
                return Ok(None);
            };

            let changes = decide(&current)?;

            let updated = diesel::update(schema::games::table.find(id))
                .set(&changes)
                .returning(GameRecord::as_returning())
                .get_result(conn)?;

            info!(winner = ?changes.winner(), "Game updated");
            Ok(Some(updated))
        })
    }

    /// Deletes a game. Returns `false` if it did not exist.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn delete_game(&self, id: i32) -> Result<bool, DbError> {
        let mut conn = self.connection()?;

        let deleted = diesel::delete(schema::games::table.find(id)).execute(&mut conn)?;

        info!(deleted, "Delete finished");
        Ok(deleted > 0)
    }
}

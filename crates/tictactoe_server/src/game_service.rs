//! Game business logic layer.

use tictactoe_rules::{
    Board, DEFAULT_PLAYER1_NAME, DEFAULT_PLAYER2_NAME, MoveError, diff_move, play,
};
use tracing::{debug, info, instrument, warn};

use crate::db::{DbError, GameChanges, GameRecord, GameRepository};

/// Errors surfaced by [`GameService`].
#[derive(Debug, Clone, derive_more::Display)]
pub enum GameError {
    /// No game with this id.
    #[display("Game {} not found", _0)]
    NotFound(i32),

    /// The rules rejected the move.
    #[display("Move rejected: {}", _0)]
    Rejected(MoveError),

    /// Storage failed.
    #[display("{}", _0)]
    Db(DbError),

    /// The blocking task running a database call did not complete.
    #[display("Worker task failed: {}", _0)]
    Worker(String),
}

impl std::error::Error for GameError {}

impl From<DbError> for GameError {
    fn from(err: DbError) -> Self {
        Self::Db(err)
    }
}

impl From<diesel::result::Error> for GameError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        Self::Db(DbError::from(err))
    }
}

impl From<MoveError> for GameError {
    fn from(err: MoveError) -> Self {
        Self::Rejected(err)
    }
}

/// Service layer for game operations.
///
/// Wraps [`GameRepository`] and runs every state change through the rules
/// engine before it is written, so stored boards only ever advance by one
/// legal move at a time.
#[derive(Debug, Clone)]
pub struct GameService {
    repository: GameRepository,
}

impl GameService {
    /// Creates a new service backed by the given repository.
    #[instrument(skip(repository))]
    pub fn new(repository: GameRepository) -> Self {
        info!("Creating GameService");
        Self { repository }
    }

    /// Creates a game. Missing or blank names get the seat defaults.
    #[instrument(skip(self))]
    pub fn create_game(
        &self,
        player1: Option<String>,
        player2: Option<String>,
    ) -> Result<GameRecord, GameError> {
        let player1 = name_or_default(player1, DEFAULT_PLAYER1_NAME);
        let player2 = name_or_default(player2, DEFAULT_PLAYER2_NAME);
        debug!(%player1, %player2, "Creating game");
        Ok(self.repository.create_game(Some(player1), Some(player2))?)
    }

    /// Loads a game.
    #[instrument(skip(self))]
    pub fn get_game(&self, id: i32) -> Result<GameRecord, GameError> {
        self.repository.get_game(id)?.ok_or(GameError::NotFound(id))
    }

    /// Lists all games, oldest first.
    #[instrument(skip(self))]
    pub fn list_games(&self) -> Result<Vec<GameRecord>, GameError> {
        Ok(self.repository.list_games()?)
    }

    /// Places the next mark on square `position` (0-8).
    #[instrument(skip(self))]
    pub fn play_move(&self, id: i32, position: usize) -> Result<GameRecord, GameError> {
        self.repository
            .update_game(id, |current| {
                let board = current.board()?;
                let result = play(&board, position)?;
                Ok::<_, GameError>(GameChanges::from_move(&result)?)
            })?
            .ok_or(GameError::NotFound(id))
    }

    /// Replaces the board with `moves`, which must be the stored board plus
    /// exactly one legal move.
    ///
    /// The winner is always recomputed from `moves`; a `claimed_winner` that
    /// disagrees is logged and ignored.
    #[instrument(skip(self, moves))]
    pub fn submit_board(
        &self,
        id: i32,
        moves: Board,
        claimed_winner: Option<String>,
    ) -> Result<GameRecord, GameError> {
        self.repository
            .update_game(id, |current| {
                let board = current.board()?;
                let result = diff_move(&board, &moves)?;
                let changes = GameChanges::from_move(&result)?;
                if claimed_winner.is_some() && claimed_winner.as_ref() != changes.winner().as_ref()
                {
                    warn!(
                        claimed = ?claimed_winner,
                        actual = ?changes.winner(),
                        "Client-supplied winner does not match board, ignoring"
                    );
                }
                Ok::<_, GameError>(changes)
            })?
            .ok_or(GameError::NotFound(id))
    }

    /// Deletes a game.
    #[instrument(skip(self))]
    pub fn delete_game(&self, id: i32) -> Result<(), GameError> {
        if self.repository.delete_game(id)? {
            Ok(())
        } else {
            Err(GameError::NotFound(id))
        }
    }
}

fn name_or_default(name: Option<String>, default: &str) -> String {
    match name.as_deref().map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => trimmed.to_string(),
        _ => default.to_string(),
    }
}

/// Runs a blocking service call on tokio's blocking pool.
///
/// # Errors
///
/// The call's own error, or [`GameError::Worker`] if the task panicked or
/// was cancelled.
#[instrument(skip(f))]
pub async fn run_blocking<T, F>(f: F) -> Result<T, GameError>
where
    F: FnOnce() -> Result<T, GameError> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(f).await {
        Ok(result) => result,
        Err(e) => {
            tracing::error!(error = %e, "Blocking task failed");
            Err(GameError::Worker(e.to_string()))
        }
    }
}

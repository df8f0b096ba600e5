//! JSON API handlers.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tictactoe_rules::{Board, PlayerRoster};
use tracing::{error, info, instrument, warn};

use crate::app::AppState;
use crate::db::GameRecord;
use crate::game_service::{GameError, run_blocking};

/// Body of `POST /api/new`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewGameRequest {
    /// Name for the X seat.
    #[serde(default)]
    pub player1: Option<String>,
    /// Name for the O seat.
    #[serde(default)]
    pub player2: Option<String>,
}

/// Body of `PUT /api/game/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateGameRequest {
    /// Full board after the client's move.
    pub moves: Board,
    /// Winner the client computed; informational only.
    #[serde(default)]
    pub winner: Option<String>,
}

/// Body of `POST /api/game/{id}/move`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MoveRequest {
    /// Square index, 0-8 row-major.
    pub position: usize,
}

/// Game as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameView {
    /// Game id.
    pub id: i32,
    /// Name for the X seat.
    pub player1_name: Option<String>,
    /// Name for the O seat.
    pub player2_name: Option<String>,
    /// Nine cell symbols.
    pub moves: Board,
    /// Creation time.
    #[serde(rename = "createdAt")]
    pub created_at: NaiveDateTime,
    /// `"X"`, `"O"`, `"draw"` or null.
    pub winner: Option<String>,
}

impl TryFrom<&GameRecord> for GameView {
    type Error = GameError;

    fn try_from(record: &GameRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: *record.id(),
            player1_name: record.player1_name().map(str::to_string),
            player2_name: record.player2_name().map(str::to_string),
            moves: record.board()?,
            created_at: *record.created_at(),
            winner: record.winner().clone(),
        })
    }
}

/// Error response: a status code and a plain-text body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// Creates an error response.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Status code of the response.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Replaces the body of server-side failures, leaving client errors as is.
    fn with_server_message(self, message: &str) -> Self {
        if self.status.is_server_error() {
            Self::new(self.status, message)
        } else {
            self
        }
    }
}

impl From<GameError> for ApiError {
    fn from(err: GameError) -> Self {
        match err {
            GameError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, "Game not found!"),
            GameError::Rejected(reason) => {
                warn!(%reason, "Move rejected");
                Self::new(StatusCode::CONFLICT, reason.to_string())
            }
            GameError::Db(e) => {
                error!(error = %e, "Database failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Database error!")
            }
            GameError::Worker(e) => {
                error!(error = %e, "Worker failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Database error!")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, self.message).into_response()
    }
}

fn parse_new_game(body: &[u8]) -> Result<NewGameRequest, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(NewGameRequest::default());
    }
    serde_json::from_slice(body).map_err(|e| {
        warn!(error = %e, "Unreadable new game body");
        ApiError::new(StatusCode::BAD_REQUEST, format!("Invalid request body: {}", e))
    })
}

fn view(record: &GameRecord) -> Result<Json<GameView>, ApiError> {
    Ok(Json(GameView::try_from(record)?))
}

/// `POST /api/new`
///
/// The body is optional; an empty body creates a game with default names.
#[instrument(skip(state, body))]
pub async fn new_game(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<GameView>, ApiError> {
    let req = parse_new_game(&body)?;
    let service = state.service.clone();
    let game = run_blocking(move || service.create_game(req.player1, req.player2)).await?;
    info!(game_id = game.id(), "Game created via API");
    view(&game)
}

/// `GET /api/games`
#[instrument(skip(state))]
pub async fn list_games(State(state): State<AppState>) -> Result<Json<Vec<GameView>>, ApiError> {
    let service = state.service.clone();
    let load = async {
        let games = run_blocking(move || service.list_games()).await?;
        games
            .iter()
            .map(GameView::try_from)
            .collect::<Result<Vec<_>, GameError>>()
    };
    load.await
        .map(Json)
        .map_err(|e| ApiError::from(e).with_server_message("Something went terribly wrong!"))
}

/// `GET /api/game/{id}`
#[instrument(skip(state))]
pub async fn get_game(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<GameView>, ApiError> {
    let service = state.service.clone();
    let game = run_blocking(move || service.get_game(id)).await?;
    view(&game)
}

/// `PUT /api/game/{id}`
#[instrument(skip(state, req))]
pub async fn update_game(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<UpdateGameRequest>,
) -> Result<Json<GameView>, ApiError> {
    let service = state.service.clone();
    let game = run_blocking(move || service.submit_board(id, req.moves, req.winner)).await?;
    view(&game)
}

/// `POST /api/game/{id}/move`
#[instrument(skip(state))]
pub async fn play_move(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<MoveRequest>,
) -> Result<Json<GameView>, ApiError> {
    let service = state.service.clone();
    let game = run_blocking(move || service.play_move(id, req.position)).await?;
    view(&game)
}

/// `DELETE /api/game/{id}` and `DELETE /api/games/{id}`
#[instrument(skip(state))]
pub async fn delete_game(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let service = state.service.clone();
    run_blocking(move || service.delete_game(id)).await?;
    info!(game_id = id, "Game deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Any other method on `/api/game/{id}`.
pub async fn method_not_allowed() -> ApiError {
    ApiError::new(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_new_game_body_means_defaults() {
        let req = parse_new_game(b"").unwrap();
        assert!(req.player1.is_none() && req.player2.is_none());
        assert!(parse_new_game(b"  \n").is_ok());
    }

    #[test]
    fn test_new_game_body_names() {
        let req = parse_new_game(br#"{"player1":"Alice"}"#).unwrap();
        assert_eq!(req.player1.as_deref(), Some("Alice"));
        assert!(req.player2.is_none());
    }

    #[test]
    fn test_malformed_new_game_body() {
        let err = parse_new_game(b"{not json").unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}

//! Server-rendered HTML pages.
//!
//! The board is a plain HTML form: every empty square is a submit button
//! carrying its index, so the game plays without client-side scripting.

use axum::Form;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;
use strum::IntoEnumIterator;
use tictactoe_rules::{Board, Cell, Mark, Outcome, Position, next_mark, outcome, player_label};
use tracing::{error, info, instrument, warn};

use crate::app::AppState;
use crate::db::GameRecord;
use crate::game_service::{GameError, run_blocking};

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; display: flex; flex-direction: column; align-items: center; }
.grid { display: grid; grid-template-columns: repeat(3, 6rem); gap: 0.4rem; }
.cell { width: 6rem; height: 6rem; font-size: 2.5rem; display: flex; align-items: center; justify-content: center; border: 2px solid #444; border-radius: 0.5rem; background: #fafafa; }
button.cell { cursor: pointer; }
button.cell:hover { background: #e8f0ff; }
ul { list-style: none; padding: 0; }
li { margin: 0.5rem 0; }
"#;

/// Form posted by the start page.
#[derive(Debug, Clone, Deserialize)]
pub struct NewGameForm {
    #[serde(default)]
    player1: Option<String>,
    #[serde(default)]
    player2: Option<String>,
}

/// Form posted by a board square.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct MoveForm {
    position: usize,
}

/// Page-level failure rendered as HTML.
#[derive(Debug)]
pub struct PageError(GameError);

impl From<GameError> for PageError {
    fn from(err: GameError) -> Self {
        Self(err)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            GameError::NotFound(_) => (StatusCode::NOT_FOUND, "Game not found!"),
            other => {
                error!(error = %other, "Page failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went terribly wrong!",
                )
            }
        };
        let body = format!(
            r#"<h1>{}</h1><p><a href="/">Back to start</a></p>"#,
            message
        );
        (status, Html(layout(message, &body))).into_response()
    }
}

/// `GET /`
#[instrument]
pub async fn index() -> Html<String> {
    let body = format!(
        r#"<h1>Tic-Tac-Toe</h1>
<form method="post" action="/new">
  <input name="player1" placeholder="{x} Your Name (Optional)">
  <input name="player2" placeholder="{o} Opponent Name (Optional)">
  <button type="submit">Start Game</button>
</form>
<p><a href="/games">See all games</a></p>"#,
        x = Mark::X.glyph(),
        o = Mark::O.glyph(),
    );
    Html(layout("Tic-Tac-Toe", &body))
}

/// `POST /new`
#[instrument(skip(state))]
pub async fn create_game(
    State(state): State<AppState>,
    Form(form): Form<NewGameForm>,
) -> Result<Redirect, PageError> {
    let service = state.service.clone();
    let game = run_blocking(move || service.create_game(form.player1, form.player2)).await?;
    info!(game_id = game.id(), "Game created from start page");
    Ok(Redirect::to(&format!("/game/{}", game.id())))
}

/// `GET /games`
#[instrument(skip(state))]
pub async fn game_list(State(state): State<AppState>) -> Result<Html<String>, PageError> {
    let service = state.service.clone();
    let games = run_blocking(move || service.list_games()).await?;

    let mut rows = String::new();
    for game in &games {
        rows.push_str(&game_row(game)?);
    }
    let body = format!(
        r#"<h1>All games</h1>
<ul>{}</ul>
<p><a href="/">New game</a></p>"#,
        rows
    );
    Ok(Html(layout("All games", &body)))
}

/// `GET /game/{id}`
#[instrument(skip(state))]
pub async fn game_page(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Html<String>, PageError> {
    let service = state.service.clone();
    let game = run_blocking(move || service.get_game(id)).await?;
    let board = game.board().map_err(GameError::from)?;
    let status = outcome(&board);

    let header = match status {
        Outcome::Won(mark) => format!("<h1>{} Won</h1>", escape_html(&player_label(mark, &game))),
        Outcome::Draw => "<h1>It's a draw! 🤝</h1>".to_string(),
        Outcome::InProgress => format!(
            "<h1>{}</h1><p>{}</p>",
            escape_html(&player_label(next_mark(&board), &game)),
            escape_html(state.encouragements.pick())
        ),
    };

    let body = format!(
        r#"{header}
<form method="post" action="/game/{id}/move" class="grid">{cells}</form>
<p><a href="/">New game</a> | <a href="/games">See all games</a></p>"#,
        header = header,
        id = id,
        cells = render_cells(&board, status),
    );
    Ok(Html(layout("Tic-Tac-Toe", &body)))
}

/// `POST /game/{id}/move`
///
/// Illegal moves are logged and dropped; the player lands back on the
/// board either way.
#[instrument(skip(state))]
pub async fn play_move(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(form): Form<MoveForm>,
) -> Result<Redirect, PageError> {
    let service = state.service.clone();
    match run_blocking(move || service.play_move(id, form.position)).await {
        Ok(_) => {}
        Err(GameError::Rejected(reason)) => warn!(%reason, "Ignoring illegal move"),
        Err(e) => return Err(e.into()),
    }
    Ok(Redirect::to(&format!("/game/{}", id)))
}

fn render_cells(board: &Board, status: Outcome) -> String {
    let mut cells = String::new();
    for pos in Position::iter() {
        let cell = match board.cell(pos) {
            Cell::Occupied(mark) => format!(r#"<div class="cell">{}</div>"#, mark.glyph()),
            Cell::Empty if !status.is_over() => format!(
                r#"<button class="cell" type="submit" name="position" value="{}" aria-label="{}"></button>"#,
                pos.to_index(),
                pos.label()
            ),
            Cell::Empty => r#"<div class="cell"></div>"#.to_string(),
        };
        cells.push_str(&cell);
    }
    cells
}

fn game_row(game: &GameRecord) -> Result<String, GameError> {
    let board = game.board()?;
    let result = match outcome(&board) {
        Outcome::Won(mark) => format!("🎉 {}won", player_label(mark, game)),
        Outcome::Draw => "Draw".to_string(),
        Outcome::InProgress => "In progress".to_string(),
    };
    Ok(format!(
        r#"<li><a href="/game/{id}">{x}vs {o}| {result} | Created: {created}</a></li>"#,
        id = game.id(),
        x = escape_html(&player_label(Mark::X, game)),
        o = escape_html(&player_label(Mark::O, game)),
        result = escape_html(&result),
        created = game.created_at().format("%Y-%m-%d %H:%M"),
    ))
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{}</title>
<style>{}</style>
</head>
<body>
{}
</body>
</html>"#,
        escape_html(title),
        STYLE,
        body
    )
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

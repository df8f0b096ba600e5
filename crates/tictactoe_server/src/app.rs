//! Router and shared handler state.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::Request;
use axum::routing::{delete, get, post};
use tictactoe_rules::Encouragements;
use tower::ServiceBuilder;
use tracing::{info, instrument};

use crate::game_service::GameService;
use crate::{api, pages};

/// State shared by every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Game operations.
    pub service: GameService,
    /// Flavor text for the game page.
    pub encouragements: Arc<Encouragements>,
}

impl AppState {
    /// Creates handler state.
    pub fn new(service: GameService, encouragements: Encouragements) -> Self {
        Self {
            service,
            encouragements: Arc::new(encouragements),
        }
    }
}

/// Builds the full application: HTML pages and the JSON API.
#[instrument(skip(state))]
pub fn router(state: AppState) -> Router {
    info!("Building router");
    Router::new()
        .route("/", get(pages::index))
        .route("/new", post(pages::create_game))
        .route("/games", get(pages::game_list))
        .route("/game/{id}", get(pages::game_page))
        .route("/game/{id}/move", post(pages::play_move))
        .route("/api/new", post(api::new_game))
        .route("/api/games", get(api::list_games))
        .route("/api/games/{id}", delete(api::delete_game))
        .route(
            "/api/game/{id}",
            get(api::get_game)
                .put(api::update_game)
                .delete(api::delete_game)
                .fallback(api::method_not_allowed),
        )
        .route("/api/game/{id}/move", post(api::play_move))
        .layer(ServiceBuilder::new().map_request(|req: Request<Body>| {
            info!(method = %req.method(), uri = %req.uri(), "Incoming HTTP request");
            req
        }))
        .with_state(state)
}

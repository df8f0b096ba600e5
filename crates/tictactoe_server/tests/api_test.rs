//! HTTP tests for the JSON API and HTML pages.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tempfile::NamedTempFile;
use tictactoe_rules::Encouragements;
use tower::ServiceExt;

use tictactoe_server::api::GameView;
use tictactoe_server::{AppState, GameRepository, GameService, router};

fn setup_app() -> (NamedTempFile, Router) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();

    let repo = GameRepository::new(db_path).expect("Failed to create repository");
    repo.run_migrations().expect("Migrations failed");

    let encouragements =
        Encouragements::new(vec!["Keep going!".to_string()]).expect("Bad encouragements");
    let app = router(AppState::new(GameService::new(repo), encouragements));
    (db_file, app)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.expect("Request failed");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Body failed")
        .to_bytes();
    (status, String::from_utf8(bytes.to_vec()).expect("Body not UTF-8"))
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("Bad request")
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("Bad request")
}

fn form_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .expect("Bad request")
}

async fn create_game(app: &Router, body: Value) -> GameView {
    let (status, body) = send(app, json_request("POST", "/api/new", body)).await;
    assert_eq!(status, StatusCode::OK);
    serde_json::from_str(&body).expect("Bad game JSON")
}

#[tokio::test]
async fn test_new_game_defaults() {
    let (_db, app) = setup_app();
    let game = create_game(&app, json!({})).await;

    assert_eq!(game.player1_name.as_deref(), Some("Player 1"));
    assert_eq!(game.player2_name.as_deref(), Some("Player 2"));
    assert!(game.winner.is_none());
    assert!(game.moves.cells().iter().all(|c| c.mark().is_none()));
}

#[tokio::test]
async fn test_new_game_without_body() {
    let (_db, app) = setup_app();
    let (status, body) = send(&app, empty_request("POST", "/api/new")).await;
    assert_eq!(status, StatusCode::OK);
    let game: GameView = serde_json::from_str(&body).expect("Bad game JSON");
    assert_eq!(game.player1_name.as_deref(), Some("Player 1"));
    assert_eq!(game.player2_name.as_deref(), Some("Player 2"));
}

#[tokio::test]
async fn test_new_game_malformed_body() {
    let (_db, app) = setup_app();
    let request = Request::builder()
        .method("POST")
        .uri("/api/new")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"player1\":"))
        .expect("Bad request");
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_game_json_shape() {
    let (_db, app) = setup_app();
    let game = create_game(&app, json!({"player1": "Alice", "player2": "Bob"})).await;

    let (status, body) = send(&app, empty_request("GET", &format!("/api/game/{}", game.id))).await;
    assert_eq!(status, StatusCode::OK);
    let value: Value = serde_json::from_str(&body).expect("Bad JSON");
    assert_eq!(value["player1_name"], "Alice");
    assert_eq!(value["moves"], json!(["", "", "", "", "", "", "", "", ""]));
    assert!(value.get("createdAt").is_some());
    assert!(value["winner"].is_null());
}

#[tokio::test]
async fn test_list_games() {
    let (_db, app) = setup_app();
    create_game(&app, json!({})).await;
    create_game(&app, json!({"player1": "Zed"})).await;

    let (status, body) = send(&app, empty_request("GET", "/api/games")).await;
    assert_eq!(status, StatusCode::OK);
    let games: Vec<GameView> = serde_json::from_str(&body).expect("Bad JSON");
    assert_eq!(games.len(), 2);
    assert_eq!(games[1].player1_name.as_deref(), Some("Zed"));
}

#[tokio::test]
async fn test_get_missing_game() {
    let (_db, app) = setup_app();
    let (status, body) = send(&app, empty_request("GET", "/api/game/999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "Game not found!");
}

#[tokio::test]
async fn test_put_legal_and_illegal_boards() {
    let (_db, app) = setup_app();
    let game = create_game(&app, json!({})).await;
    let uri = format!("/api/game/{}", game.id);

    let board = json!({"moves": ["X", "", "", "", "", "", "", "", ""], "winner": null});
    let (status, body) = send(&app, json_request("PUT", &uri, board)).await;
    assert_eq!(status, StatusCode::OK);
    let updated: GameView = serde_json::from_str(&body).expect("Bad JSON");
    assert_eq!(updated.moves.symbols()[0], "X");

    // X again when O is on turn.
    let wrong = json!({"moves": ["X", "X", "", "", "", "", "", "", ""]});
    let (status, _) = send(&app, json_request("PUT", &uri, wrong)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let malformed = json!({"moves": ["X", "Q", "", "", "", "", "", "", ""]});
    let (status, _) = send(&app, json_request("PUT", &uri, malformed)).await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn test_put_ignores_claimed_winner() {
    let (_db, app) = setup_app();
    let game = create_game(&app, json!({})).await;
    let uri = format!("/api/game/{}", game.id);

    let board = json!({"moves": ["", "", "", "", "X", "", "", "", ""], "winner": "X"});
    let (status, body) = send(&app, json_request("PUT", &uri, board)).await;
    assert_eq!(status, StatusCode::OK);
    let updated: GameView = serde_json::from_str(&body).expect("Bad JSON");
    assert!(updated.winner.is_none());
}

#[tokio::test]
async fn test_move_endpoint_to_win() {
    let (_db, app) = setup_app();
    let game = create_game(&app, json!({})).await;
    let uri = format!("/api/game/{}/move", game.id);

    let mut last = None;
    for position in [0, 3, 1, 4, 2] {
        let (status, body) = send(&app, json_request("POST", &uri, json!({"position": position}))).await;
        assert_eq!(status, StatusCode::OK);
        last = Some(serde_json::from_str::<GameView>(&body).expect("Bad JSON"));
    }
    assert_eq!(last.expect("No moves").winner.as_deref(), Some("X"));

    let (status, _) = send(&app, json_request("POST", &uri, json!({"position": 8}))).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_move_out_of_bounds() {
    let (_db, app) = setup_app();
    let game = create_game(&app, json!({})).await;
    let uri = format!("/api/game/{}/move", game.id);

    let (status, body) = send(&app, json_request("POST", &uri, json!({"position": 9}))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body.contains("out of bounds"));
}

#[tokio::test]
async fn test_delete_game() {
    let (_db, app) = setup_app();
    let game = create_game(&app, json!({})).await;

    let (status, _) = send(&app, empty_request("DELETE", &format!("/api/games/{}", game.id))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, empty_request("DELETE", &format!("/api/game/{}", game.id))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_method_not_allowed() {
    let (_db, app) = setup_app();
    let (status, body) = send(&app, empty_request("PATCH", "/api/game/1")).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body, "Method not allowed");
}

#[tokio::test]
async fn test_index_page() {
    let (_db, app) = setup_app();
    let (status, body) = send(&app, empty_request("GET", "/")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Start Game"));
    assert!(body.contains("❌ Your Name (Optional)"));
}

#[tokio::test]
async fn test_page_flow() {
    let (_db, app) = setup_app();

    let response = app
        .clone()
        .oneshot(form_request("/new", "player1=Alice&player2=Bob"))
        .await
        .expect("Request failed");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .expect("Missing location")
        .to_string();
    assert!(location.starts_with("/game/"));

    let (status, body) = send(&app, empty_request("GET", &location)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("❌ Alice "));
    assert!(body.contains("Keep going!"));

    let move_uri = format!("{}/move", location);
    let response = app
        .clone()
        .oneshot(form_request(&move_uri, "position=4"))
        .await
        .expect("Request failed");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    // Replaying the same square is dropped, not an error page.
    let response = app
        .clone()
        .oneshot(form_request(&move_uri, "position=4"))
        .await
        .expect("Request failed");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let (_, body) = send(&app, empty_request("GET", &location)).await;
    assert!(body.contains("⭕ Bob "));

    let (status, body) = send(&app, empty_request("GET", "/games")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(&location));
    assert!(body.contains("Created:"));
}

#[tokio::test]
async fn test_missing_game_page() {
    let (_db, app) = setup_app();
    let (status, body) = send(&app, empty_request("GET", "/game/404")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Game not found!"));
}

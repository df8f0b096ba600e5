//! Tic-tac-toe web server.
//!
//! Games live in SQLite and are played either through server-rendered HTML
//! pages or the JSON API under `/api`. Every move passes through
//! [`tictactoe_rules`] before it is stored.
//!
//! # Architecture
//!
//! - **db**: diesel models and [`GameRepository`]
//! - **service**: [`GameService`], rules applied to stored games
//! - **http**: [`router`] wiring [`api`] and [`pages`] handlers
//!
//! # Example
//!
//! ```no_run
//! use tictactoe_server::{AppState, GameRepository, GameService, ServerConfig, router};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ServerConfig::default();
//! let repository = GameRepository::new(config.database_url().clone())?;
//! repository.run_migrations()?;
//! let state = AppState::new(GameService::new(repository), config.encouragement_picker()?);
//! let app = router(state);
//! let listener = tokio::net::TcpListener::bind(("127.0.0.1", 3000)).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod api;
mod app;
pub mod cli;
mod config;
mod db;
mod game_service;
pub mod pages;

pub use app::{AppState, router};
pub use config::{ConfigError, ServerConfig};
pub use db::{DbError, DbErrorKind, GameChanges, GameRecord, GameRepository, NewGameRecord};
pub use game_service::{GameError, GameService, run_blocking};

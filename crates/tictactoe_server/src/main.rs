//! Tic-tac-toe server entry point.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tictactoe_server::cli::{Cli, Command};
use tictactoe_server::{AppState, GameRepository, GameService, ServerConfig, router};
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tictactoe_server=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            config,
            host,
            port,
            database_url,
        } => {
            let config =
                ServerConfig::load(config.as_deref())?.with_overrides(host, port, database_url);
            run_server(config).await
        }
        Command::Migrate {
            config,
            database_url,
        } => run_migrate(config, database_url),
    }
}

/// Run migrations, then serve until ctrl-c.
#[instrument(skip(config), fields(host = %config.host(), port = config.port()))]
async fn run_server(config: ServerConfig) -> Result<()> {
    let repository = GameRepository::new(config.database_url().clone())?;
    let applied = repository.run_migrations()?;
    info!(applied, database_url = %repository.database_url(), "Database ready");

    let state = AppState::new(GameService::new(repository), config.encouragement_picker()?);
    let app = router(state);

    let listener = tokio::net::TcpListener::bind((config.host().as_str(), *config.port())).await?;
    info!("✅ Server ready at http://{}:{}/", config.host(), config.port());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Run migrations and exit.
#[instrument]
fn run_migrate(config: Option<PathBuf>, database_url: Option<String>) -> Result<()> {
    let config = ServerConfig::load(config.as_deref())?.with_overrides(None, None, database_url);
    let repository = GameRepository::new(config.database_url().clone())?;
    let applied = repository.run_migrations()?;
    info!(applied, database_url = %repository.database_url(), "Migrations complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    info!("Shutdown signal received");
}

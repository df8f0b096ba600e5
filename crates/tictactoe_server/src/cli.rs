//! Command-line interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tic-tac-toe web server with SQLite persistence
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Play tic-tac-toe in the browser or over a JSON API", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run pending migrations and serve HTTP
    Serve {
        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,

        /// Path to the SQLite database file (created if it doesn't exist)
        #[arg(long)]
        database_url: Option<String>,
    },

    /// Run pending migrations and exit
    Migrate {
        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Path to the SQLite database file (created if it doesn't exist)
        #[arg(long)]
        database_url: Option<String>,
    },
}

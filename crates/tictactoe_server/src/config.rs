//! Server configuration.

use std::path::Path;

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tictactoe_rules::{DEFAULT_ENCOURAGEMENTS, Encouragements};
use tracing::{debug, info, instrument, warn};

/// Configuration for the web server.
///
/// Sources, lowest priority first: built-in defaults, an optional TOML file,
/// the `DATABASE_URL` and `PORT` environment variables, command-line flags.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind.
    #[serde(default = "default_host")]
    host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    port: u16,

    /// Path of the SQLite database file.
    #[serde(default = "default_database_url")]
    database_url: String,

    /// Flavor text shown to the player whose turn it is.
    #[serde(default = "default_encouragements")]
    encouragements: Vec<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_database_url() -> String {
    "tictactoe.db".to_string()
}

fn default_encouragements() -> Vec<String> {
    DEFAULT_ENCOURAGEMENTS.iter().map(|s| s.to_string()).collect()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database_url: default_database_url(),
            encouragements: default_encouragements(),
        }
    }
}

impl ServerConfig {
    /// Loads configuration from a TOML file. Missing keys take defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(database_url = %config.database_url, "Config loaded successfully");
        Ok(config)
    }

    /// Loads the file if one is given, then applies environment overrides.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Applies `DATABASE_URL` and `PORT` read through `lookup`.
    #[instrument(skip(self, lookup))]
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DATABASE_URL")
            && !url.trim().is_empty()
        {
            debug!(%url, "DATABASE_URL override");
            self.database_url = url;
        }
        if let Some(port) = lookup("PORT") {
            self.port = port
                .trim()
                .parse()
                .map_err(|e| ConfigError::new(format!("Invalid PORT '{}': {}", port, e)))?;
            debug!(port = self.port, "PORT override");
        }
        Ok(self)
    }

    /// Applies command-line flags; `None` leaves the current value.
    #[instrument(skip(self))]
    pub fn with_overrides(
        mut self,
        host: Option<String>,
        port: Option<u16>,
        database_url: Option<String>,
    ) -> Self {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        if let Some(database_url) = database_url {
            self.database_url = database_url;
        }
        self
    }

    /// Builds the encouragement picker. An empty list in the file falls back
    /// to the defaults.
    #[instrument(skip(self))]
    pub fn encouragement_picker(&self) -> Result<Encouragements, ConfigError> {
        if self.encouragements.is_empty() {
            warn!("No encouragements configured, using defaults");
            return Ok(Encouragements::default());
        }
        Encouragements::new(self.encouragements.clone())
            .map_err(|e| ConfigError::new(format!("Invalid encouragements: {}", e)))
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

//! Arena configuration.
//!
//! Values come from, in increasing priority: built-in defaults, an optional
//! TOML file, the `TICTAC_DB_PATH` environment variable, and CLI flags.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Environment variable overriding the database path.
pub const DB_PATH_ENV: &str = "TICTAC_DB_PATH";

/// Who takes the first move (X) in a new game.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FirstPlayer {
    /// The human plays X.
    Human,
    /// The engine plays X.
    Computer,
    /// A coin flip decides each game.
    #[default]
    Random,
}

/// Configuration for the arena binary.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ArenaConfig {
    /// SQLite database file.
    #[serde(default = "default_database_path")]
    database_path: String,

    /// Name shown for the engine.
    #[serde(default = "default_computer_name")]
    computer_name: String,

    /// Who moves first.
    #[serde(default)]
    first_player: FirstPlayer,

    /// Fixed seed for the opening move; drawn from the OS when absent.
    #[serde(default)]
    seed: Option<u64>,
}

fn default_database_path() -> String {
    "tictac_arena.db".to_string()
}

fn default_computer_name() -> String {
    "Minimax".to_string()
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            computer_name: default_computer_name(),
            first_player: FirstPlayer::default(),
            seed: None,
        }
    }
}

impl ArenaConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text. Missing keys take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the text is not valid configuration.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        info!(database_path = %config.database_path, "Config loaded");
        Ok(config)
    }

    /// Loads `path` if given, otherwise defaults, then applies the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a given file cannot be loaded.
    #[instrument(skip(path))]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(config.with_env_overrides(|key| std::env::var(key).ok()))
    }

    /// Applies environment overrides read through `lookup`.
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(path) = lookup(DB_PATH_ENV).filter(|p| !p.trim().is_empty()) {
            debug!(path = %path, "Database path overridden by environment");
            self.database_path = path;
        }
        self
    }

    /// Overrides the database path.
    pub fn with_database_path(mut self, path: String) -> Self {
        self.database_path = path;
        self
    }

    /// Overrides who moves first.
    pub fn with_first_player(mut self, first: FirstPlayer) -> Self {
        self.first_player = first;
        self
    }

    /// Overrides the opening-move seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
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

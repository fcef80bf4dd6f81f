//! Game configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::path::Path;
use strictly_2048::{EngineConfig, MAX_SIDE};
use strictly_minesweeper::Level;
use tracing::{debug, info, instrument};

/// Settings for every game, read from an optional TOML file.
///
/// ```toml
/// [game_2048]
/// rows = 5
/// win_value = 4096
///
/// [minesweeper]
/// level = "expert"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct GamesConfig {
    /// 2048 engine settings.
    game_2048: EngineConfig,
    /// Minesweeper board settings.
    minesweeper: MinesweeperConfig,
}

/// Minesweeper board size and difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize, new)]
#[serde(default)]
pub struct MinesweeperConfig {
    /// Number of rows.
    rows: usize,
    /// Number of columns.
    cols: usize,
    /// Mine density.
    level: Level,
}

impl Default for MinesweeperConfig {
    fn default() -> Self {
        Self {
            rows: 9,
            cols: 9,
            level: Level::Beginner,
        }
    }
}

impl GamesConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parses and validates configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        info!(
            rows = config.game_2048.rows(),
            cols = config.game_2048.cols(),
            level = %config.minesweeper.level,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Loads `path` when given, otherwise returns the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                debug!("No config file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Replaces the minesweeper settings.
    pub fn with_minesweeper(mut self, minesweeper: MinesweeperConfig) -> Self {
        self.minesweeper = minesweeper;
        self
    }

    /// Checks both game sections.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.game_2048
            .validate()
            .map_err(|e| ConfigError::new(format!("Invalid [game_2048] table: {}", e)))?;
        let (rows, cols) = (self.minesweeper.rows, self.minesweeper.cols);
        if rows == 0 || cols == 0 {
            return Err(ConfigError::new(format!(
                "Invalid [minesweeper] table: board must be at least 1x1, got {}x{}",
                rows, cols
            )));
        }
        if rows > MAX_SIDE || cols > MAX_SIDE {
            return Err(ConfigError::new(format!(
                "Invalid [minesweeper] table: board of {}x{} exceeds the {}x{} limit",
                rows, cols, MAX_SIDE, MAX_SIDE
            )));
        }
        Ok(())
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
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

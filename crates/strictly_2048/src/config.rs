//! Engine configuration.

use super::EngineError;
use derive_getters::Getters;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Largest accepted row or column count.
pub const MAX_SIDE: usize = 256;

/// Grid size, seeding and winning rules for a 2048 game.
///
/// Every field has a default, so a TOML table may name only the fields it
/// wants to change.
#[derive(Debug, Clone, PartialEq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
#[serde(default)]
pub struct EngineConfig {
    /// Number of rows.
    rows: usize,
    /// Number of columns.
    cols: usize,
    /// Tiles spawned when a game starts.
    start_tiles: usize,
    /// Merging into this value wins the game.
    win_value: u32,
    /// Probability that a spawned tile is a 2 rather than a 4.
    two_probability: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rows: 4,
            cols: 4,
            start_tiles: 2,
            win_value: 2048,
            two_probability: 0.9,
        }
    }
}

impl EngineConfig {
    /// Total number of cells on the grid.
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Checks that the configuration describes a playable game.
    #[instrument]
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(EngineError::InvalidConfig(format!(
                "grid must have at least one row and column, got {}x{}",
                self.rows, self.cols
            )));
        }
        if self.rows > MAX_SIDE || self.cols > MAX_SIDE {
            return Err(EngineError::InvalidConfig(format!(
                "grid of {}x{} exceeds the {}x{} limit",
                self.rows, self.cols, MAX_SIDE, MAX_SIDE
            )));
        }
        if self.start_tiles > self.cell_count() {
            return Err(EngineError::InvalidConfig(format!(
                "{} start tiles do not fit on a {}x{} grid",
                self.start_tiles, self.rows, self.cols
            )));
        }
        if self.win_value < 4 || !self.win_value.is_power_of_two() {
            return Err(EngineError::InvalidConfig(format!(
                "win value {} must be a power of two >= 4",
                self.win_value
            )));
        }
        if !(0.0..=1.0).contains(&self.two_probability) {
            return Err(EngineError::InvalidConfig(format!(
                "two probability {} must lie in [0, 1]",
                self.two_probability
            )));
        }
        Ok(())
    }
}

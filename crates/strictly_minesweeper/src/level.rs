//! Difficulty levels.

use super::MinesweeperError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// How densely the board is mined.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::EnumString,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum Level {
    /// 10% of cells are mines.
    #[default]
    Beginner,
    /// 15% of cells are mines.
    Intermediate,
    /// 20% of cells are mines.
    Expert,
}

impl Level {
    /// Parses a level name.
    ///
    /// # Errors
    ///
    /// Returns [`MinesweeperError::InvalidLevel`] for any other name.
    #[instrument]
    pub fn parse(name: &str) -> Result<Self, MinesweeperError> {
        Self::from_str(name.trim()).map_err(|_| MinesweeperError::InvalidLevel(name.to_string()))
    }

    /// Share of cells holding a mine, in percent.
    pub fn density_percent(self) -> usize {
        match self {
            Level::Beginner => 10,
            Level::Intermediate => 15,
            Level::Expert => 20,
        }
    }

    /// Number of mines on a `rows x cols` board: `floor(rows * cols * density)`.
    #[instrument]
    pub fn mine_count(self, rows: usize, cols: usize) -> usize {
        rows * cols * self.density_percent() / 100
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mine_counts_round_down() {
        assert_eq!(Level::Beginner.mine_count(9, 9), 8);
        assert_eq!(Level::Intermediate.mine_count(9, 9), 12);
        assert_eq!(Level::Expert.mine_count(9, 9), 16);
        assert_eq!(Level::Beginner.mine_count(3, 3), 0);
    }

    #[test]
    fn test_parse_known_levels() {
        assert_eq!(Level::parse("expert"), Ok(Level::Expert));
        assert_eq!(Level::parse("Intermediate"), Ok(Level::Intermediate));
    }

    #[test]
    fn test_parse_unknown_level_fails() {
        assert_eq!(
            Level::parse("nightmare"),
            Err(MinesweeperError::InvalidLevel("nightmare".to_string()))
        );
    }
}

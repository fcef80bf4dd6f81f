//! Minesweeper error types.

/// Errors raised while setting up or playing a board.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MinesweeperError {
    /// The difficulty name is not one of beginner, intermediate, expert.
    #[display("Invalid level specified: {}", _0)]
    InvalidLevel(String),

    /// The board would have no cells.
    #[display("Board must have at least one row and column, got {}x{}", rows, cols)]
    InvalidDimensions {
        /// Requested rows.
        rows: usize,
        /// Requested columns.
        cols: usize,
    },

    /// A coordinate lies off the board.
    #[display("Cell ({}, {}) is off the board", x, y)]
    OutOfBounds {
        /// Column.
        x: usize,
        /// Row.
        y: usize,
    },
}

impl std::error::Error for MinesweeperError {}

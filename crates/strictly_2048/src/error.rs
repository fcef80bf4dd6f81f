//! Error types for the 2048 engine.

use super::Position;

/// Errors raised by the engine.
///
/// Illegal moves are not errors: a move that changes nothing is absorbed
/// as a no-op and reported through [`crate::MoveOutcome::moved`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum EngineError {
    /// A tile spawn was attempted on a full grid.
    #[display("No room to add a tile")]
    OutOfSpace,

    /// The configuration cannot describe a playable game.
    #[display("Invalid engine configuration: {}", _0)]
    InvalidConfig(String),

    /// A list of cell values does not match the grid size.
    #[display("Expected {} cells, got {}", expected, actual)]
    DimensionMismatch {
        /// Cell count of the configured grid.
        expected: usize,
        /// Cell count supplied by the caller.
        actual: usize,
    },

    /// A tile value is not a power of two of at least 2.
    #[display("Tile value {} at {} is not a power of two >= 2", value, position)]
    InvalidTileValue {
        /// Offending value.
        value: u32,
        /// Where it was supplied.
        position: Position,
    },

    /// Merging two tiles would produce a value past `u32::MAX`.
    #[display("Merging two {} tiles at {} overflows", value, position)]
    ValueOverflow {
        /// Value of each merging tile.
        value: u32,
        /// Cell the merge would land on.
        position: Position,
    },

    /// The running score would pass `u32::MAX`.
    #[display("Score {} cannot grow by {}", score, gained)]
    ScoreOverflow {
        /// Score before the merge.
        score: u32,
        /// Points the merge would add.
        gained: u32,
    },

    /// A grid invariant failed after a transition.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for EngineError {}

//! Core domain types for 2048: positions and tiles.

use crate::EngineError;
use serde::{Deserialize, Serialize};

/// Zero-based cell coordinates; `x` is the column, `y` is the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Column index.
    pub x: usize,
    /// Row index.
    pub y: usize,
}

impl Position {
    /// Creates a position from column and row.
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Returns the position one step along `(dx, dy)`, or `None` if that
    /// would leave the non-negative quadrant.
    pub fn offset(self, dx: isize, dy: isize) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add_signed(dx)?,
            y: self.y.checked_add_signed(dy)?,
        })
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Stable identity of a tile for as long as it exists.
///
/// Only the presentation layer cares about ids; game logic never
/// compares them.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("#{}", _0)]
pub struct TileId(pub u64);

/// A numbered square on the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    id: TileId,
    value: u32,
    position: Position,
    previous_position: Option<Position>,
    merged_from: Option<Box<[Tile; 2]>>,
}

impl Tile {
    /// Creates a fresh tile with no move history.
    pub fn new(id: TileId, position: Position, value: u32) -> Self {
        Self {
            id,
            value,
            position,
            previous_position: None,
            merged_from: None,
        }
    }

    /// Creates the tile produced by merging `moving` into `target`.
    ///
    /// The new tile sits at the target's position with twice its value.
    /// Fails with [`EngineError::ValueOverflow`] when the doubled value
    /// does not fit in a `u32`.
    pub(crate) fn merged(id: TileId, moving: Tile, target: Tile) -> Result<Self, EngineError> {
        let value = target
            .value
            .checked_mul(2)
            .ok_or(EngineError::ValueOverflow {
                value: target.value,
                position: target.position,
            })?;
        Ok(Self {
            id,
            value,
            position: target.position,
            previous_position: None,
            merged_from: Some(Box::new([moving, target])),
        })
    }

    /// Returns the tile id.
    pub fn id(&self) -> TileId {
        self.id
    }

    /// Returns the tile value.
    pub fn value(&self) -> u32 {
        self.value
    }

    /// Returns the current position.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Returns the position held before the current move, if any.
    pub fn previous_position(&self) -> Option<Position> {
        self.previous_position
    }

    /// Returns the two source tiles when this tile was produced by a merge
    /// during the current move.
    pub fn merged_from(&self) -> Option<&[Tile; 2]> {
        self.merged_from.as_deref()
    }

    /// Records the current position as the pre-move position and drops any
    /// merge sources left over from the previous move.
    pub(crate) fn prepare(&mut self) {
        self.previous_position = Some(self.position);
        self.merged_from = None;
    }

    pub(crate) fn set_position(&mut self, position: Position) {
        self.position = position;
    }
}

//! Serializable read model of a game.

use super::{Game2048, Position, Tile, TileId};
use serde::{Deserialize, Serialize};

/// What a renderer needs to know about one tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileView {
    /// Stable tile id.
    pub id: TileId,
    /// Tile value.
    pub value: u32,
    /// Current position.
    pub position: Position,
    /// Position before the last move, if the tile existed then.
    pub previous_position: Option<Position>,
    /// Ids of the two tiles merged into this one during the last move.
    pub merged_from: Option<[TileId; 2]>,
}

impl From<&Tile> for TileView {
    fn from(tile: &Tile) -> Self {
        Self {
            id: tile.id(),
            value: tile.value(),
            position: tile.position(),
            previous_position: tile.previous_position(),
            merged_from: tile
                .merged_from()
                .map(|[first, second]| [first.id(), second.id()]),
        }
    }
}

/// Point-in-time copy of the whole game state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
    /// Cells in row-major order, `rows * cols` long.
    pub cells: Vec<Option<TileView>>,
    /// Current score.
    pub score: u32,
    /// Best score reached by this engine.
    pub best_score: u32,
    /// Accepted moves this game.
    pub move_count: u32,
    /// No legal move remains.
    pub over: bool,
    /// The win value has been reached.
    pub won: bool,
    /// The last move can be undone.
    pub can_undo: bool,
}

impl GameSnapshot {
    pub(crate) fn capture(game: &Game2048) -> Self {
        let grid = game.grid();
        Self {
            rows: grid.rows(),
            cols: grid.cols(),
            cells: grid
                .cells()
                .iter()
                .map(|cell| cell.as_ref().map(TileView::from))
                .collect(),
            score: game.score(),
            best_score: game.best_score(),
            move_count: game.move_count(),
            over: game.is_over(),
            won: game.is_won(),
            can_undo: game.can_undo(),
        }
    }

    /// Cell values row by row, 0 for empty cells.
    pub fn values(&self) -> Vec<u32> {
        self.cells
            .iter()
            .map(|cell| cell.as_ref().map_or(0, |tile| tile.value))
            .collect()
    }
}

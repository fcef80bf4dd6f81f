//! Bounds invariant: every tile lies on the grid.

use super::Invariant;
use crate::Grid;

/// Invariant: each tile's position satisfies `x < cols` and `y < rows`.
pub struct TilesWithinBounds;

impl Invariant<Grid> for TilesWithinBounds {
    fn holds(grid: &Grid) -> bool {
        grid.tiles().all(|tile| grid.within_bounds(tile.position()))
    }

    fn description() -> &'static str {
        "Every tile lies within the grid bounds"
    }
}

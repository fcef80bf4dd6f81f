//! Index invariant: a tile sits in the cell named by its own position.

use super::Invariant;
use crate::Grid;

/// Invariant: the tile stored at index `i` reports a position whose index
/// is `i`.
pub struct IndexMatchesPosition;

impl Invariant<Grid> for IndexMatchesPosition {
    fn holds(grid: &Grid) -> bool {
        grid.cells().iter().enumerate().all(|(index, cell)| {
            cell.as_ref()
                .is_none_or(|tile| grid.position_of(index) == tile.position())
        })
    }

    fn description() -> &'static str {
        "Every tile is stored at the cell matching its position"
    }
}

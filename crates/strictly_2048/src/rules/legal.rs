//! Legal-move detection.

use crate::{Direction, Grid};
use tracing::instrument;

/// Checks whether any move could still change the grid.
///
/// True when a cell is empty, or when some tile has an orthogonal
/// neighbour of the same value.
#[instrument(skip(grid))]
pub fn can_move(grid: &Grid) -> bool {
    if grid.has_available_cells() {
        return true;
    }
    grid.tiles().any(|tile| {
        Direction::ALL.iter().any(|direction| {
            let (dx, dy) = direction.vector();
            tile.position()
                .offset(dx, dy)
                .and_then(|neighbour| grid.get(neighbour))
                .is_some_and(|other| other.value() == tile.value())
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Grid;

    #[test]
    fn test_empty_cell_allows_move() {
        let grid = Grid::from_values(2, 2, &[2, 4, 8, 0]).expect("valid grid");
        assert!(can_move(&grid));
    }

    #[test]
    fn test_full_grid_with_equal_neighbours() {
        let grid = Grid::from_values(2, 2, &[2, 4, 2, 8]).expect("valid grid");
        assert!(can_move(&grid));
    }

    #[test]
    fn test_full_grid_without_pairs_is_stuck() {
        let grid = Grid::from_values(2, 2, &[2, 4, 4, 2]).expect("valid grid");
        assert!(!can_move(&grid));
    }

    #[test]
    fn test_diagonal_pairs_do_not_count() {
        let grid = Grid::from_values(3, 3, &[2, 4, 8, 4, 2, 4, 8, 4, 2]).expect("valid grid");
        assert!(!can_move(&grid));
    }
}

//! Fixed-size tile grid.

use super::{EngineError, Position, Tile, TileId};
use tracing::instrument;

/// A `rows x cols` array of optional tiles stored row-major
/// (`index = x + y * cols`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Option<Tile>>,
}

impl Grid {
    /// Creates an empty grid.
    #[instrument]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
        }
    }

    /// Builds a grid from row-major cell values, 0 meaning empty.
    ///
    /// Tile ids are the storage indices of their cells.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::DimensionMismatch`] when `values` does not hold
    /// exactly `rows * cols` entries, and [`EngineError::InvalidTileValue`]
    /// for a non-zero value that is not a power of two of at least 2.
    #[instrument(skip(values))]
    pub fn from_values(rows: usize, cols: usize, values: &[u32]) -> Result<Self, EngineError> {
        let expected = rows * cols;
        if values.len() != expected {
            return Err(EngineError::DimensionMismatch {
                expected,
                actual: values.len(),
            });
        }
        let mut grid = Self::new(rows, cols);
        for (index, &value) in values.iter().enumerate() {
            if value == 0 {
                continue;
            }
            let position = grid.position_of(index);
            if value < 2 || !value.is_power_of_two() {
                return Err(EngineError::InvalidTileValue { value, position });
            }
            grid.insert(Tile::new(TileId(index as u64), position, value));
        }
        Ok(grid)
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// All cells in storage order.
    pub fn cells(&self) -> &[Option<Tile>] {
        &self.cells
    }

    /// Whether the position lies on the grid.
    pub fn within_bounds(&self, position: Position) -> bool {
        position.x < self.cols && position.y < self.rows
    }

    /// Storage index of an in-bounds position.
    pub fn index(&self, position: Position) -> usize {
        position.x + position.y * self.cols
    }

    /// Position of a storage index.
    pub fn position_of(&self, index: usize) -> Position {
        Position::new(index % self.cols, index / self.cols)
    }

    /// Tile at the position, if any. Out-of-bounds positions hold nothing.
    pub fn get(&self, position: Position) -> Option<&Tile> {
        if !self.within_bounds(position) {
            return None;
        }
        self.cells[self.index(position)].as_ref()
    }

    /// Whether the in-bounds position holds no tile.
    pub fn is_empty_at(&self, position: Position) -> bool {
        self.within_bounds(position) && self.cells[self.index(position)].is_none()
    }

    /// Places a tile at its own position, replacing whatever was there.
    pub(crate) fn insert(&mut self, tile: Tile) {
        let index = self.index(tile.position());
        self.cells[index] = Some(tile);
    }

    /// Removes and returns the tile at the position.
    pub(crate) fn take(&mut self, position: Position) -> Option<Tile> {
        if !self.within_bounds(position) {
            return None;
        }
        let index = self.index(position);
        self.cells[index].take()
    }

    /// Removes every tile, returning them in storage order.
    pub(crate) fn drain(&mut self) -> Vec<Tile> {
        self.cells.iter_mut().filter_map(Option::take).collect()
    }

    /// Stores a tile at a raw index without checking its position.
    #[cfg(test)]
    pub(crate) fn place_raw(&mut self, index: usize, tile: Tile) {
        self.cells[index] = Some(tile);
    }

    pub(crate) fn tiles_mut(&mut self) -> impl Iterator<Item = &mut Tile> {
        self.cells.iter_mut().flatten()
    }

    /// Occupied cells in storage order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.cells.iter().flatten()
    }

    /// Empty cells, column by column.
    pub fn available_cells(&self) -> Vec<Position> {
        let mut positions = Vec::new();
        for x in 0..self.cols {
            for y in 0..self.rows {
                let position = Position::new(x, y);
                if self.is_empty_at(position) {
                    positions.push(position);
                }
            }
        }
        positions
    }

    /// Whether at least one cell is empty.
    pub fn has_available_cells(&self) -> bool {
        self.cells.iter().any(Option::is_none)
    }

    /// Sum of all tile values.
    pub fn total_value(&self) -> u64 {
        self.tiles().map(|tile| u64::from(tile.value())).sum()
    }

    /// Largest tile value, or 0 on an empty grid.
    pub fn max_value(&self) -> u32 {
        self.tiles().map(Tile::value).max().unwrap_or(0)
    }

    /// Cell values row by row, 0 for empty cells.
    pub fn values(&self) -> Vec<u32> {
        self.cells
            .iter()
            .map(|cell| cell.as_ref().map_or(0, Tile::value))
            .collect()
    }

    /// Walks from `origin` along `(dx, dy)` over empty cells.
    ///
    /// Returns the farthest empty cell reached (or `origin` itself) and the
    /// first cell past it, which is either occupied or off the grid.
    pub fn find_farthest(&self, origin: Position, (dx, dy): (isize, isize)) -> Farthest {
        let mut farthest = origin;
        let mut next = origin.offset(dx, dy);
        while let Some(candidate) = next
            && self.is_empty_at(candidate)
        {
            farthest = candidate;
            next = candidate.offset(dx, dy);
        }
        Farthest {
            farthest,
            next: next.filter(|position| self.within_bounds(*position)),
        }
    }

    /// Formats the grid as rows of right-aligned values, `.` for empty.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for y in 0..self.rows {
            let row: Vec<String> = (0..self.cols)
                .map(|x| match self.get(Position::new(x, y)) {
                    Some(tile) => format!("{:>5}", tile.value()),
                    None => format!("{:>5}", "."),
                })
                .collect();
            result.push_str(&row.join(""));
            if y + 1 < self.rows {
                result.push('\n');
            }
        }
        result
    }
}

/// Result of [`Grid::find_farthest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Farthest {
    /// Last empty cell reached, or the origin if the first step is blocked.
    pub farthest: Position,
    /// In-bounds cell just past `farthest`; `None` when that is off the grid.
    pub next: Option<Position>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(tiles: &[(usize, usize, u32)]) -> Grid {
        let mut grid = Grid::new(4, 4);
        for (i, &(x, y, value)) in tiles.iter().enumerate() {
            grid.insert(Tile::new(TileId(i as u64), Position::new(x, y), value));
        }
        grid
    }

    #[test]
    fn test_index_is_row_major() {
        let grid = Grid::new(4, 4);
        assert_eq!(grid.index(Position::new(1, 2)), 9);
        assert_eq!(grid.position_of(9), Position::new(1, 2));
    }

    #[test]
    fn test_display_marks_empty_cells() {
        let mut grid = Grid::new(2, 3);
        grid.insert(Tile::new(TileId(0), Position::new(0, 0), 2));
        grid.insert(Tile::new(TileId(1), Position::new(2, 1), 1024));
        assert_eq!(grid.display(), "    2    .    .\n    .    . 1024");
    }

    #[test]
    fn test_rectangular_bounds() {
        let grid = Grid::new(2, 5);
        assert!(grid.within_bounds(Position::new(4, 1)));
        assert!(!grid.within_bounds(Position::new(1, 4)));
    }

    #[test]
    fn test_farthest_stops_before_occupied() {
        let grid = grid_with(&[(0, 0, 2), (3, 0, 4)]);
        let found = grid.find_farthest(Position::new(0, 0), (1, 0));
        assert_eq!(found.farthest, Position::new(2, 0));
        assert_eq!(found.next, Some(Position::new(3, 0)));
    }

    #[test]
    fn test_farthest_reaches_wall() {
        let grid = grid_with(&[(1, 1, 2)]);
        let found = grid.find_farthest(Position::new(1, 1), (0, -1));
        assert_eq!(found.farthest, Position::new(1, 0));
        assert_eq!(found.next, None);
    }

    #[test]
    fn test_available_cells_skip_occupied() {
        let grid = grid_with(&[(0, 0, 2), (2, 3, 8)]);
        let cells = grid.available_cells();
        assert_eq!(cells.len(), 14);
        assert!(!cells.contains(&Position::new(2, 3)));
    }

    #[test]
    fn test_values_and_totals() {
        let grid = grid_with(&[(0, 0, 2), (1, 0, 8)]);
        assert_eq!(grid.total_value(), 10);
        assert_eq!(grid.max_value(), 8);
        assert_eq!(&grid.values()[..4], &[2, 8, 0, 0]);
    }
}

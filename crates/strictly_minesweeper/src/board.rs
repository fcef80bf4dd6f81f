//! Minefield with deferred mine placement.
//!
//! Mines are laid only when the first cell is revealed, so that cell can be
//! kept clear. Cells are stored row-major (`index = x + y * cols`).

use super::{Level, MinesweeperError};
use derive_getters::Getters;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Zero-based board coordinates; `x` is the column, `y` is the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    /// Column index.
    pub x: usize,
    /// Row index.
    pub y: usize,
}

impl Coord {
    /// Creates a coordinate from column and row.
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// One square of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Getters, Serialize, Deserialize)]
pub struct Cell {
    /// Whether a mine is buried here.
    has_mine: bool,
    /// Whether the player uncovered this cell.
    revealed: bool,
    /// Whether the player marked this cell.
    flagged: bool,
    /// Mines among the up-to-8 neighbours; 0 for mined cells.
    adjacent_mines: u8,
}

/// What a reveal did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealOutcome {
    /// The cell was flagged; the flag was removed and nothing revealed.
    Unflagged,
    /// The cell was already uncovered.
    AlreadyRevealed,
    /// The game has ended; nothing changed.
    Finished,
    /// A safe cell was uncovered.
    Revealed {
        /// Its adjacent-mine count.
        adjacent_mines: u8,
    },
    /// A mine was uncovered; the game is lost.
    Detonated,
}

/// What a flag toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlagOutcome {
    /// The cell is now flagged.
    Flagged,
    /// The flag was removed.
    Unflagged,
    /// Revealed cells and finished games cannot be flagged.
    Ignored,
}

/// A minesweeper board.
#[derive(Debug, Clone)]
pub struct Minefield {
    rows: usize,
    cols: usize,
    level: Level,
    mine_count: usize,
    cells: Vec<Cell>,
    mines_placed: bool,
    won: bool,
    over: bool,
    rng: SmallRng,
}

impl Minefield {
    /// Creates a covered board with mines drawn from OS entropy.
    ///
    /// # Errors
    ///
    /// Returns [`MinesweeperError::InvalidDimensions`] for an empty board.
    #[instrument]
    pub fn new(rows: usize, cols: usize, level: Level) -> Result<Self, MinesweeperError> {
        Self::setup(rows, cols, level, SmallRng::from_entropy())
    }

    /// Creates a covered board whose mine layout depends only on `seed`
    /// and the first revealed cell.
    #[instrument]
    pub fn with_seed(
        rows: usize,
        cols: usize,
        level: Level,
        seed: u64,
    ) -> Result<Self, MinesweeperError> {
        Self::setup(rows, cols, level, SmallRng::seed_from_u64(seed))
    }

    fn setup(
        rows: usize,
        cols: usize,
        level: Level,
        rng: SmallRng,
    ) -> Result<Self, MinesweeperError> {
        if rows == 0 || cols == 0 {
            return Err(MinesweeperError::InvalidDimensions { rows, cols });
        }
        let mine_count = level.mine_count(rows, cols);
        info!(rows, cols, %level, mine_count, "Board set up");
        Ok(Self {
            rows,
            cols,
            level,
            mine_count,
            cells: vec![Cell::default(); rows * cols],
            mines_placed: false,
            won: false,
            over: false,
            rng,
        })
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Difficulty level.
    pub fn level(&self) -> Level {
        self.level
    }

    /// Mines on the board (placed or still pending).
    pub fn mine_count(&self) -> usize {
        self.mine_count
    }

    /// Whether the first reveal has happened and mines are laid.
    pub fn mines_placed(&self) -> bool {
        self.mines_placed
    }

    /// Whether every safe cell is uncovered.
    pub fn is_won(&self) -> bool {
        self.won
    }

    /// Whether a mine was uncovered.
    pub fn is_over(&self) -> bool {
        self.over
    }

    /// All cells, row-major.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The cell at `coord`, if it lies on the board.
    pub fn cell(&self, coord: Coord) -> Option<&Cell> {
        self.within_bounds(coord)
            .then(|| &self.cells[self.index(coord)])
    }

    /// Number of flagged cells.
    pub fn flag_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.flagged).count()
    }

    /// Whether the coordinate lies on the board.
    pub fn within_bounds(&self, coord: Coord) -> bool {
        coord.x < self.cols && coord.y < self.rows
    }

    fn index(&self, coord: Coord) -> usize {
        coord.x + coord.y * self.cols
    }

    fn coord_of(&self, index: usize) -> Coord {
        Coord::new(index % self.cols, index / self.cols)
    }

    fn checked_index(&self, coord: Coord) -> Result<usize, MinesweeperError> {
        if self.within_bounds(coord) {
            Ok(self.index(coord))
        } else {
            Err(MinesweeperError::OutOfBounds {
                x: coord.x,
                y: coord.y,
            })
        }
    }

    /// Up-to-8 on-board neighbours of a cell.
    pub fn neighbours(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        (-1isize..=1)
            .flat_map(|dy| (-1isize..=1).map(move |dx| (dx, dy)))
            .filter(|&(dx, dy)| dx != 0 || dy != 0)
            .filter_map(move |(dx, dy)| {
                Some(Coord::new(
                    coord.x.checked_add_signed(dx)?,
                    coord.y.checked_add_signed(dy)?,
                ))
            })
            .filter(|neighbour| self.within_bounds(*neighbour))
    }

    /// Uncovers a cell, laying the mines first if this is the first reveal.
    ///
    /// A flagged cell is unflagged instead of revealed. Uncovered cells
    /// and finished games are left alone.
    ///
    /// # Errors
    ///
    /// Returns [`MinesweeperError::OutOfBounds`] for a coordinate off the
    /// board.
    #[instrument(skip(self), fields(level = %self.level))]
    pub fn reveal(&mut self, coord: Coord) -> Result<RevealOutcome, MinesweeperError> {
        let index = self.checked_index(coord)?;
        if self.over || self.won {
            return Ok(RevealOutcome::Finished);
        }
        if !self.mines_placed {
            self.place_mines(index);
        }

        let cell = &mut self.cells[index];
        if cell.revealed {
            return Ok(RevealOutcome::AlreadyRevealed);
        }
        if cell.flagged {
            cell.flagged = false;
            debug!(?coord, "Unflagged cell");
            return Ok(RevealOutcome::Unflagged);
        }

        cell.revealed = true;
        if cell.has_mine {
            info!(?coord, "Mine detonated");
            self.over = true;
            return Ok(RevealOutcome::Detonated);
        }

        let adjacent_mines = cell.adjacent_mines;
        if self.all_safe_cells_revealed() {
            info!("Board cleared");
            self.won = true;
        }
        Ok(RevealOutcome::Revealed { adjacent_mines })
    }

    /// Flags a covered cell, or removes its flag.
    ///
    /// # Errors
    ///
    /// Returns [`MinesweeperError::OutOfBounds`] for a coordinate off the
    /// board.
    #[instrument(skip(self))]
    pub fn toggle_flag(&mut self, coord: Coord) -> Result<FlagOutcome, MinesweeperError> {
        let index = self.checked_index(coord)?;
        if self.over || self.won {
            return Ok(FlagOutcome::Ignored);
        }
        let cell = &mut self.cells[index];
        if cell.revealed {
            return Ok(FlagOutcome::Ignored);
        }
        cell.flagged = !cell.flagged;
        Ok(if cell.flagged {
            FlagOutcome::Flagged
        } else {
            FlagOutcome::Unflagged
        })
    }

    /// Lays `mine_count` mines uniformly over every cell except `first`,
    /// then counts each safe cell's mined neighbours.
    fn place_mines(&mut self, first: usize) {
        let candidates: Vec<usize> = (0..self.cells.len()).filter(|&i| i != first).collect();
        let amount = self.mine_count.min(candidates.len());
        self.mine_count = amount;
        for chosen in rand::seq::index::sample(&mut self.rng, candidates.len(), amount) {
            self.cells[candidates[chosen]].has_mine = true;
        }

        for index in 0..self.cells.len() {
            if !self.cells[index].has_mine {
                continue;
            }
            let neighbours: Vec<Coord> = self.neighbours(self.coord_of(index)).collect();
            for neighbour in neighbours {
                let neighbour = self.index(neighbour);
                if !self.cells[neighbour].has_mine {
                    self.cells[neighbour].adjacent_mines += 1;
                }
            }
        }

        self.mines_placed = true;
        debug!(mines = amount, first = ?self.coord_of(first), "Mines placed");
    }

    fn all_safe_cells_revealed(&self) -> bool {
        self.cells
            .iter()
            .all(|cell| cell.has_mine || cell.revealed)
    }

    /// Buries mines at the given cells and marks the board as laid, so the
    /// first reveal does not place random ones.
    #[cfg(test)]
    pub(crate) fn with_mines(rows: usize, cols: usize, mines: &[Coord]) -> Self {
        let mut field = Self::with_seed(rows, cols, Level::Beginner, 0).expect("valid size");
        field.mine_count = mines.len();
        for &mine in mines {
            let index = field.index(mine);
            field.cells[index].has_mine = true;
        }
        for index in 0..field.cells.len() {
            if field.cells[index].has_mine {
                continue;
            }
            let count = field
                .neighbours(field.coord_of(index))
                .filter(|n| field.cells[field.index(*n)].has_mine)
                .count();
            field.cells[index].adjacent_mines = count as u8;
        }
        field.mines_placed = true;
        field
    }
}

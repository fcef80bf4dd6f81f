//! Pure minesweeper logic: difficulty levels, deferred mine placement and
//! cell reveals.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod error;
mod level;

pub use board::{Cell, Coord, FlagOutcome, Minefield, RevealOutcome};
pub use error::MinesweeperError;
pub use level::Level;

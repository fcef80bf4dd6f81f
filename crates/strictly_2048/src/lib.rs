//! Pure 2048 game logic.
//!
//! The engine owns a fixed-size grid of tiles and exposes four commands:
//! [`Game2048::move_tiles`], [`Game2048::undo`], [`Game2048::restart`] and
//! [`Game2048::spawn_random_tile`]. Commands mutate the engine in place and
//! return an outcome describing what happened; the full state can be read
//! back at any time as a [`GameSnapshot`].
//!
//! # Example
//!
//! ```
//! use strictly_2048::{Direction, EngineConfig, Game2048};
//!
//! let mut game = Game2048::with_seed(EngineConfig::default(), 42)?;
//! let outcome = game.move_tiles(Direction::Left)?;
//! println!("moved: {}, score: {}", outcome.moved, game.score());
//! # Ok::<(), strictly_2048::EngineError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod config;
mod error;
mod game;
mod grid;
pub mod invariants;
pub mod rules;
mod snapshot;
mod types;

pub use action::{Direction, GameEvent, Merge, MoveOutcome, SpawnedTile, UndoOutcome};
pub use config::{EngineConfig, MAX_SIDE};
pub use error::EngineError;
pub use game::Game2048;
pub use grid::{Farthest, Grid};
pub use snapshot::{GameSnapshot, TileView};
pub use types::{Position, Tile, TileId};

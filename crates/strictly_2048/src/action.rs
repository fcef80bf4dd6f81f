//! First-class action and outcome types for 2048.
//!
//! A [`Direction`] is the player's intent. Commands on the engine return an
//! outcome listing what actually happened, so callers react to explicit
//! events instead of diffing state.

use super::{Position, TileId};
use serde::{Deserialize, Serialize};

/// Direction in which all tiles slide.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumString,
    strum::Display,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum Direction {
    /// Towards row 0.
    Up,
    /// Towards the last column.
    Right,
    /// Towards the last row.
    Down,
    /// Towards column 0.
    Left,
}

impl Direction {
    /// All four directions, in up/right/down/left order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Unit vector `(dx, dy)` for this direction.
    pub fn vector(self) -> (isize, isize) {
        match self {
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
        }
    }
}

/// Two equal tiles combined during a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Merge {
    /// Id of the tile created by the merge.
    pub tile: TileId,
    /// Where the merged tile sits.
    pub position: Position,
    /// Value of the merged tile.
    pub value: u32,
}

/// A tile placed at random on an empty cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnedTile {
    /// Id of the new tile.
    pub tile: TileId,
    /// Where it was placed.
    pub position: Position,
    /// Its value (2 or 4).
    pub value: u32,
}

/// Something observable that happened during a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Two tiles merged.
    Merged(Merge),
    /// A random tile was spawned.
    Spawned(SpawnedTile),
    /// A merge reached the win value for the first time this game.
    Won {
        /// The winning tile value.
        value: u32,
    },
    /// No legal move remains.
    GameOver,
}

/// Result of [`crate::Game2048::move_tiles`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// Whether any tile changed position.
    pub moved: bool,
    /// Points earned from merges in this move.
    pub score_gained: u32,
    /// Events in the order they occurred.
    pub events: Vec<GameEvent>,
}

impl MoveOutcome {
    /// Outcome of a move that changed nothing.
    pub fn unchanged() -> Self {
        Self::default()
    }

    /// Merges performed by this move.
    pub fn merges(&self) -> impl Iterator<Item = &Merge> {
        self.events.iter().filter_map(|event| match event {
            GameEvent::Merged(merge) => Some(merge),
            _ => None,
        })
    }

    /// The tile spawned after the move, if the move was accepted.
    pub fn spawned(&self) -> Option<&SpawnedTile> {
        self.events.iter().find_map(|event| match event {
            GameEvent::Spawned(spawned) => Some(spawned),
            _ => None,
        })
    }

    /// Whether this move ended the game.
    pub fn ended_game(&self) -> bool {
        self.events.contains(&GameEvent::GameOver)
    }
}

/// Result of [`crate::Game2048::undo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UndoOutcome {
    /// The previous grid was reconstructed with this many tiles.
    Restored {
        /// Tiles on the reconstructed grid.
        tiles: usize,
    },
    /// No move is available to undo; nothing changed.
    Unavailable,
}

impl std::fmt::Display for GameEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameEvent::Merged(merge) => write!(f, "merged {} at {}", merge.value, merge.position),
            GameEvent::Spawned(spawned) => {
                write!(f, "spawned {} at {}", spawned.value, spawned.position)
            }
            GameEvent::Won { value } => write!(f, "reached {}", value),
            GameEvent::GameOver => write!(f, "game over"),
        }
    }
}

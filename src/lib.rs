//! Strictly Grids - terminal grid games
//!
//! Front end for the pure game crates: configuration, key mapping,
//! notification banners, an elapsed-time clock, headless replays and the
//! terminal UI.
//!
//! # Architecture
//!
//! - **strictly_2048**: tile-grid engine (move, merge, spawn, undo)
//! - **strictly_minesweeper**: deferred mine placement and reveals
//! - **tui**: ratatui screens that map keys to engine commands
//!
//! # Example
//!
//! ```
//! use strictly_grids::{parse_moves, replay};
//! use strictly_2048::EngineConfig;
//!
//! let moves = parse_moves("left,ArrowUp,j")?;
//! let snapshot = replay(EngineConfig::default(), 7, &moves)?;
//! assert_eq!(snapshot.cells.len(), 16);
//! # Ok::<(), strictly_grids::ReplayError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod clock;
mod config;
mod input;
mod notifications;
mod replay;
pub mod tui;

pub use clock::{GameClock, format_hms, spawn_ticker};
pub use config::{ConfigError, GamesConfig, MinesweeperConfig};
pub use input::{KeyAction, action_for_key, direction_for_key, direction_for_key_name, move_cursor};
pub use notifications::{
    DEFAULT_TTL, Notice, Notification, NotificationCenter, NotificationId, NotificationKind,
};
pub use replay::{ReplayError, parse_moves, replay};

//! Keyboard mapping for the grid games.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::str::FromStr;
use strictly_2048::Direction;
use strictly_minesweeper::Coord;
use tracing::debug;

/// What a key press asks the 2048 screen to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Slide the tiles.
    Move(Direction),
    /// Start a new game.
    Restart,
    /// Undo the last move.
    Undo,
    /// Leave the game.
    Quit,
}

/// Any of these held down disables the game keys.
const BLOCKING_MODIFIERS: KeyModifiers = KeyModifiers::SHIFT
    .union(KeyModifiers::CONTROL)
    .union(KeyModifiers::ALT)
    .union(KeyModifiers::SUPER)
    .union(KeyModifiers::META);

/// Maps arrow keys, WASD and `hjkl` to a direction.
///
/// Returns `None` for other keys and whenever a modifier is held.
pub fn direction_for_key(key: &KeyEvent) -> Option<Direction> {
    if key.modifiers.intersects(BLOCKING_MODIFIERS) {
        return None;
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'k') => Some(Direction::Up),
        KeyCode::Right | KeyCode::Char('d' | 'l') => Some(Direction::Right),
        KeyCode::Down | KeyCode::Char('s' | 'j') => Some(Direction::Down),
        KeyCode::Left | KeyCode::Char('a' | 'h') => Some(Direction::Left),
        _ => None,
    }
}

/// Maps a key press to a 2048 screen action.
///
/// `Esc` always quits; the other keys are ignored while a modifier is held.
pub fn action_for_key(key: &KeyEvent) -> Option<KeyAction> {
    if key.code == KeyCode::Esc {
        return Some(KeyAction::Quit);
    }
    if let Some(direction) = direction_for_key(key) {
        return Some(KeyAction::Move(direction));
    }
    if key.modifiers.intersects(BLOCKING_MODIFIERS) {
        return None;
    }
    match key.code {
        KeyCode::Char('r') => Some(KeyAction::Restart),
        KeyCode::Char('u') => Some(KeyAction::Undo),
        KeyCode::Char('q') => Some(KeyAction::Quit),
        _ => None,
    }
}

/// Maps a key name to a direction.
///
/// Accepts browser-style names (`ArrowUp`), the letter keys (`w`, `k`, ...)
/// and direction names (`up`, `Left`).
pub fn direction_for_key_name(name: &str) -> Option<Direction> {
    let name = name.trim();
    let direction = match name {
        "ArrowUp" | "w" | "k" => Some(Direction::Up),
        "ArrowRight" | "d" | "l" => Some(Direction::Right),
        "ArrowDown" | "s" | "j" => Some(Direction::Down),
        "ArrowLeft" | "a" | "h" => Some(Direction::Left),
        _ => Direction::from_str(name).ok(),
    };
    if direction.is_none() {
        debug!(name, "Unmapped key name");
    }
    direction
}

/// Moves the minesweeper cursor one cell, clamped to a `rows x cols` board.
pub fn move_cursor(cursor: Coord, key: KeyCode, rows: usize, cols: usize) -> Coord {
    match key {
        KeyCode::Up | KeyCode::Char('k') => Coord::new(cursor.x, cursor.y.saturating_sub(1)),
        KeyCode::Down | KeyCode::Char('j') if cursor.y + 1 < rows => {
            Coord::new(cursor.x, cursor.y + 1)
        }
        KeyCode::Left | KeyCode::Char('h') => Coord::new(cursor.x.saturating_sub(1), cursor.y),
        KeyCode::Right | KeyCode::Char('l') if cursor.x + 1 < cols => {
            Coord::new(cursor.x + 1, cursor.y)
        }
        _ => cursor,
    }
}

//! Headless replay of a 2048 game from a seed and a move list.

use crate::input::direction_for_key_name;
use derive_more::{Display, From};
use strictly_2048::{Direction, EngineConfig, EngineError, Game2048, GameSnapshot};
use tracing::{debug, info, instrument};

/// Errors raised while replaying.
#[derive(Debug, Display, From)]
pub enum ReplayError {
    /// A move name did not map to a direction.
    #[display("Unknown move: {}", _0)]
    #[from(skip)]
    UnknownMove(String),

    /// The engine rejected the setup or failed mid-game.
    #[display("Engine error: {}", _0)]
    Engine(EngineError),
}

impl std::error::Error for ReplayError {}

/// Parses a comma-separated move list such as `up,left,ArrowDown,j`.
///
/// Blank entries are skipped, so an empty list yields no moves.
pub fn parse_moves(list: &str) -> Result<Vec<Direction>, ReplayError> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| {
            direction_for_key_name(name).ok_or_else(|| ReplayError::UnknownMove(name.to_string()))
        })
        .collect()
}

/// Plays `moves` on a game seeded with `seed` and returns the final state.
///
/// Moves that change nothing, including every move after game over, are
/// absorbed like they are in interactive play.
#[instrument(skip(config, moves), fields(moves = moves.len()))]
pub fn replay(
    config: EngineConfig,
    seed: u64,
    moves: &[Direction],
) -> Result<GameSnapshot, ReplayError> {
    let mut game = Game2048::with_seed(config, seed)?;
    let mut accepted = 0usize;
    for &direction in moves {
        if game.move_tiles(direction)?.moved {
            accepted += 1;
        }
    }
    debug!(grid = %game.grid().display(), "Final grid");
    info!(
        accepted,
        ignored = moves.len() - accepted,
        score = game.score(),
        over = game.is_over(),
        "Replay finished"
    );
    Ok(game.snapshot())
}

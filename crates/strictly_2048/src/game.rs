//! The 2048 engine: owns the grid and applies commands to it.
//!
//! Every command runs to completion against state the engine owns
//! exclusively. Callers read state back through accessors or a
//! [`GameSnapshot`] between commands.

use super::invariants::{GridInvariants, InvariantSet};
use super::rules::{build_traversal, can_move};
use super::{
    Direction, EngineConfig, EngineError, GameEvent, GameSnapshot, Grid, Merge, MoveOutcome,
    SpawnedTile, Tile, TileId, UndoOutcome,
};
use crate::grid::Farthest;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, error, info, instrument, warn};

/// A single game of 2048.
#[derive(Debug, Clone)]
pub struct Game2048 {
    config: EngineConfig,
    grid: Grid,
    score: u32,
    best_score: u32,
    move_count: u32,
    over: bool,
    won: bool,
    can_undo: bool,
    next_id: u64,
    rng: SmallRng,
}

// ─────────────────────────────────────────────────────────────
//  Construction
// ─────────────────────────────────────────────────────────────

impl Game2048 {
    /// Starts a game with tiles drawn from OS entropy.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] if the configuration is not
    /// playable.
    #[instrument]
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        Self::start(config, SmallRng::from_entropy())
    }

    /// Starts a reproducible game: the same seed and moves always produce
    /// the same grid.
    #[instrument]
    pub fn with_seed(config: EngineConfig, seed: u64) -> Result<Self, EngineError> {
        Self::start(config, SmallRng::seed_from_u64(seed))
    }

    /// Resumes from explicit row-major cell values (0 = empty) without
    /// spawning start tiles.
    ///
    /// # Errors
    ///
    /// Fails if the configuration is invalid or the values do not describe
    /// a grid of the configured size.
    #[instrument(skip(values))]
    pub fn from_values(config: EngineConfig, seed: u64, values: &[u32]) -> Result<Self, EngineError> {
        config.validate()?;
        let grid = Grid::from_values(*config.rows(), *config.cols(), values)?;
        let mut game = Self::empty(config, SmallRng::seed_from_u64(seed));
        game.next_id = values.len() as u64;
        game.grid = grid;
        Ok(game)
    }

    fn start(config: EngineConfig, rng: SmallRng) -> Result<Self, EngineError> {
        config.validate()?;
        let mut game = Self::empty(config, rng);
        game.seed_start_tiles()?;
        info!(tiles = game.grid.tiles().count(), "Game started");
        Ok(game)
    }

    fn empty(config: EngineConfig, rng: SmallRng) -> Self {
        Self {
            grid: Grid::new(*config.rows(), *config.cols()),
            config,
            score: 0,
            best_score: 0,
            move_count: 0,
            over: false,
            won: false,
            can_undo: false,
            next_id: 0,
            rng,
        }
    }

    fn seed_start_tiles(&mut self) -> Result<(), EngineError> {
        for _ in 0..*self.config.start_tiles() {
            self.spawn_random_tile()?;
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Read model
// ─────────────────────────────────────────────────────────────

impl Game2048 {
    /// Returns the configuration the game was started with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Sum of all merge values this game.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Highest score reached by this engine, across restarts.
    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    /// Number of accepted moves this game.
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Whether no legal move remains.
    pub fn is_over(&self) -> bool {
        self.over
    }

    /// Whether a merge has reached the win value this game.
    pub fn is_won(&self) -> bool {
        self.won
    }

    /// Whether the last accepted move can be undone.
    pub fn can_undo(&self) -> bool {
        self.can_undo
    }

    /// Captures the full read model.
    #[instrument(skip(self))]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(self)
    }
}

// ─────────────────────────────────────────────────────────────
//  Commands
// ─────────────────────────────────────────────────────────────

impl Game2048 {
    /// Places a 2 (or, less often, a 4) on a uniformly chosen empty cell.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::OutOfSpace`] when the grid is full. Normal
    /// play never reaches this: a move only spawns after freeing a cell.
    #[instrument(skip(self))]
    pub fn spawn_random_tile(&mut self) -> Result<SpawnedTile, EngineError> {
        let cells = self.grid.available_cells();
        if cells.is_empty() {
            error!("Attempted to spawn a tile on a full grid");
            return Err(EngineError::OutOfSpace);
        }

        let value = if self.rng.gen_bool(*self.config.two_probability()) {
            2
        } else {
            4
        };
        let position = cells[self.rng.gen_range(0..cells.len())];
        let id = self.allocate_id();
        self.grid.insert(Tile::new(id, position, value));

        debug!(%position, value, "Spawned tile");
        Ok(SpawnedTile {
            tile: id,
            position,
            value,
        })
    }

    /// Slides every tile towards `direction`, merging equal neighbours once.
    ///
    /// A move that changes nothing leaves all state untouched and returns
    /// an outcome with `moved == false`. So does any move once the game is
    /// over.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::OutOfSpace`] if the follow-up spawn finds no
    /// room, and [`EngineError::InvariantViolation`] if a debug-build grid
    /// check fails. Both indicate an engine bug.
    ///
    /// Returns [`EngineError::ValueOverflow`] or [`EngineError::ScoreOverflow`]
    /// when a merge would leave the `u32` range. The game is left exactly as
    /// it was before the call.
    #[instrument(skip(self), fields(score = self.score, move_count = self.move_count))]
    pub fn move_tiles(&mut self, direction: Direction) -> Result<MoveOutcome, EngineError> {
        if self.over {
            debug!("Game is over, ignoring move");
            return Ok(MoveOutcome::unchanged());
        }

        let before = self.grid.clone();
        let (score, best_score, won) = (self.score, self.best_score, self.won);
        self.prepare_tiles();

        let mut outcome = MoveOutcome::unchanged();
        if let Err(err) = self.slide(direction, &mut outcome) {
            warn!(%direction, %err, "Move rejected");
            self.grid = before;
            self.score = score;
            self.best_score = best_score;
            self.won = won;
            return Err(err);
        }

        if !outcome.moved {
            debug!(%direction, "Move changed nothing");
            self.grid = before;
            return Ok(outcome);
        }

        let spawned = self.spawn_random_tile()?;
        outcome.events.push(GameEvent::Spawned(spawned));
        self.move_count += 1;
        self.can_undo = true;

        if !can_move(&self.grid) {
            info!(score = self.score, "No legal moves remain");
            self.over = true;
            outcome.events.push(GameEvent::GameOver);
        }

        self.check_invariants()?;
        debug!(%direction, gained = outcome.score_gained, "Move applied");
        Ok(outcome)
    }

    /// Rebuilds the grid as it stood before the last accepted move.
    ///
    /// Sources of a merge return to their pre-move cells, moved tiles return
    /// to theirs, and the tile spawned by that move disappears. Score, best
    /// score, move count and the won/over flags keep their current values.
    /// Only one level is available: afterwards `can_undo` is false until the
    /// next accepted move.
    #[instrument(skip(self))]
    pub fn undo(&mut self) -> UndoOutcome {
        if !self.can_undo {
            warn!("Nothing to undo");
            return UndoOutcome::Unavailable;
        }

        self.can_undo = false;
        for tile in self.grid.drain() {
            if let Some(sources) = tile.merged_from() {
                for source in sources {
                    if let Some(previous) = source.previous_position() {
                        let id = self.allocate_id();
                        self.grid.insert(Tile::new(id, previous, source.value()));
                    }
                }
            } else if let Some(previous) = tile.previous_position() {
                let id = self.allocate_id();
                self.grid.insert(Tile::new(id, previous, tile.value()));
            }
        }

        let tiles = self.grid.tiles().count();
        info!(tiles, "Undid last move");
        UndoOutcome::Restored { tiles }
    }

    /// Starts a fresh game, keeping only the best score.
    ///
    /// # Errors
    ///
    /// Propagates [`EngineError::OutOfSpace`] from seeding, which a
    /// validated configuration rules out.
    #[instrument(skip(self), fields(best_score = self.best_score))]
    pub fn restart(&mut self) -> Result<(), EngineError> {
        self.grid = Grid::new(*self.config.rows(), *self.config.cols());
        self.score = 0;
        self.move_count = 0;
        self.over = false;
        self.won = false;
        self.can_undo = false;
        self.seed_start_tiles()?;
        info!("Game restarted");
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Internals
// ─────────────────────────────────────────────────────────────

impl Game2048 {
    fn allocate_id(&mut self) -> TileId {
        let id = TileId(self.next_id);
        self.next_id += 1;
        id
    }

    fn prepare_tiles(&mut self) {
        for tile in self.grid.tiles_mut() {
            tile.prepare();
        }
    }

    /// Slides every tile along `direction`, merging equal neighbours once.
    fn slide(&mut self, direction: Direction, outcome: &mut MoveOutcome) -> Result<(), EngineError> {
        let vector = direction.vector();
        let traversal = build_traversal(direction, self.grid.rows(), self.grid.cols());

        for origin in traversal.positions() {
            let Some(mut tile) = self.grid.take(origin) else {
                continue;
            };
            let Farthest { farthest, next } = self.grid.find_farthest(origin, vector);
            let merge_target = next.filter(|position| {
                self.grid.get(*position).is_some_and(|target| {
                    target.merged_from().is_none() && target.value() == tile.value()
                })
            });

            if let Some(target_position) = merge_target
                && let Some(target) = self.grid.take(target_position)
            {
                tile.set_position(target_position);
                let merged = Tile::merged(self.allocate_id(), tile, target)?;
                let merge = Merge {
                    tile: merged.id(),
                    position: target_position,
                    value: merged.value(),
                };
                self.grid.insert(merged);
                self.record_merge(merge, outcome)?;
                outcome.moved = true;
            } else {
                tile.set_position(farthest);
                self.grid.insert(tile);
                if farthest != origin {
                    outcome.moved = true;
                }
            }
        }
        Ok(())
    }

    fn record_merge(&mut self, merge: Merge, outcome: &mut MoveOutcome) -> Result<(), EngineError> {
        self.score = self
            .score
            .checked_add(merge.value)
            .ok_or(EngineError::ScoreOverflow {
                score: self.score,
                gained: merge.value,
            })?;
        // Bounded by the score, which just fit.
        outcome.score_gained += merge.value;
        if self.score > self.best_score {
            self.best_score = self.score;
        }
        outcome.events.push(GameEvent::Merged(merge));

        if merge.value == *self.config.win_value() && !self.won {
            info!(value = merge.value, "Win value reached");
            self.won = true;
            outcome.events.push(GameEvent::Won { value: merge.value });
        }
        Ok(())
    }

    fn check_invariants(&self) -> Result<(), EngineError> {
        if !cfg!(debug_assertions) {
            return Ok(());
        }
        GridInvariants::check_all(&self.grid).map_err(|violations| {
            let description = violations
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            error!(%description, "Grid invariant violated");
            EngineError::InvariantViolation(description)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Position;

    fn game(rows: usize, cols: usize, values: &[u32]) -> Game2048 {
        let config = EngineConfig::default().with_rows(rows).with_cols(cols);
        Game2048::from_values(config, 1, values).expect("valid grid")
    }

    #[test]
    fn test_new_game_has_start_tiles() {
        let game = Game2048::with_seed(EngineConfig::default(), 3).expect("valid config");
        assert_eq!(game.grid().tiles().count(), 2);
        assert_eq!(game.score(), 0);
        assert!(!game.can_undo());
    }

    #[test]
    fn test_spawn_fills_last_cell_then_fails() {
        let mut game = game(1, 2, &[2, 0]);
        let spawned = game.spawn_random_tile().expect("one cell free");
        assert_eq!(spawned.position, Position::new(1, 0));
        assert!(matches!(spawned.value, 2 | 4));
        assert_eq!(game.spawn_random_tile(), Err(EngineError::OutOfSpace));
    }

    #[test]
    fn test_spawn_respects_two_probability() {
        let config = EngineConfig::default().with_two_probability(0.0);
        let mut game = Game2048::from_values(config, 9, &[0; 16]).expect("valid grid");
        for _ in 0..16 {
            assert_eq!(game.spawn_random_tile().expect("room").value, 4);
        }
    }

    #[test]
    fn test_merge_records_sources() {
        let mut game = game(1, 4, &[2, 2, 0, 0]);
        game.move_tiles(Direction::Left).expect("move");
        let merged = game.grid().get(Position::new(0, 0)).expect("merged tile");
        assert_eq!(merged.value(), 4);
        let sources = merged.merged_from().expect("sources");
        assert_eq!(sources[0].previous_position(), Some(Position::new(1, 0)));
        assert_eq!(sources[1].previous_position(), Some(Position::new(0, 0)));
    }

    #[test]
    fn test_next_move_clears_merge_metadata() {
        let mut game = game(1, 4, &[2, 2, 0, 0]);
        game.move_tiles(Direction::Left).expect("move");
        let second = game.move_tiles(Direction::Right).expect("move");
        assert!(second.moved);
        // Only a fresh merge of the old 4 with a spawned 4 may carry sources.
        assert!(
            game.grid()
                .tiles()
                .filter(|tile| tile.merged_from().is_some())
                .all(|tile| tile.value() == 8)
        );
    }

    #[test]
    fn test_noop_move_keeps_undo_metadata() {
        let mut game = game(1, 4, &[2, 2, 0, 0]);
        game.move_tiles(Direction::Left).expect("move");
        let vertical = game.move_tiles(Direction::Up).expect("move");
        assert!(!vertical.moved);
        let tile = game.grid().get(Position::new(0, 0)).expect("merged tile");
        assert!(tile.merged_from().is_some());
        assert!(game.can_undo());
    }

    #[test]
    fn test_merge_past_u32_max_is_rejected_and_rolled_back() {
        let top = 1 << 31;
        let mut game = game(1, 4, &[2, 2, top, top]);
        let result = game.move_tiles(Direction::Left);
        assert_eq!(
            result,
            Err(EngineError::ValueOverflow {
                value: top,
                position: Position::new(1, 0),
            })
        );
        assert_eq!(game.grid().values(), vec![2, 2, top, top]);
        assert_eq!(game.score(), 0);
        assert_eq!(game.move_count(), 0);
        assert!(!game.can_undo());
    }

    #[test]
    fn test_score_past_u32_max_is_rejected_and_rolled_back() {
        let half = 1 << 30;
        let mut quad = game(1, 4, &[half, half, half, half]);
        let result = quad.move_tiles(Direction::Left);
        assert_eq!(
            result,
            Err(EngineError::ScoreOverflow {
                score: 1 << 31,
                gained: 1 << 31,
            })
        );
        assert_eq!(quad.grid().values(), vec![half; 4]);
        assert_eq!(quad.score(), 0);
        assert_eq!(quad.best_score(), 0);

        // The smaller pair still merges on its own.
        let mut pair = game(1, 4, &[half, half, 0, 0]);
        let outcome = pair.move_tiles(Direction::Left).expect("fits");
        assert_eq!(outcome.score_gained, 1 << 31);
    }

    #[test]
    fn test_won_event_on_win_value() {
        let config = EngineConfig::default()
            .with_rows(1)
            .with_cols(4)
            .with_win_value(8);
        let mut game = Game2048::from_values(config, 5, &[4, 4, 0, 0]).expect("valid grid");
        let outcome = game.move_tiles(Direction::Left).expect("move");
        assert!(game.is_won());
        assert!(outcome.events.contains(&GameEvent::Won { value: 8 }));
    }

    #[test]
    fn test_undo_unavailable_after_restart() {
        let mut game = Game2048::with_seed(EngineConfig::default(), 11).expect("valid config");
        game.restart().expect("restart");
        let before = game.grid().values();
        assert_eq!(game.undo(), UndoOutcome::Unavailable);
        assert_eq!(game.grid().values(), before);
    }
}

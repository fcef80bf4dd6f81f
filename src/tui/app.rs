//! Application state for the game screens.

use crate::clock::GameClock;
use crate::input::{self, KeyAction};
use crate::notifications::{Notice, NotificationCenter};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use std::time::Instant;
use strictly_2048::{EngineConfig, EngineError, Game2048, GameEvent, MoveOutcome, UndoOutcome};
use strictly_minesweeper::{Coord, FlagOutcome, Level, Minefield, RevealOutcome};
use tracing::{debug, info, instrument, warn};

use super::ui;

/// Tag for the 2048 win and game-over banners.
pub const GAME_2048_TAG: &str = "2048";

/// What the event loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Keep running.
    Continue,
    /// Leave the screen.
    Quit,
}

/// A screen driven by the terminal event loop.
pub trait Screen {
    /// One second of wall time has passed.
    fn tick(&mut self);

    /// Reacts to a key press.
    fn handle_key(&mut self, key: KeyEvent) -> Result<Control>;

    /// Closes stale banners.
    fn expire(&mut self, _now: Instant) {}

    /// Renders the screen.
    fn draw(&self, frame: &mut Frame);
}

/// The 2048 screen.
pub struct Game2048App {
    game: Game2048,
    notifications: NotificationCenter,
    clock: GameClock,
    status_message: String,
}

impl Game2048App {
    /// Starts a game from OS entropy.
    pub fn new(config: EngineConfig) -> Result<Self> {
        Ok(Self::with_game(Game2048::new(config)?))
    }

    /// Wraps an existing engine.
    pub fn with_game(game: Game2048) -> Self {
        Self {
            game,
            notifications: NotificationCenter::default(),
            clock: GameClock::new(),
            status_message: "Use arrows, WASD or hjkl to slide. u undoes, r restarts.".to_string(),
        }
    }

    /// The engine.
    pub fn game(&self) -> &Game2048 {
        &self.game
    }

    /// Live banners.
    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    /// Elapsed-time clock.
    pub fn clock(&self) -> &GameClock {
        &self.clock
    }

    /// Current status line.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    #[instrument(skip(self, outcome), fields(moved = outcome.moved, gained = outcome.score_gained))]
    fn report(&mut self, outcome: &MoveOutcome) {
        if !outcome.moved {
            debug!("Move absorbed");
            return;
        }
        self.status_message = match outcome.score_gained {
            0 => format!("Move {}", self.game.move_count()),
            gained => format!("Move {}: +{}", self.game.move_count(), gained),
        };
        for event in &outcome.events {
            match event {
                GameEvent::Won { value } => {
                    info!(value, "Player won");
                    self.notifications.post(
                        Notice::success(format!("You reached {}!", value))
                            .with_title("You win!".to_string())
                            .with_tag(GAME_2048_TAG.to_string()),
                    );
                }
                GameEvent::GameOver => {
                    info!(score = self.game.score(), "Game over");
                    let message = format!("Final score {}. Press r to restart.", self.game.score());
                    self.notifications.post(
                        Notice::error(message)
                            .with_title("Game over".to_string())
                            .with_tag(GAME_2048_TAG.to_string()),
                    );
                }
                GameEvent::Merged(_) | GameEvent::Spawned(_) => {}
            }
        }
    }

    fn restart(&mut self) -> Result<()> {
        self.game.restart()?;
        self.notifications.remove_by_tag(GAME_2048_TAG);
        self.clock.reset();
        self.status_message = "New game".to_string();
        Ok(())
    }

    fn undo(&mut self) {
        self.status_message = match self.game.undo() {
            UndoOutcome::Restored { tiles } => format!("Undid last move ({} tiles)", tiles),
            UndoOutcome::Unavailable => "Nothing to undo".to_string(),
        };
    }
}

impl Screen for Game2048App {
    fn tick(&mut self) {
        self.clock.tick(!self.game.is_over());
    }

    #[instrument(skip(self), fields(code = ?key.code))]
    fn handle_key(&mut self, key: KeyEvent) -> Result<Control> {
        match input::action_for_key(&key) {
            Some(KeyAction::Move(direction)) => match self.game.move_tiles(direction) {
                Ok(outcome) => self.report(&outcome),
                Err(
                    err @ (EngineError::ValueOverflow { .. } | EngineError::ScoreOverflow { .. }),
                ) => {
                    warn!(%err, "Move refused");
                    self.status_message = err.to_string();
                }
                Err(err) => return Err(err.into()),
            },
            Some(KeyAction::Restart) => self.restart()?,
            Some(KeyAction::Undo) => self.undo(),
            Some(KeyAction::Quit) => return Ok(Control::Quit),
            None => {}
        }
        Ok(Control::Continue)
    }

    fn expire(&mut self, now: Instant) {
        self.notifications.expire(now);
    }

    fn draw(&self, frame: &mut Frame) {
        ui::draw_2048(frame, self);
    }
}

/// The minesweeper screen.
pub struct MinesweeperApp {
    field: Minefield,
    cursor: Coord,
    clock: GameClock,
    status_message: String,
}

impl MinesweeperApp {
    /// Starts a covered board from OS entropy.
    pub fn new(rows: usize, cols: usize, level: Level) -> Result<Self> {
        Ok(Self::with_field(Minefield::new(rows, cols, level)?))
    }

    /// Wraps an existing board.
    pub fn with_field(field: Minefield) -> Self {
        Self {
            field,
            cursor: Coord::new(0, 0),
            clock: GameClock::new(),
            status_message: "Space reveals, f flags, r restarts, q quits.".to_string(),
        }
    }

    /// The board.
    pub fn field(&self) -> &Minefield {
        &self.field
    }

    /// Highlighted cell.
    pub fn cursor(&self) -> Coord {
        self.cursor
    }

    /// Elapsed-time clock.
    pub fn clock(&self) -> &GameClock {
        &self.clock
    }

    /// Current status line.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    fn reveal(&mut self) -> Result<()> {
        self.status_message = match self.field.reveal(self.cursor)? {
            RevealOutcome::Detonated => "Boom! Press r to try again.".to_string(),
            RevealOutcome::Revealed { .. } if self.field.is_won() => "Board cleared!".to_string(),
            RevealOutcome::Revealed { adjacent_mines } => {
                format!("{} adjacent mines", adjacent_mines)
            }
            RevealOutcome::Unflagged => "Flag removed".to_string(),
            RevealOutcome::AlreadyRevealed | RevealOutcome::Finished => {
                return Ok(());
            }
        };
        Ok(())
    }

    fn toggle_flag(&mut self) -> Result<()> {
        if let FlagOutcome::Flagged | FlagOutcome::Unflagged = self.field.toggle_flag(self.cursor)? {
            self.status_message = format!(
                "{} flags / {} mines",
                self.field.flag_count(),
                self.field.mine_count()
            );
        }
        Ok(())
    }

    fn restart(&mut self) -> Result<()> {
        self.field = Minefield::new(self.field.rows(), self.field.cols(), self.field.level())?;
        self.cursor = Coord::new(0, 0);
        self.clock.reset();
        self.status_message = "New board".to_string();
        Ok(())
    }

    fn running(&self) -> bool {
        !self.field.is_over() && !self.field.is_won()
    }
}

impl Screen for MinesweeperApp {
    fn tick(&mut self) {
        // The clock starts with the first reveal.
        let started = self.field.mines_placed();
        self.clock.tick(started && self.running());
    }

    #[instrument(skip(self), fields(code = ?key.code))]
    fn handle_key(&mut self, key: KeyEvent) -> Result<Control> {
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return Ok(Control::Continue);
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(Control::Quit),
            KeyCode::Char(' ') | KeyCode::Enter => self.reveal()?,
            KeyCode::Char('f') => self.toggle_flag()?,
            KeyCode::Char('r') => self.restart()?,
            code => {
                self.cursor =
                    input::move_cursor(self.cursor, code, self.field.rows(), self.field.cols());
            }
        }
        Ok(Control::Continue)
    }

    fn draw(&self, frame: &mut Frame) {
        ui::draw_minesweeper(frame, self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app_2048(rows: usize, cols: usize, values: &[u32]) -> Game2048App {
        let config = EngineConfig::default()
            .with_rows(rows)
            .with_cols(cols)
            .with_win_value(8)
            .with_two_probability(1.0);
        Game2048App::with_game(Game2048::from_values(config, 4, values).expect("valid grid"))
    }

    #[test]
    fn test_win_posts_tagged_banner_and_restart_clears_it() {
        let mut app = app_2048(1, 4, &[4, 4, 0, 0]);
        app.handle_key(press(KeyCode::Left)).expect("move");
        let banners = app.notifications().active();
        assert_eq!(banners.len(), 1);
        assert_eq!(banners[0].notice().tag().as_deref(), Some(GAME_2048_TAG));

        app.handle_key(press(KeyCode::Char('r'))).expect("restart");
        assert!(app.notifications().active().is_empty());
        assert_eq!(app.game().move_count(), 0);
    }

    #[test]
    fn test_clock_stops_when_game_over() {
        let mut app = app_2048(1, 3, &[2, 0, 4]);
        app.tick();
        assert_eq!(app.clock().elapsed(), 1);

        // Spawns are always 2 here, so the board locks as [2, 4, 2].
        app.handle_key(press(KeyCode::Left)).expect("move");
        assert!(app.game().is_over());
        app.tick();
        assert_eq!(app.clock().elapsed(), 1);
        assert_eq!(app.notifications().active().len(), 1);
    }

    #[test]
    fn test_shifted_arrow_is_ignored() {
        let mut app = app_2048(1, 4, &[0, 0, 0, 2]);
        let key = KeyEvent::new(KeyCode::Left, KeyModifiers::SHIFT);
        app.handle_key(key).expect("ignored");
        assert_eq!(app.game().move_count(), 0);
        app.handle_key(press(KeyCode::Char('h'))).expect("move");
        assert_eq!(app.game().move_count(), 1);
        assert!(app.game().can_undo());
    }

    #[test]
    fn test_overflowing_merge_is_reported_not_fatal() {
        let top = 1 << 31;
        let mut app = app_2048(1, 4, &[top, top, 0, 0]);
        let control = app.handle_key(press(KeyCode::Left)).expect("refused move");
        assert_eq!(control, Control::Continue);
        assert!(app.status_message().contains("overflows"));
        assert_eq!(app.game().grid().values(), vec![top, top, 0, 0]);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app_2048(1, 4, &[2, 0, 0, 0]);
        assert_eq!(app.handle_key(press(KeyCode::Esc)).expect("quit"), Control::Quit);
        assert_eq!(
            app.handle_key(press(KeyCode::Char('q'))).expect("quit"),
            Control::Quit
        );
    }

    #[test]
    fn test_minesweeper_cursor_and_reveal() {
        let field = Minefield::with_seed(3, 3, Level::Beginner, 2).expect("valid size");
        let mut app = MinesweeperApp::with_field(field);
        app.handle_key(press(KeyCode::Right)).expect("move");
        app.handle_key(press(KeyCode::Down)).expect("move");
        assert_eq!(app.cursor(), Coord::new(1, 1));

        app.tick();
        assert_eq!(app.clock().elapsed(), 0);

        app.handle_key(press(KeyCode::Char(' '))).expect("reveal");
        let cell = app.field().cell(Coord::new(1, 1)).expect("on board");
        assert!(*cell.revealed());
        // 3x3 at beginner density has no mines, so one reveal cannot lose.
        assert!(!app.field().is_over());
    }
}

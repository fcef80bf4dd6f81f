//! Terminal UI for the grid games.

mod app;
mod ui;

pub use app::{Control, GAME_2048_TAG, Game2048App, MinesweeperApp, Screen};

use crate::clock;
use crate::config::MinesweeperConfig;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use strictly_2048::EngineConfig;
use tokio::sync::mpsc;
use tracing::{error, info, instrument};

/// Log file used while the terminal is in raw mode.
pub const LOG_FILE: &str = "strictly_grids.log";

type Term = Terminal<CrosstermBackend<Stdout>>;

/// Sends logs to [`LOG_FILE`] so they do not interfere with the TUI.
pub fn init_file_logging() -> Result<()> {
    let log_file = std::fs::File::create(LOG_FILE)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized
    Ok(())
}

/// Runs the 2048 screen until the player quits.
#[instrument(skip(config))]
pub async fn run_2048(config: EngineConfig) -> Result<()> {
    info!("Starting 2048");
    let mut app = Game2048App::new(config)?;
    run_screen(&mut app).await?;
    info!(
        score = app.game().score(),
        best = app.game().best_score(),
        "2048 closed"
    );
    Ok(())
}

/// Runs the minesweeper screen until the player quits.
#[instrument(skip(config), fields(level = %config.level()))]
pub async fn run_minesweeper(config: MinesweeperConfig) -> Result<()> {
    info!(rows = config.rows(), cols = config.cols(), "Starting minesweeper");
    let mut app = MinesweeperApp::new(*config.rows(), *config.cols(), *config.level())?;
    run_screen(&mut app).await
}

async fn run_screen<S: Screen>(screen: &mut S) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (mut ticks, ticker) = clock::spawn_ticker(Duration::from_secs(1));
    let res = event_loop(&mut terminal, screen, &mut ticks).await;
    ticker.abort();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    res
}

async fn event_loop<S: Screen>(
    terminal: &mut Term,
    screen: &mut S,
    ticks: &mut mpsc::UnboundedReceiver<()>,
) -> Result<()> {
    loop {
        while ticks.try_recv().is_ok() {
            screen.tick();
        }
        screen.expire(Instant::now());

        terminal.draw(|f| screen.draw(f))?;

        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && screen.handle_key(key)? == Control::Quit
        {
            info!("User quit");
            return Ok(());
        }

        tokio::task::yield_now().await;
    }
}

//! Strictly Grids - Unified CLI
//!
//! Terminal 2048 and minesweeper, plus a headless 2048 replay.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use strictly_grids::{GamesConfig, MinesweeperConfig, parse_moves, replay, tui};
use strictly_minesweeper::Level;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Replay { .. } => init_stderr_logging(),
        Command::Play | Command::Minesweeper { .. } => tui::init_file_logging()?,
    }

    let config = GamesConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::Play => tui::run_2048(config.game_2048().clone()).await,
        Command::Minesweeper { level, rows, cols } => {
            run_minesweeper(config.minesweeper(), level, rows, cols).await
        }
        Command::Replay { seed, moves } => run_replay(&config, seed, &moves),
    }
}

fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Applies command-line overrides to the configured board and starts the TUI.
#[instrument(skip(base))]
async fn run_minesweeper(
    base: &MinesweeperConfig,
    level: Option<String>,
    rows: Option<usize>,
    cols: Option<usize>,
) -> Result<()> {
    let level = match level {
        Some(name) => Level::parse(&name)?,
        None => *base.level(),
    };
    let board = MinesweeperConfig::new(
        rows.unwrap_or(*base.rows()),
        cols.unwrap_or(*base.cols()),
        level,
    );
    let config = GamesConfig::default().with_minesweeper(board);
    config.validate()?;
    tui::run_minesweeper(*config.minesweeper()).await
}

/// Replays the moves headlessly and prints the final snapshot as JSON.
#[instrument(skip(config, moves))]
fn run_replay(config: &GamesConfig, seed: u64, moves: &str) -> Result<()> {
    let moves = parse_moves(moves)?;
    info!(count = moves.len(), "Replaying moves");
    let snapshot = replay(config.game_2048().clone(), seed, &moves)?;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

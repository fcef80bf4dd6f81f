//! Command-line interface for strictly_grids.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Grids - 2048 and minesweeper in the terminal
#[derive(Parser, Debug)]
#[command(name = "strictly_grids")]
#[command(about = "Grid games for the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// TOML file with [game_2048] and [minesweeper] tables
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play 2048
    Play,

    /// Play minesweeper
    Minesweeper {
        /// Difficulty: beginner, intermediate or expert
        #[arg(short, long)]
        level: Option<String>,

        /// Board rows (overrides the config file)
        #[arg(long)]
        rows: Option<usize>,

        /// Board columns (overrides the config file)
        #[arg(long)]
        cols: Option<usize>,
    },

    /// Replay 2048 moves without a terminal and print the final state as JSON
    Replay {
        /// RNG seed for tile spawns
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Comma-separated moves, e.g. "up,left,ArrowDown,j"
        #[arg(long, default_value = "")]
        moves: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replay_args() {
        let cli = Cli::try_parse_from([
            "strictly_grids",
            "replay",
            "--seed",
            "9",
            "--moves",
            "up,left",
            "--config",
            "games.toml",
        ])
        .expect("valid args");
        assert_eq!(cli.config, Some(PathBuf::from("games.toml")));
        match cli.command {
            Command::Replay { seed, moves } => {
                assert_eq!(seed, 9);
                assert_eq!(moves, "up,left");
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_minesweeper_overrides_are_optional() {
        let cli = Cli::try_parse_from(["strictly_grids", "minesweeper", "-l", "expert"])
            .expect("valid args");
        assert!(matches!(
            cli.command,
            Command::Minesweeper { level: Some(_), rows: None, cols: None }
        ));
    }
}

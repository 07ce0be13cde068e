//! Command-line interface for tictac_arena.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tictac_arena::FirstPlayer;
use tictac_engine::Mark;

/// Tic-tac-toe against a perfect minimax opponent
#[derive(Parser, Debug)]
#[command(name = "tictac_arena")]
#[command(about = "Play tic-tac-toe against a minimax engine and track results", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// SQLite database file (overrides config and TICTAC_DB_PATH)
    #[arg(long, global = true)]
    pub db_path: Option<String>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play interactive games in the terminal
    Play {
        /// Display name to record results under (registered if new)
        #[arg(short, long)]
        name: String,

        /// Who moves first
        #[arg(long, value_enum)]
        first: Option<FirstPlayer>,

        /// Seed for the engine's opening move
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Register a display name and print its id
    Register {
        /// Display name
        name: String,
    },

    /// Show a player's results
    Stats {
        /// Display name
        name: String,

        /// How many recent games to list
        #[arg(long, default_value = "10")]
        recent: usize,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show the leaderboard (3 points per win, 1 per draw)
    Leaderboard {
        /// Maximum number of rows
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Score every legal move of a position
    Analyze {
        /// Nine cells using X, O and . (e.g. "XX./.O./...")
        board: String,

        /// Mark to move (defaults to whoever is next with X moving first)
        #[arg(long, value_enum)]
        mark: Option<MarkArg>,
    },
}

/// Mark selector for the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MarkArg {
    /// Mark X
    X,
    /// Mark O
    O,
}

impl From<MarkArg> for Mark {
    fn from(arg: MarkArg) -> Self {
        match arg {
            MarkArg::X => Mark::X,
            MarkArg::O => Mark::O,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_play() {
        let cli = Cli::try_parse_from([
            "tictac_arena",
            "--db-path",
            "x.db",
            "play",
            "--name",
            "Ada",
            "--first",
            "computer",
        ])
        .unwrap();
        assert_eq!(cli.db_path.as_deref(), Some("x.db"));
        match cli.command {
            Command::Play { name, first, seed } => {
                assert_eq!(name, "Ada");
                assert_eq!(first, Some(FirstPlayer::Computer));
                assert_eq!(seed, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_analyze_mark() {
        let cli = Cli::try_parse_from(["tictac_arena", "analyze", "XX./.O./...", "--mark", "o"])
            .unwrap();
        match cli.command {
            Command::Analyze { board, mark } => {
                assert_eq!(board, "XX./.O./...");
                assert_eq!(mark.map(Mark::from), Some(Mark::O));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}

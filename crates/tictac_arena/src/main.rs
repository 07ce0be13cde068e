//! Tictac Arena - unified CLI
//!
//! Play the minimax engine in the terminal, manage profiles and inspect
//! results.

#![warn(missing_docs)]

mod cli;
mod console;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use serde::Serialize;
use std::io::{self, Write};
use tictac_arena::{
    AggregatedStats, ArenaConfig, GameRecord, GameRepository, GameSession,
    ProfileRecorder, ProfileService,
};
use tictac_engine::{Board, Mark, MoveSelector, score_moves};
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = ArenaConfig::load(cli.config.as_deref())?;
    if let Some(path) = cli.db_path {
        config = config.with_database_path(path);
    }

    match cli.command {
        Command::Play { name, first, seed } => {
            if let Some(first) = first {
                config = config.with_first_player(first);
            }
            if let Some(seed) = seed {
                config = config.with_seed(seed);
            }
            run_play(&config, &name)
        }
        Command::Register { name } => run_register(&config, &name),
        Command::Stats { name, recent, json } => run_stats(&config, &name, recent, json),
        Command::Leaderboard { limit, json } => run_leaderboard(&config, limit, json),
        Command::Analyze { board, mark } => run_analyze(&board, mark.map(Mark::from)),
    }
}

fn open_service(config: &ArenaConfig) -> Result<ProfileService> {
    let repository = GameRepository::open(config.database_path().clone())
        .with_context(|| format!("Failed to open database {}", config.database_path()))?;
    info!(path = repository.db_path(), "Database ready");
    Ok(ProfileService::new(repository))
}

/// Interactive games until the player declines another.
#[instrument(skip(config))]
fn run_play(config: &ArenaConfig, name: &str) -> Result<()> {
    let service = open_service(config)?;
    let user = service.register(name)?;
    info!(user_id = user.id(), "Starting play");

    let selector = match config.seed() {
        Some(seed) => MoveSelector::seeded(*seed),
        None => MoveSelector::from_os_rng(),
    };
    let first = *config.first_player();
    let mut session = GameSession::new(first, selector);
    let mut recorder = ProfileRecorder::new(&service, *user.id());

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    loop {
        let result =
            console::play_game(&mut session, config.computer_name(), &mut input, &mut output)?;
        if result.is_none() {
            writeln!(output, "Game abandoned; nothing recorded.")?;
            break;
        }

        if let Err(e) = session.report_outcome(&mut recorder) {
            warn!(error = %e, "Failed to record result, retrying once");
            session.report_outcome(&mut recorder)?;
        }
        let stats = service.get_stats(*user.id())?;
        writeln!(output, "{}", format_stats(user.display_name(), &stats))?;

        if !console::confirm("Play again?", &mut input, &mut output)? {
            break;
        }
        session.restart(first);
    }
    Ok(())
}

#[instrument(skip(config))]
fn run_register(config: &ArenaConfig, name: &str) -> Result<()> {
    let service = open_service(config)?;
    let user = service.register(name)?;
    println!("{} (id {})", user.display_name(), user.id());
    Ok(())
}

#[derive(Serialize)]
struct StatsReport<'a> {
    display_name: &'a str,
    #[serde(flatten)]
    stats: &'a AggregatedStats,
    win_rate: f64,
    recent: &'a [GameRecord],
}

#[instrument(skip(config))]
fn run_stats(config: &ArenaConfig, name: &str, recent: usize, json: bool) -> Result<()> {
    let service = open_service(config)?;
    let user = service.find(name)?;
    let stats = service.get_stats(*user.id())?;
    let mut history = service.get_history(*user.id())?;
    history.truncate(recent);

    if json {
        let report = StatsReport {
            display_name: user.display_name(),
            stats: &stats,
            win_rate: stats.win_rate(),
            recent: &history,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", format_stats(user.display_name(), &stats));
    for record in &history {
        println!(
            "  {}  {:<4}  {} moves",
            record.played_at().format("%Y-%m-%d %H:%M"),
            record.outcome(),
            record.moves_count()
        );
    }
    Ok(())
}

#[instrument(skip(config))]
fn run_leaderboard(config: &ArenaConfig, limit: Option<usize>, json: bool) -> Result<()> {
    let service = open_service(config)?;
    let entries = service.leaderboard(limit)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No games recorded yet.");
        return Ok(());
    }
    println!(
        "{:>3}  {:<32} {:>5} {:>4} {:>4} {:>4}",
        "#", "Player", "Score", "W", "L", "D"
    );
    for (rank, entry) in entries.iter().enumerate() {
        println!(
            "{:>3}  {:<32} {:>5} {:>4} {:>4} {:>4}",
            rank + 1,
            entry.display_name(),
            entry.score(),
            entry.stats().wins(),
            entry.stats().losses(),
            entry.stats().draws()
        );
    }
    Ok(())
}

#[instrument]
fn run_analyze(board: &str, mark: Option<Mark>) -> Result<()> {
    let board: Board = board.parse()?;
    let me = mark.unwrap_or_else(|| board.next_mark(Mark::X));
    println!("{}\n", board);

    let scores = score_moves(&board, me, me.opponent())
        .with_context(|| format!("No moves to analyze ({})", tictac_engine::outcome(&board)))?;
    println!("{} to move:", me);
    console::write_scores(&scores, &mut io::stdout())?;
    Ok(())
}

fn format_stats(name: &str, stats: &AggregatedStats) -> String {
    format!(
        "{}: {} games, {} wins, {} losses, {} draws ({:.0}% won)",
        name,
        stats.total_games(),
        stats.wins(),
        stats.losses(),
        stats.draws(),
        stats.win_rate()
    )
}

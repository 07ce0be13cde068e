//! Tic-tac-toe arena - play the minimax engine and keep score.
//!
//! This crate wraps [`tictac_engine`] with everything a playable game needs:
//!
//! - **Session**: a step-by-step game between a human and the engine that
//!   reports each finished game exactly once
//! - **Profiles**: registration of display names with stable ids
//! - **Persistence**: SQLite storage of results, per-user stats and a leaderboard
//! - **Config**: TOML file, environment and CLI settings
//!
//! # Example
//!
//! ```no_run
//! use tictac_arena::{FirstPlayer, GameRepository, GameSession, ProfileRecorder, ProfileService};
//! use tictac_engine::MoveSelector;
//!
//! # fn example() -> anyhow::Result<()> {
//! let service = ProfileService::new(GameRepository::open("arena.db".to_string())?);
//! let user = service.register("Ada")?;
//!
//! let mut session = GameSession::new(FirstPlayer::Computer, MoveSelector::seeded(7));
//! session.play_computer()?;
//! session.play_human(1)?;
//! // ... alternate until the game ends, then:
//! session.report_outcome(&mut ProfileRecorder::new(&service, *user.id()))?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod db;
mod profile_service;
mod session;

// Crate-level exports - Configuration
pub use config::{ArenaConfig, ConfigError, DB_PATH_ENV, FirstPlayer};

// Crate-level exports - Database
pub use db::{
    AggregatedStats, DbError, GameRecord, GameRepository, GameResult, LeaderboardEntry,
    NewGameRecord, NewUser, User,
};

// Crate-level exports - Profiles
pub use profile_service::{MAX_NAME_LEN, ProfileRecorder, ProfileService};

// Crate-level exports - Sessions
pub use session::{GameSession, OutcomeRecord, OutcomeSink, SessionError};

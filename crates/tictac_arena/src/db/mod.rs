//! Database persistence layer for user profiles and game results.

mod error;
mod models;
mod repository;
mod schema; // Diesel generated schema - internal use only

pub use error::DbError;
pub use models::{
    AggregatedStats, GameRecord, GameResult, LeaderboardEntry, NewGameRecord, NewUser, User,
};
pub use repository::GameRepository;

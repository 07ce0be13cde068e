//! Database models and domain types.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;
use serde::Serialize;
use tracing::instrument;

use crate::db::{DbError, schema};

/// User profile database model.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Getters, Serialize)]
#[diesel(table_name = schema::users)]
pub struct User {
    id: i32,
    display_name: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

/// Insertable user model for creating new users.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::users)]
pub struct NewUser {
    display_name: String,
}

/// One completed game, stored from the user's perspective.
#[derive(
    Debug, Clone, Queryable, Identifiable, Associations, Selectable, Getters, Serialize,
)]
#[diesel(table_name = schema::game_results)]
#[diesel(belongs_to(User))]
pub struct GameRecord {
    id: i32,
    user_id: i32,
    outcome: String,
    moves_count: i32,
    played_at: NaiveDateTime,
}

impl GameRecord {
    /// Parses the stored outcome string into a [`GameResult`].
    #[instrument(skip(self), fields(outcome = %self.outcome))]
    pub fn result(&self) -> Result<GameResult, DbError> {
        GameResult::from_db_string(self.outcome())
    }
}

/// Insertable game record.
#[derive(Debug, Clone, Insertable, new, Getters)]
#[diesel(table_name = schema::game_results)]
pub struct NewGameRecord {
    user_id: i32,
    outcome: String,
    moves_count: i32,
}

/// Result of a game from the human player's perspective.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GameResult {
    /// Human's mark completed a line.
    Win,
    /// Computer's mark completed a line.
    Loss,
    /// Board filled with no line.
    Draw,
}

impl GameResult {
    /// Converts the result to the string stored in the database.
    pub fn to_db_string(&self) -> &'static str {
        (*self).into()
    }

    /// Parses a result from the string stored in the database.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the string is not `win`, `loss` or `draw`.
    #[instrument(skip(s), fields(s = %s))]
    pub fn from_db_string(s: &str) -> Result<Self, DbError> {
        s.parse()
            .map_err(|_| DbError::new(format!("Invalid outcome: '{}'", s)))
    }
}

/// Aggregated win/loss/draw counts for a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Serialize)]
pub struct AggregatedStats {
    total_games: i32,
    wins: i32,
    losses: i32,
    draws: i32,
}

impl AggregatedStats {
    /// Creates new aggregated statistics.
    #[instrument]
    pub fn new(total_games: i32, wins: i32, losses: i32, draws: i32) -> Self {
        Self {
            total_games,
            wins,
            losses,
            draws,
        }
    }

    /// Adds one result to the tally.
    pub fn tally(&mut self, result: GameResult) {
        self.total_games += 1;
        match result {
            GameResult::Win => self.wins += 1,
            GameResult::Loss => self.losses += 1,
            GameResult::Draw => self.draws += 1,
        }
    }

    /// Win rate as a percentage (0.0–100.0).
    pub fn win_rate(&self) -> f64 {
        if self.total_games == 0 {
            0.0
        } else {
            (self.wins as f64 / self.total_games as f64) * 100.0
        }
    }
}

/// Leaderboard row for one user.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize)]
pub struct LeaderboardEntry {
    display_name: String,
    #[serde(flatten)]
    stats: AggregatedStats,
    score: i32,
}

impl LeaderboardEntry {
    /// Points per win.
    pub const WIN_POINTS: i32 = 3;
    /// Points per draw.
    pub const DRAW_POINTS: i32 = 1;

    /// Builds an entry, scoring three points per win and one per draw.
    pub fn new(display_name: String, stats: AggregatedStats) -> Self {
        let score = stats.wins * Self::WIN_POINTS + stats.draws * Self::DRAW_POINTS;
        Self {
            display_name,
            stats,
            score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_and_win_rate() {
        let mut stats = AggregatedStats::default();
        for result in [GameResult::Win, GameResult::Draw, GameResult::Loss, GameResult::Win] {
            stats.tally(result);
        }
        assert_eq!(stats, AggregatedStats::new(4, 2, 1, 1));
        assert!((stats.win_rate() - 50.0).abs() < f64::EPSILON);
        assert_eq!(AggregatedStats::default().win_rate(), 0.0);
    }

    #[test]
    fn test_leaderboard_score() {
        let entry = LeaderboardEntry::new("Ada".to_string(), AggregatedStats::new(6, 2, 1, 3));
        assert_eq!(*entry.score(), 9);
    }

    #[test]
    fn test_result_db_strings() {
        use strum::IntoEnumIterator;
        for result in GameResult::iter() {
            assert_eq!(GameResult::from_db_string(result.to_db_string()).unwrap(), result);
        }
        assert_eq!(GameResult::Loss.to_db_string(), "loss");
        assert!(GameResult::from_db_string("forfeit").is_err());
    }
}

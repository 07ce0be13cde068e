//! Profile management business logic layer.

use tracing::{debug, info, instrument};

use crate::{
    AggregatedStats, DbError, GameRecord, GameRepository, GameResult, LeaderboardEntry,
    NewGameRecord, OutcomeRecord, OutcomeSink, User,
};

/// Longest display name accepted at registration.
pub const MAX_NAME_LEN: usize = 32;

/// Service layer for user profile operations.
///
/// Wraps [`GameRepository`] with registration rules, get-or-create semantics
/// and result recording.
#[derive(Debug, Clone)]
pub struct ProfileService {
    repository: GameRepository,
}

impl ProfileService {
    /// Creates a new profile service backed by the given repository.
    #[instrument(skip(repository))]
    pub fn new(repository: GameRepository) -> Self {
        info!("Creating ProfileService");
        Self { repository }
    }

    /// Returns the underlying repository.
    pub fn repository(&self) -> &GameRepository {
        &self.repository
    }

    /// Returns the user with this display name, creating it if needed.
    ///
    /// Surrounding whitespace is trimmed. Registering an existing name is not
    /// an error; it returns the same stable id.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] for an empty or over-long name, or a database error.
    #[instrument(skip(self))]
    pub fn register(&self, display_name: &str) -> Result<User, DbError> {
        let name = display_name.trim();
        if name.is_empty() {
            return Err(DbError::invalid("display name is empty"));
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(DbError::invalid(format!(
                "display name is longer than {} characters",
                MAX_NAME_LEN
            )));
        }

        if let Some(user) = self.repository.get_user_by_name(name)? {
            info!(user_id = user.id(), "Existing user found");
            return Ok(user);
        }

        info!(display_name = %name, "Creating new user");
        self.repository.create_user(name.to_string())
    }

    /// Looks up a registered user by display name.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if no such user exists or a database error occurs.
    #[instrument(skip(self))]
    pub fn find(&self, display_name: &str) -> Result<User, DbError> {
        let name = display_name.trim();
        self.repository
            .get_user_by_name(name)?
            .ok_or_else(|| DbError::not_found(format!("User '{}'", name)))
    }

    /// Records a completed game for a user.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the user does not exist, the move count is
    /// impossible, or a database error occurs.
    #[instrument(skip(self))]
    pub fn record_game_result(
        &self,
        user_id: i32,
        result: GameResult,
        moves_count: i32,
    ) -> Result<GameRecord, DbError> {
        if !(0..=9).contains(&moves_count) {
            return Err(DbError::invalid(format!("{} moves in one game", moves_count)));
        }
        if self.repository.get_user(user_id)?.is_none() {
            return Err(DbError::not_found(format!("User {}", user_id)));
        }

        debug!(result = %result, "Recording game result");
        let record = NewGameRecord::new(user_id, result.to_db_string().to_string(), moves_count);
        self.repository.record_game(record)
    }

    /// Returns aggregated stats (wins/losses/draws) for a user.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn get_stats(&self, user_id: i32) -> Result<AggregatedStats, DbError> {
        self.repository.get_aggregated_stats(user_id)
    }

    /// Returns all game results for a user, most recent first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn get_history(&self, user_id: i32) -> Result<Vec<GameRecord>, DbError> {
        self.repository.get_user_results(user_id)
    }

    /// Returns the top `limit` leaderboard entries (all when `None`).
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn leaderboard(&self, limit: Option<usize>) -> Result<Vec<LeaderboardEntry>, DbError> {
        let mut entries = self.repository.leaderboard()?;
        if let Some(limit) = limit {
            entries.truncate(limit);
        }
        Ok(entries)
    }
}

/// [`OutcomeSink`] that stores finished games for one registered user.
#[derive(Debug, Clone)]
pub struct ProfileRecorder<'a> {
    service: &'a ProfileService,
    user_id: i32,
    last_record: Option<GameRecord>,
}

impl<'a> ProfileRecorder<'a> {
    /// Creates a recorder for `user_id`.
    pub fn new(service: &'a ProfileService, user_id: i32) -> Self {
        Self {
            service,
            user_id,
            last_record: None,
        }
    }

    /// The most recently stored record, if any.
    pub fn last_record(&self) -> Option<&GameRecord> {
        self.last_record.as_ref()
    }
}

impl OutcomeSink for ProfileRecorder<'_> {
    type Error = DbError;

    fn record(&mut self, record: OutcomeRecord) -> Result<(), DbError> {
        let stored =
            self.service
                .record_game_result(self.user_id, record.result, record.moves_count)?;
        self.last_record = Some(stored);
        Ok(())
    }
}

//! Database repository for user profiles and game results.

use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument, warn};

use crate::db::{
    AggregatedStats, DbError, GameRecord, LeaderboardEntry, NewGameRecord, NewUser, User, schema,
};

/// Schema migrations compiled into the binary.
const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Database repository for user and game operations.
///
/// Opens a fresh SQLite connection per call, so it is cheap to clone and
/// holds no connection state between operations.
#[derive(Debug, Clone)]
pub struct GameRepository {
    db_path: String,
}

impl GameRepository {
    /// Creates a new repository for the database at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the path is empty.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn new(db_path: String) -> Result<Self, DbError> {
        if db_path.trim().is_empty() {
            return Err(DbError::invalid("database path is empty"));
        }
        info!(path = %db_path, "Creating GameRepository");
        Ok(Self { db_path })
    }

    /// Opens the database and applies any pending schema migrations.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the database cannot be opened or a migration fails.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn open(db_path: String) -> Result<Self, DbError> {
        let repo = Self::new(db_path)?;
        repo.run_migrations()?;
        Ok(repo)
    }

    /// Path of the backing database.
    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    /// Establishes a database connection with foreign keys enforced.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        let mut conn = SqliteConnection::establish(&self.db_path)
            .map_err(|e| DbError::new(format!("Failed to connect to '{}': {}", self.db_path, e)))?;
        diesel::sql_query("PRAGMA foreign_keys = ON").execute(&mut conn)?;
        Ok(conn)
    }

    /// Applies pending schema migrations.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a migration fails.
    #[instrument(skip(self))]
    pub fn run_migrations(&self) -> Result<(), DbError> {
        let mut conn = self.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| DbError::new(format!("Migration failed: {}", e)))?;
        info!(count = applied.len(), "Migrations applied");
        Ok(())
    }

    /// Creates a new user profile.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the display name is already taken or a database error occurs.
    #[instrument(skip(self))]
    pub fn create_user(&self, display_name: String) -> Result<User, DbError> {
        debug!(display_name = %display_name, "Creating user");
        let mut conn = self.connection()?;

        let user = diesel::insert_into(schema::users::table)
            .values(&NewUser::new(display_name))
            .returning(User::as_returning())
            .get_result(&mut conn)?;

        info!(user_id = user.id(), display_name = %user.display_name(), "User created");
        Ok(user)
    }

    /// Gets a user by id. Returns `None` if not found.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn get_user(&self, user_id: i32) -> Result<Option<User>, DbError> {
        let mut conn = self.connection()?;
        let user = schema::users::table
            .find(user_id)
            .first::<User>(&mut conn)
            .optional()?;
        debug!(found = user.is_some(), "User lookup by id");
        Ok(user)
    }

    /// Gets a user by display name. Returns `None` if not found.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn get_user_by_name(&self, display_name: &str) -> Result<Option<User>, DbError> {
        let mut conn = self.connection()?;
        let user = schema::users::table
            .filter(schema::users::display_name.eq(display_name))
            .first::<User>(&mut conn)
            .optional()?;
        debug!(found = user.is_some(), "User lookup by name");
        Ok(user)
    }

    /// Lists all user profiles, ordered by creation time.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn list_users(&self) -> Result<Vec<User>, DbError> {
        let mut conn = self.connection()?;
        let users = schema::users::table
            .order((schema::users::created_at.asc(), schema::users::id.asc()))
            .load::<User>(&mut conn)?;
        info!(count = users.len(), "Users loaded");
        Ok(users)
    }

    /// Records a completed game.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the user does not exist or a database error occurs.
    #[instrument(skip(self, record), fields(user_id = record.user_id(), outcome = %record.outcome()))]
    pub fn record_game(&self, record: NewGameRecord) -> Result<GameRecord, DbError> {
        let mut conn = self.connection()?;

        let stored = diesel::insert_into(schema::game_results::table)
            .values(&record)
            .returning(GameRecord::as_returning())
            .get_result(&mut conn)?;

        info!(record_id = stored.id(), "Game result recorded");
        Ok(stored)
    }

    /// Gets all game results for a user, most recent first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn get_user_results(&self, user_id: i32) -> Result<Vec<GameRecord>, DbError> {
        let mut conn = self.connection()?;
        let records = schema::game_results::table
            .filter(schema::game_results::user_id.eq(user_id))
            .order((
                schema::game_results::played_at.desc(),
                schema::game_results::id.desc(),
            ))
            .load::<GameRecord>(&mut conn)?;
        info!(count = records.len(), "User results loaded");
        Ok(records)
    }

    /// Gets aggregated win/loss/draw counts for a user.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn get_aggregated_stats(&self, user_id: i32) -> Result<AggregatedStats, DbError> {
        let records = self.get_user_results(user_id)?;
        let stats = tally(&records);
        info!(
            total = stats.total_games(),
            wins = stats.wins(),
            losses = stats.losses(),
            draws = stats.draws(),
            win_rate = %format!("{:.1}%", stats.win_rate()),
            "Aggregated stats computed"
        );
        Ok(stats)
    }

    /// Builds the leaderboard over every user with at least one game.
    ///
    /// Sorted by score, then wins, both descending, then by name.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, DbError> {
        let mut conn = self.connection()?;
        let users = schema::users::table.load::<User>(&mut conn)?;
        let records = GameRecord::belonging_to(&users)
            .select(GameRecord::as_select())
            .load::<GameRecord>(&mut conn)?;

        let mut entries: Vec<LeaderboardEntry> = records
            .grouped_by(&users)
            .into_iter()
            .zip(users)
            .filter(|(records, _)| !records.is_empty())
            .map(|(records, user)| LeaderboardEntry::new(user.display_name().clone(), tally(&records)))
            .collect();

        entries.sort_by(|a, b| {
            b.score()
                .cmp(a.score())
                .then_with(|| b.stats().wins().cmp(a.stats().wins()))
                .then_with(|| a.display_name().cmp(b.display_name()))
        });

        info!(count = entries.len(), "Leaderboard built");
        Ok(entries)
    }
}

/// Counts results, skipping rows with an unrecognized outcome.
fn tally(records: &[GameRecord]) -> AggregatedStats {
    let mut stats = AggregatedStats::default();
    for record in records {
        match record.result() {
            Ok(result) => stats.tally(result),
            Err(e) => warn!(record_id = record.id(), error = %e, "Skipping unknown outcome"),
        }
    }
    stats
}

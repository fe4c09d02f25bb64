//! # Pool and Handle
//!
//! Opens the LightBnB SQLite store and hands out repositories.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      LightBnB Store Lifecycle                           │
//! │                                                                         │
//! │  Process start                                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbConfig::from_env() / DbConfig::new(path)                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new(config).await ← open pool, apply schema                 │
//! │       │                                                                 │
//! │       │  handle is cloned into whatever needs it                       │
//! │       ▼                                                                 │
//! │  db.users() / db.reservations() / db.properties()                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  db.close().await ← Process shutdown                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no module-level connection: callers own a [`Database`] and pass
//! it to the code that needs it.
//!
//! ## Connection Settings
//! - WAL journal for concurrent readers (file databases only)
//! - Foreign keys enforced
//! - `case_sensitive_like` so the location filter matches case-sensitively

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::property::PropertyRepository;
use crate::repository::reservation::ReservationRepository;
use crate::repository::user::UserRepository;

const IN_MEMORY: &str = ":memory:";

// =============================================================================
// Configuration
// =============================================================================

/// How to open the LightBnB store.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("./lightbnb.db")
///     .max_connections(8)
///     .connect_timeout(Duration::from_secs(5));
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// SQLite file, or `:memory:`.
    pub database_path: PathBuf,

    /// Upper bound on pooled connections.
    /// Default: 5
    pub max_connections: u32,

    /// Connections kept open while idle.
    /// Default: 1
    pub min_connections: u32,

    /// How long a query waits for a free connection.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Idle connections above the minimum close after this.
    /// Default: 10 minutes
    pub idle_timeout: Duration,

    /// Apply pending migrations in [`Database::new`].
    /// Default: true
    pub run_migrations: bool,
}

impl DbConfig {
    /// Configuration for a database file at `path`.
    ///
    /// The file is created if it doesn't exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            run_migrations: true,
        }
    }

    /// Sets the pool size.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the idle floor.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets the acquire timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Enables or disables migrations in [`Database::new`].
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// A private in-memory store, used by tests.
    ///
    /// Each call yields an isolated, empty database.
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(IN_MEMORY),
            max_connections: 1, // each connection would get its own empty database
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(60),
            run_migrations: true,
        }
    }

    /// True when this configuration points at an in-memory database.
    pub fn is_in_memory(&self) -> bool {
        self.database_path.as_os_str() == IN_MEMORY
    }

    fn connect_options(&self) -> DbResult<SqliteConnectOptions> {
        let options = if self.is_in_memory() {
            SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
        } else {
            SqliteConnectOptions::new()
                .filename(&self.database_path)
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
        };

        Ok(options.foreign_keys(true))
    }
}

// =============================================================================
// Database
// =============================================================================

/// Database handle providing repository access.
///
/// Cheap to clone; every clone shares one pool.
///
/// ## Usage
/// ```rust,ignore
/// async fn my_trips(db: &Database, guest_id: i64) -> DbResult<Vec<GuestReservation>> {
///     db.reservations().list_for_guest(guest_id, ResultLimit::default()).await
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens the store.
    ///
    /// The file is created when missing. Every connection enforces foreign
    /// keys and case-sensitive `LIKE`. Pending migrations run afterwards
    /// unless disabled in the config.
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Opening LightBnB store"
        );

        let connect_options = config.connect_options()?;

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .after_connect(|conn, _meta| {
                Box::pin(async move {
                    sqlx::query("PRAGMA case_sensitive_like = ON")
                        .execute(&mut *conn)
                        .await?;
                    Ok(())
                })
            })
            .connect_with(connect_options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        info!(
            max_connections = config.max_connections,
            "Database pool created"
        );

        let db = Database { pool };

        if config.run_migrations {
            db.run_migrations().await?;
        }

        Ok(db)
    }

    /// Applies pending schema migrations.
    ///
    /// Idempotent: already-applied migrations are skipped.
    pub async fn run_migrations(&self) -> DbResult<()> {
        migrations::run_migrations(&self.pool).await
    }

    /// The underlying sqlx pool, for ad-hoc queries.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Returns the user repository.
    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.pool.clone())
    }

    /// Returns the reservation repository.
    pub fn reservations(&self) -> ReservationRepository {
        ReservationRepository::new(self.pool.clone())
    }

    /// Returns the property repository.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let listings = db.properties().search(&criteria, ResultLimit::new(20)).await?;
    /// ```
    pub fn properties(&self) -> PropertyRepository {
        PropertyRepository::new(self.pool.clone())
    }

    /// Waits for checked-out connections and shuts the pool.
    ///
    /// After calling close, all repository operations fail with
    /// `DbError::ConnectionFailed`.
    pub async fn close(&self) {
        info!("Closing LightBnB store");
        self.pool.close().await;
    }

    /// Checks if the database can execute queries.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_store_is_healthy() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert!(db.health_check().await);
    }

    #[tokio::test]
    async fn test_like_is_case_sensitive() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let matched: i64 = sqlx::query_scalar("SELECT 'Vancouver' LIKE '%vancouver%'")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(matched, 0);
    }

    #[tokio::test]
    async fn test_close_then_query_fails() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.close().await;

        assert!(!db.health_check().await);
        let err = db.users().get_by_id(1).await.unwrap_err();
        assert!(matches!(err, DbError::ConnectionFailed(_)));
    }

    #[test]
    fn test_config_builder() {
        let config = DbConfig::new("/tmp/lightbnb-test.db")
            .max_connections(10)
            .min_connections(2)
            .run_migrations(false);

        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 2);
        assert!(!config.run_migrations);
        assert!(!config.is_in_memory());
        assert!(DbConfig::in_memory().is_in_memory());
    }
}

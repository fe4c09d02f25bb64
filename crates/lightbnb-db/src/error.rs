//! # Store Errors
//!
//! What can go wrong between a repository call and SQLite.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Where Errors Come From                               │
//! │                                                                         │
//! │  ValidationError / CoreError (lightbnb-core)                           │
//! │       │  rejected before any SQL runs                                  │
//! │       ▼                                                                 │
//! │  sqlx::Error from the pool or a statement                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError ← classified by constraint kind                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Caller decides how to report it                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every repository method returns these errors to the caller. Nothing is
//! logged-and-dropped.

use lightbnb_core::{CoreError, ValidationError};
use thiserror::Error;

/// Failure of a LightBnB store operation.
#[derive(Debug, Error)]
pub enum DbError {
    /// No row with that id.
    #[error("no {entity} with id {id}")]
    NotFound { entity: String, id: String },

    /// A UNIQUE column already holds the value.
    ///
    /// ## When This Occurs
    /// - Registering an email that is already taken
    #[error("{field} '{value}' is already taken")]
    UniqueViolation { field: String, value: String },

    /// A referenced user, property or reservation does not exist.
    ///
    /// ## When This Occurs
    /// - Booking a property that does not exist
    /// - Listing a property for an unknown owner
    #[error("dangling reference: {message}")]
    ForeignKeyViolation { message: String },

    /// A CHECK constraint rejected the row.
    #[error("constraint rejected row: {message}")]
    CheckViolation { message: String },

    /// The store could not be opened, or the pool is closed.
    #[error("store unavailable: {0}")]
    ConnectionFailed(String),

    /// Applying the schema failed.
    #[error("schema migration failed: {0}")]
    MigrationFailed(String),

    /// SQLite rejected the statement.
    ///
    /// ## When This Occurs
    /// - A search filter value the store cannot compare
    /// - Any other runtime SQL error
    #[error("query rejected: {0}")]
    QueryFailed(String),

    /// Timed out waiting for a pooled connection.
    #[error("timed out waiting for a connection")]
    PoolExhausted,

    /// Input rejected before reaching the database.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Domain rule rejected before reaching the database.
    #[error(transparent)]
    Domain(#[from] CoreError),

    /// Anything sqlx reports that fits none of the above.
    #[error("store error: {0}")]
    Internal(String),
}

impl DbError {
    /// `NotFound` for `entity` with the given id.
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// `UniqueViolation` naming the column and offending value.
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        DbError::UniqueViolation {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Classifies sqlx errors.
///
/// ## Error Mapping
/// ```text
/// RowNotFound               → NotFound
/// Database (constraint)     → Unique/ForeignKey/CheckViolation
/// Database (other)          → QueryFailed
/// PoolTimedOut              → PoolExhausted
/// PoolClosed                → ConnectionFailed
/// anything else             → Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::not_found("row", "?"),

            sqlx::Error::Database(db_err) => {
                let message = db_err.message();

                // SQLite: "UNIQUE constraint failed: users.email"
                if db_err.is_unique_violation() {
                    let column = message
                        .strip_prefix("UNIQUE constraint failed: ")
                        .unwrap_or(message);
                    DbError::duplicate(column, "?")
                } else if db_err.is_foreign_key_violation() {
                    DbError::ForeignKeyViolation {
                        message: message.to_string(),
                    }
                } else if db_err.is_check_violation() {
                    DbError::CheckViolation {
                        message: message.to_string(),
                    }
                } else {
                    DbError::QueryFailed(message.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("pool closed".to_string()),

            other => DbError::Internal(other.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(source: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(source.to_string())
    }
}

/// Result of a store operation.
pub type DbResult<T> = Result<T, DbError>;

//! # lightbnb-db: Database Layer for LightBnB
//!
//! Executes the queries for users, reservations and properties against
//! SQLite through sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        LightBnB Data Flow                               │
//! │                                                                         │
//! │  Caller (web handler, CLI, test)                                       │
//! │       │   db.properties().search(&criteria, limit)                     │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    lightbnb-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐   ┌──────────────┐   │   │
//! │  │   │   Database    │    │  Repositories  │   │  Migrations  │   │   │
//! │  │   │   (pool.rs)   │    │ UserRepo       │   │  (embedded)  │   │   │
//! │  │   │ SqlitePool    │◄───│ ReservationRepo│   │ 001_init.sql │   │   │
//! │  │   │ lifecycle     │    │ PropertyRepo   │   │              │   │   │
//! │  │   └───────────────┘    └────────────────┘   └──────────────┘   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`config`] - Configuration from environment variables
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lightbnb_core::{FilterCriteria, ResultLimit};
//! use lightbnb_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::from_env()?).await?;
//!
//! let user = db.users().get_by_email("tristanjacobs@gmail.com").await?;
//! let listings = db
//!     .properties()
//!     .search(&FilterCriteria::default(), ResultLimit::default())
//!     .await?;
//!
//! db.close().await;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::ConfigError;
pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::property::PropertyRepository;
pub use repository::reservation::ReservationRepository;
pub use repository::user::UserRepository;

//! # lightbnb-core: Pure Logic for LightBnB
//!
//! Domain types, money handling and the property search query builder.
//! Nothing in this crate touches a database, a socket or a file.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        LightBnB Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               ★ lightbnb-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  search   │  │ validation│  │   │
//! │  │   │   User    │  │   Money   │  │  Filter   │  │   rules   │  │   │
//! │  │   │ Property  │  │           │  │  Criteria │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └─────┬─────┘  └───────────┘  │   │
//! │  │                                       │ (sql, params)          │   │
//! │  └───────────────────────────────────────┼─────────────────────────┘   │
//! │                                          ▼                              │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  lightbnb-db (Database Layer)                   │   │
//! │  │              SQLite pool, migrations, repositories              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Row types (User, Property, Reservation, ...)
//! - [`money`] - Integer money in cents
//! - [`search`] - Dynamic property search query builder
//! - [`validation`] - Input rules for create operations
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use lightbnb_core::search::{build_property_search, FilterCriteria, QueryParam, ResultLimit};
//!
//! let criteria = FilterCriteria {
//!     city: Some("Vancouver".to_string()),
//!     ..FilterCriteria::default()
//! };
//! let query = build_property_search(&criteria, ResultLimit::new(5));
//!
//! assert!(query.sql().contains("WHERE city LIKE $1"));
//! assert_eq!(
//!     query.params(),
//!     &[QueryParam::Text("%Vancouver%".to_string()), QueryParam::Int(5)]
//! );
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod search;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use search::{build_property_search, FilterCriteria, ParameterizedQuery, QueryParam, ResultLimit};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Number of rows returned when the caller does not ask for a positive limit.
pub const DEFAULT_RESULT_LIMIT: i64 = 10;

/// Highest rating a guest can leave on a property.
pub const MAX_RATING: i64 = 5;

//! # Domain Errors
//!
//! Rejections raised by lightbnb-core before anything reaches the store.
//!
//! ## Where They Go
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  validation::validate_*                                                 │
//! │       │  ValidationError (bad field)                                   │
//! │       │  CoreError::InvalidStay (bad date range)                       │
//! │       ▼                                                                 │
//! │  lightbnb-db repository  → DbError::Validation / DbError::Domain       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  caller                                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The search builder has no error type: a filter value the store cannot
//! compare travels as an opaque parameter and fails at execution time.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// A domain rule was broken.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Check-out is not after check-in.
    #[error("a stay must end after it starts ({start_date} .. {end_date})")]
    InvalidStay {
        start_date: String,
        end_date: String,
    },

    /// A field failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// A single field was rejected.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Empty or whitespace-only.
    #[error("{field} is required")]
    Required { field: String },

    #[error("{field} exceeds {max} characters")]
    TooLong { field: String, max: usize },

    /// Outside an inclusive range.
    #[error("{field} must be in {min}..={max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Ids start at 1.
    #[error("{field} must be a positive id")]
    MustBePositive { field: String },

    #[error("{field} is malformed: {reason}")]
    InvalidFormat { field: String, reason: String },
}

/// Result of an operation that checks domain rules.
pub type CoreResult<T> = Result<T, CoreError>;

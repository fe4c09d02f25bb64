//! # Domain Types
//!
//! Row types used throughout LightBnB.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      User       │   │    Property     │   │   Reservation   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │◄──│  owner_id (FK)  │◄──│  property_id    │       │
//! │  │  name           │   │  title          │   │  guest_id (FK)  │       │
//! │  │  email          │   │  cost_per_night │   │  start_date     │       │
//! │  │  password       │   │  city           │   │  end_date       │       │
//! │  └─────────────────┘   └────────┬────────┘   └─────────────────┘       │
//! │                                 │                                       │
//! │                        ┌────────▼────────┐                              │
//! │                        │ PropertyReview  │  avg(rating) feeds           │
//! │                        │  rating 1..=5   │  PropertyListing and         │
//! │                        └─────────────────┘  GuestReservation            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every persisted row has a `New*` counterpart without the generated `id`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// User
// =============================================================================

/// A registered user (guest and/or property owner).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// Stored password hash. Never serialized back out.
    #[serde(skip_serializing, default)]
    pub password: String,
}

/// Fields needed to register a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

// =============================================================================
// Property
// =============================================================================

/// A property listed for rent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Property {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,
    /// Nightly rate in cents.
    pub cost_per_night: i64,
    pub parking_spaces: i64,
    pub number_of_bathrooms: i64,
    pub number_of_bedrooms: i64,
    pub country: String,
    pub street: String,
    pub city: String,
    pub province: String,
    pub post_code: String,
    pub active: bool,
}

impl Property {
    /// Returns the nightly rate as Money.
    #[inline]
    pub fn cost(&self) -> Money {
        Money::from_cents(self.cost_per_night)
    }
}

/// Fields needed to list a new property.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProperty {
    pub owner_id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,
    pub cost_per_night: i64,
    #[serde(default)]
    pub parking_spaces: i64,
    #[serde(default)]
    pub number_of_bathrooms: i64,
    #[serde(default)]
    pub number_of_bedrooms: i64,
    pub country: String,
    pub street: String,
    pub city: String,
    pub province: String,
    pub post_code: String,
}

/// A property row as returned by the search query.
///
/// `average_rating` is `None` for properties without reviews.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct PropertyListing {
    #[serde(flatten)]
    #[cfg_attr(feature = "sqlx", sqlx(flatten))]
    pub property: Property,
    pub average_rating: Option<f64>,
}

// =============================================================================
// Reservation
// =============================================================================

/// A guest's booking of a property for a date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Reservation {
    pub id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub property_id: i64,
    pub guest_id: i64,
}

impl Reservation {
    /// Number of nights between check-in and check-out.
    pub fn nights(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }
}

/// Fields needed to book a stay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReservation {
    pub guest_id: i64,
    pub property_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// A reservation joined with its property, as shown on "My Trips".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct GuestReservation {
    pub reservation_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub guest_id: i64,
    #[serde(flatten)]
    #[cfg_attr(feature = "sqlx", sqlx(flatten))]
    pub property: Property,
    pub average_rating: Option<f64>,
}

impl GuestReservation {
    /// Total cost of the stay at the property's current nightly rate.
    pub fn total_cost(&self) -> Money {
        let nights = (self.end_date - self.start_date).num_days();
        self.property.cost().multiply_nights(nights)
    }
}

// =============================================================================
// Property Review
// =============================================================================

/// A guest's rating of a stay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct PropertyReview {
    pub id: i64,
    pub guest_id: i64,
    pub property_id: i64,
    pub reservation_id: i64,
    pub rating: i64,
    pub message: Option<String>,
}

/// Fields needed to leave a review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPropertyReview {
    pub guest_id: i64,
    pub property_id: i64,
    pub reservation_id: i64,
    pub rating: i64,
    #[serde(default)]
    pub message: Option<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================

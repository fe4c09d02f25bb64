//! # Validation Module
//!
//! Input rules checked before a create operation reaches the database.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: THIS MODULE                                                  │
//! │  ├── Required fields, lengths, ranges                                  │
//! │  └── Date ordering for reservations                                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  ├── UNIQUE (users.email)                                              │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Search filters are not validated here: the search builder accepts any
//! value and treats falsy ones as absent.

use chrono::NaiveDate;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{NewProperty, NewPropertyReview, NewReservation, NewUser};
use crate::MAX_RATING;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

fn require(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

fn max_len(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }
    Ok(())
}

fn non_negative(field: &str, value: i64) -> ValidationResult<()> {
    if value < 0 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::MAX,
        });
    }
    Ok(())
}

fn positive_id(field: &str, value: i64) -> ValidationResult<()> {
    if value <= 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates an email address.
///
/// ## Rules
/// - Must not be empty
/// - Exactly one `@` with text on both sides
/// - At most 255 characters
///
/// ## Example
/// ```rust
/// use lightbnb_core::validation::validate_email;
///
/// assert!(validate_email("sebastianguerra@ymail.com").is_ok());
/// assert!(validate_email("not-an-email").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    require("email", email)?;
    max_len("email", email, 255)?;

    let mut parts = email.split('@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();
    if local.is_empty() || domain.is_empty() || parts.next().is_some() {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must look like name@domain".to_string(),
        });
    }

    Ok(())
}

/// Validates a rating (1 to 5 inclusive).
pub fn validate_rating(rating: i64) -> ValidationResult<()> {
    if !(1..=MAX_RATING).contains(&rating) {
        return Err(ValidationError::OutOfRange {
            field: "rating".to_string(),
            min: 1,
            max: MAX_RATING,
        });
    }
    Ok(())
}

/// Validates that a stay covers at least one night.
pub fn validate_stay(start_date: NaiveDate, end_date: NaiveDate) -> CoreResult<()> {
    if end_date <= start_date {
        return Err(CoreError::InvalidStay {
            start_date: start_date.to_string(),
            end_date: end_date.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Record Validators
// =============================================================================

/// Validates a user registration.
pub fn validate_new_user(user: &NewUser) -> ValidationResult<()> {
    require("name", &user.name)?;
    max_len("name", &user.name, 255)?;
    validate_email(&user.email)?;
    require("password", &user.password)?;
    Ok(())
}

/// Validates a new property listing.
///
/// ## Rules
/// - Owner must be a valid id
/// - Title and address fields must not be empty
/// - Nightly rate and room counts must be non-negative
pub fn validate_new_property(property: &NewProperty) -> ValidationResult<()> {
    positive_id("owner_id", property.owner_id)?;
    require("title", &property.title)?;
    max_len("title", &property.title, 255)?;
    require("thumbnail_photo_url", &property.thumbnail_photo_url)?;
    require("cover_photo_url", &property.cover_photo_url)?;

    non_negative("cost_per_night", property.cost_per_night)?;
    non_negative("parking_spaces", property.parking_spaces)?;
    non_negative("number_of_bathrooms", property.number_of_bathrooms)?;
    non_negative("number_of_bedrooms", property.number_of_bedrooms)?;

    require("country", &property.country)?;
    require("street", &property.street)?;
    require("city", &property.city)?;
    require("province", &property.province)?;
    require("post_code", &property.post_code)?;
    Ok(())
}

/// Validates a reservation request.
pub fn validate_new_reservation(reservation: &NewReservation) -> CoreResult<()> {
    positive_id("guest_id", reservation.guest_id)?;
    positive_id("property_id", reservation.property_id)?;
    validate_stay(reservation.start_date, reservation.end_date)
}

/// Validates a review.
pub fn validate_new_review(review: &NewPropertyReview) -> ValidationResult<()> {
    positive_id("guest_id", review.guest_id)?;
    positive_id("property_id", review.property_id)?;
    positive_id("reservation_id", review.reservation_id)?;
    validate_rating(review.rating)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn new_property() -> NewProperty {
        NewProperty {
            owner_id: 1,
            title: "Habit mix".to_string(),
            description: Some("description".to_string()),
            thumbnail_photo_url: "https://example.com/t.jpg".to_string(),
            cover_photo_url: "https://example.com/c.jpg".to_string(),
            cost_per_night: 46_058,
            parking_spaces: 0,
            number_of_bathrooms: 5,
            number_of_bedrooms: 6,
            country: "Canada".to_string(),
            street: "651 Nami Road".to_string(),
            city: "Bohbatev".to_string(),
            province: "Alberta".to_string(),
            post_code: "83680".to_string(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("michaelgray@mail.com").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("@mail.com").is_err());
        assert!(validate_email("a@").is_err());
        assert!(validate_email("a@b@c").is_err());
    }

    #[test]
    fn test_validate_new_user() {
        let user = NewUser {
            name: "Eva Stanley".to_string(),
            email: "sebastianguerra@ymail.com".to_string(),
            password: "password".to_string(),
        };
        assert!(validate_new_user(&user).is_ok());

        let nameless = NewUser {
            name: "  ".to_string(),
            ..user.clone()
        };
        assert!(matches!(
            validate_new_user(&nameless),
            Err(ValidationError::Required { .. })
        ));

        let no_password = NewUser {
            password: String::new(),
            ..user
        };
        assert!(validate_new_user(&no_password).is_err());
    }

    #[test]
    fn test_validate_new_property() {
        assert!(validate_new_property(&new_property()).is_ok());

        let mut negative = new_property();
        negative.cost_per_night = -1;
        assert!(matches!(
            validate_new_property(&negative),
            Err(ValidationError::OutOfRange { .. })
        ));

        let mut untitled = new_property();
        untitled.title = String::new();
        assert!(validate_new_property(&untitled).is_err());

        let mut orphan = new_property();
        orphan.owner_id = 0;
        assert!(matches!(
            validate_new_property(&orphan),
            Err(ValidationError::MustBePositive { .. })
        ));
    }

    #[test]
    fn test_validate_stay() {
        assert!(validate_stay(date(2026, 3, 1), date(2026, 3, 2)).is_ok());
        assert!(validate_stay(date(2026, 3, 1), date(2026, 3, 1)).is_err());
        assert!(matches!(
            validate_stay(date(2026, 3, 5), date(2026, 3, 1)),
            Err(CoreError::InvalidStay { .. })
        ));
    }

    #[test]
    fn test_validate_new_reservation() {
        let reservation = NewReservation {
            guest_id: 2,
            property_id: 0,
            start_date: date(2026, 3, 1),
            end_date: date(2026, 3, 4),
        };
        assert!(matches!(
            validate_new_reservation(&reservation),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_rating() {
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(5).is_ok());
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
    }
}

//! # Reservation Repository
//!
//! Booking stays and listing a guest's trips.
//!
//! ## Guest Trips Query
//! ```text
//! reservations ──JOIN──► properties ──LEFT JOIN──► property_reviews
//!      │                                               │
//!      └── WHERE guest_id = $1                         └── avg(rating)
//!
//! GROUP BY properties.id, reservations.id
//! ORDER BY reservations.start_date
//! LIMIT $2
//! ```
//!
//! Trips at properties nobody has reviewed yet are still listed, with an
//! `average_rating` of `None`.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use lightbnb_core::validation::validate_new_reservation;
use lightbnb_core::{GuestReservation, NewReservation, Reservation, ResultLimit};

const GUEST_RESERVATIONS_QUERY: &str = r#"
SELECT reservations.id AS reservation_id,
       reservations.start_date,
       reservations.end_date,
       reservations.guest_id,
       properties.*,
       avg(property_reviews.rating) AS average_rating
FROM reservations
JOIN properties ON reservations.property_id = properties.id
LEFT JOIN property_reviews ON properties.id = property_reviews.property_id
WHERE reservations.guest_id = $1
GROUP BY properties.id, reservations.id
ORDER BY reservations.start_date
LIMIT $2;
"#;

/// Repository for reservation database operations.
#[derive(Debug, Clone)]
pub struct ReservationRepository {
    pool: SqlitePool,
}

impl ReservationRepository {
    /// Creates a new ReservationRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReservationRepository { pool }
    }

    /// Lists a guest's reservations joined with their properties.
    ///
    /// Ordered by check-in date, earliest first.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let trips = db.reservations().list_for_guest(1, ResultLimit::default()).await?;
    /// ```
    pub async fn list_for_guest(
        &self,
        guest_id: i64,
        limit: ResultLimit,
    ) -> DbResult<Vec<GuestReservation>> {
        debug!(guest_id, limit = limit.get(), "Listing guest reservations");

        let trips = sqlx::query_as::<_, GuestReservation>(GUEST_RESERVATIONS_QUERY)
            .bind(guest_id)
            .bind(limit.get())
            .fetch_all(&self.pool)
            .await?;

        Ok(trips)
    }

    /// Gets a single reservation by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Reservation>> {
        let reservation =
            sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(reservation)
    }

    /// Books a stay.
    ///
    /// ## Returns
    /// * `Ok(Reservation)` - The stored row
    /// * `Err(DbError::Domain)` - Check-out is not after check-in
    /// * `Err(DbError::ForeignKeyViolation)` - Unknown guest or property
    pub async fn insert(&self, reservation: &NewReservation) -> DbResult<Reservation> {
        validate_new_reservation(reservation)?;

        debug!(
            guest_id = reservation.guest_id,
            property_id = reservation.property_id,
            start_date = %reservation.start_date,
            end_date = %reservation.end_date,
            "Inserting reservation"
        );

        let stored = sqlx::query_as::<_, Reservation>(
            r#"
            INSERT INTO reservations (start_date, end_date, property_id, guest_id)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(reservation.start_date)
        .bind(reservation.end_date)
        .bind(reservation.property_id)
        .bind(reservation.guest_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(stored)
    }
}

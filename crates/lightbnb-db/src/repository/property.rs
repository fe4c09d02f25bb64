//! # Property Repository
//!
//! Property search, listing and reviews.
//!
//! ## Search Flow
//! ```text
//! FilterCriteria + ResultLimit
//!        │
//!        ▼
//! build_property_search()      ← lightbnb-core, pure
//!        │  (sql, [Text | Int | Real, ...])
//!        ▼
//! query_as::<PropertyListing>  ← each param bound by variant, in order
//!        │
//!        ▼
//! Vec<PropertyListing>         ← cheapest first
//! ```
//!
//! Filter values only ever travel as bound parameters. Nothing from the
//! criteria is spliced into SQL text.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use lightbnb_core::validation::{validate_new_property, validate_new_review};
use lightbnb_core::{
    build_property_search, FilterCriteria, NewProperty, NewPropertyReview, Property,
    PropertyListing, PropertyReview, QueryParam, ResultLimit,
};

/// Repository for property database operations.
#[derive(Debug, Clone)]
pub struct PropertyRepository {
    pool: SqlitePool,
}

impl PropertyRepository {
    /// Creates a new PropertyRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PropertyRepository { pool }
    }

    /// Searches properties matching every specified filter.
    ///
    /// Results are ordered by nightly rate and carry the property's average
    /// review rating (`None` when unreviewed).
    ///
    /// ## Example
    /// ```rust,ignore
    /// let criteria = FilterCriteria {
    ///     city: Some("Vancouver".to_string()),
    ///     min_rating: Some(4.0),
    ///     ..FilterCriteria::default()
    /// };
    /// let listings = db.properties().search(&criteria, ResultLimit::new(20)).await?;
    /// ```
    pub async fn search(
        &self,
        criteria: &FilterCriteria,
        limit: ResultLimit,
    ) -> DbResult<Vec<PropertyListing>> {
        let (sql, params) = build_property_search(criteria, limit).into_parts();

        debug!(
            filters = criteria.active_filters(),
            limit = limit.get(),
            sql = %sql,
            params = ?params,
            "Searching properties"
        );

        let mut query = sqlx::query_as::<_, PropertyListing>(&sql);
        for param in params {
            query = match param {
                QueryParam::Text(value) => query.bind(value),
                QueryParam::Int(value) => query.bind(value),
                QueryParam::Real(value) => query.bind(value),
            };
        }

        let listings = query.fetch_all(&self.pool).await?;

        debug!(count = listings.len(), "Property search complete");
        Ok(listings)
    }

    /// Gets a single property by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Property>> {
        debug!(id, "Fetching property by id");

        let property = sqlx::query_as::<_, Property>("SELECT * FROM properties WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(property)
    }

    /// Lists a new property. New listings are active.
    ///
    /// ## Returns
    /// * `Ok(Property)` - The stored row, including its generated id
    /// * `Err(DbError::Validation)` - Missing fields or negative amounts
    /// * `Err(DbError::ForeignKeyViolation)` - Unknown owner
    pub async fn insert(&self, property: &NewProperty) -> DbResult<Property> {
        validate_new_property(property)?;

        debug!(
            owner_id = property.owner_id,
            title = %property.title,
            city = %property.city,
            "Inserting property"
        );

        let stored = sqlx::query_as::<_, Property>(
            r#"
            INSERT INTO properties (
                owner_id, title, description, thumbnail_photo_url, cover_photo_url,
                cost_per_night, parking_spaces, number_of_bathrooms, number_of_bedrooms,
                country, street, city, province, post_code
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING *
            "#,
        )
        .bind(property.owner_id)
        .bind(&property.title)
        .bind(&property.description)
        .bind(&property.thumbnail_photo_url)
        .bind(&property.cover_photo_url)
        .bind(property.cost_per_night)
        .bind(property.parking_spaces)
        .bind(property.number_of_bathrooms)
        .bind(property.number_of_bedrooms)
        .bind(&property.country)
        .bind(&property.street)
        .bind(&property.city)
        .bind(&property.province)
        .bind(&property.post_code)
        .fetch_one(&self.pool)
        .await?;

        Ok(stored)
    }

    /// Records a guest's review of a stay.
    ///
    /// ## Returns
    /// * `Err(DbError::Validation)` - Rating outside 1..=5
    /// * `Err(DbError::ForeignKeyViolation)` - Unknown guest, property or reservation
    pub async fn add_review(&self, review: &NewPropertyReview) -> DbResult<PropertyReview> {
        validate_new_review(review)?;

        debug!(
            property_id = review.property_id,
            rating = review.rating,
            "Inserting property review"
        );

        let stored = sqlx::query_as::<_, PropertyReview>(
            r#"
            INSERT INTO property_reviews (guest_id, property_id, reservation_id, rating, message)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(review.guest_id)
        .bind(review.property_id)
        .bind(review.reservation_id)
        .bind(review.rating)
        .bind(&review.message)
        .fetch_one(&self.pool)
        .await?;

        Ok(stored)
    }

    /// Counts listed properties.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM properties")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::pool::Database;
    use crate::repository::test_support::{database, new_property, property, review, user};
    use lightbnb_core::Money;

    /// Five properties across three cities:
    ///
    /// | title      | city            | cost  | ratings |
    /// |------------|-----------------|-------|---------|
    /// | Attic      | Vancouver       | 5000  | 5, 4    |
    /// | Bungalow   | North Vancouver | 10000 | 3       |
    /// | Condo      | Toronto         | 15000 | -       |
    /// | Duplex     | vancouver       | 20000 | 5       |
    /// | Estate     | Vancouver       | 25000 | 2       |
    async fn seeded() -> Database {
        let db = database().await;
        let owner = user(&db, "Owner", "owner@example.com").await;
        let guest = user(&db, "Guest", "guest@example.com").await;

        let attic = property(&db, owner.id, "Attic", "Vancouver", 5_000).await;
        let bungalow = property(&db, owner.id, "Bungalow", "North Vancouver", 10_000).await;
        property(&db, owner.id, "Condo", "Toronto", 15_000).await;
        let duplex = property(&db, owner.id, "Duplex", "vancouver", 20_000).await;
        let estate = property(&db, owner.id, "Estate", "Vancouver", 25_000).await;

        review(&db, guest.id, attic.id, 5).await;
        review(&db, owner.id, attic.id, 4).await;
        review(&db, guest.id, bungalow.id, 3).await;
        review(&db, guest.id, duplex.id, 5).await;
        review(&db, guest.id, estate.id, 2).await;

        db
    }

    fn titles(listings: &[PropertyListing]) -> Vec<&str> {
        listings.iter().map(|l| l.property.title.as_str()).collect()
    }

    #[tokio::test]
    async fn test_search_without_filters_orders_by_cost() {
        let db = seeded().await;
        let listings = db
            .properties()
            .search(&FilterCriteria::default(), ResultLimit::default())
            .await
            .unwrap();

        assert_eq!(
            titles(&listings),
            vec!["Attic", "Bungalow", "Condo", "Duplex", "Estate"]
        );
        assert_eq!(listings[0].average_rating, Some(4.5));
        assert_eq!(listings[2].average_rating, None);
    }

    #[tokio::test]
    async fn test_search_limit() {
        let db = seeded().await;
        let listings = db
            .properties()
            .search(&FilterCriteria::default(), ResultLimit::new(2))
            .await
            .unwrap();

        assert_eq!(titles(&listings), vec!["Attic", "Bungalow"]);
    }

    #[tokio::test]
    async fn test_search_non_positive_limit_uses_default() {
        let db = seeded().await;
        let listings = db
            .properties()
            .search(&FilterCriteria::default(), ResultLimit::new(0))
            .await
            .unwrap();

        assert_eq!(listings.len(), 5);
    }

    #[tokio::test]
    async fn test_search_city_is_case_sensitive_substring() {
        let db = seeded().await;
        let criteria = FilterCriteria {
            city: Some("Vancouver".to_string()),
            ..FilterCriteria::default()
        };
        let listings = db
            .properties()
            .search(&criteria, ResultLimit::default())
            .await
            .unwrap();

        assert_eq!(titles(&listings), vec!["Attic", "Bungalow", "Estate"]);
    }

    #[tokio::test]
    async fn test_search_price_bounds_are_inclusive() {
        let db = seeded().await;
        let criteria = FilterCriteria {
            min_price_per_night: Some(Money::from_cents(10_000)),
            max_price_per_night: Some(Money::from_cents(20_000)),
            ..FilterCriteria::default()
        };
        let listings = db
            .properties()
            .search(&criteria, ResultLimit::default())
            .await
            .unwrap();

        assert_eq!(titles(&listings), vec!["Bungalow", "Condo", "Duplex"]);
    }

    #[tokio::test]
    async fn test_search_min_rating_excludes_unreviewed() {
        let db = seeded().await;
        let criteria = FilterCriteria {
            min_rating: Some(4.0),
            ..FilterCriteria::default()
        };
        let listings = db
            .properties()
            .search(&criteria, ResultLimit::default())
            .await
            .unwrap();

        assert_eq!(titles(&listings), vec!["Attic", "Duplex"]);
        assert!(listings.iter().all(|l| l.average_rating.unwrap() >= 4.0));
    }

    #[tokio::test]
    async fn test_search_all_filters() {
        let db = seeded().await;
        let criteria = FilterCriteria {
            city: Some("Vancouver".to_string()),
            min_price_per_night: Some(Money::from_cents(5_000)),
            max_price_per_night: Some(Money::from_cents(25_000)),
            min_rating: Some(3.0),
        };
        let listings = db
            .properties()
            .search(&criteria, ResultLimit::default())
            .await
            .unwrap();

        assert_eq!(titles(&listings), vec!["Attic", "Bungalow"]);
    }

    #[tokio::test]
    async fn test_search_falsy_filters_are_ignored() {
        let db = seeded().await;
        let criteria = FilterCriteria {
            city: Some(String::new()),
            min_price_per_night: Some(Money::zero()),
            max_price_per_night: None,
            min_rating: Some(0.0),
        };
        let listings = db
            .properties()
            .search(&criteria, ResultLimit::default())
            .await
            .unwrap();

        assert_eq!(listings.len(), 5);
    }

    #[tokio::test]
    async fn test_search_hostile_city_is_data() {
        let db = seeded().await;
        let criteria = FilterCriteria {
            city: Some("'; DROP TABLE properties; --".to_string()),
            ..FilterCriteria::default()
        };
        let listings = db
            .properties()
            .search(&criteria, ResultLimit::default())
            .await
            .unwrap();

        assert!(listings.is_empty());
        assert_eq!(db.properties().count().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = database().await;
        let owner = user(&db, "Owner", "owner@example.com").await;
        let stored = property(&db, owner.id, "Habit mix", "Bohbatev", 46_058).await;

        assert!(stored.active);
        assert_eq!(stored.cost(), Money::from_cents(46_058));

        let fetched = db.properties().get_by_id(stored.id).await.unwrap();
        assert_eq!(fetched, Some(stored));
        assert!(db.properties().get_by_id(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_unknown_owner_is_foreign_key_violation() {
        let db = database().await;
        let err = db
            .properties()
            .insert(&new_property(42, "Orphan", "Nowhere", 1_000))
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }

    #[tokio::test]
    async fn test_add_review_rejects_out_of_range_rating() {
        let db = database().await;
        let err = db
            .properties()
            .add_review(&NewPropertyReview {
                guest_id: 1,
                property_id: 1,
                reservation_id: 1,
                rating: 6,
                message: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::Validation(_)));
    }
}

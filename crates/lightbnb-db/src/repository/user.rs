//! # User Repository
//!
//! Lookup and registration of users.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use lightbnb_core::validation::validate_new_user;
use lightbnb_core::{NewUser, User};

/// Repository for user database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Gets a single user by email.
    ///
    /// ## Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with that email
    pub async fn get_by_email(&self, email: &str) -> DbResult<Option<User>> {
        debug!(email = %email, "Fetching user by email");

        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    /// Gets a single user by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<User>> {
        debug!(id, "Fetching user by id");

        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    /// Registers a new user.
    ///
    /// ## Returns
    /// * `Ok(User)` - The stored row, including its generated id
    /// * `Err(DbError::Validation)` - Missing name, password or malformed email
    /// * `Err(DbError::UniqueViolation)` - Email already registered
    pub async fn insert(&self, user: &NewUser) -> DbResult<User> {
        validate_new_user(user)?;

        debug!(email = %user.email, "Inserting user");

        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| match DbError::from(err) {
            DbError::UniqueViolation { field, .. } => DbError::duplicate(field, user.email.clone()),
            other => other,
        })
    }

    /// Counts registered users.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::{database, user};

    #[tokio::test]
    async fn test_insert_and_lookup() {
        let db = database().await;
        let created = user(&db, "Devin Sanders", "tristanjacobs@gmail.com").await;
        assert!(created.id > 0);

        let by_email = db
            .users()
            .get_by_email("tristanjacobs@gmail.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_email, created);

        let by_id = db.users().get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(by_id.email, "tristanjacobs@gmail.com");
        assert_eq!(by_id.name, "Devin Sanders");
    }

    #[tokio::test]
    async fn test_missing_user_is_none() {
        let db = database().await;
        assert!(db.users().get_by_id(999).await.unwrap().is_none());
        assert!(db
            .users()
            .get_by_email("nobody@example.com")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_email_lookup_is_exact() {
        let db = database().await;
        user(&db, "Eva Stanley", "sebastianguerra@ymail.com").await;

        assert!(db
            .users()
            .get_by_email("SEBASTIANGUERRA@ymail.com")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let db = database().await;
        user(&db, "Louisa Meyer", "jacksonrose@hotmail.com").await;

        let err = db
            .users()
            .insert(&NewUser {
                name: "Someone Else".to_string(),
                email: "jacksonrose@hotmail.com".to_string(),
                password: "password".to_string(),
            })
            .await
            .unwrap_err();

        match err {
            DbError::UniqueViolation { field, value } => {
                assert_eq!(field, "users.email");
                assert_eq!(value, "jacksonrose@hotmail.com");
            }
            other => panic!("expected UniqueViolation, got {other:?}"),
        }
        assert_eq!(db.users().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_invalid_user_never_reaches_database() {
        let db = database().await;
        let err = db
            .users()
            .insert(&NewUser {
                name: "No Email".to_string(),
                email: String::new(),
                password: "password".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::Validation(_)));
        assert_eq!(db.users().count().await.unwrap(), 0);
    }
}

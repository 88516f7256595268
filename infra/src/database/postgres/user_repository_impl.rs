//! PostgreSQL implementation of the UserRepository trait.
//!
//! Concrete user persistence over the `users` table using SQLx.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use ak_core::domain::entities::User;
use ak_core::errors::{AuthError, DomainError};
use ak_core::repositories::UserRepository;

/// PostgreSQL implementation of UserRepository
pub struct PgUserRepository {
    /// Database connection pool
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PostgreSQL user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to a User entity
    fn row_to_user(row: &sqlx::postgres::PgRow) -> Result<User, DomainError> {
        Ok(User {
            id: row
                .try_get("id")
                .map_err(|e| Self::column_error("id", e))?,
            name: row
                .try_get("name")
                .map_err(|e| Self::column_error("name", e))?,
            email: row
                .try_get("email")
                .map_err(|e| Self::column_error("email", e))?,
            password_hash: row
                .try_get("password")
                .map_err(|e| Self::column_error("password", e))?,
            email_verified_at: row
                .try_get::<Option<DateTime<Utc>>, _>("email_verified_at")
                .map_err(|e| Self::column_error("email_verified_at", e))?,
            last_login_at: row
                .try_get::<Option<DateTime<Utc>>, _>("last_login_at")
                .map_err(|e| Self::column_error("last_login_at", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| Self::column_error("created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| Self::column_error("updated_at", e))?,
        })
    }

    fn column_error(column: &str, error: sqlx::Error) -> DomainError {
        DomainError::Database {
            message: format!("Failed to read column {}: {}", column, error),
        }
    }

    fn query_error(error: sqlx::Error) -> DomainError {
        DomainError::Database {
            message: format!("Database query failed: {}", error),
        }
    }

    /// Whether an error is a unique-constraint violation
    fn is_unique_violation(error: &sqlx::Error) -> bool {
        matches!(
            error,
            sqlx::Error::Database(db) if db.code().as_deref() == Some("23505")
        )
    }
}

const USER_COLUMNS: &str =
    "id, name, email, password, email_verified_at, last_login_at, created_at, updated_at";

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = format!(
            "SELECT {USER_COLUMNS}
             FROM users
             WHERE email = $1
             LIMIT 1"
        );

        let result = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(Self::query_error)?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = format!(
            "SELECT {USER_COLUMNS}
             FROM users
             WHERE id = $1
             LIMIT 1"
        );

        let result = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Self::query_error)?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await
                .map_err(Self::query_error)?;

        Ok(exists)
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = format!(
            "INSERT INTO users
                 (id, name, email, password, email_verified_at, last_login_at,
                  created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {USER_COLUMNS}"
        );

        let row = sqlx::query(&query)
            .bind(user.id)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.email_verified_at)
            .bind(user.last_login_at)
            .bind(user.created_at)
            .bind(user.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if Self::is_unique_violation(&e) {
                    DomainError::Auth(AuthError::EmailExists)
                } else {
                    Self::query_error(e)
                }
            })?;

        Self::row_to_user(&row)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let query = format!(
            "UPDATE users
             SET name = $2,
                 email = $3,
                 password = $4,
                 email_verified_at = $5,
                 last_login_at = $6,
                 updated_at = $7
             WHERE id = $1
             RETURNING {USER_COLUMNS}"
        );

        let result = sqlx::query(&query)
            .bind(user.id)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.email_verified_at)
            .bind(user.last_login_at)
            .bind(user.updated_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(Self::query_error)?;

        match result {
            Some(row) => Self::row_to_user(&row),
            None => Err(DomainError::NotFound {
                resource: "User".to_string(),
            }),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Self::query_error)?;

        Ok(result.rows_affected() > 0)
    }
}

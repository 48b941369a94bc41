//! User repository
//!
//! Users are provisioned outside the service. Burnbox only needs to turn an
//! owner id into a display name for listings.

use crate::domain::{User, UserId};
use crate::errors::{BurnboxError, Result};
use crate::storage::DbPool;
use async_trait::async_trait;
use tracing::instrument;

/// Read-only view of the user table.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Username of the given user, `None` when no such row exists
    async fn username(&self, user_id: UserId) -> Result<Option<String>>;
}

#[derive(Debug, Clone)]
pub struct SqlxUserRepository {
    pool: DbPool,
}

impl SqlxUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Insert or rename a user. The service only reads users; this exists
    /// for seeding owners in integration tests.
    #[instrument(skip(self, user), fields(user_id = %user.id), name = "db_upsert_user")]
    pub async fn upsert(&self, user: &User) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, username) VALUES ($1, $2)
            ON CONFLICT (id) DO UPDATE SET username = EXCLUDED.username
            "#,
        )
        .bind(user.id)
        .bind(&user.username)
        .execute(&self.pool)
        .await
        .map_err(|e| BurnboxError::database(e, format!("Failed to upsert user {}", user.id)))?;

        Ok(())
    }
}

#[async_trait]
impl UserDirectory for SqlxUserRepository {
    #[instrument(skip(self), fields(user_id = %user_id), name = "db_get_username")]
    async fn username(&self, user_id: UserId) -> Result<Option<String>> {
        sqlx::query_scalar::<_, String>("SELECT username FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| BurnboxError::database(e, format!("Failed to fetch user {}", user_id)))
    }
}

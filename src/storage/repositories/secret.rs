//! Secret repository
//!
//! Persistence for burn-after-reading secrets. Reads never mutate except
//! [`SecretStore::take`], which removes and returns a row in one statement so
//! that concurrent readers cannot both obtain the same message.

use crate::domain::{Secret, SecretId, UserId};
use crate::errors::{BurnboxError, Result};
use crate::storage::DbPool;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use tracing::instrument;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
struct SecretRow {
    pub id: Uuid,
    pub message: String,
    pub user_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl From<SecretRow> for Secret {
    fn from(row: SecretRow) -> Self {
        Secret {
            id: SecretId::new(row.id),
            message: row.message,
            user_id: row.user_id.map(UserId::new),
            created_at: row.created_at,
        }
    }
}

/// Storage contract for secrets.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Persist a new secret; the backend issues the id and timestamp
    async fn insert(&self, message: &str, user_id: Option<UserId>) -> Result<Secret>;

    /// Read a secret without consuming it
    async fn fetch(&self, id: &SecretId) -> Result<Option<Secret>>;

    /// Remove a secret and return what was removed, atomically
    async fn take(&self, id: &SecretId) -> Result<Option<Secret>>;

    /// Remove a secret; `false` when nothing matched
    async fn delete(&self, id: &SecretId) -> Result<bool>;

    /// All pending secrets of an owner, oldest first
    async fn list_by_owner(&self, user_id: UserId) -> Result<Vec<Secret>>;
}

// PostgreSQL implementation

#[derive(Debug, Clone)]
pub struct SqlxSecretRepository {
    pool: DbPool,
}

impl SqlxSecretRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SecretStore for SqlxSecretRepository {
    #[instrument(
        skip(self, message),
        fields(user_id = ?user_id, message_len = message.len()),
        name = "db_insert_secret"
    )]
    async fn insert(&self, message: &str, user_id: Option<UserId>) -> Result<Secret> {
        let row = sqlx::query_as::<_, SecretRow>(
            r#"
            INSERT INTO secret_messages (message, user_id)
            VALUES ($1, $2)
            RETURNING id, message, user_id, created_at
            "#,
        )
        .bind(message)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to insert secret");
            BurnboxError::database(e, "Failed to insert secret")
        })?;

        Ok(row.into())
    }

    #[instrument(skip(self), fields(secret_id = %id), name = "db_fetch_secret")]
    async fn fetch(&self, id: &SecretId) -> Result<Option<Secret>> {
        let row = sqlx::query_as::<_, SecretRow>(
            "SELECT id, message, user_id, created_at FROM secret_messages WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| BurnboxError::database(e, format!("Failed to fetch secret '{}'", id)))?;

        Ok(row.map(Secret::from))
    }

    #[instrument(skip(self), fields(secret_id = %id), name = "db_take_secret")]
    async fn take(&self, id: &SecretId) -> Result<Option<Secret>> {
        let row = sqlx::query_as::<_, SecretRow>(
            r#"
            DELETE FROM secret_messages
            WHERE id = $1
            RETURNING id, message, user_id, created_at
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, secret_id = %id, "Failed to take secret");
            BurnboxError::database(e, format!("Failed to take secret '{}'", id))
        })?;

        Ok(row.map(Secret::from))
    }

    #[instrument(skip(self), fields(secret_id = %id), name = "db_delete_secret")]
    async fn delete(&self, id: &SecretId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM secret_messages WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| BurnboxError::database(e, format!("Failed to delete secret '{}'", id)))?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self), fields(user_id = %user_id), name = "db_list_secrets_by_owner")]
    async fn list_by_owner(&self, user_id: UserId) -> Result<Vec<Secret>> {
        let rows = sqlx::query_as::<_, SecretRow>(
            r#"
            SELECT id, message, user_id, created_at
            FROM secret_messages
            WHERE user_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            BurnboxError::database(e, format!("Failed to list secrets for user {}", user_id))
        })?;

        Ok(rows.into_iter().map(Secret::from).collect())
    }
}

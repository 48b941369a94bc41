//! Secret lifecycle service
//!
//! Owns the PENDING to CONSUMED transition. Handlers hand over raw path
//! segments; parsing happens here so a malformed id never reaches storage.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, instrument, warn};

use crate::config::storage_backstop;
use crate::domain::{OwnerSecrets, Secret, SecretId, UserId};
use crate::errors::{BurnboxError, Result};
use crate::observability::metrics;
use crate::storage::{SecretStore, UserDirectory};

/// Service for the create / consume / list operations
#[derive(Clone)]
pub struct SecretService {
    store: Arc<dyn SecretStore>,
    users: Arc<dyn UserDirectory>,
    storage_timeout: Option<Duration>,
}

impl SecretService {
    /// Create a new secret service
    pub fn new(store: Arc<dyn SecretStore>, users: Arc<dyn UserDirectory>) -> Self {
        Self { store, users, storage_timeout: None }
    }

    /// Bound every storage call by `timeout`; `None` leaves calls unbounded
    pub fn with_storage_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.storage_timeout = timeout;
        self
    }

    /// Store a new secret and return it with its freshly issued handle
    #[instrument(skip(self, message), fields(user_id = ?owner, message_len = message.len()))]
    pub async fn create(&self, message: String, owner: Option<UserId>) -> Result<Secret> {
        let created = self.bounded("insert_secret", self.store.insert(&message, owner)).await?;

        metrics::record_secret_created(owner.is_some());
        info!(secret_id = %created.id, user_id = ?created.user_id, "Secret created");

        Ok(created)
    }

    /// Return a secret and remove it. A second call for the same id is a
    /// not-found, exactly like an id that was never issued.
    #[instrument(skip(self))]
    pub async fn consume(&self, raw_id: &str) -> Result<Secret> {
        let id = SecretId::parse(raw_id.trim()).map_err(|e| {
            BurnboxError::validation_field(format!("Invalid secret id '{}': {}", raw_id, e), "id")
        })?;

        match self.bounded("take_secret", self.store.take(&id)).await? {
            Some(secret) => {
                metrics::record_secret_consumed();
                info!(secret_id = %id, "Secret consumed");
                Ok(secret)
            }
            None => {
                metrics::record_secret_consume_miss();
                debug!(secret_id = %id, "Secret not found or already consumed");
                Err(BurnboxError::not_found("Secret", id.to_string()))
            }
        }
    }

    /// List an owner's pending secrets without touching them
    #[instrument(skip(self))]
    pub async fn list_by_owner(&self, raw_owner: &str) -> Result<OwnerSecrets> {
        let user_id = UserId::parse(raw_owner.trim()).map_err(|e| {
            BurnboxError::validation_field(
                format!("Invalid user id '{}': {}", raw_owner, e),
                "user_id",
            )
        })?;

        let secrets = self.bounded("list_secrets", self.store.list_by_owner(user_id)).await?;
        if secrets.is_empty() {
            return Err(BurnboxError::not_found("Secrets for user", user_id.to_string()));
        }

        let username = self.bounded("get_username", self.users.username(user_id)).await?;

        metrics::record_secrets_listed();
        debug!(user_id = %user_id, count = secrets.len(), "Listed pending secrets");

        Ok(OwnerSecrets {
            user_id,
            username,
            secrets: secrets.iter().map(Secret::summary).collect(),
        })
    }

    /// Run one storage call under the configured deadline.
    ///
    /// The deadline itself is PostgreSQL's `statement_timeout`, set on every
    /// pooled connection, so an expired `take` is rolled back rather than
    /// committed behind the caller's back. The client-side timer is a looser
    /// backstop for a server that stops answering altogether.
    async fn bounded<T, F>(&self, operation: &'static str, call: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let Some(limit) = self.storage_timeout else {
            return call.await;
        };
        let limit_ms = limit.as_millis() as u64;

        match tokio::time::timeout(storage_backstop(limit), call).await {
            Ok(Err(err)) if err.is_statement_timeout() => {
                metrics::record_storage_timeout(operation);
                warn!(operation, timeout_ms = limit_ms, "Storage statement cancelled by server");
                Err(BurnboxError::timeout(operation, limit_ms))
            }
            Ok(result) => result,
            Err(_) => {
                metrics::record_storage_timeout(operation);
                warn!(operation, timeout_ms = limit_ms, "Storage call abandoned by backstop");
                Err(BurnboxError::timeout(operation, limit_ms))
            }
        }
    }
}

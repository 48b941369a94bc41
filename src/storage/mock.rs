//! In-memory stand-ins for the storage traits, used by service and handler
//! tests. The secret map sits behind one mutex so `take` is as atomic as the
//! PostgreSQL `DELETE ... RETURNING` it replaces.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::error::{DatabaseError, ErrorKind};
use uuid::Uuid;

use crate::domain::{Secret, SecretId, UserId};
use crate::errors::{BurnboxError, Result};
use crate::storage::repositories::{SecretStore, UserDirectory};

#[derive(Default)]
pub struct MockSecretStore {
    secrets: Mutex<HashMap<SecretId, Secret>>,
    /// Strictly increasing fake clock so listings have a defined order
    ticks: AtomicUsize,
    calls: AtomicUsize,
    fail: AtomicBool,
    delay: Mutex<Option<Duration>>,
    statement_timeout: Mutex<Option<Duration>>,
}

impl MockSecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of trait calls made so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of rows currently stored
    pub fn stored_count(&self) -> usize {
        self.secrets.lock().unwrap().len()
    }

    /// Make every subsequent call fail with a database error
    pub fn fail_with_database_error(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    /// Sleep this long inside every subsequent call
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    pub fn clear_delay(&self) {
        *self.delay.lock().unwrap() = None;
    }

    /// Cancel any call slower than `limit` the way PostgreSQL does: after
    /// `limit`, with a 57014 error and nothing changed
    pub fn set_statement_timeout(&self, limit: Duration) {
        *self.statement_timeout.lock().unwrap() = Some(limit);
    }

    async fn enter(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let delay = *self.delay.lock().unwrap();
        let statement_timeout = *self.statement_timeout.lock().unwrap();
        if let Some(delay) = delay {
            match statement_timeout {
                Some(limit) if delay > limit => {
                    tokio::time::sleep(limit).await;
                    return Err(BurnboxError::database(
                        statement_timeout_error(),
                        "mock statement cancelled",
                    ));
                }
                _ => tokio::time::sleep(delay).await,
            }
        }

        if self.fail.load(Ordering::SeqCst) {
            return Err(BurnboxError::database(
                sqlx::Error::PoolTimedOut,
                "mock store configured to fail",
            ));
        }
        Ok(())
    }

    fn next_timestamp(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst) as i64;
        DateTime::<Utc>::from_timestamp(1_700_000_000 + tick, 0).unwrap()
    }
}

#[async_trait]
impl SecretStore for MockSecretStore {
    async fn insert(&self, message: &str, user_id: Option<UserId>) -> Result<Secret> {
        self.enter().await?;
        let secret = Secret {
            id: SecretId::new(Uuid::new_v4()),
            message: message.to_string(),
            user_id,
            created_at: self.next_timestamp(),
        };
        self.secrets.lock().unwrap().insert(secret.id, secret.clone());
        Ok(secret)
    }

    async fn fetch(&self, id: &SecretId) -> Result<Option<Secret>> {
        self.enter().await?;
        Ok(self.secrets.lock().unwrap().get(id).cloned())
    }

    async fn take(&self, id: &SecretId) -> Result<Option<Secret>> {
        self.enter().await?;
        Ok(self.secrets.lock().unwrap().remove(id))
    }

    async fn delete(&self, id: &SecretId) -> Result<bool> {
        self.enter().await?;
        Ok(self.secrets.lock().unwrap().remove(id).is_some())
    }

    async fn list_by_owner(&self, user_id: UserId) -> Result<Vec<Secret>> {
        self.enter().await?;
        let mut owned: Vec<Secret> = self
            .secrets
            .lock()
            .unwrap()
            .values()
            .filter(|s| s.user_id == Some(user_id))
            .cloned()
            .collect();
        owned.sort_by(|a, b| {
            a.created_at.cmp(&b.created_at).then_with(|| a.id.as_uuid().cmp(b.id.as_uuid()))
        });
        Ok(owned)
    }
}

#[derive(Default)]
pub struct MockUserDirectory {
    users: Mutex<HashMap<UserId, String>>,
}

impl MockUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(self, id: i32, username: &str) -> Self {
        self.users.lock().unwrap().insert(UserId::new(id), username.to_string());
        self
    }
}

#[async_trait]
impl UserDirectory for MockUserDirectory {
    async fn username(&self, user_id: UserId) -> Result<Option<String>> {
        Ok(self.users.lock().unwrap().get(&user_id).cloned())
    }
}

/// The error sqlx reports when PostgreSQL cancels a statement on
/// `statement_timeout`
pub fn statement_timeout_error() -> sqlx::Error {
    sqlx::Error::Database(Box::new(QueryCanceled))
}

#[derive(Debug)]
struct QueryCanceled;

impl fmt::Display for QueryCanceled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for QueryCanceled {}

impl DatabaseError for QueryCanceled {
    fn message(&self) -> &str {
        "canceling statement due to statement timeout"
    }

    fn code(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed("57014"))
    }

    fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self
    }

    fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
        self
    }

    fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
        self
    }

    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

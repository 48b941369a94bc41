//! # Storage and Persistence
//!
//! PostgreSQL connectivity, schema migrations and the repositories that hold
//! pending secrets.

pub mod migrations;
pub mod pool;
pub mod repositories;

#[cfg(test)]
pub mod mock;

#[cfg(all(test, feature = "postgres_tests"))]
pub mod test_helpers;

pub use crate::config::DatabaseConfig;

pub use migrations::{get_migration_version, run_migrations};
pub use pool::{create_pool, get_pool_stats, DbPool, PoolStats};
pub use repositories::{SecretStore, SqlxSecretRepository, SqlxUserRepository, UserDirectory};

use crate::errors::{BurnboxError, Result};

/// Check database connectivity
pub async fn check_connection(pool: &DbPool) -> Result<()> {
    sqlx::query("SELECT 1")
        .fetch_one(pool)
        .await
        .map_err(|e| BurnboxError::database(e, "Database connectivity check failed"))?;

    Ok(())
}

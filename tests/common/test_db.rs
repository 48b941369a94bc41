//! Test database utilities for integration tests.
//!
//! Every `TestDatabase` runs its own PostgreSQL container with migrations
//! applied through the production pool builder.

#![allow(clippy::duplicate_mod)]

use burnbox::config::DatabaseConfig;
use burnbox::domain::{User, UserId};
use burnbox::storage::{create_pool, DbPool, SqlxUserRepository};
use testcontainers::runners::AsyncRunner;
use testcontainers::ContainerAsync;
use testcontainers_modules::postgres::Postgres;

/// Owner inserted by [`TestDatabase::with_user`]
pub const TEST_USER_ID: i32 = 42;
pub const TEST_USERNAME: &str = "bob";

pub struct TestDatabase {
    pub pool: DbPool,
    pub url: String,
    _container: ContainerAsync<Postgres>,
}

impl TestDatabase {
    /// Start a container and apply all migrations.
    pub async fn new(prefix: &str) -> Self {
        Self::with_storage_timeout(prefix, DatabaseConfig::default().storage_timeout_ms).await
    }

    /// Same as [`TestDatabase::new`] with a custom per-statement deadline.
    pub async fn with_storage_timeout(prefix: &str, storage_timeout_ms: u64) -> Self {
        let container = Postgres::default()
            .start()
            .await
            .unwrap_or_else(|e| panic!("Failed to start PostgreSQL for {}: {}", prefix, e));

        let host = container
            .get_host()
            .await
            .unwrap_or_else(|e| panic!("Failed to get container host for {}: {}", prefix, e));
        let port = container
            .get_host_port_ipv4(5432)
            .await
            .unwrap_or_else(|e| panic!("Failed to get container port for {}: {}", prefix, e));

        let url = format!("postgresql://postgres:postgres@{}:{}/postgres", host, port);
        let config = DatabaseConfig {
            url: url.clone(),
            auto_migrate: true,
            max_connections: 20,
            min_connections: 1,
            storage_timeout_ms,
            ..Default::default()
        };

        let pool = create_pool(&config)
            .await
            .unwrap_or_else(|e| panic!("Failed to create pool for {}: {}", prefix, e));

        Self { pool, url, _container: container }
    }

    /// Same as [`TestDatabase::new`] plus one provisioned owner.
    pub async fn with_user(prefix: &str) -> Self {
        let db = Self::new(prefix).await;
        let owner = User { id: UserId::new(TEST_USER_ID), username: TEST_USERNAME.to_string() };
        SqlxUserRepository::new(db.pool.clone())
            .upsert(&owner)
            .await
            .unwrap_or_else(|e| panic!("Failed to seed user for {}: {}", prefix, e));
        db
    }
}

//! Test database utilities for in-library tests.
//!
//! Each `TestDatabase` starts a fresh PostgreSQL container with all migrations
//! applied, so repository tests never share rows.
//!
//! Only compiled for `cargo test --features postgres_tests`.

use crate::config::DatabaseConfig;
use crate::storage::{create_pool, DbPool};
use testcontainers::runners::AsyncRunner;
use testcontainers::ContainerAsync;
use testcontainers_modules::postgres::Postgres;

/// Owner seeded into every test database
pub const SEEDED_USER_ID: i32 = 1;
pub const SEEDED_USERNAME: &str = "alice";

/// A test database backed by a Testcontainers PostgreSQL instance.
///
/// The container is stopped when this struct is dropped; keep it alive for the
/// duration of the test.
pub struct TestDatabase {
    pub pool: DbPool,
    _container: ContainerAsync<Postgres>,
}

impl TestDatabase {
    pub async fn new(prefix: &str) -> Self {
        let container = Postgres::default().start().await.unwrap_or_else(|e| {
            panic!("Failed to start PostgreSQL container for {}: {}", prefix, e)
        });

        let host = container
            .get_host()
            .await
            .unwrap_or_else(|e| panic!("Failed to get container host for {}: {}", prefix, e));

        let port = container
            .get_host_port_ipv4(5432)
            .await
            .unwrap_or_else(|e| panic!("Failed to get container port for {}: {}", prefix, e));

        let config = DatabaseConfig {
            url: format!("postgresql://postgres:postgres@{}:{}/postgres", host, port),
            auto_migrate: true,
            max_connections: 5,
            min_connections: 1,
            ..Default::default()
        };

        let pool = create_pool(&config)
            .await
            .unwrap_or_else(|e| panic!("Failed to create test pool for {}: {}", prefix, e));

        sqlx::query("INSERT INTO users (id, username) VALUES ($1, $2)")
            .bind(SEEDED_USER_ID)
            .bind(SEEDED_USERNAME)
            .execute(&pool)
            .await
            .unwrap_or_else(|e| panic!("Failed to seed user for {}: {}", prefix, e));

        Self { pool, _container: container }
    }
}

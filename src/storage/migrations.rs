//! # Database Migration Management
//!
//! Schema evolution for the burnbox tables. The SQL files under `migrations/`
//! are compiled into the binary and applied in version order on startup when
//! `DATABASE_AUTO_MIGRATE` is enabled. Each applied file is recorded in
//! `_burnbox_migrations` together with a checksum of its contents.

use crate::errors::{BurnboxError, Result};
use crate::storage::DbPool;
use sqlx::Row;
use tracing::{error, info};

/// A migration file compiled into the binary
#[derive(Debug, Clone, Copy)]
pub struct Migration {
    pub name: &'static str,
    pub sql: &'static str,
}

pub const MIGRATIONS: &[Migration] = &[
    Migration {
        name: "20250101000001_create_users",
        sql: include_str!("../../migrations/20250101000001_create_users.sql"),
    },
    Migration {
        name: "20250101000002_create_secret_messages",
        sql: include_str!("../../migrations/20250101000002_create_secret_messages.sql"),
    },
];

/// Run all pending database migrations
pub async fn run_migrations(pool: &DbPool) -> Result<()> {
    info!("Starting database migration process");

    create_migration_table(pool).await?;
    let applied = get_applied_migrations(pool).await?;

    let mut migrations_run = 0;
    for migration in MIGRATIONS {
        let version = extract_version_from_filename(migration.name)?;
        let checksum = calculate_checksum(migration.sql);

        if let Some((_, recorded)) = applied.iter().find(|(v, _)| *v == version) {
            if *recorded != checksum {
                error!(version, migration = migration.name, "Applied migration was modified");
                return Err(BurnboxError::validation(format!(
                    "Migration {} differs from the version already applied",
                    migration.name
                )));
            }
            continue;
        }

        info!(version, "Running migration: {}", migration.name);
        let start_time = std::time::Instant::now();

        let mut tx = pool
            .begin()
            .await
            .map_err(|e| BurnboxError::database(e, "Failed to start migration transaction"))?;

        // Schema changes are not bound by the per-request storage deadline.
        sqlx::query("SET LOCAL statement_timeout = 0")
            .execute(&mut *tx)
            .await
            .map_err(|e| BurnboxError::database(e, "Failed to lift statement timeout"))?;

        sqlx::raw_sql(migration.sql).execute(&mut *tx).await.map_err(|e| {
            error!(error = %e, migration = migration.name, "Migration failed");
            BurnboxError::database(e, format!("Migration failed: {}", migration.name))
        })?;

        let execution_time = start_time.elapsed().as_millis() as i64;
        sqlx::query(
            "INSERT INTO _burnbox_migrations (version, description, checksum, execution_time) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(version)
        .bind(migration.name)
        .bind(checksum)
        .bind(execution_time)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            BurnboxError::database(e, format!("Failed to record migration: {}", migration.name))
        })?;

        tx.commit()
            .await
            .map_err(|e| BurnboxError::database(e, "Failed to commit migration transaction"))?;

        migrations_run += 1;
        info!(
            version,
            execution_time_ms = execution_time,
            "Migration completed: {}",
            migration.name
        );
    }

    if migrations_run > 0 {
        info!(count = migrations_run, "Database migrations completed");
    } else {
        info!("No pending migrations");
    }

    Ok(())
}

/// Get the current migration version (highest applied, 0 when none)
pub async fn get_migration_version(pool: &DbPool) -> Result<i64> {
    let row = sqlx::query("SELECT COALESCE(MAX(version), 0) AS version FROM _burnbox_migrations")
        .fetch_one(pool)
        .await
        .map_err(|e| BurnboxError::database(e, "Failed to read migration version"))?;
    Ok(row.get::<i64, _>("version"))
}

async fn create_migration_table(pool: &DbPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS _burnbox_migrations (
            version BIGINT PRIMARY KEY,
            description TEXT NOT NULL,
            checksum BIGINT NOT NULL,
            execution_time BIGINT NOT NULL,
            installed_on TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
    "#,
    )
    .execute(pool)
    .await
    .map_err(|e| BurnboxError::database(e, "Failed to create migration tracking table"))?;

    Ok(())
}

async fn get_applied_migrations(pool: &DbPool) -> Result<Vec<(i64, i64)>> {
    let rows = sqlx::query("SELECT version, checksum FROM _burnbox_migrations ORDER BY version")
        .fetch_all(pool)
        .await
        .map_err(|e| BurnboxError::database(e, "Failed to get applied migrations"))?;

    Ok(rows
        .into_iter()
        .map(|row| (row.get::<i64, _>("version"), row.get::<i64, _>("checksum")))
        .collect())
}

fn extract_version_from_filename(filename: &str) -> Result<i64> {
    let version_str = filename.split('_').next().unwrap_or_default();
    version_str.parse::<i64>().map_err(|_| {
        BurnboxError::validation(format!("Invalid version in migration name: {}", filename))
    })
}

/// 64-bit FNV-1a over the file contents, stable across builds and toolchains
fn calculate_checksum(content: &str) -> i64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    let hash = content
        .bytes()
        .fold(OFFSET, |hash, byte| (hash ^ u64::from(byte)).wrapping_mul(PRIME));
    hash as i64
}

//! Database metadata query helpers for tests.
//!
//! Thin wrappers over `information_schema` and `pg_indexes` so migration
//! tests can assert on the resulting schema.

use burnbox::storage::DbPool;
use sqlx::Row;

#[derive(Debug, Clone)]
pub struct ColumnInfo {
    pub name: String,
    pub data_type: String,
    pub is_nullable: bool,
    pub default_value: Option<String>,
}

pub async fn get_table_columns(
    pool: &DbPool,
    table_name: &str,
) -> Result<Vec<ColumnInfo>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT column_name, data_type, is_nullable, column_default
        FROM information_schema.columns
        WHERE table_schema = 'public'
          AND table_name = $1
        ORDER BY ordinal_position
        "#,
    )
    .bind(table_name)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .iter()
        .map(|row| {
            let is_nullable: String = row.get("is_nullable");
            ColumnInfo {
                name: row.get("column_name"),
                data_type: row.get("data_type"),
                is_nullable: is_nullable == "YES",
                default_value: row.get("column_default"),
            }
        })
        .collect())
}

pub async fn get_index_names(pool: &DbPool, table_name: &str) -> Result<Vec<String>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT indexname AS name
        FROM pg_indexes
        WHERE schemaname = 'public'
          AND tablename = $1
        "#,
    )
    .bind(table_name)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(|row| row.get("name")).collect())
}

//! Database connection pool
//!
//! SQLite-backed storage for the blog catalog. The configured database URL
//! may be a bare file path (`data/bloglist.db`), a full `sqlite:` URL, or
//! `:memory:`. Parent directories are created for file-backed databases and
//! foreign key enforcement is switched on, since SQLite ships with it off.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::config::DatabaseConfig;

/// Maximum number of connections in the pool
const MAX_CONNECTIONS: u32 = 20;

/// Create the connection pool from database configuration.
///
/// # Errors
///
/// Returns an error if the database directory cannot be created or the
/// connection fails.
pub async fn create_pool(config: &DatabaseConfig) -> Result<SqlitePool> {
    let url = connect_url(&config.url)?;

    let pool = SqlitePoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect(&url)
        .await
        .with_context(|| format!("Failed to connect to database: {}", url))?;

    enable_foreign_keys(&pool).await?;

    Ok(pool)
}

/// Create an in-memory pool for testing.
///
/// Capped at a single connection so that every query in a test sees the
/// same in-memory database.
pub async fn create_test_pool() -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .context("Failed to create test database pool")?;

    enable_foreign_keys(&pool).await?;

    Ok(pool)
}

/// Normalize the configured URL into something sqlx can connect to.
///
/// Creates parent directories for file-backed databases and appends
/// `?mode=rwc` so the database file is created on first run.
fn connect_url(raw: &str) -> Result<String> {
    let path = raw.strip_prefix("sqlite:").unwrap_or(raw);

    if path == ":memory:" {
        return Ok("sqlite::memory:".to_string());
    }

    // Separate the file path from any existing query string
    let file_part = path.split('?').next().unwrap_or(path);
    if let Some(parent) = Path::new(file_part).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create database directory: {}", parent.display())
            })?;
        }
    }

    if path.contains('?') {
        Ok(format!("sqlite:{}", path))
    } else {
        Ok(format!("sqlite:{}?mode=rwc", path))
    }
}

async fn enable_foreign_keys(pool: &SqlitePool) -> Result<()> {
    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(pool)
        .await
        .context("Failed to enable foreign key enforcement")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::Row;

    #[tokio::test]
    async fn test_create_pool_in_memory() {
        let config = DatabaseConfig {
            url: ":memory:".to_string(),
        };

        let pool = create_pool(&config).await.expect("Failed to create pool");

        let row = sqlx::query("SELECT 1 as one")
            .fetch_one(&pool)
            .await
            .expect("Failed to ping database");
        let one: i64 = row.get("one");
        assert_eq!(one, 1);
    }

    #[tokio::test]
    async fn test_create_pool_accepts_sqlite_url() {
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
        };

        let pool = create_pool(&config).await.expect("Failed to create pool");

        sqlx::query("CREATE TABLE test (id INTEGER)")
            .execute(&pool)
            .await
            .expect("Failed to execute statement");
    }

    #[tokio::test]
    async fn test_file_database_created() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = dir.path().join("test.db");
        let config = DatabaseConfig {
            url: db_path.to_string_lossy().to_string(),
        };

        let pool = create_pool(&config).await.expect("Failed to create pool");
        sqlx::query("CREATE TABLE test (id INTEGER)")
            .execute(&pool)
            .await
            .expect("Failed to execute statement");
        pool.close().await;

        assert!(db_path.exists());
    }

    #[tokio::test]
    async fn test_nested_directories_created() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = dir.path().join("nested").join("deeper").join("test.db");
        let config = DatabaseConfig {
            url: db_path.to_string_lossy().to_string(),
        };

        let pool = create_pool(&config).await.expect("Failed to create pool");
        pool.close().await;

        assert!(db_path.parent().expect("No parent").exists());
    }

    #[tokio::test]
    async fn test_foreign_keys_enabled() {
        let pool = create_test_pool().await.expect("Failed to create test pool");

        let row = sqlx::query("PRAGMA foreign_keys")
            .fetch_one(&pool)
            .await
            .expect("Failed to query pragma");
        let enabled: i64 = row.get(0);
        assert_eq!(enabled, 1);
    }

    #[tokio::test]
    async fn test_create_test_pool() {
        let pool = create_test_pool().await.expect("Failed to create test pool");

        sqlx::query("CREATE TABLE test (id INTEGER PRIMARY KEY, value TEXT)")
            .execute(&pool)
            .await
            .expect("Failed to create table");

        sqlx::query("INSERT INTO test (value) VALUES (?)")
            .bind("hello")
            .execute(&pool)
            .await
            .expect("Failed to insert");

        let row = sqlx::query("SELECT value FROM test WHERE id = 1")
            .fetch_one(&pool)
            .await
            .expect("Failed to select");
        let value: String = row.get("value");
        assert_eq!(value, "hello");
    }

    #[test]
    fn test_connect_url_memory() {
        let url = connect_url(":memory:").expect("Failed to normalize");
        assert_eq!(url, "sqlite::memory:");

        let url = connect_url("sqlite::memory:").expect("Failed to normalize");
        assert_eq!(url, "sqlite::memory:");
    }

    #[test]
    fn test_connect_url_appends_mode() {
        let url = connect_url("data/test.db").expect("Failed to normalize");
        assert_eq!(url, "sqlite:data/test.db?mode=rwc");
    }

    #[test]
    fn test_connect_url_keeps_existing_query() {
        let url = connect_url("data/test.db?mode=ro").expect("Failed to normalize");
        assert_eq!(url, "sqlite:data/test.db?mode=ro");
    }
}

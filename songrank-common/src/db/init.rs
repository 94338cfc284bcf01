//! Database initialization
//!
//! Creates the database file and schema on first run and opens it unchanged
//! afterwards. Table and column names match the legacy `db.db` layout so an
//! existing database can be served as-is:
//!
//! ```text
//! songs(Song TEXT PK, Artist, Writer, Album, Year, Rating INTEGER)
//! counters(Key TEXT PK, Count INTEGER)
//! ```

use crate::db::models::VOTES_COUNTER_KEY;
use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .min_connections(1)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // WAL lets leaderboard reads proceed while a vote is being written
    sqlx::query("PRAGMA journal_mode = WAL")
        .execute(&pool)
        .await?;

    sqlx::query("PRAGMA busy_timeout = 250")
        .execute(&pool)
        .await?;

    create_schema(&pool).await?;

    Ok(pool)
}

/// Create all tables and seed rows (idempotent)
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    create_songs_table(pool).await?;
    create_counters_table(pool).await?;
    seed_counter(pool, VOTES_COUNTER_KEY).await?;
    Ok(())
}

pub async fn create_songs_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS songs (
            Song TEXT PRIMARY KEY,
            Artist TEXT NOT NULL DEFAULT '',
            Writer TEXT NOT NULL DEFAULT '',
            Album TEXT NOT NULL DEFAULT '',
            Year TEXT NOT NULL DEFAULT '',
            Rating INTEGER NOT NULL DEFAULT 1000
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn create_counters_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS counters (
            Key TEXT PRIMARY KEY,
            Count INTEGER NOT NULL DEFAULT 0
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Insert a zeroed counter row unless one already exists
pub async fn seed_counter(pool: &SqlitePool, key: &str) -> Result<()> {
    sqlx::query("INSERT OR IGNORE INTO counters (Key, Count) VALUES (?, 0)")
        .bind(key)
        .execute(pool)
        .await?;

    Ok(())
}

//! Unit tests for database initialization
//!
//! Tests cover:
//! - Automatic database creation with default schema
//! - Re-opening an existing database is idempotent
//! - The votes counter row is seeded exactly once

use songrank_common::db::{init_database, VOTES_COUNTER_KEY};

#[tokio::test]
async fn test_database_creation_when_missing() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("nested").join("songrank.db");

    let result = init_database(&db_path).await;

    assert!(result.is_ok(), "Database initialization failed: {:?}", result.err());
    assert!(db_path.exists(), "Database file was not created");
}

#[tokio::test]
async fn test_database_opens_existing() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("songrank.db");

    let pool1 = init_database(&db_path).await.unwrap();
    pool1.close().await;

    let pool2 = init_database(&db_path).await;
    assert!(pool2.is_ok(), "Failed to open existing database: {:?}", pool2.err());
}

#[tokio::test]
async fn test_votes_counter_seeded_once() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("songrank.db");

    let pool = init_database(&db_path).await.unwrap();
    sqlx::query("UPDATE counters SET Count = 41 WHERE Key = ?")
        .bind(VOTES_COUNTER_KEY)
        .execute(&pool)
        .await
        .unwrap();
    pool.close().await;

    // Re-initializing must not reset the existing counter
    let pool = init_database(&db_path).await.unwrap();
    let rows: Vec<(String, i64)> = sqlx::query_as("SELECT Key, Count FROM counters")
        .fetch_all(&pool)
        .await
        .unwrap();

    assert_eq!(rows, vec![(VOTES_COUNTER_KEY.to_string(), 41)]);
}

#[tokio::test]
async fn test_songs_table_uses_legacy_columns() {
    let dir = tempfile::tempdir().unwrap();
    let pool = init_database(&dir.path().join("songrank.db")).await.unwrap();

    sqlx::query("INSERT INTO songs (Song, Artist, Writer, Album, Year) VALUES ('a', 'b', 'c', 'd', 'e')")
        .execute(&pool)
        .await
        .unwrap();

    let rating: i64 = sqlx::query_scalar("SELECT Rating FROM songs WHERE Song = 'a'")
        .fetch_one(&pool)
        .await
        .unwrap();

    assert_eq!(rating, 1000);
}

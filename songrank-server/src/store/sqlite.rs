//! SQLite-backed record store

use async_trait::async_trait;
use songrank_common::db::{retry_on_lock, Song};
use songrank_common::{Error, Result};
use sqlx::{Row, SqlitePool};
use tracing::{info, warn};

use super::RecordStore;

/// [`RecordStore`] over the `songs` and `counters` tables
#[derive(Clone)]
pub struct SqliteRecordStore {
    pool: SqlitePool,
    max_lock_wait_ms: u64,
}

impl SqliteRecordStore {
    pub fn new(pool: SqlitePool, max_lock_wait_ms: u64) -> Self {
        Self {
            pool,
            max_lock_wait_ms,
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Insert songs that are not yet present, in one transaction
    ///
    /// Existing titles are left untouched (ratings included). Returns the
    /// number of rows actually inserted.
    pub async fn import_songs(&self, songs: &[Song]) -> Result<u64> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0u64;

        for song in songs {
            let result = sqlx::query(
                r#"
                INSERT OR IGNORE INTO songs (Song, Artist, Writer, Album, Year, Rating)
                VALUES (?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&song.title)
            .bind(&song.artist)
            .bind(&song.writer)
            .bind(&song.album)
            .bind(&song.year)
            .bind(song.rating)
            .execute(&mut *tx)
            .await?;

            inserted += result.rows_affected();
        }

        tx.commit().await?;

        info!(
            "Imported {} new songs ({} already present)",
            inserted,
            songs.len() as u64 - inserted
        );
        Ok(inserted)
    }
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    async fn load_songs(&self) -> Result<Vec<Song>> {
        let rows = sqlx::query("SELECT Song, Artist, Writer, Album, Year, Rating FROM songs")
            .fetch_all(&self.pool)
            .await?;

        let mut songs = Vec::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            match decode_song(row) {
                Ok(song) => songs.push(song),
                Err(e) => warn!(row = i, "Skipping undecodable song row: {}", e),
            }
        }

        Ok(songs)
    }

    async fn save_rating(&self, id: &str, rating: i64) -> Result<()> {
        let rows_affected = retry_on_lock("save rating", self.max_lock_wait_ms, || async {
            let result = sqlx::query("UPDATE songs SET Rating = ? WHERE Song = ?")
                .bind(rating)
                .bind(id)
                .execute(&self.pool)
                .await?;
            Ok::<_, Error>(result.rows_affected())
        })
        .await?;

        if rows_affected == 0 {
            return Err(Error::NotFound(format!("song row '{}'", id)));
        }
        Ok(())
    }

    async fn load_counter(&self, key: &str) -> Result<i64> {
        let count: Option<i64> = sqlx::query_scalar("SELECT Count FROM counters WHERE Key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(count.unwrap_or(0))
    }

    async fn increment_counter(&self, key: &str) -> Result<()> {
        retry_on_lock("increment counter", self.max_lock_wait_ms, || async {
            sqlx::query(
                r#"
                INSERT INTO counters (Key, Count) VALUES (?, 1)
                ON CONFLICT(Key) DO UPDATE SET Count = Count + 1
                "#,
            )
            .bind(key)
            .execute(&self.pool)
            .await?;
            Ok::<_, Error>(())
        })
        .await
    }
}

fn decode_song(row: &sqlx::sqlite::SqliteRow) -> std::result::Result<Song, sqlx::Error> {
    Ok(Song {
        title: row.try_get("Song")?,
        artist: row.try_get("Artist")?,
        writer: row.try_get("Writer")?,
        album: row.try_get("Album")?,
        year: row.try_get("Year")?,
        rating: row.try_get("Rating")?,
    })
}

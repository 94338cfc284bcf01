//! Durable record store
//!
//! The in-memory catalog is the rating truth while the process runs; the
//! record store is its durable mirror. Everything the core needs from
//! durable storage goes through [`RecordStore`], so tests can swap in a
//! failing or in-memory implementation.

use async_trait::async_trait;
use songrank_common::db::Song;
use songrank_common::Result;

mod sqlite;

#[cfg(test)]
pub(crate) mod memory;

pub use sqlite::SqliteRecordStore;

/// Durable storage contract used by the catalog and vote counter
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Read every song record
    ///
    /// A row that fails to decode is logged and skipped; only an unreachable
    /// store is an error.
    async fn load_songs(&self) -> Result<Vec<Song>>;

    /// Overwrite the rating of one song, keyed by identifier
    async fn save_rating(&self, id: &str, rating: i64) -> Result<()>;

    /// Current value of a named counter (0 if the row is missing)
    async fn load_counter(&self, key: &str) -> Result<i64>;

    /// Increment a named counter in place by one
    async fn increment_counter(&self, key: &str) -> Result<()>;
}

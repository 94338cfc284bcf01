//! In-memory song catalog
//!
//! Loaded once at startup from the record store, then mutated in place by
//! votes. Songs live in a `Vec` ordered by title, built once at load time;
//! that order backs index-based pair sampling and nothing is ever added or
//! removed afterwards.
//!
//! Each record has two locks. The record lock guards the in-memory song and
//! is only ever held for a field read or write. The write-order lock is held
//! across the write-through to the record store, so the durable order of
//! writes for one song matches the in-memory order. Readers never take it.

use songrank_common::db::Song;
use songrank_common::{Error, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{info, warn};

use crate::store::RecordStore;

/// Smallest catalog that can produce a pair
pub const MIN_CATALOG_SIZE: usize = 2;

/// Ratings of two records around one paired update, in argument order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairUpdate {
    pub before: (i64, i64),
    pub after: (i64, i64),
}

pub struct Catalog {
    entries: Vec<Mutex<Song>>,
    write_order: Vec<Mutex<()>>,
    index: HashMap<String, usize>,
    records: Arc<dyn RecordStore>,
}

impl Catalog {
    /// Load every song from the record store
    ///
    /// Fails with [`Error::Config`] if the store cannot be read or yields
    /// fewer than two songs. Duplicate identifiers keep the first record seen.
    pub async fn load(records: Arc<dyn RecordStore>) -> Result<Self> {
        let mut songs = records
            .load_songs()
            .await
            .map_err(|e| Error::Config(format!("Failed to load song catalog: {}", e)))?;

        songs.sort_by(|a, b| a.title.cmp(&b.title));

        let mut entries = Vec::with_capacity(songs.len());
        let mut index = HashMap::with_capacity(songs.len());
        for song in songs {
            if index.contains_key(&song.title) {
                warn!(song = %song.title, "Duplicate song identifier in record store, keeping first");
                continue;
            }
            index.insert(song.title.clone(), entries.len());
            entries.push(Mutex::new(song));
        }

        if entries.len() < MIN_CATALOG_SIZE {
            return Err(Error::Config(format!(
                "Catalog has {} song(s); at least {} are required",
                entries.len(),
                MIN_CATALOG_SIZE
            )));
        }

        info!("Loaded {} songs into catalog", entries.len());

        let write_order = entries.iter().map(|_| Mutex::new(())).collect();

        Ok(Self {
            entries,
            write_order,
            index,
            records,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current record for `id`, or `None` for an unknown identifier
    pub async fn get(&self, id: &str) -> Option<Song> {
        let idx = self.position(id)?;
        Some(self.song_at(idx).await)
    }

    /// Replace the ratings of `a` and `b` in one step and write both through
    ///
    /// `rate` receives the current ratings of `a` and `b` while both records
    /// are locked and returns their new values. The record locks are dropped
    /// before the record store is touched. Unknown identifiers are
    /// [`Error::NotFound`] and `a == b` is [`Error::InvalidInput`]; neither
    /// changes anything. A failed write-through is logged and does not roll
    /// back the in-memory values.
    pub async fn update_pair<F>(&self, a: &str, b: &str, rate: F) -> Result<PairUpdate>
    where
        F: FnOnce(i64, i64) -> (i64, i64),
    {
        let idx_a = self.resolve(a)?;
        let idx_b = self.resolve(b)?;
        if idx_a == idx_b {
            return Err(Error::InvalidInput(format!(
                "'{}' cannot be updated against itself",
                a
            )));
        }

        let _order = lock_pair(&self.write_order, idx_a, idx_b).await;

        let update = {
            let (mut song_a, mut song_b) = lock_pair(&self.entries, idx_a, idx_b).await;
            let before = (song_a.rating, song_b.rating);
            let after = rate(before.0, before.1);
            song_a.rating = after.0;
            song_b.rating = after.1;
            PairUpdate { before, after }
        };

        self.persist_rating(a, update.after.0).await;
        self.persist_rating(b, update.after.1).await;

        Ok(update)
    }

    /// Copy of every record, in catalog order
    pub async fn snapshot(&self) -> Vec<Song> {
        let mut songs = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            songs.push(entry.lock().await.clone());
        }
        songs
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    fn resolve(&self, id: &str) -> Result<usize> {
        self.position(id)
            .ok_or_else(|| Error::NotFound(format!("song '{}'", id)))
    }

    pub(crate) async fn song_at(&self, idx: usize) -> Song {
        self.entries[idx].lock().await.clone()
    }

    /// Write-through of one rating; failures only degrade the durable copy
    async fn persist_rating(&self, id: &str, rating: i64) {
        if let Err(e) = self.records.save_rating(id, rating).await {
            warn!(
                song = %id,
                rating,
                "Failed to persist rating, in-memory value stays authoritative: {}",
                e
            );
        }
    }
}

/// Lock two distinct slots, always in index order
///
/// Guards come back in argument order. Concurrent callers locking the same
/// two slots in opposite roles cannot deadlock.
async fn lock_pair<T>(
    locks: &[Mutex<T>],
    a: usize,
    b: usize,
) -> (MutexGuard<'_, T>, MutexGuard<'_, T>) {
    if a < b {
        let guard_a = locks[a].lock().await;
        let guard_b = locks[b].lock().await;
        (guard_a, guard_b)
    } else {
        let guard_b = locks[b].lock().await;
        let guard_a = locks[a].lock().await;
        (guard_a, guard_b)
    }
}

//! In-memory record store with failure injection, for unit tests

use async_trait::async_trait;
use songrank_common::db::Song;
use songrank_common::{Error, Result};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use super::RecordStore;

#[derive(Default)]
pub(crate) struct MemoryRecordStore {
    songs: Mutex<Vec<Song>>,
    counters: Mutex<HashMap<String, i64>>,
    pub(crate) unreachable: AtomicBool,
    pub(crate) fail_writes: AtomicBool,
    pub(crate) writes: AtomicUsize,
    /// Delay before each rating write, to model a slow or contended database
    pub(crate) write_delay_ms: AtomicU64,
}

impl MemoryRecordStore {
    pub(crate) fn with_songs(songs: Vec<Song>) -> Self {
        Self {
            songs: Mutex::new(songs),
            ..Default::default()
        }
    }

    pub(crate) fn rating_of(&self, id: &str) -> Option<i64> {
        let songs = self.songs.lock().unwrap();
        songs.iter().find(|s| s.title == id).map(|s| s.rating)
    }

    pub(crate) fn counter(&self, key: &str) -> i64 {
        self.counters.lock().unwrap().get(key).copied().unwrap_or(0)
    }

    fn check_write(&self) -> Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::Internal("injected write failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn load_songs(&self) -> Result<Vec<Song>> {
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(Error::Internal("injected: store unreachable".to_string()));
        }
        Ok(self.songs.lock().unwrap().clone())
    }

    async fn save_rating(&self, id: &str, rating: i64) -> Result<()> {
        let delay = self.write_delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        self.check_write()?;
        let mut songs = self.songs.lock().unwrap();
        match songs.iter_mut().find(|s| s.title == id) {
            Some(song) => {
                song.rating = rating;
                Ok(())
            }
            None => Err(Error::NotFound(id.to_string())),
        }
    }

    async fn load_counter(&self, key: &str) -> Result<i64> {
        Ok(self.counter(key))
    }

    async fn increment_counter(&self, key: &str) -> Result<()> {
        self.check_write()?;
        *self.counters.lock().unwrap().entry(key.to_string()).or_insert(0) += 1;
        Ok(())
    }
}

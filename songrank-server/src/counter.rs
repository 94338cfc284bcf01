//! Global vote counter

use songrank_common::db::VOTES_COUNTER_KEY;
use songrank_common::Result;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

use crate::store::RecordStore;

/// Process-wide count of processed votes, mirrored to the `counters` table
pub struct VoteCounter {
    count: AtomicI64,
    records: Arc<dyn RecordStore>,
}

impl VoteCounter {
    /// Load the current value of the `votes` counter
    pub async fn load(records: Arc<dyn RecordStore>) -> Result<Self> {
        let count = records.load_counter(VOTES_COUNTER_KEY).await?;
        info!("Loaded vote counter '{}' = {}", VOTES_COUNTER_KEY, count);

        Ok(Self {
            count: AtomicI64::new(count),
            records,
        })
    }

    pub fn current(&self) -> i64 {
        self.count.load(Ordering::SeqCst)
    }

    /// Add exactly one vote and mirror it durably; returns the new value
    ///
    /// A failed durable increment is logged; the in-memory count still moves.
    pub async fn increment(&self) -> i64 {
        let value = self.count.fetch_add(1, Ordering::SeqCst) + 1;

        if let Err(e) = self.records.increment_counter(VOTES_COUNTER_KEY).await {
            warn!(
                counter = VOTES_COUNTER_KEY,
                value,
                "Failed to persist vote counter increment: {}",
                e
            );
        }

        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryRecordStore;

    #[tokio::test]
    async fn test_increment_mirrors_to_store() {
        let store = Arc::new(MemoryRecordStore::default());
        let counter = VoteCounter::load(store.clone()).await.unwrap();
        assert_eq!(counter.current(), 0);

        assert_eq!(counter.increment().await, 1);
        assert_eq!(counter.increment().await, 2);
        assert_eq!(store.counter(VOTES_COUNTER_KEY), 2);
    }

    #[tokio::test]
    async fn test_increment_survives_store_failure() {
        let store = Arc::new(MemoryRecordStore::default());
        let counter = VoteCounter::load(store.clone()).await.unwrap();
        store.fail_writes.store(true, Ordering::SeqCst);

        assert_eq!(counter.increment().await, 1);
        assert_eq!(counter.current(), 1);
        assert_eq!(store.counter(VOTES_COUNTER_KEY), 0);
    }

    #[tokio::test]
    async fn test_concurrent_increments_are_not_lost() {
        let store = Arc::new(MemoryRecordStore::default());
        let counter = Arc::new(VoteCounter::load(store.clone()).await.unwrap());

        let handles: Vec<_> = (0..50)
            .map(|_| {
                let counter = counter.clone();
                tokio::spawn(async move { counter.increment().await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(counter.current(), 50);
        assert_eq!(store.counter(VOTES_COUNTER_KEY), 50);
    }
}

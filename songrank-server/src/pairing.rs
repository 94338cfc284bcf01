//! Random pair selection
//!
//! Two indices are drawn without replacement: the first uniformly over all N
//! songs, the second uniformly over the remaining N−1. Every unordered pair is
//! equally likely and the draw always terminates.

use rand::Rng;
use serde::Serialize;
use songrank_common::db::Song;

use crate::catalog::{Catalog, MIN_CATALOG_SIZE};

/// Two distinct songs to present side by side
///
/// Order carries no meaning but is fixed for one response, so the client can
/// label winner and loser consistently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pair {
    pub song1: Song,
    pub song2: Song,
}

/// Draw two distinct indices in `0..n`
///
/// # Panics
/// If `n < 2`. Catalog loading rejects such catalogs up front.
pub fn pick_indices<R: Rng + ?Sized>(n: usize, rng: &mut R) -> (usize, usize) {
    assert!(n >= MIN_CATALOG_SIZE, "need at least two items to pick a pair");

    let first = rng.gen_range(0..n);
    let mut second = rng.gen_range(0..n - 1);
    if second >= first {
        second += 1;
    }
    (first, second)
}

/// Pick a random pair from the catalog using the thread-local RNG
pub async fn select_pair(catalog: &Catalog) -> Pair {
    let (a, b) = pick_indices(catalog.len(), &mut rand::thread_rng());
    pair_at(catalog, a, b).await
}

/// Pick a random pair with a caller-supplied RNG
pub async fn select_pair_with<R: Rng + ?Sized>(catalog: &Catalog, rng: &mut R) -> Pair {
    let (a, b) = pick_indices(catalog.len(), rng);
    pair_at(catalog, a, b).await
}

async fn pair_at(catalog: &Catalog, a: usize, b: usize) -> Pair {
    Pair {
        song1: catalog.song_at(a).await,
        song2: catalog.song_at(b).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::songs;
    use crate::store::memory::MemoryRecordStore;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;
    use std::sync::Arc;

    #[test]
    fn test_indices_always_distinct() {
        let mut rng = StdRng::seed_from_u64(7);
        for n in 2..20 {
            for _ in 0..500 {
                let (a, b) = pick_indices(n, &mut rng);
                assert_ne!(a, b);
                assert!(a < n && b < n);
            }
        }
    }

    #[test]
    fn test_two_items_always_both_present() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            let (a, b) = pick_indices(2, &mut rng);
            assert_eq!(a + b, 1);
        }
    }

    #[test]
    #[should_panic]
    fn test_single_item_panics() {
        pick_indices(1, &mut StdRng::seed_from_u64(0));
    }

    #[test]
    fn test_unordered_pairs_roughly_uniform() {
        let mut rng = StdRng::seed_from_u64(42);
        let n = 5;
        let draws = 100_000;
        let mut counts: HashMap<(usize, usize), usize> = HashMap::new();

        for _ in 0..draws {
            let (a, b) = pick_indices(n, &mut rng);
            *counts.entry((a.min(b), a.max(b))).or_default() += 1;
        }

        // 10 unordered pairs, 10_000 expected each
        assert_eq!(counts.len(), 10);
        for (pair, count) in counts {
            assert!(
                (9_000..=11_000).contains(&count),
                "pair {:?} drawn {} times",
                pair,
                count
            );
        }
    }

    #[tokio::test]
    async fn test_no_song_starves() {
        let catalog = Catalog::load(Arc::new(MemoryRecordStore::with_songs(songs(10))))
            .await
            .unwrap();
        let mut rng = StdRng::seed_from_u64(2024);
        let mut appearances: HashMap<String, usize> = HashMap::new();

        for _ in 0..10_000 {
            let pair = select_pair_with(&catalog, &mut rng).await;
            assert_ne!(pair.song1.title, pair.song2.title);
            *appearances.entry(pair.song1.title).or_default() += 1;
            *appearances.entry(pair.song2.title).or_default() += 1;
        }

        // Each song expected in 20% of draws (2_000 of 10_000)
        assert_eq!(appearances.len(), 10);
        for (title, count) in appearances {
            assert!(count > 1_500, "{} appeared only {} times", title, count);
        }
    }

    #[tokio::test]
    async fn test_select_pair_thread_rng() {
        let catalog = Catalog::load(Arc::new(MemoryRecordStore::with_songs(songs(3))))
            .await
            .unwrap();

        let pair = select_pair(&catalog).await;
        assert_ne!(pair.song1, pair.song2);
    }
}

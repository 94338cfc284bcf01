//! Ranked leaderboard
//!
//! Ordinal ranking: rating descending, ties broken by title ascending, ranks
//! `1..=N` with no shared positions.

use serde::Serialize;
use songrank_common::db::Song;
use std::cmp::Reverse;

use crate::catalog::Catalog;

/// One leaderboard row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEntry {
    pub rank: usize,
    pub song: String,
    pub rating: i64,
}

/// Rank every song currently in the catalog
pub async fn build_leaderboard(catalog: &Catalog) -> Vec<RankedEntry> {
    rank_songs(catalog.snapshot().await)
}

/// Rank a set of songs
pub fn rank_songs(mut songs: Vec<Song>) -> Vec<RankedEntry> {
    songs.sort_by(|a, b| {
        (Reverse(a.rating), &a.title).cmp(&(Reverse(b.rating), &b.title))
    });

    songs
        .into_iter()
        .enumerate()
        .map(|(i, song)| RankedEntry {
            rank: i + 1,
            song: song.title,
            rating: song.rating,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::song;

    #[test]
    fn test_sorted_by_rating_descending() {
        let ranked = rank_songs(vec![song("low", 900), song("high", 1100), song("mid", 1000)]);

        let names: Vec<&str> = ranked.iter().map(|e| e.song.as_str()).collect();
        assert_eq!(names, vec!["high", "mid", "low"]);
        assert_eq!(ranked[0].rating, 1100);
    }

    #[test]
    fn test_ties_get_distinct_ranks_by_title() {
        let ranked = rank_songs(vec![
            song("Cardigan", 1000),
            song("August", 1000),
            song("Betty", 1000),
            song("Willow", 1200),
        ]);

        assert_eq!(
            ranked,
            vec![
                RankedEntry { rank: 1, song: "Willow".to_string(), rating: 1200 },
                RankedEntry { rank: 2, song: "August".to_string(), rating: 1000 },
                RankedEntry { rank: 3, song: "Betty".to_string(), rating: 1000 },
                RankedEntry { rank: 4, song: "Cardigan".to_string(), rating: 1000 },
            ]
        );
    }

    #[test]
    fn test_ranks_are_one_to_n_for_all_equal() {
        let songs: Vec<Song> = (0..25).map(|i| song(&format!("s{}", i), 1000)).collect();
        let ranked = rank_songs(songs);

        let ranks: Vec<usize> = ranked.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, (1..=25).collect::<Vec<_>>());
    }

    #[test]
    fn test_permutation_of_input() {
        let input = vec![song("a", 5), song("b", -3), song("c", 5000), song("d", 5)];
        let ranked = rank_songs(input.clone());

        let mut names: Vec<String> = ranked.into_iter().map(|e| e.song).collect();
        names.sort();
        let mut expected: Vec<String> = input.into_iter().map(|s| s.title).collect();
        expected.sort();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_empty_input() {
        assert!(rank_songs(Vec::new()).is_empty());
    }

    #[test]
    fn test_rebuilding_is_identical() {
        let input = vec![song("x", 1000), song("y", 1000), song("z", 990)];
        assert_eq!(rank_songs(input.clone()), rank_songs(input));
    }
}

//! Database models

use serde::{Deserialize, Serialize};

/// Rating assigned to a song that enters the catalog without one
pub const DEFAULT_RATING: i64 = 1000;

/// Key of the global vote counter row in the `counters` table
pub const VOTES_COUNTER_KEY: &str = "votes";

/// A song in the catalog
///
/// `title` is the primary key. The descriptive fields are opaque display
/// strings; only `rating` is ever interpreted or mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub title: String,
    pub artist: String,
    pub writer: String,
    pub album: String,
    pub year: String,
    #[serde(default = "default_rating")]
    pub rating: i64,
}

fn default_rating() -> i64 {
    DEFAULT_RATING
}

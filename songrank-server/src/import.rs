//! Catalog import from a JSON file
//!
//! Startup-only. The file holds an array of song objects:
//!
//! ```json
//! [{"title": "Love Story", "artist": "Taylor Swift", "writer": "Taylor Swift",
//!   "album": "Fearless", "year": "2008"}]
//! ```
//!
//! `rating` is optional and defaults to 1000. Titles already in the database
//! are skipped, so re-running an import never resets ratings.

use songrank_common::db::Song;
use songrank_common::{Error, Result};
use std::path::Path;
use tracing::info;

use crate::store::SqliteRecordStore;

/// Parse a catalog file
pub fn read_catalog_file(path: &Path) -> Result<Vec<Song>> {
    let content = std::fs::read_to_string(path)?;
    parse_catalog(&content)
        .map_err(|e| Error::Config(format!("Invalid catalog file {}: {}", path.display(), e)))
}

/// Parse catalog JSON text
pub fn parse_catalog(content: &str) -> Result<Vec<Song>> {
    let songs: Vec<Song> =
        serde_json::from_str(content).map_err(|e| Error::InvalidInput(e.to_string()))?;

    if let Some(blank) = songs.iter().position(|s| s.title.trim().is_empty()) {
        return Err(Error::InvalidInput(format!(
            "entry {} has an empty title",
            blank
        )));
    }

    Ok(songs)
}

/// Read `path` and insert any new songs into the store
pub async fn import_catalog(store: &SqliteRecordStore, path: &Path) -> Result<u64> {
    let songs = read_catalog_file(path)?;
    info!("Importing {} songs from {}", songs.len(), path.display());
    store.import_songs(&songs).await
}

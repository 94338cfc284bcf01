//! Vote processing
//!
//! One vote: apply the Elo update to both songs as a single paired catalog
//! update (which writes both ratings through), bump the vote counter, and
//! hand back a fresh pair. Nothing is rolled back if a durable write fails.

use serde::Deserialize;
use songrank_common::{Error, Result};
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::counter::VoteCounter;
use crate::pairing::{select_pair, Pair};
use crate::rating::{update_ratings, WIN};

/// Body of a vote request
///
/// Identifiers are opaque: any string, the empty one included, names a song
/// if the catalog has it.
#[derive(Debug, Clone, Deserialize)]
pub struct VoteRequest {
    pub winner: String,
    pub loser: String,
}

impl VoteRequest {
    pub fn new(winner: impl Into<String>, loser: impl Into<String>) -> Self {
        Self {
            winner: winner.into(),
            loser: loser.into(),
        }
    }

    /// Reject requests that can never be a valid comparison
    pub fn validate(&self) -> Result<()> {
        if self.winner == self.loser {
            return Err(Error::InvalidInput(format!(
                "'{}' cannot be voted against itself",
                self.winner
            )));
        }
        Ok(())
    }
}

/// Record the request's winner beating its loser and return the next pair
///
/// Errors: [`Error::InvalidInput`] for a self-vote and [`Error::NotFound`]
/// for an unknown song. Neither mutates any state.
pub async fn process_vote(
    catalog: &Catalog,
    counter: &VoteCounter,
    request: &VoteRequest,
) -> Result<Pair> {
    request.validate()?;

    let (winner, loser) = (request.winner.as_str(), request.loser.as_str());
    let update = catalog
        .update_pair(winner, loser, |w, l| update_ratings(w, l, WIN))
        .await?;

    debug!(
        winner,
        loser,
        old_winner = update.before.0,
        old_loser = update.before.1,
        new_winner = update.after.0,
        new_loser = update.after.1,
        "Applied vote"
    );

    let total = counter.increment().await;
    if total % 100 == 0 {
        info!("{} votes cast", total);
    }

    Ok(select_pair(catalog).await)
}

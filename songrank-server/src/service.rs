//! Ranking service
//!
//! Owns the catalog and vote counter and exposes the operations the
//! presentation layer needs. Constructed once at startup and shared through
//! `Arc` by every request handler.

use songrank_common::Result;
use std::sync::Arc;

use crate::catalog::Catalog;
use crate::counter::VoteCounter;
use crate::leaderboard::{build_leaderboard, RankedEntry};
use crate::pairing::{select_pair, Pair};
use crate::store::RecordStore;
use crate::vote::{process_vote, VoteRequest};

pub struct RankingService {
    catalog: Catalog,
    votes: VoteCounter,
}

impl RankingService {
    /// Load catalog and vote counter from the record store
    pub async fn load(records: Arc<dyn RecordStore>) -> Result<Self> {
        let catalog = Catalog::load(records.clone()).await?;
        let votes = VoteCounter::load(records).await?;
        Ok(Self { catalog, votes })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub async fn select_pair(&self) -> Pair {
        select_pair(&self.catalog).await
    }

    pub async fn process_vote(&self, request: &VoteRequest) -> Result<Pair> {
        process_vote(&self.catalog, &self.votes, request).await
    }

    pub async fn leaderboard(&self) -> Vec<RankedEntry> {
        build_leaderboard(&self.catalog).await
    }

    pub fn vote_count(&self) -> i64 {
        self.votes.current()
    }
}

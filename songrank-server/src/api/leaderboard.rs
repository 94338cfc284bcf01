//! Leaderboard endpoint

use axum::{extract::State, Json};
use serde::Serialize;

use crate::leaderboard::RankedEntry;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    /// Total votes processed
    pub votes: i64,
    pub entries: Vec<RankedEntry>,
}

/// GET /api/leaderboard
pub async fn get_leaderboard(State(state): State<AppState>) -> Json<LeaderboardResponse> {
    Json(LeaderboardResponse {
        votes: state.service.vote_count(),
        entries: state.service.leaderboard().await,
    })
}

//! Vote endpoint

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::error::ApiResult;
use crate::pairing::Pair;
use crate::vote::VoteRequest;
use crate::AppState;

/// POST /api/vote
///
/// Body: `{"winner": "<title>", "loser": "<title>"}`. Responds with the next
/// pair to show. Malformed bodies and self-votes are 400, unknown titles 404.
pub async fn submit_vote(
    State(state): State<AppState>,
    payload: Result<Json<VoteRequest>, JsonRejection>,
) -> ApiResult<Json<Pair>> {
    let Json(request) = payload?;
    let next = state.service.process_vote(&request).await?;

    Ok(Json(next))
}

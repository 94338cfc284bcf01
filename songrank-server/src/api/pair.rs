//! Pair endpoint

use axum::{extract::State, Json};

use crate::pairing::Pair;
use crate::AppState;

/// GET /api/pair
///
/// Two distinct songs to compare.
pub async fn get_pair(State(state): State<AppState>) -> Json<Pair> {
    Json(state.service.select_pair().await)
}

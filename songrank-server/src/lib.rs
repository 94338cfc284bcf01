//! songrank-server library
//!
//! Pairwise song ranking: two random songs are shown, the listener picks one,
//! both Elo ratings move, and a leaderboard orders the whole catalog.
//!
//! - [`rating`]: Elo expected score and rating update
//! - [`catalog`]: in-memory catalog with per-record locks and write-through
//! - [`counter`]: global vote counter
//! - [`pairing`]: uniform random pair selection
//! - [`vote`]: vote processing
//! - [`leaderboard`]: ordinal ranking
//! - [`store`]: durable record store (SQLite)
//! - [`logging`]: tracing subscriber with a reloadable level

use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod catalog;
pub mod counter;
pub mod error;
pub mod import;
pub mod leaderboard;
pub mod logging;
pub mod pairing;
pub mod rating;
pub mod service;
pub mod store;
pub mod vote;

pub use service::RankingService;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<RankingService>,
}

impl AppState {
    pub fn new(service: Arc<RankingService>) -> Self {
        Self { service }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    let api: Router<AppState> = Router::new()
        .route("/api/pair", get(api::get_pair))
        .route("/api/vote", post(api::submit_vote))
        .route("/api/leaderboard", get(api::get_leaderboard));

    let pages: Router<AppState> = Router::new()
        .route("/", get(api::serve_index))
        .route("/leaderboard", get(api::serve_leaderboard_page))
        .route("/static/app.js", get(api::serve_app_js))
        .route("/favicon.ico", get(api::serve_favicon))
        .merge(api::health_routes());

    Router::new()
        .merge(api)
        .merge(pages)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

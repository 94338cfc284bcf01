//! HTTP API handlers for songrank-server

pub mod health;
pub mod leaderboard;
pub mod pair;
pub mod ui;
pub mod vote;

pub use health::health_routes;
pub use leaderboard::get_leaderboard;
pub use pair::get_pair;
pub use ui::{serve_app_js, serve_favicon, serve_index, serve_leaderboard_page};
pub use vote::submit_vote;

//! UI serving routes
//!
//! Static HTML/JS; all data is fetched from the JSON API.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

const INDEX_HTML: &str = include_str!("../../ui/index.html");
const LEADERBOARD_HTML: &str = include_str!("../../ui/leaderboard.html");
const APP_JS: &str = include_str!("../../ui/app.js");

/// GET /
pub async fn serve_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /leaderboard
pub async fn serve_leaderboard_page() -> Html<&'static str> {
    Html(LEADERBOARD_HTML)
}

/// GET /static/app.js
pub async fn serve_app_js() -> Response {
    (
        StatusCode::OK,
        [("content-type", "application/javascript")],
        APP_JS,
    )
        .into_response()
}

/// GET /favicon.ico
pub async fn serve_favicon() -> StatusCode {
    StatusCode::NO_CONTENT
}

//! Static script serving

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

const APP_JS: &str = include_str!("../../ui/app.js");

/// GET /static/app.js
///
/// Serves the browser script (in-place search, stale-response guard, confetti)
pub async fn serve_app_js() -> Response {
    (
        StatusCode::OK,
        [("content-type", "application/javascript")],
        APP_JS,
    )
        .into_response()
}

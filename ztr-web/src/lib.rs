//! ztr-web library - Zero Test Result lookup page
//!
//! Serves a single page where a student enters a roll number and sees their
//! marks, letter grade, and advisory message.

use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use ztr_common::grading::GradeTable;
use ztr_common::store::StudentStore;

pub mod api;
pub mod render;
pub mod session;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Student store, owned by the composition root
    pub store: Arc<dyn StudentStore>,
    /// Percentage-to-grade bands
    pub grades: Arc<GradeTable>,
}

impl AppState {
    /// Create new application state
    pub fn new(store: Arc<dyn StudentStore>, grades: GradeTable) -> Self {
        Self {
            store,
            grades: Arc::new(grades),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/", get(api::lookup_page))
        .route("/api/lookup", get(api::lookup_json))
        .route("/static/app.js", get(api::serve_app_js))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

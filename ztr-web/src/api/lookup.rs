//! Roll number lookup
//!
//! `GET /` renders the whole page, running a lookup first when a
//! `roll_number` parameter is present (plain form submission).
//! `GET /api/lookup` runs the same lookup and returns JSON with the rendered
//! panels for `app.js`.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use ztr_common::grading::GradeInfo;
use ztr_common::StudentRecord;

use crate::render;
use crate::session::{LookupSession, LookupState};
use crate::AppState;

/// Query parameters for a lookup
#[derive(Debug, Deserialize)]
pub struct LookupQuery {
    pub roll_number: Option<String>,
}

/// Lookup result for the browser script
#[derive(Debug, Serialize)]
pub struct LookupResponse {
    /// idle | invalid | found | not_found | network_error
    pub state: String,
    pub message: Option<String>,
    pub student: Option<StudentRecord>,
    pub grade: Option<GradeInfo>,
    pub error_html: String,
    pub result_html: String,
}

impl LookupResponse {
    fn from_session(session: &LookupSession) -> Self {
        let state = session.state();
        let (student, grade) = match state {
            LookupState::Found { student, grade } => (Some(student.clone()), Some(grade.clone())),
            _ => (None, None),
        };

        Self {
            state: state.name().to_string(),
            message: state.message().map(str::to_string),
            student,
            grade,
            error_html: render::error_panel(state),
            result_html: render::result_panel(state),
        }
    }
}

async fn run_lookup(state: &AppState, roll_number: String) -> LookupSession {
    let mut session = LookupSession::new();
    session.edit_input(roll_number);
    session.search(state.store.as_ref(), &state.grades).await;
    session
}

/// GET /?roll_number=...
pub async fn lookup_page(
    State(state): State<AppState>,
    Query(query): Query<LookupQuery>,
) -> Html<String> {
    let session = match query.roll_number {
        Some(roll_number) => run_lookup(&state, roll_number).await,
        None => LookupSession::new(),
    };

    Html(render::page(&session))
}

/// GET /api/lookup?roll_number=...
///
/// Blank input answers 400 without querying the store; a transport failure
/// answers 502. Not-found is a normal 200 answer.
pub async fn lookup_json(
    State(state): State<AppState>,
    Query(query): Query<LookupQuery>,
) -> Response {
    let session = run_lookup(&state, query.roll_number.unwrap_or_default()).await;

    let status = match session.state() {
        LookupState::Invalid => StatusCode::BAD_REQUEST,
        LookupState::NetworkError => StatusCode::BAD_GATEWAY,
        _ => StatusCode::OK,
    };

    (status, Json(LookupResponse::from_session(&session))).into_response()
}

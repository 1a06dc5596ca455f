/// Check-in API routes
use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    response::Response,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    checkins::{submit_check_in, NewCheckIn},
    errors::WaypostError,
    webserver::{
        middleware,
        state::AppState,
        utils::{clamp_limit, error_to_response, success_response},
    },
};

/// Default history page size when the caller omits a limit
const DEFAULT_HISTORY_LIMIT: u32 = 50;

/// Check-in submission body; the user comes from the session
#[derive(Debug, Deserialize)]
pub struct CheckInRequest {
    #[serde(default)]
    pub venue_name: String,
    #[serde(default)]
    pub venue_type: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub check_in_time: String,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CheckInResponse {
    pub check_in_id: String,
    pub badge_awarded: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    pub limit: Option<u32>,
}

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/check-ins", post(create_check_in))
        .route("/check-ins/:user_id", get(list_check_ins))
}

/// POST /api/check-ins
async fn create_check_in(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<CheckInRequest>,
) -> Response {
    let session = match middleware::require_session(&state, &headers) {
        Ok(session) => session,
        Err(response) => return response,
    };

    let input = NewCheckIn {
        user_id: session.user_id,
        venue_name: payload.venue_name,
        venue_type: payload.venue_type,
        location: payload.location,
        check_in_time: payload.check_in_time,
        notes: payload.notes,
    };

    match submit_check_in(&state.db, &input) {
        Ok(outcome) => success_response(CheckInResponse {
            check_in_id: outcome.check_in_id,
            badge_awarded: outcome.badge_awarded.map(|b| b.as_str().to_string()),
        }),
        Err(e) => error_to_response(&e),
    }
}

/// GET /api/check-ins/:user_id
async fn list_check_ins(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(user_id): Path<String>,
    Query(params): Query<HistoryParams>,
) -> Response {
    if let Err(response) = middleware::require_session(&state, &headers) {
        return response;
    }

    let limit = clamp_limit(params.limit, DEFAULT_HISTORY_LIMIT);
    match state.db.get_check_ins_for_user(&user_id, limit) {
        Ok(check_ins) => success_response(check_ins),
        Err(e) => error_to_response(&WaypostError::database("list check-ins", e)),
    }
}

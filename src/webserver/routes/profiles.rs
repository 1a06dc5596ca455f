/// Profile API routes
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    routing::get,
    Router,
};
use serde::Serialize;
use std::sync::Arc;

use crate::{
    database::models::{Badge, CheckIn, Profile},
    errors::WaypostError,
    webserver::{
        state::AppState,
        utils::{error_response, error_to_response, success_response},
    },
};

/// Profile page payload: the profile plus its earned badges and recent visits
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub profile: Profile,
    pub badges: Vec<Badge>,
    pub recent_check_ins: Vec<CheckIn>,
}

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/profiles/:id", get(get_profile))
        .route("/profiles/:id/badges", get(get_profile_badges))
}

/// GET /api/profiles/:id
async fn get_profile(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Response {
    let profile = match state.db.get_profile(&id) {
        Ok(Some(profile)) => profile,
        Ok(None) => return error_response(StatusCode::NOT_FOUND, "profile not found"),
        Err(e) => return error_to_response(&WaypostError::database("lookup profile", e)),
    };

    let badges = match state.db.get_badges_for_user(&id) {
        Ok(badges) => badges,
        Err(e) => return error_to_response(&WaypostError::database("list badges", e)),
    };

    let recent_check_ins = match state.db.get_check_ins_for_user(&id, 20) {
        Ok(check_ins) => check_ins,
        Err(e) => return error_to_response(&WaypostError::database("list check-ins", e)),
    };

    success_response(ProfileResponse {
        profile,
        badges,
        recent_check_ins,
    })
}

/// GET /api/profiles/:id/badges
async fn get_profile_badges(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    match state.db.get_badges_for_user(&id) {
        Ok(badges) => success_response(badges),
        Err(e) => error_to_response(&WaypostError::database("list badges", e)),
    }
}

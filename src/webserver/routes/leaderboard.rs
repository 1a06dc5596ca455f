/// Leaderboard API route
use axum::{
    extract::{Query, State},
    response::Response,
    routing::get,
    Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    errors::WaypostError,
    leaderboard,
    webserver::{
        state::AppState,
        utils::{clamp_limit, error_to_response, success_response},
    },
};

#[derive(Debug, Deserialize)]
pub struct LeaderboardParams {
    pub limit: Option<u32>,
}

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/leaderboard", get(get_leaderboard))
}

/// GET /api/leaderboard?limit=..
async fn get_leaderboard(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LeaderboardParams>,
) -> Response {
    let limit = clamp_limit(params.limit, leaderboard::DEFAULT_LIMIT);

    match leaderboard::top(&state.db, limit) {
        Ok(entries) => success_response(entries),
        Err(e) => error_to_response(&WaypostError::database("leaderboard query", e)),
    }
}

/// Auth API routes
///
/// Register/login return the session token in the JSON body and also set the
/// session cookie so the browser page gate works without extra wiring.
use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    response::Response,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use crate::{
    database::models::{Profile, Session},
    webserver::{
        middleware::{self, SESSION_COOKIE},
        state::AppState,
        utils::{error_to_response, success_response},
    },
};

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub profile: Profile,
    pub token: String,
    pub expires_at: chrono::DateTime<chrono::Utc>,
}

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/me", get(me))
}

fn session_response(profile: Profile, session: Session) -> Response {
    let cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax",
        SESSION_COOKIE, session.token
    );

    let mut response = success_response(SessionResponse {
        profile,
        token: session.token,
        expires_at: session.expires_at,
    });

    if let Ok(value) = HeaderValue::from_str(&cookie) {
        response.headers_mut().insert(header::SET_COOKIE, value);
    }
    response
}

/// POST /api/auth/register
async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CredentialsRequest>,
) -> Response {
    match state.auth.register(&payload.username) {
        Ok((profile, session)) => session_response(profile, session),
        Err(e) => error_to_response(&e),
    }
}

/// POST /api/auth/login
async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CredentialsRequest>,
) -> Response {
    match state.auth.login(&payload.username) {
        Ok((profile, session)) => session_response(profile, session),
        Err(e) => error_to_response(&e),
    }
}

/// POST /api/auth/logout
async fn logout(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let token = match middleware::extract_token(&headers) {
        Some(token) => token,
        None => return success_response(json!({ "signed_out": false })),
    };

    match state.auth.logout(&token) {
        Ok(()) => {
            // Expire the cookie on the way out
            let mut response = success_response(json!({ "signed_out": true }));
            let cookie = format!("{}=; Path=/; Max-Age=0", SESSION_COOKIE);
            if let Ok(value) = HeaderValue::from_str(&cookie) {
                response.headers_mut().insert(header::SET_COOKIE, value);
            }
            response
        }
        Err(e) => error_to_response(&e),
    }
}

/// GET /api/auth/me
async fn me(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let session = match middleware::require_session(&state, &headers) {
        Ok(session) => session,
        Err(response) => return response,
    };

    match state.db.get_profile(&session.user_id) {
        Ok(Some(profile)) => success_response(profile),
        Ok(None) => error_to_response(&crate::errors::WaypostError::auth(
            "profile missing for session",
        )),
        Err(e) => error_to_response(&crate::errors::WaypostError::database("lookup profile", e)),
    }
}

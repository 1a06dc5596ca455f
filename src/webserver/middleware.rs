/// Webserver middleware and session extraction
///
/// API handlers authenticate via a bearer token or the session cookie; page
/// requests without a live session are redirected to /auth.
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;

use crate::{
    database::models::Session,
    errors::WaypostError,
    logger::{self, LogTag},
    webserver::{state::AppState, utils},
};

/// Cookie carrying the session token for browser page loads
pub const SESSION_COOKIE: &str = "waypost_session";

/// Pull the session token from Authorization: Bearer or the session cookie
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    if let Some(value) = headers.get(header::AUTHORIZATION) {
        if let Ok(value) = value.to_str() {
            if let Some(token) = value.strip_prefix("Bearer ") {
                return Some(token.trim().to_string());
            }
        }
    }

    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    for pair in cookies.split(';') {
        let mut parts = pair.trim().splitn(2, '=');
        if parts.next() == Some(SESSION_COOKIE) {
            return parts.next().map(|v| v.to_string());
        }
    }
    None
}

/// Resolve the request's session, or produce the 401 response
pub fn require_session(state: &AppState, headers: &HeaderMap) -> Result<Session, Response> {
    let token = match extract_token(headers) {
        Some(token) => token,
        None => {
            return Err(utils::error_to_response(&WaypostError::auth(
                "missing session token",
            )))
        }
    };

    state
        .auth
        .authenticate(&token)
        .map_err(|e| utils::error_to_response(&e))
}

/// Page gate: browser routes require a live session, otherwise redirect
///
/// Applied to the HTML page routes only; the JSON API returns 401 instead.
pub async fn session_gate(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let authenticated = extract_token(request.headers())
        .map(|token| state.auth.authenticate(&token).is_ok())
        .unwrap_or(false);

    if !authenticated {
        logger::debug(
            LogTag::Auth,
            &format!("Unauthenticated page request to {}", request.uri().path()),
        );
        return Redirect::to("/auth").into_response();
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Auth;
    use crate::config::Config;
    use crate::database::Database;
    use crate::places::{PlacesClient, PlacesService};
    use axum::{
        body::Body,
        http::{HeaderValue, Request, StatusCode},
        middleware::from_fn_with_state,
        routing::get,
        Router,
    };
    use tower::ServiceExt;

    fn test_state() -> Arc<AppState> {
        let config = Config::default();
        let db = Database::open_in_memory().unwrap();
        let client = PlacesClient::new(&config.places).unwrap();
        let auth = Auth::new(db.clone(), 30);
        let places = PlacesService::new(db.clone(), client);
        Arc::new(AppState::new(db, Arc::new(config), auth, places))
    }

    fn gated_app(state: Arc<AppState>) -> Router {
        Router::new()
            .route("/", get(|| async { "home" }))
            .layer(from_fn_with_state(state, session_gate))
    }

    #[test]
    fn test_extract_token_prefers_bearer_over_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer tok-a"),
        );
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("waypost_session=tok-b"),
        );
        assert_eq!(extract_token(&headers), Some("tok-a".to_string()));
    }

    #[test]
    fn test_extract_token_from_cookie_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; waypost_session=tok-c; lang=en"),
        );
        assert_eq!(extract_token(&headers), Some("tok-c".to_string()));
    }

    #[test]
    fn test_extract_token_absent() {
        assert_eq!(extract_token(&HeaderMap::new()), None);

        // A cookie header without the session cookie yields nothing
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark"));
        assert_eq!(extract_token(&headers), None);

        // A non-Bearer authorization scheme is ignored
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Basic dXNlcjpwdw=="),
        );
        assert_eq!(extract_token(&headers), None);
    }

    #[tokio::test]
    async fn test_gate_redirects_without_session() {
        let app = gated_app(test_state());
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/auth");
    }

    #[tokio::test]
    async fn test_gate_passes_live_session() {
        let state = test_state();
        let (_, session) = state.auth.register("alice").unwrap();

        let request = Request::builder()
            .uri("/")
            .header(
                header::COOKIE,
                format!("{}={}", SESSION_COOKIE, session.token),
            )
            .body(Body::empty())
            .unwrap();
        let response = gated_app(state).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_gate_rejects_unknown_token() {
        let request = Request::builder()
            .uri("/")
            .header(
                header::COOKIE,
                format!("{}=not-a-session", SESSION_COOKIE),
            )
            .body(Body::empty())
            .unwrap();
        let response = gated_app(test_state()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/auth");
    }
}

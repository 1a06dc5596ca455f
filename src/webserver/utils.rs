/// Response helpers for the JSON API
///
/// Every API response uses the same envelope: `{"success": true, "data": ...}`
/// or `{"success": false, "error": "..."}`.
use crate::errors::WaypostError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;

/// Upper bound on caller-supplied list limits
pub const MAX_LIST_LIMIT: u32 = 200;

/// Clamp an optional caller-supplied limit to at most [`MAX_LIST_LIMIT`]
pub fn clamp_limit(requested: Option<u32>, default: u32) -> u32 {
    requested.unwrap_or(default).min(MAX_LIST_LIMIT)
}

/// 200 with the standard success envelope
pub fn success_response<T: Serialize>(data: T) -> Response {
    (
        StatusCode::OK,
        Json(json!({ "success": true, "data": data })),
    )
        .into_response()
}

/// Error envelope with an explicit status code
pub fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(json!({ "success": false, "error": message })),
    )
        .into_response()
}

/// Map an error to its HTTP status per the handling taxonomy
pub fn error_to_response(error: &WaypostError) -> Response {
    let status = match error {
        WaypostError::Validation { .. } => StatusCode::BAD_REQUEST,
        WaypostError::Auth { .. } => StatusCode::UNAUTHORIZED,
        WaypostError::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        WaypostError::PlacesApi { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        WaypostError::Configuration { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };
    error_response(status, &error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_limit() {
        assert_eq!(clamp_limit(None, 50), 50);
        assert_eq!(clamp_limit(Some(10), 50), 10);
        assert_eq!(clamp_limit(Some(10_000), 50), MAX_LIST_LIMIT);
    }
}

/// Nearby-places API route
///
/// This endpoint keeps the upstream proxy's error contract: 400 when lat/lng
/// are missing or unparseable, 500 when the API key is unconfigured or the
/// upstream call fails. Cache hits never touch the upstream.
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Response,
    routing::get,
    Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::webserver::{
    state::AppState,
    utils::{error_response, success_response},
};

#[derive(Debug, Deserialize)]
pub struct NearbyParams {
    pub lat: Option<String>,
    pub lng: Option<String>,
    pub radius: Option<f64>,
}

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/places/nearby", get(nearby))
}

/// GET /api/places/nearby?lat=..&lng=..&radius=..
async fn nearby(State(state): State<Arc<AppState>>, Query(params): Query<NearbyParams>) -> Response {
    let lat = params.lat.as_deref().and_then(|v| v.parse::<f64>().ok());
    let lng = params.lng.as_deref().and_then(|v| v.parse::<f64>().ok());

    let (lat, lng) = match (lat, lng) {
        (Some(lat), Some(lng)) => (lat, lng),
        _ => {
            return error_response(
                StatusCode::BAD_REQUEST,
                "Missing or invalid lat/lng parameters",
            )
        }
    };

    let radius = params
        .radius
        .unwrap_or(state.config.places.default_radius_meters);

    // Cache path first
    let cached = match state.places.cached_nearby(lat, lng, radius) {
        Ok(places) => places,
        Err(e) => return error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()),
    };

    if !cached.is_empty() {
        return success_response(cached);
    }

    // Cache miss: upstream fallback needs a configured key
    if !state.places.upstream_configured() {
        return error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Places API key is not configured",
        );
    }

    match state.places.fetch_and_cache(lat, lng, radius).await {
        Ok(places) => success_response(places),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Auth;
    use crate::config::Config;
    use crate::database::{models::Venue, Database};
    use crate::places::{PlacesClient, PlacesService};
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    // Default config carries no API key, so the upstream fallback is disabled
    fn test_state() -> Arc<AppState> {
        let config = Config::default();
        let db = Database::open_in_memory().unwrap();
        let client = PlacesClient::new(&config.places).unwrap();
        let auth = Auth::new(db.clone(), 30);
        let places = PlacesService::new(db.clone(), client);
        Arc::new(AppState::new(db, Arc::new(config), auth, places))
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_missing_lat_is_bad_request() {
        let app = routes().with_state(test_state());
        let (status, body) = get_json(app, "/places/nearby?lng=13.405").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("lat/lng"));
    }

    #[tokio::test]
    async fn test_unparseable_lng_is_bad_request() {
        let app = routes().with_state(test_state());
        let (status, body) = get_json(app, "/places/nearby?lat=52.52&lng=abc").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_empty_cache_without_api_key_is_server_error() {
        let app = routes().with_state(test_state());
        let (status, body) = get_json(app, "/places/nearby?lat=52.52&lng=13.405").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("key"));
    }

    #[tokio::test]
    async fn test_cached_venue_served_with_envelope() {
        let state = test_state();
        state
            .db
            .upsert_venue(&Venue {
                place_id: "p1".to_string(),
                name: "Cafe X".to_string(),
                address: "1 Main St".to_string(),
                types: vec!["cafe".to_string()],
                latitude: 52.52,
                longitude: 13.405,
            })
            .unwrap();

        let app = routes().with_state(state);
        let (status, body) = get_json(app, "/places/nearby?lat=52.52&lng=13.405").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"][0]["place_id"], "p1");
        assert_eq!(body["data"][0]["distance_m"], 0.0);
    }
}

//! Nearby-place resolver
//!
//! Cache first: a bounding-box query prunes the venues table, then the true
//! haversine distance filters candidates to the radius. When the cache yields
//! zero rows the upstream places API is called once and each returned place
//! is opportunistically upserted into the cache, ignoring duplicates by
//! place_id.

pub mod client;
pub mod types;

pub use client::{NearbyFetcher, PlacesClient};
pub use types::{NearbyPlace, NearbySearchResponse};

use crate::database::models::Venue;
use crate::database::Database;
use crate::errors::WaypostError;
use crate::geo::{haversine_distance, BoundingBox};
use crate::logger::{self, LogTag};
use crate::places::types::PlaceResult;

/// Resolver over the venue cache and an upstream fetcher
pub struct PlacesService<F: NearbyFetcher> {
    db: Database,
    fetcher: F,
}

fn venue_to_place(venue: Venue, lat: f64, lng: f64) -> NearbyPlace {
    let distance_m = haversine_distance(lat, lng, venue.latitude, venue.longitude);
    NearbyPlace {
        place_id: venue.place_id,
        name: venue.name,
        address: venue.address,
        types: venue.types,
        latitude: venue.latitude,
        longitude: venue.longitude,
        distance_m,
    }
}

fn result_to_venue(result: &PlaceResult) -> Venue {
    Venue {
        place_id: result.place_id.clone(),
        name: result.name.clone(),
        address: result.vicinity.clone().unwrap_or_default(),
        types: result.types.clone(),
        latitude: result.geometry.location.lat,
        longitude: result.geometry.location.lng,
    }
}

impl<F: NearbyFetcher> PlacesService<F> {
    pub fn new(db: Database, fetcher: F) -> Self {
        Self { db, fetcher }
    }

    /// Whether the upstream fallback can be used
    pub fn upstream_configured(&self) -> bool {
        self.fetcher.is_configured()
    }

    /// Cache-only lookup: bbox prune, then haversine filter
    pub fn cached_nearby(
        &self,
        lat: f64,
        lng: f64,
        radius_m: f64,
    ) -> Result<Vec<NearbyPlace>, WaypostError> {
        let bbox = BoundingBox::around(lat, lng, radius_m);
        let candidates = self
            .db
            .get_venues_in_bbox(&bbox)
            .map_err(|e| WaypostError::database("venue bbox query", e))?;

        let mut places: Vec<NearbyPlace> = candidates
            .into_iter()
            .map(|v| venue_to_place(v, lat, lng))
            .filter(|p| p.distance_m <= radius_m)
            .collect();
        places.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m));

        Ok(places)
    }

    /// Call the upstream API once and cache what it returns
    ///
    /// Upserts every returned place (ignoring duplicates); the returned list
    /// is still filtered to the requested radius.
    pub async fn fetch_and_cache(
        &self,
        lat: f64,
        lng: f64,
        radius_m: f64,
    ) -> Result<Vec<NearbyPlace>, WaypostError> {
        let response = self.fetcher.nearby_search(lat, lng, radius_m).await?;

        logger::debug(
            LogTag::Places,
            &format!("Upstream returned {} places", response.results.len()),
        );

        let mut places = Vec::new();
        for result in &response.results {
            let venue = result_to_venue(result);

            // Best-effort cache write; a failed upsert must not drop results
            if let Err(e) = self.db.upsert_venue(&venue) {
                logger::warning(
                    LogTag::Places,
                    &format!("Venue cache write failed for {}: {}", venue.place_id, e),
                );
            }

            let place = venue_to_place(venue, lat, lng);
            if place.distance_m <= radius_m {
                places.push(place);
            }
        }
        places.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m));

        Ok(places)
    }

    /// Resolve nearby places, swallowing all errors into an empty list
    ///
    /// The UI-facing contract: cache errors and upstream errors are logged
    /// and surface as zero results, never as failures.
    pub async fn resolve_nearby(&self, lat: f64, lng: f64, radius_m: f64) -> Vec<NearbyPlace> {
        let cached = match self.cached_nearby(lat, lng, radius_m) {
            Ok(places) => places,
            Err(e) => {
                logger::error(LogTag::Places, &format!("Venue cache lookup failed: {}", e));
                return Vec::new();
            }
        };

        if !cached.is_empty() {
            logger::debug(
                LogTag::Places,
                &format!("Cache hit: {} venues within {}m", cached.len(), radius_m),
            );
            return cached;
        }

        match self.fetch_and_cache(lat, lng, radius_m).await {
            Ok(places) => places,
            Err(e) => {
                logger::warning(LogTag::Places, &format!("Upstream lookup failed: {}", e));
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::types::{Geometry, LatLng, PlaceResult};
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Stub upstream returning a fixed result set and counting calls
    struct StubFetcher {
        results: Vec<PlaceResult>,
        calls: AtomicUsize,
        configured: bool,
        fail: bool,
    }

    impl StubFetcher {
        fn returning(results: Vec<PlaceResult>) -> Self {
            Self {
                results,
                calls: AtomicUsize::new(0),
                configured: true,
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                results: Vec::new(),
                calls: AtomicUsize::new(0),
                configured: true,
                fail: true,
            }
        }
    }

    #[async_trait]
    impl NearbyFetcher for StubFetcher {
        async fn nearby_search(
            &self,
            _lat: f64,
            _lng: f64,
            _radius_m: f64,
        ) -> Result<NearbySearchResponse, WaypostError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(WaypostError::PlacesApi {
                    endpoint: "stub".to_string(),
                    status: Some(500),
                    message: "upstream down".to_string(),
                });
            }
            Ok(NearbySearchResponse {
                results: self.results.clone(),
                status: "OK".to_string(),
            })
        }

        fn is_configured(&self) -> bool {
            self.configured
        }
    }

    fn place_result(place_id: &str, lat: f64, lng: f64) -> PlaceResult {
        PlaceResult {
            place_id: place_id.to_string(),
            name: format!("Venue {}", place_id),
            vicinity: Some("1 Main St".to_string()),
            geometry: Geometry {
                location: LatLng { lat, lng },
            },
            types: vec!["cafe".to_string()],
        }
    }

    fn cached_venue(db: &Database, place_id: &str, lat: f64, lng: f64) {
        db.upsert_venue(&Venue {
            place_id: place_id.to_string(),
            name: format!("Venue {}", place_id),
            address: "1 Main St".to_string(),
            types: vec!["cafe".to_string()],
            latitude: lat,
            longitude: lng,
        })
        .unwrap();
    }

    const LAT: f64 = 52.52;
    const LNG: f64 = 13.405;

    #[tokio::test]
    async fn test_all_results_within_radius() {
        let db = Database::open_in_memory().unwrap();
        // ~0m, ~220m, ~1100m north of the query point
        cached_venue(&db, "at", LAT, LNG);
        cached_venue(&db, "near", LAT + 0.002, LNG);
        cached_venue(&db, "far", LAT + 0.010, LNG);

        let service = PlacesService::new(db, StubFetcher::returning(vec![]));
        let places = service.resolve_nearby(LAT, LNG, 500.0).await;

        assert_eq!(places.len(), 2);
        for place in &places {
            assert!(
                haversine_distance(LAT, LNG, place.latitude, place.longitude) <= 500.0 + 1e-6,
                "{} escaped the radius",
                place.place_id
            );
        }
        // Sorted nearest first
        assert_eq!(places[0].place_id, "at");
    }

    #[tokio::test]
    async fn test_cache_hit_skips_upstream() {
        let db = Database::open_in_memory().unwrap();
        cached_venue(&db, "hit", LAT, LNG);

        let fetcher = StubFetcher::returning(vec![place_result("api", LAT, LNG)]);
        let service = PlacesService::new(db, fetcher);

        let places = service.resolve_nearby(LAT, LNG, 500.0).await;
        assert_eq!(places.len(), 1);
        assert_eq!(places[0].place_id, "hit");
        assert_eq!(service.fetcher.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_cache_miss_calls_upstream_once_and_caches() {
        let db = Database::open_in_memory().unwrap();
        let fetcher = StubFetcher::returning(vec![
            place_result("a", LAT, LNG),
            place_result("b", LAT + 0.001, LNG),
        ]);
        let service = PlacesService::new(db.clone(), fetcher);

        let places = service.resolve_nearby(LAT, LNG, 500.0).await;
        assert_eq!(places.len(), 2);
        assert_eq!(service.fetcher.calls.load(Ordering::SeqCst), 1);

        // Results were upserted into the cache
        assert_eq!(db.count_venues().unwrap(), 2);

        // Next call is served from cache
        let again = service.resolve_nearby(LAT, LNG, 500.0).await;
        assert_eq!(again.len(), 2);
        assert_eq!(service.fetcher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_upstream_failure_yields_empty() {
        let db = Database::open_in_memory().unwrap();
        let service = PlacesService::new(db, StubFetcher::failing());

        let places = service.resolve_nearby(LAT, LNG, 500.0).await;
        assert!(places.is_empty());
    }

    #[tokio::test]
    async fn test_upstream_results_outside_radius_filtered() {
        let db = Database::open_in_memory().unwrap();
        let fetcher = StubFetcher::returning(vec![
            place_result("in", LAT, LNG),
            place_result("out", LAT + 0.010, LNG), // ~1.1km away
        ]);
        let service = PlacesService::new(db.clone(), fetcher);

        let places = service.resolve_nearby(LAT, LNG, 500.0).await;
        assert_eq!(places.len(), 1);
        assert_eq!(places[0].place_id, "in");

        // Both still cached for future, wider queries
        assert_eq!(db.count_venues().unwrap(), 2);
    }
}

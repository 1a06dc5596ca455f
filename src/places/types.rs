use serde::{Deserialize, Serialize};

/// Raw upstream nearby-search response
///
/// Shape follows the places API: a `results` array plus a `status` string.
#[derive(Debug, Clone, Deserialize)]
pub struct NearbySearchResponse {
    #[serde(default)]
    pub results: Vec<PlaceResult>,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaceResult {
    pub place_id: String,
    pub name: String,
    #[serde(default)]
    pub vicinity: Option<String>,
    pub geometry: Geometry,
    #[serde(default)]
    pub types: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// A resolved nearby place, cache- or API-sourced
#[derive(Debug, Clone, Serialize)]
pub struct NearbyPlace {
    pub place_id: String,
    pub name: String,
    pub address: String,
    pub types: Vec<String>,
    pub latitude: f64,
    pub longitude: f64,
    /// True great-circle distance from the query point, meters
    pub distance_m: f64,
}

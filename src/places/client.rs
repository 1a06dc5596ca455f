/// HTTP client for the upstream places search API
///
/// Plain JSON GET with a timeout. No retry, no backoff, no pagination; a
/// failed call surfaces as an error and the resolver decides what to do.
use crate::config::PlacesConfig;
use crate::errors::WaypostError;
use crate::logger::{self, LogTag};
use crate::places::types::NearbySearchResponse;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Seam between the resolver and the network, stubbed in tests
#[async_trait]
pub trait NearbyFetcher: Send + Sync {
    async fn nearby_search(
        &self,
        lat: f64,
        lng: f64,
        radius_m: f64,
    ) -> Result<NearbySearchResponse, WaypostError>;

    /// Whether an API key is configured; callers surface 500 when it is not
    fn is_configured(&self) -> bool;
}

pub struct PlacesClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl PlacesClient {
    pub fn new(config: &PlacesConfig) -> Result<Self, WaypostError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| WaypostError::Configuration {
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn build_url(&self, lat: f64, lng: f64, radius_m: f64) -> Result<Url, WaypostError> {
        let endpoint = format!("{}/nearbysearch/json", self.base_url);
        let mut url = Url::parse(&endpoint).map_err(|e| WaypostError::Configuration {
            message: format!("Invalid places API base URL: {}", e),
        })?;
        url.query_pairs_mut()
            .append_pair("location", &format!("{},{}", lat, lng))
            .append_pair("radius", &format!("{}", radius_m))
            .append_pair("key", &self.api_key);
        Ok(url)
    }
}

#[async_trait]
impl NearbyFetcher for PlacesClient {
    async fn nearby_search(
        &self,
        lat: f64,
        lng: f64,
        radius_m: f64,
    ) -> Result<NearbySearchResponse, WaypostError> {
        if !self.is_configured() {
            return Err(WaypostError::Configuration {
                message: "Places API key is not configured".to_string(),
            });
        }

        let url = self.build_url(lat, lng, radius_m)?;
        let endpoint = format!("{}/nearbysearch/json", self.base_url);

        logger::debug(
            LogTag::Places,
            &format!(
                "Upstream nearby search: ({:.5},{:.5}) radius {}m",
                lat, lng, radius_m
            ),
        );

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| WaypostError::PlacesApi {
                endpoint: endpoint.clone(),
                status: None,
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WaypostError::PlacesApi {
                endpoint,
                status: Some(status.as_u16()),
                message: body,
            });
        }

        response
            .json::<NearbySearchResponse>()
            .await
            .map_err(|e| WaypostError::PlacesApi {
                endpoint,
                status: None,
                message: format!("Failed to parse response: {}", e),
            })
    }

    fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

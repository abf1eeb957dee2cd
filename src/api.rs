//! Geocoding client (Nominatim search API)

use std::time::Duration;

use async_trait::async_trait;

use crate::state::Place;

pub const DEFAULT_ENDPOINT: &str = "https://nominatim.openstreetmap.org/search";
pub const DEFAULT_USER_AGENT: &str = concat!("careview/", env!("CARGO_PKG_VERSION"));

#[derive(thiserror::Error, Debug)]
pub enum GeocodeError {
    #[error("geocoding request failed: {0}")]
    Request(String),
    #[error("geocoding service answered with status {0}")]
    Status(u16),
    #[error("geocoding response parse error: {0}")]
    Parse(String),
}

/// Resolves free-text addresses to places, best match first
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<Place>, GeocodeError>;
}

pub struct NominatimClient {
    client: reqwest::Client,
    endpoint: String,
}

impl NominatimClient {
    pub fn new(
        endpoint: impl Into<String>,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<Self, GeocodeError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| GeocodeError::Request(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Geocoder for NominatimClient {
    async fn search(&self, query: &str) -> Result<Vec<Place>, GeocodeError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", query), ("format", "json")])
            .send()
            .await
            .map_err(|e| GeocodeError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| GeocodeError::Request(e.to_string()))?;
        parse_places(&body)
    }
}

/// Decode a search response body: a JSON array of `{lat, lon}` objects.
pub fn parse_places(body: &str) -> Result<Vec<Place>, GeocodeError> {
    serde_json::from_str(body).map_err(|e| GeocodeError::Parse(e.to_string()))
}

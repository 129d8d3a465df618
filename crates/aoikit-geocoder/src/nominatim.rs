//! HTTP place search against a Nominatim-compatible endpoint.

use aoikit_settings::GeocoderSettings;
use async_trait::async_trait;
use reqwest::header::ACCEPT_LANGUAGE;

use crate::place_search::{parse_candidates, Candidate, PlaceSearch, PlaceSearchError};

/// Issues `GET {endpoint}?q=..&format=json&limit=..` and decodes the
/// candidate array.
pub struct NominatimClient {
    client: reqwest::Client,
    endpoint: String,
    accept_language: String,
    limit: String,
}

impl NominatimClient {
    /// Builds a client from the geocoder settings.
    pub fn new(settings: &GeocoderSettings) -> Result<Self, PlaceSearchError> {
        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent.clone())
            .timeout(settings.request_timeout())
            .build()
            .map_err(|e| PlaceSearchError::Transport(format!("HTTP client setup: {}", e)))?;

        Ok(Self {
            client,
            endpoint: settings.endpoint.clone(),
            accept_language: settings.accept_language.clone(),
            limit: settings.result_limit.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl PlaceSearch for NominatimClient {
    async fn search(&self, query: &str) -> Result<Vec<Candidate>, PlaceSearchError> {
        tracing::debug!("GET {} q='{}'", self.endpoint, query);

        let resp = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("limit", self.limit.as_str()),
            ])
            .header(ACCEPT_LANGUAGE, self.accept_language.as_str())
            .send()
            .await
            .map_err(|e| PlaceSearchError::Transport(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(PlaceSearchError::HttpStatus {
                status: resp.status().as_u16(),
            });
        }

        let body = resp
            .text()
            .await
            .map_err(|e| PlaceSearchError::Transport(format!("Failed to read response: {}", e)))?;

        parse_candidates(&body)
    }
}

impl std::fmt::Debug for NominatimClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NominatimClient")
            .field("endpoint", &self.endpoint)
            .field("accept_language", &self.accept_language)
            .finish()
    }
}

//! Seam to the external place-search service.

use aoikit_core::{GeocodeError, LatLng};
use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

/// One search result as returned by the service.
///
/// Coordinates arrive as decimal strings and are parsed on demand.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Candidate {
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl Candidate {
    pub fn new(lat: impl Into<String>, lon: impl Into<String>) -> Self {
        Self {
            lat: lat.into(),
            lon: lon.into(),
            display_name: None,
        }
    }

    /// Parses the coordinate strings.
    pub fn position(&self) -> Result<LatLng, GeocodeError> {
        let parse = |field: &str, value: &str| {
            value
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| GeocodeError::MalformedResponse {
                    reason: format!("{} is not a decimal number: '{}'", field, value),
                })
        };
        Ok(LatLng::new(parse("lat", &self.lat)?, parse("lon", &self.lon)?))
    }
}

/// Failure of a single lookup request.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlaceSearchError {
    /// The request never produced a response
    #[error("Transport error: {0}")]
    Transport(String),

    /// The service answered with a non-success status
    #[error("HTTP status {status}")]
    HttpStatus {
        /// The status code received.
        status: u16,
    },

    /// The response body is not a candidate list
    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl PlaceSearchError {
    /// Transport and HTTP failures may succeed on another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            PlaceSearchError::Transport(_) | PlaceSearchError::HttpStatus { .. }
        )
    }
}

/// Parses a service response body into candidates.
pub fn parse_candidates(body: &str) -> Result<Vec<Candidate>, PlaceSearchError> {
    serde_json::from_str(body).map_err(|e| PlaceSearchError::Malformed(e.to_string()))
}

/// External place-search service
///
/// One call is one request. Retrying is the caller's business.
#[async_trait]
pub trait PlaceSearch: Send + Sync {
    /// Looks `query` up and returns the candidates in service order.
    async fn search(&self, query: &str) -> Result<Vec<Candidate>, PlaceSearchError>;
}

//! Free-text to coordinate resolution with retry/backoff.

use aoikit_core::{GeocodeError, LatLng};
use std::sync::Arc;

use crate::place_search::PlaceSearch;
use crate::retry::RetryPolicy;

/// Resolves place names through a [`PlaceSearch`] service.
///
/// Transport and HTTP failures are retried per the [`RetryPolicy`]. A
/// well-formed empty answer is final and never retried. When several places
/// match, the first one wins.
#[derive(Clone)]
pub struct Geocoder {
    search: Arc<dyn PlaceSearch>,
    policy: RetryPolicy,
}

impl Geocoder {
    pub fn new(search: Arc<dyn PlaceSearch>, policy: RetryPolicy) -> Self {
        Self { search, policy }
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Resolves `query` to the first matching coordinate.
    pub async fn resolve(&self, query: &str) -> Result<LatLng, GeocodeError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(GeocodeError::EmptyQuery);
        }

        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.search.search(query).await {
                Ok(candidates) => {
                    let first = candidates.into_iter().next().ok_or_else(|| {
                        GeocodeError::NoMatch {
                            query: query.to_string(),
                        }
                    })?;
                    let position = first.position()?;
                    tracing::info!("Resolved '{}' to {} (attempt {})", query, position, attempt);
                    return Ok(position);
                }
                Err(e) if e.is_retryable() => {
                    if !self.policy.allows_retry_after(attempt) {
                        tracing::warn!("Place search for '{}' gave up: {}", query, e);
                        return Err(GeocodeError::TransportFailure {
                            attempts: attempt,
                            reason: e.to_string(),
                        });
                    }
                    let delay = self.policy.delay_after(attempt);
                    tracing::warn!(
                        "Place search attempt {}/{} failed ({}), retrying in {:?}",
                        attempt,
                        self.policy.max_attempts,
                        e,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    return Err(GeocodeError::MalformedResponse {
                        reason: e.to_string(),
                    });
                }
            }
        }
    }
}

impl std::fmt::Debug for Geocoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Geocoder")
            .field("policy", &self.policy)
            .finish()
    }
}

//! # AOIKit Geocoder
//!
//! Turns free-text place names into coordinates.
//!
//! - [`PlaceSearch`] is the seam to the external search service;
//!   [`NominatimClient`] is the HTTP implementation.
//! - [`Geocoder`] adds the retry/backoff policy and first-match selection.
//! - [`SearchController`] drives the search box: it tags every request,
//!   drops responses that were overtaken by a newer search, and removes the
//!   search marker again after its display window.

pub mod geocoder;
pub mod nominatim;
pub mod place_search;
pub mod retry;
pub mod search;

pub use geocoder::Geocoder;
pub use nominatim::NominatimClient;
pub use place_search::{Candidate, PlaceSearch, PlaceSearchError};
pub use retry::RetryPolicy;
pub use search::{SearchController, SearchOutcome};

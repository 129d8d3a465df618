//! Error handling for AOIKit
//!
//! Provides the error taxonomy shared by every layer:
//! - Geocoding errors (place search)
//! - Import errors (shapefile archives)
//!
//! None of these is fatal. Each terminal error is turned into a single
//! user-facing message via `user_message()` and the store stays usable.

use thiserror::Error;

/// Geocoding error type
///
/// Transport problems are retried by the geocoder before one of these is
/// produced, so every variant here is terminal.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeocodeError {
    /// The query text was empty
    #[error("Empty search query")]
    EmptyQuery,

    /// The service answered with zero results
    #[error("No match for '{query}'")]
    NoMatch {
        /// The query that produced no results.
        query: String,
    },

    /// Every attempt failed at the transport or HTTP level
    #[error("Place search failed after {attempts} attempts: {reason}")]
    TransportFailure {
        /// Number of attempts performed.
        attempts: u32,
        /// The last failure observed.
        reason: String,
    },

    /// The service answered with something that is not a candidate list
    #[error("Malformed place search response: {reason}")]
    MalformedResponse {
        /// What was wrong with the response.
        reason: String,
    },
}

impl GeocodeError {
    /// Message shown to the user for this error.
    pub fn user_message(&self) -> &'static str {
        match self {
            GeocodeError::EmptyQuery => "Please enter a location to search",
            GeocodeError::NoMatch { .. } => "Location not found",
            GeocodeError::TransportFailure { .. } => {
                "Location search is unavailable, please try again later"
            }
            GeocodeError::MalformedResponse { .. } => {
                "Location search returned an unexpected response"
            }
        }
    }

    /// True for the "zero results" outcome.
    pub fn is_no_match(&self) -> bool {
        matches!(self, GeocodeError::NoMatch { .. })
    }
}

/// Shapefile import error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ImportError {
    /// The upload is not a readable zip archive
    #[error("Invalid archive: {reason}")]
    InvalidArchive {
        /// The reason the archive could not be opened.
        reason: String,
    },

    /// A required member is absent from the archive
    #[error("Archive is missing a required .{extension} member")]
    MissingMember {
        /// Extension of the missing member, without the dot.
        extension: String,
    },

    /// A member was present but could not be decoded
    #[error("Failed to decode shapefile: {reason}")]
    DecodeFailure {
        /// The reason decoding failed.
        reason: String,
    },
}

impl ImportError {
    /// Message shown to the user for this error.
    pub fn user_message(&self) -> &'static str {
        match self {
            ImportError::MissingMember { .. } => "Zip must contain .shp and .dbf files.",
            ImportError::InvalidArchive { .. } | ImportError::DecodeFailure { .. } => {
                "Error processing shapefile."
            }
        }
    }
}

/// Main error type for AOIKit
#[derive(Error, Debug)]
pub enum Error {
    /// Geocoding error
    #[error(transparent)]
    Geocode(#[from] GeocodeError),

    /// Import error
    #[error(transparent)]
    Import(#[from] ImportError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Message shown to the user for this error.
    pub fn user_message(&self) -> String {
        match self {
            Error::Geocode(e) => e.user_message().to_string(),
            Error::Import(e) => e.user_message().to_string(),
            Error::Io(_) => "Could not read the selected file.".to_string(),
        }
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

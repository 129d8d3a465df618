//! Transient user-facing notifications.

use serde::{Deserialize, Serialize};

use crate::error::{Error, GeocodeError, ImportError};

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

/// A short message for the user, shown once and then discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }

    /// Notification for any AOIKit error.
    pub fn from_error(err: &Error) -> Self {
        err.into()
    }
}

impl From<&GeocodeError> for Notification {
    fn from(err: &GeocodeError) -> Self {
        match err {
            // An empty query is a prompt, not a failure.
            GeocodeError::EmptyQuery => Notification::info(err.user_message()),
            _ => Notification::error(err.user_message()),
        }
    }
}

impl From<&ImportError> for Notification {
    fn from(err: &ImportError) -> Self {
        Notification::error(err.user_message())
    }
}

impl From<&Error> for Notification {
    fn from(err: &Error) -> Self {
        match err {
            Error::Geocode(e) => e.into(),
            Error::Import(e) => e.into(),
            other => Notification::error(other.user_message()),
        }
    }
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_is_informational() {
        let n = Notification::from_error(&Error::Geocode(GeocodeError::EmptyQuery));
        assert_eq!(n.level, NotificationLevel::Info);
        assert_eq!(n.to_string(), "Please enter a location to search");
    }

    #[test]
    fn test_import_failure_is_error() {
        let n = Notification::from_error(&Error::Import(ImportError::InvalidArchive {
            reason: "not a zip".to_string(),
        }));
        assert_eq!(n.level, NotificationLevel::Error);
        assert_eq!(n.message, "Error processing shapefile.");
    }
}

//! Event type definitions for the event bus.
//!
//! Events are cloneable and serializable so they can be logged or replayed.

use serde::{Deserialize, Serialize};

use crate::aoi::AoiId;
use crate::geo::{CornerBounds, LatLng};
use crate::notification::Notification;

/// Root event enum for all application events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AppEvent {
    /// AOI list changes
    Aoi(AoiEvent),
    /// Search text and marker changes
    Search(SearchEvent),
    /// Draw gesture progress
    Draw(DrawEvent),
    /// Message for the user
    Notification(Notification),
}

impl AppEvent {
    /// Get the category of this event
    pub fn category(&self) -> EventCategory {
        match self {
            AppEvent::Aoi(_) => EventCategory::Aoi,
            AppEvent::Search(_) => EventCategory::Search,
            AppEvent::Draw(_) => EventCategory::Draw,
            AppEvent::Notification(_) => EventCategory::Notification,
        }
    }

    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            AppEvent::Aoi(e) => e.description(),
            AppEvent::Search(e) => e.description(),
            AppEvent::Draw(e) => e.description(),
            AppEvent::Notification(n) => format!("Notification: {}", n.message),
        }
    }
}

/// Event category for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    Aoi,
    Search,
    Draw,
    Notification,
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventCategory::Aoi => write!(f, "Aoi"),
            EventCategory::Search => write!(f, "Search"),
            EventCategory::Draw => write!(f, "Draw"),
            EventCategory::Notification => write!(f, "Notification"),
        }
    }
}

/// AOI list events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AoiEvent {
    /// An AOI was appended.
    Added {
        /// Identifier of the new AOI.
        id: AoiId,
        /// Zero-based position in the list.
        index: usize,
    },
    /// The list was emptied.
    Cleared {
        /// How many AOIs were removed.
        removed: usize,
    },
}

impl AoiEvent {
    pub fn description(&self) -> String {
        match self {
            AoiEvent::Added { id, index } => format!("AOI #{} added ({})", index + 1, id),
            AoiEvent::Cleared { removed } => format!("{} AOIs cleared", removed),
        }
    }
}

/// Search state events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SearchEvent {
    /// The search text was replaced.
    QueryChanged {
        /// New search text.
        query: String,
    },
    /// The transient marker moved or was removed.
    MarkerMoved {
        /// New marker position, `None` when hidden.
        position: Option<LatLng>,
    },
}

impl SearchEvent {
    pub fn description(&self) -> String {
        match self {
            SearchEvent::QueryChanged { query } => format!("Search text: '{}'", query),
            SearchEvent::MarkerMoved {
                position: Some(pos),
            } => format!("Marker at {}", pos),
            SearchEvent::MarkerMoved { position: None } => "Marker cleared".to_string(),
        }
    }
}

/// Draw gesture events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawEvent {
    /// Draw mode was switched on or off.
    ModeChanged {
        /// Whether draw mode is now on.
        enabled: bool,
    },
    /// A drag started at `anchor`.
    Started {
        /// Anchor corner.
        anchor: LatLng,
    },
    /// The live preview changed.
    PreviewChanged {
        /// Current preview rectangle.
        preview: CornerBounds,
    },
    /// A rectangle was completed.
    Finished {
        /// Final rectangle.
        bounds: CornerBounds,
    },
    /// An in-progress drag was abandoned.
    Cancelled,
}

impl DrawEvent {
    pub fn description(&self) -> String {
        match self {
            DrawEvent::ModeChanged { enabled } => {
                format!("Draw mode {}", if *enabled { "on" } else { "off" })
            }
            DrawEvent::Started { anchor } => format!("Drag started at {}", anchor),
            DrawEvent::PreviewChanged { .. } => "Preview updated".to_string(),
            DrawEvent::Finished { bounds } => {
                format!("Rectangle {} -> {}", bounds.first, bounds.second)
            }
            DrawEvent::Cancelled => "Drag cancelled".to_string(),
        }
    }
}

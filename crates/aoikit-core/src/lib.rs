//! # AOIKit Core
//!
//! Core types and state for AOIKit.
//! Provides the coordinate and geometry model, the area-of-interest list,
//! the error taxonomy, the event bus and the reactive AOI store that every
//! other crate reads from and writes to.

pub mod aoi;
pub mod error;
pub mod event_bus;
pub mod geo;
pub mod geometry;
pub mod notification;
pub mod store;

pub use aoi::{Aoi, AoiId, AoiKind, AoiShape, BoundsRing, NewAoi};

pub use error::{Error, GeocodeError, ImportError, Result};

pub use event_bus::{
    AoiEvent, AppEvent, DrawEvent, EventBus, EventBusConfig, EventBusError, EventCategory,
    EventFilter, SearchEvent, SubscriptionId,
};

pub use geo::{CornerBounds, LatLng};
pub use geometry::{Feature, FeatureCollection, Geometry, Properties};
pub use notification::{Notification, NotificationLevel};
pub use store::{AoiStore, StoreSnapshot};

//! # AOIKit
//!
//! Area-of-interest selection for map front ends:
//! - Search a place name and jump the map to it
//! - Drag a rectangle on the map
//! - Upload a zipped shapefile
//!
//! Every accepted shape lands in one reactive AOI list that map and sidebar
//! surfaces subscribe to.
//!
//! ## Architecture
//!
//! AOIKit is organized as a workspace with multiple crates:
//!
//! 1. **aoikit-core** - Coordinates, AOI model, event bus, AOI store, errors
//! 2. **aoikit-geocoder** - Place search client, retry policy, search controller
//! 3. **aoikit-importer** - Zipped shapefile to GeoJSON feature collection
//! 4. **aoikit-map** - Draw controller, map surface contract, map view
//! 5. **aoikit-settings** - Configuration file handling
//! 6. **aoikit** - Session orchestration and logging setup

pub mod session;
pub mod sidebar;

pub use aoikit_core::{
    Aoi, AoiEvent, AoiId, AoiKind, AoiStore, AppEvent, CornerBounds, DrawEvent, Error, EventBus,
    EventCategory, EventFilter, Feature, FeatureCollection, GeocodeError, Geometry, ImportError,
    LatLng, NewAoi, Notification, NotificationLevel, Result, SearchEvent, StoreSnapshot,
};
pub use aoikit_geocoder::{
    Candidate, Geocoder, NominatimClient, PlaceSearch, PlaceSearchError, RetryPolicy,
    SearchController, SearchOutcome,
};
pub use aoikit_importer::{aoi_name_from_file_name, ShapefileImporter};
pub use aoikit_map::{
    Camera, DrawController, DrawState, HeadlessSurface, MapScene, MapSurface, MapView, Overlay,
};
pub use aoikit_settings::{Config, GeocoderSettings, MapSettings, SearchSettings, SettingsError};

pub use session::{AoiSession, UPLOAD_SUCCESS_MESSAGE};
pub use sidebar::{AoiListItem, SidebarModel, EMPTY_LIST_HINT};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human readable, multi-line.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    init_logging_with(LogFormat::Pretty)
}

/// Initialize logging in the given format.
///
/// Fails if a global subscriber is already installed.
pub fn init_logging_with(format: LogFormat) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    match format {
        LogFormat::Pretty => {
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stdout)
                .with_target(true)
                .with_level(true)
                .with_thread_names(true)
                .with_line_number(true)
                .pretty();

            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()?;
        }
        LogFormat::Json => {
            let fmt_layer = fmt::layer()
                .json()
                .with_writer(std::io::stdout)
                .with_target(true)
                .with_current_span(false);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()?;
        }
    }

    tracing::debug!("AOIKit {} (built {})", VERSION, BUILD_DATE);
    Ok(())
}

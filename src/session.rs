//! One user session: the store plus the search, draw and upload flows that
//! write to it.

use aoikit_core::{
    AoiId, AoiStore, AppEvent, CornerBounds, EventBus, ImportError, LatLng, NewAoi, Notification,
};
use aoikit_geocoder::{
    Geocoder, NominatimClient, PlaceSearch, PlaceSearchError, RetryPolicy, SearchController,
    SearchOutcome,
};
use aoikit_importer::ShapefileImporter;
use aoikit_map::{DrawController, MapSurface, MapView};
use aoikit_settings::Config;
use parking_lot::Mutex;
use std::path::Path;
use std::sync::Arc;

use crate::sidebar::SidebarModel;

/// Shown after a shapefile became an AOI.
pub const UPLOAD_SUCCESS_MESSAGE: &str = "Shapefile uploaded successfully!";

pub struct AoiSession {
    config: Config,
    store: Arc<AoiStore>,
    search: Arc<SearchController>,
    draw: Mutex<DrawController>,
    importer: ShapefileImporter,
    view: Mutex<Option<Arc<MapView>>>,
}

impl AoiSession {
    /// Creates a session that geocodes through the configured HTTP endpoint.
    pub fn new(config: Config) -> Result<Self, PlaceSearchError> {
        let client = NominatimClient::new(&config.geocoder)?;
        Ok(Self::with_place_search(config, Arc::new(client)))
    }

    /// Creates a session on top of any place search service.
    pub fn with_place_search(config: Config, place_search: Arc<dyn PlaceSearch>) -> Self {
        let store = Arc::new(AoiStore::new(Arc::new(EventBus::new())));
        let geocoder = Geocoder::new(place_search, RetryPolicy::from_settings(&config.geocoder));
        let marker_display = Some(config.search.marker_display());
        let search = SearchController::new(geocoder, store.clone(), marker_display);

        tracing::info!(
            "AOI session started (geocoder: {}, {} attempts)",
            config.geocoder.endpoint,
            config.geocoder.max_attempts
        );

        Self {
            config,
            store,
            search,
            draw: Mutex::new(DrawController::new()),
            importer: ShapefileImporter::new(),
            view: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &Arc<AoiStore> {
        &self.store
    }

    pub fn event_bus(&self) -> &Arc<EventBus> {
        self.store.event_bus()
    }

    /// Connects a map widget. A previously attached one is detached.
    pub fn attach_surface(&self, surface: Arc<dyn MapSurface>) -> Arc<MapView> {
        let view = MapView::attach(self.store.clone(), surface, self.config.map.clone());
        if let Some(previous) = self.view.lock().replace(view.clone()) {
            previous.detach();
        }
        view
    }

    pub fn map_view(&self) -> Option<Arc<MapView>> {
        self.view.lock().clone()
    }

    // Search

    pub fn set_search_text(&self, text: impl Into<String>) {
        self.store.set_search_location(text);
    }

    /// Searches for the current search text.
    pub async fn search(&self) -> SearchOutcome {
        self.search.search().await
    }

    /// Replaces the search text and searches for it.
    pub async fn search_for(&self, query: impl Into<String>) -> SearchOutcome {
        self.search.search_for(query).await
    }

    // Draw

    pub fn is_drawing(&self) -> bool {
        self.draw.lock().is_enabled()
    }

    /// Flips draw mode. Returns the new state.
    pub fn toggle_draw(&self) -> bool {
        self.with_draw(DrawController::toggle)
    }

    pub fn set_drawing(&self, enabled: bool) {
        self.with_draw(|draw| draw.set_enabled(enabled));
    }

    pub fn pointer_down(&self, at: LatLng) -> bool {
        self.with_draw(|draw| draw.pointer_down(at))
    }

    pub fn pointer_move(&self, at: LatLng) -> Option<CornerBounds> {
        self.with_draw(|draw| draw.pointer_move(at))
    }

    /// Completes a drag. The rectangle becomes a new AOI, zero-area ones
    /// included, and draw mode is switched off.
    pub fn pointer_up(&self, at: LatLng) -> Option<AoiId> {
        let bounds = self.with_draw(|draw| draw.pointer_up(at))?;
        if bounds.is_degenerate() {
            tracing::debug!("Accepting zero-area rectangle at {}", bounds.first);
        }
        let id = self.store.add_aoi(NewAoi::new(bounds));
        self.set_drawing(false);
        Some(id)
    }

    // Upload

    /// Imports a zipped shapefile as a new AOI named after the file.
    ///
    /// The outcome is also published as a notification.
    pub fn upload_shapefile(&self, file_name: &str, archive: &[u8]) -> Result<AoiId, ImportError> {
        match self.importer.import_upload(file_name, archive) {
            Ok(request) => {
                let id = self.store.add_aoi(request);
                self.notify(Notification::success(UPLOAD_SUCCESS_MESSAGE));
                Ok(id)
            }
            Err(e) => {
                tracing::warn!("Shapefile upload '{}' failed: {}", file_name, e);
                self.notify(Notification::from(&e));
                Err(e)
            }
        }
    }

    /// Reads a zipped shapefile from disk and uploads it.
    pub fn upload_path(&self, path: &Path) -> aoikit_core::Result<AoiId> {
        let bytes = std::fs::read(path).map_err(|e| {
            let err = aoikit_core::Error::from(e);
            self.notify(Notification::from_error(&err));
            err
        })?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(self.upload_shapefile(&file_name, &bytes)?)
    }

    // List

    pub fn clear_aois(&self) -> usize {
        self.store.clear_aois()
    }

    /// Sidebar contents for the current state.
    pub fn sidebar(&self) -> SidebarModel {
        SidebarModel::new(&self.store.snapshot(), self.is_drawing())
    }

    /// Runs `f` on the draw controller, then publishes the events it queued
    /// after the lock is released so handlers may call back into the session.
    fn with_draw<R>(&self, f: impl FnOnce(&mut DrawController) -> R) -> R {
        let (result, events) = {
            let mut draw = self.draw.lock();
            let result = f(&mut *draw);
            (result, draw.take_events())
        };
        for event in events {
            let _ = self.store.event_bus().publish(AppEvent::Draw(event));
        }
        result
    }

    fn notify(&self, notification: Notification) {
        let _ = self
            .store
            .event_bus()
            .publish(AppEvent::Notification(notification));
    }
}

impl std::fmt::Debug for AoiSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AoiSession")
            .field("aois", &self.store.aoi_count())
            .field("drawing", &self.is_drawing())
            .field("search", &self.search)
            .finish()
    }
}

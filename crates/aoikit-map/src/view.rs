//! Store-driven map view.
//!
//! Subscribes to store and draw events and turns each into surface calls:
//! a new marker flies the camera to it, a drag suspends panning, and every
//! visible change re-renders the whole scene from a fresh snapshot.

use aoikit_core::{
    AoiStore, AppEvent, CornerBounds, DrawEvent, EventCategory, EventFilter, SearchEvent,
    SubscriptionId,
};
use aoikit_settings::MapSettings;
use parking_lot::Mutex;
use std::sync::Arc;

use crate::scene::{Camera, MapScene};
use crate::surface::MapSurface;

#[derive(Debug)]
struct ViewState {
    camera: Camera,
    preview: Option<CornerBounds>,
}

pub struct MapView {
    store: Arc<AoiStore>,
    surface: Arc<dyn MapSurface>,
    settings: MapSettings,
    state: Mutex<ViewState>,
    subscription: Mutex<Option<SubscriptionId>>,
}

impl MapView {
    /// Connects `surface` to `store` and renders the first frame.
    ///
    /// The camera starts on the search marker if one is showing, otherwise
    /// on the configured default center and zoom.
    pub fn attach(
        store: Arc<AoiStore>,
        surface: Arc<dyn MapSurface>,
        settings: MapSettings,
    ) -> Arc<Self> {
        let camera = match store.marker_position() {
            Some(marker) => Camera::new(marker, settings.fly_to_zoom),
            None => Camera::new(settings.default_center, settings.default_zoom),
        };

        let view = Arc::new(Self {
            store,
            surface,
            settings,
            state: Mutex::new(ViewState {
                camera,
                preview: None,
            }),
            subscription: Mutex::new(None),
        });

        let weak = Arc::downgrade(&view);
        let id = view.store.event_bus().subscribe(
            EventFilter::Categories(vec![
                EventCategory::Aoi,
                EventCategory::Search,
                EventCategory::Draw,
            ]),
            move |event| {
                if let Some(view) = weak.upgrade() {
                    view.on_event(event);
                }
            },
        );
        *view.subscription.lock() = Some(id);
        tracing::debug!("Map view attached ({})", id);

        view.refresh();
        view
    }

    pub fn camera(&self) -> Camera {
        self.state.lock().camera
    }

    pub fn settings(&self) -> &MapSettings {
        &self.settings
    }

    /// Scene for the current store state.
    pub fn scene(&self) -> MapScene {
        let (camera, preview) = {
            let state = self.state.lock();
            (state.camera, state.preview)
        };
        MapScene::build(camera, &self.settings.tile_url, &self.store.snapshot(), preview)
    }

    /// Re-renders the surface.
    pub fn refresh(&self) {
        let scene = self.scene();
        self.surface.render(&scene);
    }

    /// Stops following the store. Also done on drop.
    pub fn detach(&self) {
        if let Some(id) = self.subscription.lock().take() {
            self.store.unsubscribe(id);
            tracing::debug!("Map view detached ({})", id);
        }
    }

    fn on_event(&self, event: &AppEvent) {
        match event {
            AppEvent::Search(SearchEvent::QueryChanged { .. }) => {}
            AppEvent::Search(SearchEvent::MarkerMoved {
                position: Some(marker),
            }) => {
                let zoom = self.settings.fly_to_zoom;
                self.state.lock().camera = Camera::new(*marker, zoom);
                self.surface
                    .fly_to(*marker, zoom, self.settings.fly_duration());
                self.refresh();
            }
            AppEvent::Draw(DrawEvent::Started { .. }) => {
                self.surface.set_panning(false);
            }
            AppEvent::Draw(DrawEvent::PreviewChanged { preview }) => {
                self.state.lock().preview = Some(*preview);
                self.refresh();
            }
            AppEvent::Draw(DrawEvent::Finished { .. }) | AppEvent::Draw(DrawEvent::Cancelled) => {
                self.state.lock().preview = None;
                self.surface.set_panning(true);
                self.refresh();
            }
            AppEvent::Draw(DrawEvent::ModeChanged { .. }) => {}
            _ => self.refresh(),
        }
    }
}

impl Drop for MapView {
    fn drop(&mut self) {
        self.detach();
    }
}

impl std::fmt::Debug for MapView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapView")
            .field("camera", &self.camera())
            .field("subscription", &*self.subscription.lock())
            .finish()
    }
}

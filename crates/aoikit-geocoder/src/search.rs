//! Search box controller.
//!
//! Each search takes a new generation number before it awaits the geocoder.
//! When the answer arrives the generation is compared again; if a newer
//! search started in the meantime the answer is dropped, so a slow response
//! can never move the marker back to an older place.
//!
//! A found place is shown for a fixed window and then removed. The removal
//! timer belongs to the search that placed the marker and is only replaced
//! when a later search places a new one; a failed search leaves it running.

use aoikit_core::{AoiStore, AppEvent, GeocodeError, LatLng, Notification};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::geocoder::Geocoder;

/// What became of one search.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// The marker now shows this position.
    Found(LatLng),
    /// The search failed; the user has been notified.
    Failed(GeocodeError),
    /// A newer search started before this one finished; nothing changed.
    Superseded,
}

pub struct SearchController {
    geocoder: Geocoder,
    store: Arc<AoiStore>,
    generation: AtomicU64,
    /// Generation of the search that placed the current marker.
    marker_owner: AtomicU64,
    marker_display: Option<Duration>,
    marker_timer: Mutex<Option<JoinHandle<()>>>,
}

impl SearchController {
    /// `marker_display` of `None` keeps the marker until the next search.
    pub fn new(
        geocoder: Geocoder,
        store: Arc<AoiStore>,
        marker_display: Option<Duration>,
    ) -> Arc<Self> {
        Arc::new(Self {
            geocoder,
            store,
            generation: AtomicU64::new(0),
            marker_owner: AtomicU64::new(0),
            marker_display,
            marker_timer: Mutex::new(None),
        })
    }

    /// Generation of the most recent search.
    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Replaces the store's search text and searches for it.
    pub async fn search_for(self: &Arc<Self>, query: impl Into<String>) -> SearchOutcome {
        self.store.set_search_location(query);
        self.search().await
    }

    /// Searches for the store's current search text.
    pub async fn search(self: &Arc<Self>) -> SearchOutcome {
        let query = self.store.search_location();
        if query.trim().is_empty() {
            return self.fail(GeocodeError::EmptyQuery);
        }

        let tag = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!("Search #{} for '{}'", tag, query);

        let result = self.geocoder.resolve(&query).await;

        if self.current_generation() != tag {
            tracing::debug!("Search #{} superseded, dropping its result", tag);
            return SearchOutcome::Superseded;
        }

        match result {
            Ok(position) => {
                self.marker_owner.store(tag, Ordering::SeqCst);
                self.store.set_marker_position(Some(position));
                self.schedule_marker_expiry(tag);
                SearchOutcome::Found(position)
            }
            Err(e) => self.fail(e),
        }
    }

    fn fail(&self, error: GeocodeError) -> SearchOutcome {
        tracing::info!("Search failed: {}", error);
        let _ = self
            .store
            .event_bus()
            .publish(AppEvent::Notification(Notification::from(&error)));
        SearchOutcome::Failed(error)
    }

    fn cancel_marker_timer(&self) {
        if let Some(timer) = self.marker_timer.lock().take() {
            timer.abort();
        }
    }

    fn schedule_marker_expiry(self: &Arc<Self>, tag: u64) {
        let Some(display) = self.marker_display else {
            return;
        };

        let controller = Arc::downgrade(self);
        let timer = tokio::spawn(async move {
            tokio::time::sleep(display).await;
            if let Some(controller) = controller.upgrade() {
                if controller.marker_owner.load(Ordering::SeqCst) == tag {
                    tracing::debug!("Search marker #{} expired", tag);
                    controller.store.set_marker_position(None);
                }
            }
        });

        if let Some(previous) = self.marker_timer.lock().replace(timer) {
            previous.abort();
        }
    }
}

impl Drop for SearchController {
    fn drop(&mut self) {
        self.cancel_marker_timer();
    }
}

impl std::fmt::Debug for SearchController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchController")
            .field("generation", &self.current_generation())
            .field("marker_display", &self.marker_display)
            .finish()
    }
}

//! Reactive AOI store.
//!
//! Single source of truth for the confirmed AOI list, the search text and the
//! transient search marker. Every mutation is applied under a short write
//! lock, the lock is released, and then exactly one event is published on the
//! injected [`EventBus`]. Subscribers can therefore call [`AoiStore::snapshot`]
//! from inside their handler and will see the state that produced the event.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::sync::Arc;

use crate::aoi::{Aoi, AoiId, NewAoi};
use crate::event_bus::{AoiEvent, AppEvent, EventBus, EventFilter, SearchEvent, SubscriptionId};
use crate::geo::LatLng;

/// Point-in-time copy of the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreSnapshot {
    /// Confirmed AOIs in insertion order.
    pub aois: Vec<Aoi>,
    /// Current search text.
    pub search_location: String,
    /// Last geocoded point, while it is on display.
    pub marker_position: Option<LatLng>,
}

#[derive(Debug, Default)]
struct StoreState {
    aois: Vec<Aoi>,
    search_location: String,
    marker_position: Option<LatLng>,
    last_created_at: Option<DateTime<Utc>>,
}

/// Session-lifetime state container.
#[derive(Debug)]
pub struct AoiStore {
    state: RwLock<StoreState>,
    bus: Arc<EventBus>,
}

impl AoiStore {
    /// Creates an empty store that publishes on `bus`.
    pub fn new(bus: Arc<EventBus>) -> Self {
        Self {
            state: RwLock::new(StoreState::default()),
            bus,
        }
    }

    /// The bus this store publishes on.
    pub fn event_bus(&self) -> &Arc<EventBus> {
        &self.bus
    }

    /// Appends a new AOI and returns its identifier.
    ///
    /// Identical shapes are accepted as separate entries. The creation time
    /// is clamped so that it never precedes the previous entry's, even if the
    /// wall clock steps backwards.
    pub fn add_aoi(&self, request: NewAoi) -> AoiId {
        let (id, index) = {
            let mut state = self.state.write();
            let now = Utc::now();
            let created_at = match state.last_created_at {
                Some(last) if last > now => last,
                _ => now,
            };
            state.last_created_at = Some(created_at);

            let aoi = Aoi::from_request(request, created_at);
            let id = aoi.id();
            state.aois.push(aoi);
            (id, state.aois.len() - 1)
        };

        tracing::info!("AOI #{} added ({})", index + 1, id);
        self.emit(AppEvent::Aoi(AoiEvent::Added { id, index }));
        id
    }

    /// Removes every AOI. Returns how many were removed.
    pub fn clear_aois(&self) -> usize {
        let removed = {
            let mut state = self.state.write();
            let removed = state.aois.len();
            state.aois.clear();
            removed
        };

        tracing::info!("Cleared {} AOIs", removed);
        self.emit(AppEvent::Aoi(AoiEvent::Cleared { removed }));
        removed
    }

    /// Replaces the search text.
    pub fn set_search_location(&self, text: impl Into<String>) {
        let query = text.into();
        self.state.write().search_location = query.clone();
        self.emit(AppEvent::Search(SearchEvent::QueryChanged { query }));
    }

    /// Replaces the marker position.
    pub fn set_marker_position(&self, position: Option<LatLng>) {
        self.state.write().marker_position = position;
        tracing::debug!(
            "Marker {}",
            position.map_or_else(|| "cleared".to_string(), |p| format!("at {}", p))
        );
        self.emit(AppEvent::Search(SearchEvent::MarkerMoved { position }));
    }

    /// Copies the whole state.
    pub fn snapshot(&self) -> StoreSnapshot {
        let state = self.state.read();
        StoreSnapshot {
            aois: state.aois.clone(),
            search_location: state.search_location.clone(),
            marker_position: state.marker_position,
        }
    }

    /// Confirmed AOIs in insertion order.
    pub fn aois(&self) -> Vec<Aoi> {
        self.state.read().aois.clone()
    }

    pub fn aoi_count(&self) -> usize {
        self.state.read().aois.len()
    }

    pub fn search_location(&self) -> String {
        self.state.read().search_location.clone()
    }

    pub fn marker_position(&self) -> Option<LatLng> {
        self.state.read().marker_position
    }

    /// Registers `handler` for every store change.
    ///
    /// The handler receives the event and a fresh snapshot taken after the
    /// mutation was applied.
    pub fn subscribe<F>(self: &Arc<Self>, handler: F) -> SubscriptionId
    where
        F: Fn(&AppEvent, &StoreSnapshot) + Send + Sync + 'static,
    {
        let store = Arc::downgrade(self);
        self.bus.subscribe(EventFilter::store(), move |event| {
            if let Some(store) = store.upgrade() {
                handler(event, &store.snapshot());
            }
        })
    }

    /// Removes a subscription made with [`subscribe`](Self::subscribe).
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    fn emit(&self, event: AppEvent) {
        // Nobody listening is a normal state for a headless store.
        let _ = self.bus.publish(event);
    }
}

impl Default for AoiStore {
    fn default() -> Self {
        Self::new(Arc::new(EventBus::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::CornerBounds;
    use crate::geometry::FeatureCollection;
    use parking_lot::Mutex;

    fn rect(a: f64, b: f64) -> NewAoi {
        NewAoi::new(CornerBounds::new(LatLng::new(a, a), LatLng::new(b, b)))
    }

    #[test]
    fn test_add_preserves_order_and_ids() {
        let store = AoiStore::default();
        let first = store.add_aoi(rect(0.0, 1.0));
        let second = store.add_aoi(rect(0.0, 1.0));
        let third = store.add_aoi(NewAoi::new(FeatureCollection::new()).with_name("upload"));

        let aois = store.aois();
        assert_eq!(
            aois.iter().map(Aoi::id).collect::<Vec<_>>(),
            vec![first, second, third]
        );
        assert_ne!(first, second);
        assert!(aois.windows(2).all(|w| w[0].created_at() <= w[1].created_at()));
    }

    #[test]
    fn test_clear_empties_list() {
        let store = AoiStore::default();
        store.add_aoi(rect(0.0, 1.0));
        store.add_aoi(rect(2.0, 3.0));
        assert_eq!(store.clear_aois(), 2);
        assert!(store.snapshot().aois.is_empty());
        assert_eq!(store.clear_aois(), 0);
    }

    #[test]
    fn test_clear_keeps_search_state() {
        let store = AoiStore::default();
        store.set_search_location("Cologne");
        store.set_marker_position(Some(LatLng::new(50.9, 6.95)));
        store.clear_aois();
        let snap = store.snapshot();
        assert_eq!(snap.search_location, "Cologne");
        assert_eq!(snap.marker_position, Some(LatLng::new(50.9, 6.95)));
    }

    #[test]
    fn test_every_mutation_notifies_with_fresh_snapshot() {
        let store = Arc::new(AoiStore::default());
        let seen = Arc::new(Mutex::new(Vec::new()));
        let s = seen.clone();
        let _sub = store.subscribe(move |event, snapshot| {
            s.lock().push((event.clone(), snapshot.aois.len()));
        });

        store.set_search_location("Bonn");
        store.set_search_location("Bonn");
        store.add_aoi(rect(0.0, 1.0));
        store.set_marker_position(None);
        store.clear_aois();

        let seen = seen.lock();
        assert_eq!(seen.len(), 5);
        assert!(matches!(seen[2].0, AppEvent::Aoi(AoiEvent::Added { index: 0, .. })));
        assert_eq!(seen[2].1, 1);
        assert_eq!(seen[4].1, 0);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let store = Arc::new(AoiStore::default());
        let count = Arc::new(Mutex::new(0));
        let c = count.clone();
        let id = store.subscribe(move |_, _| *c.lock() += 1);
        store.add_aoi(rect(0.0, 1.0));
        assert!(store.unsubscribe(id));
        store.add_aoi(rect(0.0, 1.0));
        assert_eq!(*count.lock(), 1);
    }
}

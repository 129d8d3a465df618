//! Rendering backend contract.

use aoikit_core::LatLng;
use parking_lot::Mutex;
use std::time::Duration;

use crate::scene::MapScene;

/// A map widget that can draw a [`MapScene`].
///
/// Calls arrive from whichever thread mutated the store; implementations
/// hand them over to their UI thread as needed.
pub trait MapSurface: Send + Sync {
    /// Animates the camera to `center` at `zoom`.
    fn fly_to(&self, center: LatLng, zoom: u8, duration: Duration);

    /// Enables or suspends drag-to-pan.
    fn set_panning(&self, enabled: bool);

    /// Replaces everything drawn above the tiles.
    fn render(&self, scene: &MapScene);
}

/// A call received by a [`HeadlessSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    FlyTo {
        center: LatLng,
        zoom: u8,
        duration: Duration,
    },
    SetPanning(bool),
    Render,
}

#[derive(Debug)]
struct HeadlessState {
    calls: Vec<SurfaceCall>,
    last_scene: Option<MapScene>,
    panning: bool,
}

/// Surface without a screen. Keeps the last scene and a log of calls, which
/// is enough to drive the session from scripts and tests.
#[derive(Debug)]
pub struct HeadlessSurface {
    state: Mutex<HeadlessState>,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(HeadlessState {
                calls: Vec::new(),
                last_scene: None,
                panning: true,
            }),
        }
    }

    pub fn last_scene(&self) -> Option<MapScene> {
        self.state.lock().last_scene.clone()
    }

    pub fn panning_enabled(&self) -> bool {
        self.state.lock().panning
    }

    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.state.lock().calls.clone()
    }

    /// Only the camera moves, in call order.
    pub fn flights(&self) -> Vec<(LatLng, u8)> {
        self.state
            .lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                SurfaceCall::FlyTo { center, zoom, .. } => Some((*center, *zoom)),
                _ => None,
            })
            .collect()
    }
}

impl Default for HeadlessSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl MapSurface for HeadlessSurface {
    fn fly_to(&self, center: LatLng, zoom: u8, duration: Duration) {
        self.state.lock().calls.push(SurfaceCall::FlyTo {
            center,
            zoom,
            duration,
        });
    }

    fn set_panning(&self, enabled: bool) {
        let mut state = self.state.lock();
        state.panning = enabled;
        state.calls.push(SurfaceCall::SetPanning(enabled));
    }

    fn render(&self, scene: &MapScene) {
        let mut state = self.state.lock();
        state.last_scene = Some(scene.clone());
        state.calls.push(SurfaceCall::Render);
    }
}

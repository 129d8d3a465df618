//! Rectangle drawing state machine.
//!
//! Draw mode is a flag orthogonal to the gesture state. While it is on, a
//! pointer-down anchors a rectangle, pointer-moves update a live preview and
//! the pointer-up completes it. Map panning is off for the duration of a drag
//! and always comes back on, whether the drag finished or was abandoned.
//!
//! The controller does not publish anything itself. Every transition queues
//! a [`DrawEvent`]; the owner drains them with [`DrawController::take_events`]
//! and publishes them once it no longer holds a lock on the controller.

use aoikit_core::{CornerBounds, DrawEvent, LatLng};

/// Gesture state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawState {
    Idle,
    Dragging { anchor: LatLng },
}

#[derive(Debug)]
pub struct DrawController {
    enabled: bool,
    state: DrawState,
    preview: Option<CornerBounds>,
    pending: Vec<DrawEvent>,
}

impl Default for DrawController {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawController {
    pub fn new() -> Self {
        Self {
            enabled: false,
            state: DrawState::Idle,
            preview: None,
            pending: Vec::new(),
        }
    }

    /// Events queued since the last call, oldest first.
    pub fn take_events(&mut self) -> Vec<DrawEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn state(&self) -> DrawState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DrawState::Dragging { .. })
    }

    /// Rectangle currently shown while dragging.
    pub fn preview(&self) -> Option<CornerBounds> {
        self.preview
    }

    /// Background panning is only suspended during a drag.
    pub fn panning_enabled(&self) -> bool {
        !self.is_dragging()
    }

    /// Switches draw mode. Switching it off mid-drag abandons the drag.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled == enabled {
            return;
        }
        if !enabled {
            self.cancel();
        }
        self.enabled = enabled;
        tracing::debug!("Draw mode {}", if enabled { "on" } else { "off" });
        self.emit(DrawEvent::ModeChanged { enabled });
    }

    /// Flips draw mode and returns the new value.
    pub fn toggle(&mut self) -> bool {
        self.set_enabled(!self.enabled);
        self.enabled
    }

    /// Starts a drag at `at`. Returns false when draw mode is off or a drag
    /// is already running.
    pub fn pointer_down(&mut self, at: LatLng) -> bool {
        if !self.enabled || self.is_dragging() {
            return false;
        }
        self.state = DrawState::Dragging { anchor: at };
        self.preview = None;
        self.emit(DrawEvent::Started { anchor: at });
        true
    }

    /// Stretches the preview to `at`.
    pub fn pointer_move(&mut self, at: LatLng) -> Option<CornerBounds> {
        let DrawState::Dragging { anchor } = self.state else {
            return None;
        };
        let preview = CornerBounds::new(anchor, at);
        self.preview = Some(preview);
        self.emit(DrawEvent::PreviewChanged { preview });
        Some(preview)
    }

    /// Completes the drag with `at` as the opposite corner.
    ///
    /// A release without a preceding press does nothing. A release on the
    /// anchor itself still yields a (zero-area) rectangle.
    pub fn pointer_up(&mut self, at: LatLng) -> Option<CornerBounds> {
        let DrawState::Dragging { anchor } = self.state else {
            return None;
        };
        let bounds = CornerBounds::new(anchor, at);
        self.state = DrawState::Idle;
        self.preview = None;
        tracing::debug!("Rectangle drawn: {} -> {}", anchor, at);
        self.emit(DrawEvent::Finished { bounds });
        Some(bounds)
    }

    /// Abandons a running drag, if any.
    pub fn cancel(&mut self) -> bool {
        if !self.is_dragging() {
            return false;
        }
        self.state = DrawState::Idle;
        self.preview = None;
        tracing::debug!("Drag cancelled");
        self.emit(DrawEvent::Cancelled);
        true
    }

    fn emit(&mut self, event: DrawEvent) {
        self.pending.push(event);
    }
}

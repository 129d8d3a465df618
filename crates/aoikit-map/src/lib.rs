//! # AOIKit Map
//!
//! Everything between the AOI store and a map widget:
//! - [`DrawController`]: the rectangle drag state machine
//! - [`MapSurface`]: what a rendering backend has to provide
//! - [`MapView`]: keeps a surface in sync with the store and the draw gesture

pub mod draw;
pub mod scene;
pub mod surface;
pub mod view;

pub use draw::{DrawController, DrawState};
pub use scene::{Camera, MapScene, Overlay};
pub use surface::{HeadlessSurface, MapSurface, SurfaceCall};
pub use view::MapView;

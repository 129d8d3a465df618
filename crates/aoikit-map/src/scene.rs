//! Renderable description of the map.

use aoikit_core::{Aoi, AoiId, CornerBounds, FeatureCollection, LatLng, StoreSnapshot};
use serde::Serialize;

/// Where the map is looking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Camera {
    pub center: LatLng,
    pub zoom: u8,
}

impl Camera {
    pub fn new(center: LatLng, zoom: u8) -> Self {
        Self { center, zoom }
    }
}

/// One layer drawn above the tiles.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Overlay {
    /// A drawn AOI given by two corners.
    Rectangle { id: AoiId, bounds: CornerBounds },
    /// A drawn AOI given as a free ring.
    Ring { id: AoiId, points: Vec<LatLng> },
    /// An imported AOI.
    Features {
        id: AoiId,
        collection: FeatureCollection,
    },
    /// The transient search marker.
    Marker { position: LatLng },
    /// The rectangle being dragged.
    Preview { bounds: CornerBounds },
}

impl Overlay {
    /// Overlay for a confirmed AOI.
    pub fn for_aoi(aoi: &Aoi) -> Overlay {
        if let Some(collection) = aoi.geometry() {
            return Overlay::Features {
                id: aoi.id(),
                collection: collection.clone(),
            };
        }
        match aoi.corner_bounds() {
            Some(bounds) => Overlay::Rectangle {
                id: aoi.id(),
                bounds,
            },
            None => Overlay::Ring {
                id: aoi.id(),
                points: aoi.bounds().to_vec(),
            },
        }
    }

    pub fn is_aoi(&self) -> bool {
        matches!(
            self,
            Overlay::Rectangle { .. } | Overlay::Ring { .. } | Overlay::Features { .. }
        )
    }
}

/// Everything a surface needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapScene {
    pub camera: Camera,
    pub tile_url: String,
    /// AOIs in list order, then the marker, then the preview on top.
    pub overlays: Vec<Overlay>,
}

impl MapScene {
    pub fn build(
        camera: Camera,
        tile_url: &str,
        snapshot: &StoreSnapshot,
        preview: Option<CornerBounds>,
    ) -> Self {
        let mut overlays: Vec<Overlay> = snapshot.aois.iter().map(Overlay::for_aoi).collect();
        if let Some(position) = snapshot.marker_position {
            overlays.push(Overlay::Marker { position });
        }
        if let Some(bounds) = preview {
            overlays.push(Overlay::Preview { bounds });
        }
        Self {
            camera,
            tile_url: tile_url.to_string(),
            overlays,
        }
    }

    pub fn aoi_overlays(&self) -> impl Iterator<Item = &Overlay> {
        self.overlays.iter().filter(|o| o.is_aoi())
    }

    pub fn marker(&self) -> Option<LatLng> {
        self.overlays.iter().find_map(|o| match o {
            Overlay::Marker { position } => Some(*position),
            _ => None,
        })
    }

    pub fn preview(&self) -> Option<CornerBounds> {
        self.overlays.iter().find_map(|o| match o {
            Overlay::Preview { bounds } => Some(*bounds),
            _ => None,
        })
    }
}

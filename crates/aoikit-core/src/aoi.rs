//! Area-of-interest model.
//!
//! An [`Aoi`] is created once by the store and never edited afterwards; the
//! only way to get rid of one is to clear the whole list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geo::{CornerBounds, LatLng};
use crate::geometry::FeatureCollection;

/// Opaque AOI identifier. Fresh for every AOI, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AoiId(Uuid);

impl AoiId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for AoiId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-empty sequence of positions outlining an AOI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundsRing(Vec<LatLng>);

impl BoundsRing {
    /// Wraps `points`, or returns `None` when there are none.
    pub fn new(points: Vec<LatLng>) -> Option<Self> {
        if points.is_empty() {
            None
        } else {
            Some(Self(points))
        }
    }

    /// Positions in order.
    pub fn points(&self) -> &[LatLng] {
        &self.0
    }

    /// Consumes the ring.
    pub fn into_points(self) -> Vec<LatLng> {
        self.0
    }
}

impl From<CornerBounds> for BoundsRing {
    fn from(bounds: CornerBounds) -> Self {
        Self(bounds.corners().to_vec())
    }
}

/// Shape an AOI is created from.
#[derive(Debug, Clone, PartialEq)]
pub enum AoiShape {
    /// Positions drawn on the map.
    Bounds(BoundsRing),
    /// Geometry decoded from an uploaded file.
    Geometry(FeatureCollection),
}

impl From<CornerBounds> for AoiShape {
    fn from(bounds: CornerBounds) -> Self {
        AoiShape::Bounds(bounds.into())
    }
}

impl From<FeatureCollection> for AoiShape {
    fn from(collection: FeatureCollection) -> Self {
        AoiShape::Geometry(collection)
    }
}

/// Input to [`AoiStore::add_aoi`](crate::store::AoiStore::add_aoi).
#[derive(Debug, Clone, PartialEq)]
pub struct NewAoi {
    /// Shape of the new AOI.
    pub shape: AoiShape,
    /// Optional label.
    pub name: Option<String>,
}

impl NewAoi {
    /// Creates an unnamed AOI request.
    pub fn new(shape: impl Into<AoiShape>) -> Self {
        Self {
            shape: shape.into(),
            name: None,
        }
    }

    /// Sets the label.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Where an AOI came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AoiKind {
    /// Drawn on the map.
    Drawn,
    /// Imported from a shapefile.
    Imported,
}

/// A confirmed area of interest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aoi {
    id: AoiId,
    bounds: Vec<LatLng>,
    geometry: Option<FeatureCollection>,
    name: Option<String>,
    created_at: DateTime<Utc>,
}

impl Aoi {
    pub(crate) fn from_request(request: NewAoi, created_at: DateTime<Utc>) -> Self {
        let (bounds, geometry) = match request.shape {
            AoiShape::Bounds(ring) => (ring.into_points(), None),
            AoiShape::Geometry(collection) => (Vec::new(), Some(collection)),
        };
        Self {
            id: AoiId::new(),
            bounds,
            geometry,
            name: request.name,
            created_at,
        }
    }

    pub fn id(&self) -> AoiId {
        self.id
    }

    /// Drawn positions; empty for imported AOIs.
    pub fn bounds(&self) -> &[LatLng] {
        &self.bounds
    }

    /// Imported geometry, if any.
    pub fn geometry(&self) -> Option<&FeatureCollection> {
        self.geometry.as_ref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn kind(&self) -> AoiKind {
        if self.geometry.is_some() {
            AoiKind::Imported
        } else {
            AoiKind::Drawn
        }
    }

    /// Two-corner rectangle when the AOI was drawn as one.
    pub fn corner_bounds(&self) -> Option<CornerBounds> {
        match self.bounds.as_slice() {
            [first, second] => Some(CornerBounds::new(*first, *second)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_ring_rejected() {
        assert!(BoundsRing::new(Vec::new()).is_none());
        assert!(BoundsRing::new(vec![LatLng::new(1.0, 2.0)]).is_some());
    }

    #[test]
    fn test_drawn_aoi_keeps_corners() {
        let bounds = CornerBounds::new(LatLng::new(1.0, 2.0), LatLng::new(3.0, 4.0));
        let aoi = Aoi::from_request(NewAoi::new(bounds), Utc::now());
        assert_eq!(aoi.kind(), AoiKind::Drawn);
        assert_eq!(aoi.corner_bounds(), Some(bounds));
        assert!(aoi.geometry().is_none());
    }

    #[test]
    fn test_imported_aoi_has_empty_bounds() {
        let aoi = Aoi::from_request(
            NewAoi::new(FeatureCollection::new()).with_name("parcels"),
            Utc::now(),
        );
        assert_eq!(aoi.kind(), AoiKind::Imported);
        assert!(aoi.bounds().is_empty());
        assert_eq!(aoi.name(), Some("parcels"));
    }
}

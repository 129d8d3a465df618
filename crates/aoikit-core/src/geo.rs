//! Geographic coordinate types.

use serde::{Deserialize, Serialize};

/// A WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    /// Latitude in degrees, positive north.
    pub lat: f64,
    /// Longitude in degrees, positive east.
    pub lng: f64,
}

impl LatLng {
    /// Creates a new position.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Returns the position as a `[lat, lng]` pair.
    pub fn to_pair(self) -> [f64; 2] {
        [self.lat, self.lng]
    }

    /// Returns true when both components are finite and inside the WGS84 range.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

impl From<(f64, f64)> for LatLng {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

impl From<[f64; 2]> for LatLng {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self::new(lat, lng)
    }
}

impl std::fmt::Display for LatLng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.5}, {:.5}", self.lat, self.lng)
    }
}

/// Axis-aligned rectangle given by two opposite corners.
///
/// The corners keep the order they were produced in: `first` is where a drag
/// started, `second` where it ended. Nothing is normalised, so a zero-length
/// drag yields two identical corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CornerBounds {
    /// Corner where the gesture started.
    pub first: LatLng,
    /// Opposite corner.
    pub second: LatLng,
}

impl CornerBounds {
    /// Creates bounds from two opposite corners.
    pub fn new(first: LatLng, second: LatLng) -> Self {
        Self { first, second }
    }

    /// Returns both corners in order.
    pub fn corners(&self) -> [LatLng; 2] {
        [self.first, self.second]
    }

    /// Returns both corners as `[[lat, lng], [lat, lng]]`.
    pub fn to_pairs(&self) -> [[f64; 2]; 2] {
        [self.first.to_pair(), self.second.to_pair()]
    }

    /// True when the rectangle has no area.
    pub fn is_degenerate(&self) -> bool {
        self.first.lat == self.second.lat || self.first.lng == self.second.lng
    }

    /// South-west corner after normalisation.
    pub fn south_west(&self) -> LatLng {
        LatLng::new(
            self.first.lat.min(self.second.lat),
            self.first.lng.min(self.second.lng),
        )
    }

    /// North-east corner after normalisation.
    pub fn north_east(&self) -> LatLng {
        LatLng::new(
            self.first.lat.max(self.second.lat),
            self.first.lng.max(self.second.lng),
        )
    }

    /// Closed five-point ring, counter-clockwise from the south-west corner.
    pub fn ring(&self) -> Vec<LatLng> {
        let sw = self.south_west();
        let ne = self.north_east();
        vec![
            sw,
            LatLng::new(sw.lat, ne.lng),
            ne,
            LatLng::new(ne.lat, sw.lng),
            sw,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corner_order_is_preserved() {
        let bounds = CornerBounds::new(LatLng::new(50.0, 50.0), LatLng::new(150.0, 120.0));
        assert_eq!(bounds.to_pairs(), [[50.0, 50.0], [150.0, 120.0]]);
    }

    #[test]
    fn test_ring_is_closed_and_normalised() {
        let bounds = CornerBounds::new(LatLng::new(2.0, 4.0), LatLng::new(1.0, 3.0));
        let ring = bounds.ring();
        assert_eq!(ring.len(), 5);
        assert_eq!(ring.first(), ring.last());
        assert_eq!(ring[0], LatLng::new(1.0, 3.0));
        assert_eq!(ring[2], LatLng::new(2.0, 4.0));
    }

    #[test]
    fn test_degenerate_detection() {
        let p = LatLng::new(100.0, 100.0);
        assert!(CornerBounds::new(p, p).is_degenerate());
        assert!(!CornerBounds::new(p, LatLng::new(101.0, 99.0)).is_degenerate());
    }

    #[test]
    fn test_validity_range() {
        assert!(LatLng::new(50.96, 6.95).is_valid());
        assert!(!LatLng::new(91.0, 0.0).is_valid());
        assert!(!LatLng::new(0.0, f64::NAN).is_valid());
    }
}

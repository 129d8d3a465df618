//! GeoJSON-compatible geometry model.
//!
//! Imported shapes are kept as a feature collection that serialises to
//! standard GeoJSON, so a rendering surface can hand them to any map library
//! without conversion. Positions follow GeoJSON order: `[longitude, latitude]`.

use serde::{Deserialize, Serialize};

/// Free-form attribute table of a feature.
pub type Properties = serde_json::Map<String, serde_json::Value>;

/// A single GeoJSON position, `[x, y]`.
pub type Position = [f64; 2];

/// Geometry of a single feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    /// A single position.
    Point(Position),
    /// Unconnected positions.
    MultiPoint(Vec<Position>),
    /// An open line.
    LineString(Vec<Position>),
    /// Several open lines.
    MultiLineString(Vec<Vec<Position>>),
    /// Outer ring followed by its holes.
    Polygon(Vec<Vec<Position>>),
    /// Several polygons.
    MultiPolygon(Vec<Vec<Vec<Position>>>),
}

/// A geometry together with its attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct Feature {
    /// Shape of the feature; `None` for null records.
    pub geometry: Option<Geometry>,
    /// Attribute values keyed by field name.
    #[serde(default)]
    pub properties: Properties,
}

impl Feature {
    /// Creates a feature without attributes.
    pub fn new(geometry: Option<Geometry>) -> Self {
        Self {
            geometry,
            properties: Properties::new(),
        }
    }

    /// Attaches an attribute table.
    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }
}

/// Ordered list of features.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct FeatureCollection {
    /// Features in record order.
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a feature.
    pub fn push(&mut self, feature: Feature) {
        self.features.push(feature);
    }

    /// Number of features.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// True when there are no features.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Iterates the features in record order.
    pub fn iter(&self) -> std::slice::Iter<'_, Feature> {
        self.features.iter()
    }

    /// Serialises the collection as a GeoJSON string.
    pub fn to_geojson(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl FromIterator<Feature> for FeatureCollection {
    fn from_iter<I: IntoIterator<Item = Feature>>(iter: I) -> Self {
        Self {
            features: iter.into_iter().collect(),
        }
    }
}

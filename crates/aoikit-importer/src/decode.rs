//! Shapefile record decoding.
//!
//! The `.shp` member supplies one shape per record and the `.dbf` member one
//! attribute row per record; both are read in full and zipped together in
//! file order.

use aoikit_core::geometry::Position;
use aoikit_core::{Feature, FeatureCollection, Geometry, ImportError, Properties};
use serde_json::Value;
use shapefile::dbase::{self, FieldValue};
use shapefile::{Point, PointM, PointZ, PolygonRing, Shape, ShapeReader};
use std::io::Cursor;

fn decode_failure(context: &str, err: impl std::fmt::Display) -> ImportError {
    ImportError::DecodeFailure {
        reason: format!("{}: {}", context, err),
    }
}

/// Planar x/y access across the shapefile point flavours.
trait PlanarPoint {
    fn position(&self) -> Position;
}

impl PlanarPoint for Point {
    fn position(&self) -> Position {
        [self.x, self.y]
    }
}

impl PlanarPoint for PointM {
    fn position(&self) -> Position {
        [self.x, self.y]
    }
}

impl PlanarPoint for PointZ {
    fn position(&self) -> Position {
        [self.x, self.y]
    }
}

fn positions<P: PlanarPoint>(points: &[P]) -> Vec<Position> {
    points.iter().map(PlanarPoint::position).collect()
}

/// Groups rings into polygons: every outer ring opens a polygon and the
/// inner rings that follow it become its holes.
fn polygon<P: PlanarPoint>(rings: &[PolygonRing<P>]) -> Option<Geometry> {
    let mut polygons: Vec<Vec<Vec<Position>>> = Vec::new();
    for ring in rings {
        match ring {
            PolygonRing::Outer(points) => polygons.push(vec![positions(points)]),
            PolygonRing::Inner(points) => match polygons.last_mut() {
                Some(current) => current.push(positions(points)),
                // A hole with no shell is kept as a shell of its own.
                None => polygons.push(vec![positions(points)]),
            },
        }
    }

    match polygons.len() {
        0 => None,
        1 => polygons.pop().map(Geometry::Polygon),
        _ => Some(Geometry::MultiPolygon(polygons)),
    }
}

fn polyline<P: PlanarPoint>(parts: &[Vec<P>]) -> Option<Geometry> {
    match parts {
        [] => None,
        [single] => Some(Geometry::LineString(positions(single))),
        _ => Some(Geometry::MultiLineString(
            parts.iter().map(|part| positions(part)).collect(),
        )),
    }
}

fn shape_geometry(shape: Shape) -> Result<Option<Geometry>, ImportError> {
    let geometry = match shape {
        Shape::NullShape => None,
        Shape::Point(p) => Some(Geometry::Point(p.position())),
        Shape::PointM(p) => Some(Geometry::Point(p.position())),
        Shape::PointZ(p) => Some(Geometry::Point(p.position())),
        Shape::Multipoint(mp) => Some(Geometry::MultiPoint(positions(mp.points()))),
        Shape::MultipointM(mp) => Some(Geometry::MultiPoint(positions(mp.points()))),
        Shape::MultipointZ(mp) => Some(Geometry::MultiPoint(positions(mp.points()))),
        Shape::Polyline(line) => polyline(line.parts()),
        Shape::PolylineM(line) => polyline(line.parts()),
        Shape::PolylineZ(line) => polyline(line.parts()),
        Shape::Polygon(poly) => polygon(poly.rings()),
        Shape::PolygonM(poly) => polygon(poly.rings()),
        Shape::PolygonZ(poly) => polygon(poly.rings()),
        Shape::Multipatch(_) => {
            return Err(ImportError::DecodeFailure {
                reason: "multipatch shapes are not supported".to_string(),
            })
        }
    };
    Ok(geometry)
}

fn field_value(value: &FieldValue) -> Value {
    match value {
        FieldValue::Character(Some(text)) => Value::String(text.trim_end().to_string()),
        FieldValue::Memo(text) => Value::String(text.clone()),
        FieldValue::Numeric(Some(n)) => serde_json::json!(n),
        FieldValue::Float(Some(n)) => serde_json::json!(n),
        FieldValue::Double(n) => serde_json::json!(n),
        FieldValue::Currency(n) => serde_json::json!(n),
        FieldValue::Integer(n) => serde_json::json!(n),
        FieldValue::Logical(Some(b)) => Value::Bool(*b),
        FieldValue::Character(None)
        | FieldValue::Numeric(None)
        | FieldValue::Float(None)
        | FieldValue::Logical(None)
        | FieldValue::Date(None) => Value::Null,
        other => Value::String(format!("{:?}", other)),
    }
}

/// Decodes the raw `.shp` and `.dbf` bytes into a feature collection.
pub(crate) fn decode(shp: Vec<u8>, dbf: Vec<u8>) -> Result<FeatureCollection, ImportError> {
    let shapes = ShapeReader::new(Cursor::new(shp))
        .map_err(|e| decode_failure("shape header", e))?
        .read()
        .map_err(|e| decode_failure("shape records", e))?;

    let mut table =
        dbase::Reader::new(Cursor::new(dbf)).map_err(|e| decode_failure("attribute header", e))?;
    let field_names: Vec<String> = table
        .fields()
        .iter()
        .map(|field| field.name().to_string())
        .collect();
    let records = table
        .read()
        .map_err(|e| decode_failure("attribute records", e))?;

    if shapes.len() != records.len() {
        return Err(ImportError::DecodeFailure {
            reason: format!(
                "{} shapes but {} attribute rows",
                shapes.len(),
                records.len()
            ),
        });
    }

    let mut collection = FeatureCollection::new();
    for (shape, record) in shapes.into_iter().zip(records) {
        let mut properties = Properties::new();
        for name in &field_names {
            if let Some(value) = record.get(name) {
                properties.insert(name.clone(), field_value(value));
            }
        }
        collection.push(Feature::new(shape_geometry(shape)?).with_properties(properties));
    }
    Ok(collection)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point { x, y }
    }

    #[test]
    fn test_inner_rings_attach_to_preceding_outer() {
        let rings = vec![
            PolygonRing::Outer(vec![p(0.0, 0.0), p(0.0, 4.0), p(4.0, 4.0), p(0.0, 0.0)]),
            PolygonRing::Inner(vec![p(1.0, 1.0), p(2.0, 1.0), p(1.0, 2.0), p(1.0, 1.0)]),
        ];
        match polygon(&rings) {
            Some(Geometry::Polygon(polygon)) => {
                assert_eq!(polygon.len(), 2);
                assert_eq!(polygon[0][1], [0.0, 4.0]);
            }
            other => panic!("expected polygon, got {:?}", other),
        }
    }

    #[test]
    fn test_two_outer_rings_make_multipolygon() {
        let rings = vec![
            PolygonRing::Outer(vec![p(0.0, 0.0), p(0.0, 1.0), p(1.0, 1.0), p(0.0, 0.0)]),
            PolygonRing::Outer(vec![p(5.0, 5.0), p(5.0, 6.0), p(6.0, 6.0), p(5.0, 5.0)]),
        ];
        assert!(matches!(polygon(&rings), Some(Geometry::MultiPolygon(ref parts)) if parts.len() == 2));
    }

    #[test]
    fn test_polyline_parts() {
        let single = vec![vec![p(0.0, 0.0), p(1.0, 1.0)]];
        assert_eq!(
            polyline(&single),
            Some(Geometry::LineString(vec![[0.0, 0.0], [1.0, 1.0]]))
        );
        let double = vec![vec![p(0.0, 0.0), p(1.0, 1.0)], vec![p(2.0, 2.0), p(3.0, 3.0)]];
        assert!(matches!(polyline(&double), Some(Geometry::MultiLineString(_))));
    }

    #[test]
    fn test_null_shape_has_no_geometry() {
        assert_eq!(shape_geometry(Shape::NullShape).unwrap(), None);
    }

    #[test]
    fn test_field_values() {
        assert_eq!(
            field_value(&FieldValue::Character(Some("Cologne   ".to_string()))),
            Value::String("Cologne".to_string())
        );
        assert_eq!(field_value(&FieldValue::Numeric(Some(42.0))), serde_json::json!(42.0));
        assert_eq!(field_value(&FieldValue::Logical(None)), Value::Null);
    }
}

mod common;

use aoikit_core::{AoiShape, Geometry, ImportError};
use aoikit_importer::ShapefileImporter;
use common::*;
use serde_json::json;

#[test]
fn test_single_polygon_record() {
    let collection = ShapefileImporter::new().import(&parcels_zip()).unwrap();
    assert_eq!(collection.len(), 1);

    let feature = collection.iter().next().unwrap();
    match &feature.geometry {
        Some(Geometry::Polygon(rings)) => {
            assert_eq!(rings.len(), 1);
            assert_eq!(rings[0].len(), 5);
            assert_eq!(rings[0][0], [6.9, 50.9]);
        }
        other => panic!("expected polygon, got {:?}", other),
    }
    assert_eq!(feature.properties.get("NAME"), Some(&json!("Cologne")));
    assert_eq!(feature.properties.get("ID"), Some(&json!(1.0)));
}

#[test]
fn test_records_keep_file_order() {
    let shp = point_shp(&[(1.0, 2.0), (3.0, 4.0), (5.0, 6.0)]);
    let dbf = dbf(&[("a", 1), ("b", 2), ("c", 3)]);
    let archive = zip_archive(&[
        ("pts/points.SHP", shp.as_slice()),
        ("pts/points.DBF", dbf.as_slice()),
    ]);

    let collection = ShapefileImporter::new().import(&archive).unwrap();
    let names: Vec<_> = collection
        .iter()
        .map(|f| f.properties["NAME"].clone())
        .collect();
    assert_eq!(names, vec![json!("a"), json!("b"), json!("c")]);
    assert_eq!(
        collection.iter().last().unwrap().geometry,
        Some(Geometry::Point([5.0, 6.0]))
    );
}

#[test]
fn test_geojson_output() {
    let collection = ShapefileImporter::new().import(&parcels_zip()).unwrap();
    let value: serde_json::Value =
        serde_json::from_str(&collection.to_geojson().unwrap()).unwrap();
    assert_eq!(value["type"], "FeatureCollection");
    assert_eq!(value["features"][0]["type"], "Feature");
    assert_eq!(value["features"][0]["geometry"]["type"], "Polygon");
}

#[test]
fn test_missing_dbf_member() {
    let shp = polygon_shp(&[square(0.0, 0.0)]);
    let archive = zip_archive(&[("parcels.shp", shp.as_slice()), ("parcels.shx", &b"index"[..])]);

    let err = ShapefileImporter::new().import(&archive).unwrap_err();
    assert_eq!(
        err,
        ImportError::MissingMember {
            extension: "dbf".to_string()
        }
    );
    assert_eq!(err.user_message(), "Zip must contain .shp and .dbf files.");
}

#[test]
fn test_missing_shp_member() {
    let archive = zip_archive(&[("parcels.dbf", dbf(&[]).as_slice())]);
    assert!(matches!(
        ShapefileImporter::new().import(&archive),
        Err(ImportError::MissingMember { extension }) if extension == "shp"
    ));
}

#[test]
fn test_not_a_zip() {
    let err = ShapefileImporter::new()
        .import(b"PK\x03\x04 but not really")
        .unwrap_err();
    assert!(matches!(err, ImportError::InvalidArchive { .. }));
    assert_eq!(err.user_message(), "Error processing shapefile.");
}

#[test]
fn test_garbage_members_fail_to_decode() {
    let archive = zip_archive(&[("a.shp", &b"garbage"[..]), ("a.dbf", &b"garbage"[..])]);
    let err = ShapefileImporter::new().import(&archive).unwrap_err();
    assert!(matches!(err, ImportError::DecodeFailure { .. }));
    assert_eq!(err.user_message(), "Error processing shapefile.");
}

#[test]
fn test_record_count_mismatch() {
    let shp = polygon_shp(&[square(0.0, 0.0), square(2.0, 2.0)]);
    let dbf = dbf(&[("only one", 1)]);
    let archive = zip_archive(&[("a.shp", shp.as_slice()), ("a.dbf", dbf.as_slice())]);
    assert!(matches!(
        ShapefileImporter::new().import(&archive),
        Err(ImportError::DecodeFailure { .. })
    ));
}

#[test]
fn test_import_upload_names_aoi() {
    let request = ShapefileImporter::new()
        .import_upload("parcels.zip", &parcels_zip())
        .unwrap();
    assert_eq!(request.name.as_deref(), Some("parcels"));
    assert!(matches!(request.shape, AoiShape::Geometry(ref fc) if fc.len() == 1));
}

#[test]
fn test_import_path_reads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("zones.zip");
    std::fs::write(&path, parcels_zip()).unwrap();

    let request = ShapefileImporter::new().import_path(&path).unwrap();
    assert_eq!(request.name.as_deref(), Some("zones"));
}

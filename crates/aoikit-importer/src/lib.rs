//! # AOIKit Importer
//!
//! Reads a zipped shapefile upload (`.shp` geometry plus `.dbf` attribute
//! table) into a GeoJSON-compatible [`FeatureCollection`](aoikit_core::FeatureCollection).
//! The whole archive either imports or fails; there is no partial result.

mod archive;
mod decode;
pub mod importer;

pub use importer::{aoi_name_from_file_name, ShapefileImporter};

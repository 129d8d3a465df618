//! Zipped shapefile importer.

use aoikit_core::{FeatureCollection, ImportError, NewAoi};
use std::path::Path;

use crate::archive::extract_members;
use crate::decode::decode;

/// Converts a zipped shapefile into a feature collection.
///
/// The archive must hold at least one `.shp` and one `.dbf` member (any
/// directory, any letter case). When several are present the first of each
/// wins. An `.shx` index is not needed; records are read sequentially.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShapefileImporter;

impl ShapefileImporter {
    pub fn new() -> Self {
        Self
    }

    /// Imports an in-memory zip archive.
    pub fn import(&self, archive: &[u8]) -> Result<FeatureCollection, ImportError> {
        let members = extract_members(archive)?;
        tracing::debug!(
            "Decoding {} ({} bytes shape, {} bytes attributes)",
            members.shp_name,
            members.shp.len(),
            members.dbf.len()
        );

        let collection = decode(members.shp, members.dbf)?;
        tracing::info!(
            "Imported {} feature(s) from {}",
            collection.len(),
            members.shp_name
        );
        Ok(collection)
    }

    /// Imports an uploaded file and names the resulting AOI after it.
    pub fn import_upload(&self, file_name: &str, archive: &[u8]) -> Result<NewAoi, ImportError> {
        let collection = self.import(archive)?;
        Ok(NewAoi::new(collection).with_name(aoi_name_from_file_name(file_name)))
    }

    /// Reads and imports a zip archive from disk.
    pub fn import_path(&self, path: &Path) -> aoikit_core::Result<NewAoi> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(self.import_upload(&file_name, &bytes)?)
    }
}

/// Display name for an AOI imported from `file_name`: the name with its
/// `.zip` suffix removed.
pub fn aoi_name_from_file_name(file_name: &str) -> String {
    let trimmed = file_name.trim();
    match trimmed.len().checked_sub(4) {
        Some(cut)
            if trimmed.is_char_boundary(cut) && trimmed[cut..].eq_ignore_ascii_case(".zip") =>
        {
            trimmed[..cut].to_string()
        }
        _ => trimmed.to_string(),
    }
}

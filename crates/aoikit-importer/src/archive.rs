//! Zip member lookup.

use aoikit_core::ImportError;
use std::io::{Cursor, Read};
use zip::ZipArchive;

/// Raw bytes of the members a shapefile import needs.
pub(crate) struct ShapefileMembers {
    pub shp_name: String,
    pub shp: Vec<u8>,
    pub dbf: Vec<u8>,
}

/// macOS archivers add `__MACOSX/` resource forks and `._name` files that
/// share the real member's extension.
fn is_resource_fork(name: &str) -> bool {
    name.starts_with("__MACOSX/")
        || name
            .rsplit('/')
            .next()
            .is_some_and(|base| base.starts_with("._"))
}

fn has_extension(name: &str, extension: &str) -> bool {
    name.rsplit_once('.')
        .is_some_and(|(stem, ext)| !stem.is_empty() && ext.eq_ignore_ascii_case(extension))
}

fn find_member(names: &[String], extension: &str) -> Result<String, ImportError> {
    names
        .iter()
        .find(|name| !name.ends_with('/') && !is_resource_fork(name) && has_extension(name, extension))
        .cloned()
        .ok_or_else(|| ImportError::MissingMember {
            extension: extension.to_string(),
        })
}

fn read_member(
    archive: &mut ZipArchive<Cursor<&[u8]>>,
    name: &str,
) -> Result<Vec<u8>, ImportError> {
    let mut file = archive
        .by_name(name)
        .map_err(|e| ImportError::InvalidArchive {
            reason: format!("{}: {}", name, e),
        })?;
    let mut bytes = Vec::with_capacity(file.size() as usize);
    file.read_to_end(&mut bytes)
        .map_err(|e| ImportError::InvalidArchive {
            reason: format!("{}: {}", name, e),
        })?;
    Ok(bytes)
}

/// Opens the archive and extracts the first `.shp` and `.dbf` members.
pub(crate) fn extract_members(bytes: &[u8]) -> Result<ShapefileMembers, ImportError> {
    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).map_err(|e| ImportError::InvalidArchive {
            reason: e.to_string(),
        })?;

    let names: Vec<String> = archive.file_names().map(str::to_string).collect();
    tracing::debug!("Archive members: {:?}", names);

    let shp_name = find_member(&names, "shp")?;
    let dbf_name = find_member(&names, "dbf")?;

    Ok(ShapefileMembers {
        shp: read_member(&mut archive, &shp_name)?,
        dbf: read_member(&mut archive, &dbf_name)?,
        shp_name,
    })
}

//! Upload archives for the session tests: one polygon record with one
//! numeric attribute.

use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const SHAPE_POLYGON: i32 = 5;

fn push_f64s(out: &mut Vec<u8>, values: &[f64]) {
    for v in values {
        out.extend_from_slice(&v.to_le_bytes());
    }
}

/// Single-record polygon shapefile: a clockwise unit square at `(x, y)`.
pub fn square_shp(x: f64, y: f64) -> Vec<u8> {
    let ring = [
        (x, y),
        (x, y + 1.0),
        (x + 1.0, y + 1.0),
        (x + 1.0, y),
        (x, y),
    ];
    let bbox = [x, y, x + 1.0, y + 1.0];

    let mut content = Vec::new();
    content.extend_from_slice(&SHAPE_POLYGON.to_le_bytes());
    push_f64s(&mut content, &bbox);
    content.extend_from_slice(&1i32.to_le_bytes());
    content.extend_from_slice(&(ring.len() as i32).to_le_bytes());
    content.extend_from_slice(&0i32.to_le_bytes());
    for (px, py) in ring {
        push_f64s(&mut content, &[px, py]);
    }

    let file_len = 100 + 8 + content.len();
    let mut out = Vec::with_capacity(file_len);
    out.extend_from_slice(&9994i32.to_be_bytes());
    out.extend_from_slice(&[0u8; 20]);
    out.extend_from_slice(&((file_len / 2) as i32).to_be_bytes());
    out.extend_from_slice(&1000i32.to_le_bytes());
    out.extend_from_slice(&SHAPE_POLYGON.to_le_bytes());
    push_f64s(&mut out, &bbox);
    push_f64s(&mut out, &[0.0; 4]);

    out.extend_from_slice(&1i32.to_be_bytes());
    out.extend_from_slice(&((content.len() / 2) as i32).to_be_bytes());
    out.extend_from_slice(&content);
    out
}

/// dBase III table with one `ID` numeric field and one row.
pub fn single_row_dbf(id: i64) -> Vec<u8> {
    const ID_LEN: usize = 10;
    let header_len: u16 = 32 + 32 + 1;
    let record_len: u16 = 1 + ID_LEN as u16;

    let mut out = vec![0x03, 124, 1, 1];
    out.extend_from_slice(&1u32.to_le_bytes());
    out.extend_from_slice(&header_len.to_le_bytes());
    out.extend_from_slice(&record_len.to_le_bytes());
    out.extend_from_slice(&[0u8; 20]);

    let mut field = [0u8; 32];
    field[..2].copy_from_slice(b"ID");
    field[11] = b'N';
    field[16] = ID_LEN as u8;
    out.extend_from_slice(&field);
    out.push(0x0D);

    out.push(b' ');
    out.extend_from_slice(format!("{:>width$}", id, width = ID_LEN).as_bytes());
    out.push(0x1A);
    out
}

/// Packs `(member name, bytes)` pairs into a zip archive.
pub fn zip_archive(members: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for (name, bytes) in members {
        writer.start_file(*name, options).expect("start member");
        writer.write_all(bytes).expect("write member");
    }
    writer.finish().expect("finish archive").into_inner()
}

/// Zip holding a one-record polygon shapefile named `parcels`.
pub fn parcels_zip() -> Vec<u8> {
    let shp = square_shp(6.9, 50.9);
    let dbf = single_row_dbf(1);
    zip_archive(&[("parcels.shp", shp.as_slice()), ("parcels.dbf", dbf.as_slice())])
}

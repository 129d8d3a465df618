//! Hand-built shapefile fixtures.
//!
//! Writes minimal but valid ESRI `.shp` and dBase III `.dbf` members and
//! packs them into an in-memory zip archive.

#![allow(dead_code)]

use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const SHAPE_POLYGON: i32 = 5;
const SHAPE_POINT: i32 = 1;

/// One attribute row: `(NAME, ID)`.
pub type Row = (&'static str, i64);

fn bbox(points: &[(f64, f64)]) -> [f64; 4] {
    let mut b = [f64::MAX, f64::MAX, f64::MIN, f64::MIN];
    for &(x, y) in points {
        b[0] = b[0].min(x);
        b[1] = b[1].min(y);
        b[2] = b[2].max(x);
        b[3] = b[3].max(y);
    }
    if points.is_empty() {
        b = [0.0; 4];
    }
    b
}

fn shp_file(shape_type: i32, contents: &[Vec<u8>], all_points: &[(f64, f64)]) -> Vec<u8> {
    let body_len: usize = contents.iter().map(|c| 8 + c.len()).sum();
    let mut out = Vec::with_capacity(100 + body_len);

    out.extend_from_slice(&9994i32.to_be_bytes());
    out.extend_from_slice(&[0u8; 20]);
    out.extend_from_slice(&(((100 + body_len) / 2) as i32).to_be_bytes());
    out.extend_from_slice(&1000i32.to_le_bytes());
    out.extend_from_slice(&shape_type.to_le_bytes());
    for v in bbox(all_points) {
        out.extend_from_slice(&v.to_le_bytes());
    }
    for _ in 0..4 {
        out.extend_from_slice(&0f64.to_le_bytes());
    }

    for (i, content) in contents.iter().enumerate() {
        out.extend_from_slice(&((i + 1) as i32).to_be_bytes());
        out.extend_from_slice(&((content.len() / 2) as i32).to_be_bytes());
        out.extend_from_slice(content);
    }
    out
}

fn polygon_content(ring: &[(f64, f64)]) -> Vec<u8> {
    let mut c = Vec::new();
    c.extend_from_slice(&SHAPE_POLYGON.to_le_bytes());
    for v in bbox(ring) {
        c.extend_from_slice(&v.to_le_bytes());
    }
    c.extend_from_slice(&1i32.to_le_bytes());
    c.extend_from_slice(&(ring.len() as i32).to_le_bytes());
    c.extend_from_slice(&0i32.to_le_bytes());
    for &(x, y) in ring {
        c.extend_from_slice(&x.to_le_bytes());
        c.extend_from_slice(&y.to_le_bytes());
    }
    c
}

fn point_content(x: f64, y: f64) -> Vec<u8> {
    let mut c = Vec::new();
    c.extend_from_slice(&SHAPE_POINT.to_le_bytes());
    c.extend_from_slice(&x.to_le_bytes());
    c.extend_from_slice(&y.to_le_bytes());
    c
}

/// Polygon shapefile, one clockwise (outer) ring per record.
pub fn polygon_shp(rings: &[Vec<(f64, f64)>]) -> Vec<u8> {
    let contents: Vec<Vec<u8>> = rings.iter().map(|r| polygon_content(r)).collect();
    let all: Vec<(f64, f64)> = rings.iter().flatten().copied().collect();
    shp_file(SHAPE_POLYGON, &contents, &all)
}

/// Point shapefile.
pub fn point_shp(points: &[(f64, f64)]) -> Vec<u8> {
    let contents: Vec<Vec<u8>> = points.iter().map(|&(x, y)| point_content(x, y)).collect();
    shp_file(SHAPE_POINT, &contents, points)
}

fn field_descriptor(name: &str, kind: u8, length: u8) -> [u8; 32] {
    let mut d = [0u8; 32];
    d[..name.len()].copy_from_slice(name.as_bytes());
    d[11] = kind;
    d[16] = length;
    d
}

/// dBase III table with a `NAME` character field and an `ID` numeric field.
pub fn dbf(rows: &[Row]) -> Vec<u8> {
    const NAME_LEN: usize = 20;
    const ID_LEN: usize = 10;
    let header_len = 32 + 32 * 2 + 1;
    let record_len = 1 + NAME_LEN + ID_LEN;

    let mut out = Vec::new();
    out.push(0x03);
    out.extend_from_slice(&[124, 1, 1]);
    out.extend_from_slice(&(rows.len() as u32).to_le_bytes());
    out.extend_from_slice(&(header_len as u16).to_le_bytes());
    out.extend_from_slice(&(record_len as u16).to_le_bytes());
    out.extend_from_slice(&[0u8; 20]);
    out.extend_from_slice(&field_descriptor("NAME", b'C', NAME_LEN as u8));
    out.extend_from_slice(&field_descriptor("ID", b'N', ID_LEN as u8));
    out.push(0x0D);

    for (name, id) in rows {
        out.push(b' ');
        out.extend_from_slice(format!("{:<width$}", name, width = NAME_LEN).as_bytes());
        out.extend_from_slice(format!("{:>width$}", id, width = ID_LEN).as_bytes());
    }
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

/// A clockwise unit square with its lower-left corner at `(x, y)`.
pub fn square(x: f64, y: f64) -> Vec<(f64, f64)> {
    vec![
        (x, y),
        (x, y + 1.0),
        (x + 1.0, y + 1.0),
        (x + 1.0, y),
        (x, y),
    ]
}

/// Zip holding a one-record polygon shapefile named `parcels`.
pub fn parcels_zip() -> Vec<u8> {
    let shp = polygon_shp(&[square(6.9, 50.9)]);
    let dbf = dbf(&[("Cologne", 1)]);
    zip_archive(&[("parcels.shp", shp.as_slice()), ("parcels.dbf", dbf.as_slice())])
}

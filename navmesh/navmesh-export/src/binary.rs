//! Binary layout of the navigation mesh artifact.
//!
//! The buffer is a fixed 48-byte header followed by three back-to-back
//! sections, no padding, everything little-endian:
//!
//! ```text
//! UINT32       - "NAVM" tag packed little-endian
//! UINT32       - version, (major << 16) | minor
//! UINT32       - data offset (= 48, start of the vertex section)
//! UINT32 x 2   - vertex count, vertex data offset (relative, always 0)
//! UINT32 x 2   - edge count, edge data offset (relative)
//! UINT32 x 2   - polygon count, polygon data offset (relative)
//! REAL32 x 3   - normalized gravity vector
//! foreach vertex   REAL32 x 3            - position
//! foreach edge     UINT16 x 4            - vertexA, vertexB, polyA, polyB
//! foreach polygon  UINT16 x 6, REAL32 x 6 - v0..v2, e0..e2, normal, centroid
//! ```
//!
//! Section offsets are known before any byte is written, so the header is
//! written exactly once.

use nalgebra::{Point3, Vector3};

use crate::adjacency::CanonicalEdge;
use crate::encode::PolygonRecord;

/// `"NAVM"` packed as a little-endian u32.
pub const NAVMESH_TAG: u32 = u32::from_le_bytes(*b"NAVM");

/// Current format version, `(major << 16) | minor`.
pub const FORMAT_VERSION: u32 = make_version(1, 0);

/// Header size in bytes; also the absolute offset of the data region.
pub const HEADER_SIZE: usize = 48;

/// Bytes per vertex record (3 x f32).
pub const VERTEX_RECORD_SIZE: usize = 12;

/// Bytes per edge record (4 x u16).
pub const EDGE_RECORD_SIZE: usize = 8;

/// Bytes per polygon record (6 x u16 + 6 x f32).
pub const POLYGON_RECORD_SIZE: usize = 36;

/// Largest allowed element count per section.
///
/// Indices are u16 with 0xFFFF reserved as the no-polygon sentinel, so any
/// section reaching 0xFFFF elements is out of range.
pub const MAX_ELEMENT_COUNT: usize = 0xFFFE;

/// Pack a major/minor pair into the version field.
#[must_use]
pub const fn make_version(major: u16, minor: u16) -> u32 {
    ((major as u32) << 16) | minor as u32
}

/// Serialize the header and the three sections into one buffer.
///
/// Infallible by construction: section counts are validated against
/// [`MAX_ELEMENT_COUNT`] before encoding starts, and the buffer is built
/// entirely in memory. The gravity vector is normalized here; a zero
/// vector serializes as zeros.
#[allow(clippy::cast_possible_truncation)]
// Truncation: counts and indices are validated against the 16-bit limit upstream
#[must_use]
pub fn assemble(
    vertices: &[Point3<f32>],
    edges: &[CanonicalEdge],
    polygons: &[PolygonRecord],
    gravity: Vector3<f32>,
) -> Vec<u8> {
    let vertex_bytes = vertices.len() * VERTEX_RECORD_SIZE;
    let edge_bytes = edges.len() * EDGE_RECORD_SIZE;
    let polygon_bytes = polygons.len() * POLYGON_RECORD_SIZE;

    // Offsets are relative to the data region.
    let edge_data_offset = vertex_bytes;
    let polygon_data_offset = edge_data_offset + edge_bytes;

    let gravity = gravity
        .try_normalize(f32::EPSILON)
        .unwrap_or_else(Vector3::zeros);

    let mut out = Vec::with_capacity(HEADER_SIZE + vertex_bytes + edge_bytes + polygon_bytes);

    for field in [
        NAVMESH_TAG,
        FORMAT_VERSION,
        HEADER_SIZE as u32,
        vertices.len() as u32,
        0, // vertex data offset, relative to the data region
        edges.len() as u32,
        edge_data_offset as u32,
        polygons.len() as u32,
        polygon_data_offset as u32,
    ] {
        out.extend_from_slice(&field.to_le_bytes());
    }
    for component in [gravity.x, gravity.y, gravity.z] {
        out.extend_from_slice(&component.to_le_bytes());
    }

    for vertex in vertices {
        for component in [vertex.x, vertex.y, vertex.z] {
            out.extend_from_slice(&component.to_le_bytes());
        }
    }

    for edge in edges {
        for field in [
            edge.vertices[0] as u16,
            edge.vertices[1] as u16,
            edge.polygons[0],
            edge.polygons[1],
        ] {
            out.extend_from_slice(&field.to_le_bytes());
        }
    }

    for polygon in polygons {
        for field in polygon.vertices.iter().chain(polygon.edges.iter()) {
            out.extend_from_slice(&field.to_le_bytes());
        }
        for component in [
            polygon.normal.x,
            polygon.normal.y,
            polygon.normal.z,
            polygon.centroid.x,
            polygon.centroid.y,
            polygon.centroid.z,
        ] {
            out.extend_from_slice(&component.to_le_bytes());
        }
    }

    out
}

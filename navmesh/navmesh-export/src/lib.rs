//! Navigation mesh export.
//!
//! Encodes a triangulated [`MeshSnapshot`] plus a world gravity direction
//! into the fixed-layout `NAVM` binary consumed by the runtime navigation
//! engine. The pipeline is strictly sequential:
//!
//! 1. [`CanonicalVertexMap`] - collapse vertices that share coordinates
//! 2. [`EdgeAdjacency`] - merge substituted edges, record 0-2 incident
//!    polygons per edge
//! 3. [`encode_polygons`] - one fixed-size record per triangle
//! 4. [`assemble`](binary::assemble) - header plus three sections, single
//!    in-memory buffer
//!
//! The adjacency table is built once and shared by stages 3 and 4, so the
//! edge section and the polygon records can never disagree about edge
//! indices.
//!
//! Encoding is deterministic: the same snapshot produces byte-identical
//! output on every run. Nothing here depends on hash iteration order; all
//! serialization orders are first-encounter or input orders.
//!
//! # Example
//!
//! ```
//! use navmesh_types::{MeshSnapshot, Vector3};
//! use navmesh_export::encode_navmesh;
//!
//! let mut snapshot = MeshSnapshot::new(Vector3::new(0.0, 0.0, -9.81));
//! snapshot.push_vertex(0.0, 0.0, 0.0);
//! snapshot.push_vertex(1.0, 0.0, 0.0);
//! snapshot.push_vertex(0.0, 1.0, 0.0);
//! snapshot.push_triangle([0, 1, 2]);
//!
//! let buffer = encode_navmesh(&snapshot).unwrap();
//! assert_eq!(&buffer[0..4], b"NAVM");
//! ```
//!
//! # Writing to disk
//!
//! [`export_navmesh`] encodes fully in memory and then writes atomically
//! (temp file in the destination directory, renamed on success), so a
//! failed export never leaves a partially written file behind.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod adjacency;
pub mod binary;
mod dedup;
mod encode;
mod error;

pub use adjacency::{CanonicalEdge, EdgeAdjacency, NO_POLYGON};
pub use dedup::CanonicalVertexMap;
pub use encode::{encode_polygons, PolygonRecord};
pub use error::{ExportError, ExportResult};

use std::io::Write;
use std::path::Path;

use tracing::debug;

use binary::MAX_ELEMENT_COUNT;
use navmesh_types::MeshSnapshot;

/// Encode a snapshot into the final byte buffer.
///
/// Pure function of the snapshot; no filesystem access.
///
/// # Errors
///
/// - [`ExportError::EmptyMesh`] if the snapshot has no vertices or polygons
/// - [`ExportError::IndexRange`] if any section exceeds the 16-bit limit
/// - [`ExportError::InvalidIndex`] if an edge or polygon references a
///   vertex out of range
/// - [`ExportError::NonTriangularPolygon`] for any non-triangle face
/// - [`ExportError::NonManifoldEdge`] if an edge gathers more than two
///   incident polygons
/// - [`ExportError::UnknownEdge`] if a polygon uses an edge missing from
///   the edge list
pub fn encode_navmesh(snapshot: &MeshSnapshot) -> ExportResult<Vec<u8>> {
    validate(snapshot)?;

    let canon = CanonicalVertexMap::build(&snapshot.vertices);
    debug!(
        vertices = snapshot.vertex_count(),
        merged = canon.merged_count(),
        "canonical vertex map built"
    );

    let adjacency = EdgeAdjacency::build(snapshot, &canon)?;
    debug!(
        input_edges = snapshot.edge_count(),
        canonical_edges = adjacency.len(),
        "edge adjacency built"
    );

    let polygons = encode_polygons(snapshot, &canon, &adjacency)?;

    let buffer = binary::assemble(
        &snapshot.vertices,
        adjacency.edges(),
        &polygons,
        snapshot.gravity,
    );
    debug!(bytes = buffer.len(), "navigation mesh assembled");

    Ok(buffer)
}

/// Encode a snapshot and write it to `path` atomically.
///
/// The buffer is staged in a temporary file in the destination directory
/// and renamed into place only after a complete write, so no partially
/// valid file is ever observable at `path`.
///
/// # Errors
///
/// Any encoding error from [`encode_navmesh`], or [`ExportError::Io`] if
/// the destination cannot be written.
pub fn export_navmesh<P: AsRef<Path>>(snapshot: &MeshSnapshot, path: P) -> ExportResult<()> {
    let buffer = encode_navmesh(snapshot)?;

    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = tempfile::NamedTempFile::new_in(dir)?;
    staged.write_all(&buffer)?;
    staged.persist(path).map_err(|e| ExportError::Io(e.error))?;

    debug!(path = %path.display(), bytes = buffer.len(), "navigation mesh written");
    Ok(())
}

/// Reject snapshots the format cannot represent, before any stage runs.
fn validate(snapshot: &MeshSnapshot) -> ExportResult<()> {
    if snapshot.is_empty() {
        return Err(ExportError::EmptyMesh);
    }

    for (section, count) in [
        ("vertex", snapshot.vertex_count()),
        ("edge", snapshot.edge_count()),
        ("polygon", snapshot.polygon_count()),
    ] {
        if count > MAX_ELEMENT_COUNT {
            return Err(ExportError::IndexRange {
                section,
                count,
                limit: MAX_ELEMENT_COUNT,
            });
        }
    }

    let vertex_count = snapshot.vertex_count();
    let in_range = |index: u32| (index as usize) < vertex_count;

    for &[a, b] in &snapshot.edges {
        for index in [a, b] {
            if !in_range(index) {
                return Err(ExportError::InvalidIndex {
                    index,
                    vertex_count,
                });
            }
        }
    }

    for (poly_index, polygon) in snapshot.polygons.iter().enumerate() {
        if !polygon.is_triangle() {
            return Err(ExportError::NonTriangularPolygon {
                polygon: poly_index,
                vertex_count: polygon.vertices.len(),
            });
        }
        for &index in &polygon.vertices {
            if !in_range(index) {
                return Err(ExportError::InvalidIndex {
                    index,
                    vertex_count,
                });
            }
        }
    }

    Ok(())
}

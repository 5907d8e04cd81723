//! Error types for navigation mesh export.

use thiserror::Error;

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Errors that can occur while encoding or writing a navigation mesh.
///
/// Every variant is fatal: the pipeline aborts synchronously and nothing is
/// persisted. There is no partial-success mode.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Mesh has no vertices or no polygons.
    #[error("mesh is empty (no vertices or polygons)")]
    EmptyMesh,

    /// A polygon is not a triangle.
    #[error("polygon {polygon} has {vertex_count} vertices, only triangles are supported")]
    NonTriangularPolygon {
        /// Index of the offending polygon.
        polygon: usize,
        /// Its actual vertex count.
        vertex_count: usize,
    },

    /// An edge is shared by more than two polygons.
    #[error("edge ({v0}, {v1}) has {polygon_count} incident polygons, mesh is not manifold")]
    NonManifoldEdge {
        /// First vertex of the edge (original index).
        v0: u32,
        /// Second vertex of the edge (original index).
        v1: u32,
        /// Number of polygons incident to the edge.
        polygon_count: usize,
    },

    /// A polygon references an edge that is not in the snapshot's edge list.
    #[error("polygon {polygon} uses edge ({v0}, {v1}) which is not in the edge list")]
    UnknownEdge {
        /// Index of the polygon referencing the edge.
        polygon: usize,
        /// First vertex of the missing edge (original index).
        v0: u32,
        /// Second vertex of the missing edge (original index).
        v1: u32,
    },

    /// An edge or polygon references a vertex index out of range.
    #[error("invalid vertex index {index} (mesh has {vertex_count} vertices)")]
    InvalidIndex {
        /// The out-of-range index.
        index: u32,
        /// Total number of vertices in the snapshot.
        vertex_count: usize,
    },

    /// A section has too many elements to address with 16-bit indices.
    #[error("{section} count {count} exceeds the 16-bit index limit of {limit}")]
    IndexRange {
        /// Which section overflowed ("vertex", "edge" or "polygon").
        section: &'static str,
        /// The element count of that section.
        count: usize,
        /// The maximum addressable count.
        limit: usize,
    },

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

//! Immutable mesh snapshot consumed by the export pipeline.

use nalgebra::{Matrix4, Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Polygon;

/// A self-contained view of a triangulated mesh plus the world gravity
/// vector.
///
/// # Memory Layout
///
/// - `vertices`: `Vec<Point3<f32>>` - vertex positions, index-addressable
/// - `edges`: `Vec<[u32; 2]>` - undirected vertex-index pairs
/// - `polygons`: `Vec<Polygon>` - faces referencing vertices by index
///
/// Coincident vertices (same coordinates under different indices, as
/// emitted by editors for per-corner attribute splits) are allowed; the
/// exporter collapses them during encoding. The snapshot itself stores the
/// mesh exactly as provided.
///
/// # Example
///
/// ```
/// use navmesh_types::{MeshSnapshot, Vector3};
///
/// let mut snapshot = MeshSnapshot::new(Vector3::new(0.0, 0.0, -9.81));
/// snapshot.push_vertex(0.0, 0.0, 0.0);
/// snapshot.push_vertex(1.0, 0.0, 0.0);
/// snapshot.push_vertex(0.0, 1.0, 0.0);
/// snapshot.push_triangle([0, 1, 2]);
/// assert!(!snapshot.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MeshSnapshot {
    /// Vertex positions.
    pub vertices: Vec<Point3<f32>>,

    /// Undirected edges as vertex-index pairs.
    pub edges: Vec<[u32; 2]>,

    /// Polygon faces.
    pub polygons: Vec<Polygon>,

    /// World gravity vector. Normalization is not required; the exporter
    /// normalizes it before serialization.
    pub gravity: Vector3<f32>,
}

impl MeshSnapshot {
    /// Create an empty snapshot with the given gravity vector.
    #[inline]
    #[must_use]
    pub const fn new(gravity: Vector3<f32>) -> Self {
        Self {
            vertices: Vec::new(),
            edges: Vec::new(),
            polygons: Vec::new(),
            gravity,
        }
    }

    /// Create a snapshot from already-built parts.
    #[inline]
    #[must_use]
    pub const fn from_parts(
        vertices: Vec<Point3<f32>>,
        edges: Vec<[u32; 2]>,
        polygons: Vec<Polygon>,
        gravity: Vector3<f32>,
    ) -> Self {
        Self {
            vertices,
            edges,
            polygons,
            gravity,
        }
    }

    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of edges.
    #[inline]
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of polygons.
    #[inline]
    #[must_use]
    pub fn polygon_count(&self) -> usize {
        self.polygons.len()
    }

    /// Whether the snapshot is missing vertices or polygons.
    ///
    /// An empty snapshot cannot be exported.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.polygons.is_empty()
    }

    /// Append a vertex and return its index.
    #[allow(clippy::cast_possible_truncation)]
    // Truncation: mesh indices are u32, meshes with >4B vertices are unsupported
    pub fn push_vertex(&mut self, x: f32, y: f32, z: f32) -> u32 {
        self.vertices.push(Point3::new(x, y, z));
        (self.vertices.len() - 1) as u32
    }

    /// Append a triangle, deriving its normal and centroid from the current
    /// vertex positions, and register its three edges if not yet present.
    ///
    /// The normal is the normalized cross product of the first two loop
    /// edges; a degenerate triangle gets a zero normal. Edges are stored
    /// with sorted endpoints, one entry per distinct pair.
    ///
    /// # Panics
    ///
    /// Panics if any index is out of bounds for the current vertex array.
    pub fn push_triangle(&mut self, indices: [u32; 3]) {
        let v0 = self.vertices[indices[0] as usize];
        let v1 = self.vertices[indices[1] as usize];
        let v2 = self.vertices[indices[2] as usize];

        let cross = (v1 - v0).cross(&(v2 - v0));
        let normal = cross.try_normalize(f32::EPSILON).unwrap_or_else(Vector3::zeros);
        let centroid = Point3::from((v0.coords + v1.coords + v2.coords) / 3.0);

        for pair in [
            sorted_pair(indices[0], indices[1]),
            sorted_pair(indices[1], indices[2]),
            sorted_pair(indices[2], indices[0]),
        ] {
            if !self.edges.contains(&pair) {
                self.edges.push(pair);
            }
        }

        self.polygons.push(Polygon::triangle(indices, normal, centroid));
    }

    /// Bake a world transform into the snapshot.
    ///
    /// Positions and centroids are transformed by the full matrix; normals
    /// by its linear part, renormalized afterwards so non-uniform scale does
    /// not leave them denormalized. A normal collapsed to zero length by a
    /// degenerate matrix stays zero.
    pub fn bake_transform(&mut self, transform: &Matrix4<f32>) {
        for vertex in &mut self.vertices {
            *vertex = transform.transform_point(vertex);
        }
        for polygon in &mut self.polygons {
            polygon.centroid = transform.transform_point(&polygon.centroid);
            let rotated = transform.transform_vector(&polygon.normal);
            polygon.normal = rotated
                .try_normalize(f32::EPSILON)
                .unwrap_or_else(Vector3::zeros);
        }
    }
}

/// Order an edge pair so the smaller index comes first.
#[inline]
fn sorted_pair(a: u32, b: u32) -> [u32; 2] {
    if a < b { [a, b] } else { [b, a] }
}

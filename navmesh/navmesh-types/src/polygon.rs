//! Polygon faces as seen by the exporter.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A polygon face of the input mesh.
///
/// The navigation mesh format only supports triangles, but the vertex list
/// is kept open-ended so that malformed input (a quad that slipped past
/// triangulation) is representable and can be rejected with a proper error
/// instead of being unconstructable.
///
/// The normal and centroid are supplied by the mesh source and passed
/// through to the binary format unchanged; the exporter does not recompute
/// them.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Polygon {
    /// Vertex indices into the snapshot's vertex array, in loop order.
    pub vertices: Vec<u32>,

    /// Unit face normal.
    pub normal: Vector3<f32>,

    /// Face centroid.
    pub centroid: Point3<f32>,
}

impl Polygon {
    /// Create a triangle from three vertex indices, a normal and a centroid.
    ///
    /// # Example
    ///
    /// ```
    /// use navmesh_types::{Point3, Polygon, Vector3};
    ///
    /// let tri = Polygon::triangle(
    ///     [0, 1, 2],
    ///     Vector3::new(0.0, 0.0, 1.0),
    ///     Point3::new(0.5, 0.5, 0.0),
    /// );
    /// assert!(tri.is_triangle());
    /// ```
    #[must_use]
    pub fn triangle(vertices: [u32; 3], normal: Vector3<f32>, centroid: Point3<f32>) -> Self {
        Self {
            vertices: vertices.to_vec(),
            normal,
            centroid,
        }
    }

    /// Whether this polygon has exactly three vertices.
    #[inline]
    #[must_use]
    pub fn is_triangle(&self) -> bool {
        self.vertices.len() == 3
    }

    /// Iterate over the polygon's edges as vertex-index pairs.
    ///
    /// Pairs are consecutive vertices in loop order, wrapping from the last
    /// vertex back to the first. Pair order within each edge is the loop
    /// order, not sorted.
    pub fn edge_keys(&self) -> impl Iterator<Item = [u32; 2]> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| [self.vertices[i], self.vertices[(i + 1) % n]])
    }
}

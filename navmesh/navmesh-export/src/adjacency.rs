//! Canonical edge table with per-edge polygon adjacency.
//!
//! After vertex substitution, distinct original edges can become the same
//! edge. This module merges them into one canonical edge per substituted,
//! sorted endpoint pair and records which polygons (at most two) are
//! incident to each. The pair of polygon indices is stored to speed up
//! adjacent-face lookup in the consuming runtime.

use hashbrown::HashMap;
use navmesh_types::MeshSnapshot;

use crate::dedup::CanonicalVertexMap;
use crate::error::{ExportError, ExportResult};

/// Sentinel polygon index meaning "no adjacent polygon on this side".
pub const NO_POLYGON: u16 = 0xFFFF;

/// One canonical edge of the mesh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalEdge {
    /// Original (unsubstituted) vertex pair of the first input edge that
    /// produced this canonical edge.
    pub vertices: [u32; 2],

    /// Incident polygon indices in polygon-iteration order; unused slots
    /// hold [`NO_POLYGON`].
    pub polygons: [u16; 2],
}

/// Canonical edge table, built once per export and shared read-only by the
/// edge section and the polygon encoder.
///
/// Edges are dense-indexed in first-encounter order over the input edge
/// list; that order is the serialization order of the edge section, so it
/// is part of the format contract, not an implementation detail.
#[derive(Debug, Clone)]
pub struct EdgeAdjacency {
    index_of: HashMap<(u32, u32), u32>,
    edges: Vec<CanonicalEdge>,
}

impl EdgeAdjacency {
    /// Build the canonical edge table for a snapshot.
    ///
    /// First pass walks the input edges in order, substituting endpoints
    /// through `canon` and assigning the next dense index to each new
    /// canonical key. Second pass walks the polygons in order and appends
    /// each polygon's index to its three edges.
    ///
    /// # Errors
    ///
    /// - [`ExportError::UnknownEdge`] if a polygon uses an edge missing
    ///   from the snapshot's edge list
    /// - [`ExportError::NonManifoldEdge`] if any edge ends up with more
    ///   than two incident polygons
    ///
    /// # Panics
    ///
    /// Panics if the snapshot references vertex indices out of range for
    /// `canon`; the pipeline validates indices before this stage.
    #[allow(clippy::cast_possible_truncation)]
    // Truncation: counts are checked against the 16-bit limit before encoding
    pub fn build(snapshot: &MeshSnapshot, canon: &CanonicalVertexMap) -> ExportResult<Self> {
        let mut index_of: HashMap<(u32, u32), u32> =
            HashMap::with_capacity(snapshot.edges.len());
        let mut edges: Vec<CanonicalEdge> = Vec::with_capacity(snapshot.edges.len());
        let mut incident: Vec<Vec<u16>> = Vec::with_capacity(snapshot.edges.len());

        for &[a, b] in &snapshot.edges {
            let key = canonical_key(a, b, canon);
            index_of.entry(key).or_insert_with(|| {
                edges.push(CanonicalEdge {
                    vertices: [a, b],
                    polygons: [NO_POLYGON; 2],
                });
                incident.push(Vec::new());
                (edges.len() - 1) as u32
            });
        }

        for (poly_index, polygon) in snapshot.polygons.iter().enumerate() {
            for [ea, eb] in polygon.edge_keys() {
                let key = canonical_key(ea, eb, canon);
                let Some(&edge_index) = index_of.get(&key) else {
                    return Err(ExportError::UnknownEdge {
                        polygon: poly_index,
                        v0: ea,
                        v1: eb,
                    });
                };
                incident[edge_index as usize].push(poly_index as u16);
            }
        }

        for (edge, polygons) in edges.iter_mut().zip(&incident) {
            match polygons.as_slice() {
                [] => {}
                [p0] => edge.polygons[0] = *p0,
                [p0, p1] => edge.polygons = [*p0, *p1],
                too_many => {
                    return Err(ExportError::NonManifoldEdge {
                        v0: edge.vertices[0],
                        v1: edge.vertices[1],
                        polygon_count: too_many.len(),
                    });
                }
            }
        }

        Ok(Self { index_of, edges })
    }

    /// Dense index of the canonical edge for a vertex pair.
    ///
    /// The pair is substituted through `canon` and sorted before lookup, so
    /// both directions and any coincident-vertex aliases resolve to the
    /// same edge. Returns `None` if the edge does not exist.
    #[must_use]
    pub fn edge_index(&self, v0: u32, v1: u32, canon: &CanonicalVertexMap) -> Option<u32> {
        self.index_of.get(&canonical_key(v0, v1, canon)).copied()
    }

    /// Canonical edges in dense-index (serialization) order.
    #[inline]
    #[must_use]
    pub fn edges(&self) -> &[CanonicalEdge] {
        &self.edges
    }

    /// Number of canonical edges.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether the table is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Substitute both endpoints and order them so the smaller comes first.
#[inline]
fn canonical_key(v0: u32, v1: u32, canon: &CanonicalVertexMap) -> (u32, u32) {
    let a = canon.canonical(v0);
    let b = canon.canonical(v1);
    if a < b { (a, b) } else { (b, a) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    fn quad_snapshot() -> MeshSnapshot {
        let mut snapshot = MeshSnapshot::new(Vector3::new(0.0, 0.0, -1.0));
        snapshot.push_vertex(0.0, 0.0, 0.0);
        snapshot.push_vertex(1.0, 0.0, 0.0);
        snapshot.push_vertex(1.0, 1.0, 0.0);
        snapshot.push_vertex(0.0, 1.0, 0.0);
        snapshot.push_triangle([0, 1, 2]);
        snapshot.push_triangle([0, 2, 3]);
        snapshot
    }

    #[test]
    fn quad_has_five_canonical_edges() {
        let snapshot = quad_snapshot();
        let canon = CanonicalVertexMap::build(&snapshot.vertices);
        let adjacency = EdgeAdjacency::build(&snapshot, &canon).unwrap();
        assert_eq!(adjacency.len(), 5);
    }

    #[test]
    fn shared_diagonal_has_both_polygons() {
        let snapshot = quad_snapshot();
        let canon = CanonicalVertexMap::build(&snapshot.vertices);
        let adjacency = EdgeAdjacency::build(&snapshot, &canon).unwrap();

        let diagonal = adjacency.edge_index(0, 2, &canon).unwrap();
        assert_eq!(
            adjacency.edges()[diagonal as usize].polygons,
            [0, 1],
            "diagonal polygons in encounter order"
        );
    }

    #[test]
    fn boundary_edges_have_one_sentinel() {
        let snapshot = quad_snapshot();
        let canon = CanonicalVertexMap::build(&snapshot.vertices);
        let adjacency = EdgeAdjacency::build(&snapshot, &canon).unwrap();

        let boundary = adjacency.edge_index(0, 1, &canon).unwrap();
        let polygons = adjacency.edges()[boundary as usize].polygons;
        assert_eq!(polygons, [0, NO_POLYGON]);
    }

    #[test]
    fn edges_merged_by_vertex_substitution() {
        // Vertex 3 coincides with vertex 0, so edges (1, 0) and (1, 3)
        // collapse onto one canonical edge keyed by the first occurrence.
        let mut snapshot = MeshSnapshot::new(Vector3::zeros());
        snapshot.vertices = vec![
            nalgebra::Point3::new(0.0, 0.0, 0.0),
            nalgebra::Point3::new(1.0, 0.0, 0.0),
            nalgebra::Point3::new(0.0, 1.0, 0.0),
            nalgebra::Point3::new(0.0, 0.0, 0.0),
        ];
        snapshot.edges = vec![[1, 0], [1, 3], [0, 2]];

        let canon = CanonicalVertexMap::build(&snapshot.vertices);
        let adjacency = EdgeAdjacency::build(&snapshot, &canon).unwrap();

        assert_eq!(adjacency.len(), 2);
        assert_eq!(adjacency.edge_index(1, 0, &canon), adjacency.edge_index(1, 3, &canon));
        // The retained vertex pair is the original pair of the first edge.
        assert_eq!(adjacency.edges()[0].vertices, [1, 0]);
    }

    #[test]
    fn lookup_ignores_direction() {
        let snapshot = quad_snapshot();
        let canon = CanonicalVertexMap::build(&snapshot.vertices);
        let adjacency = EdgeAdjacency::build(&snapshot, &canon).unwrap();
        assert_eq!(
            adjacency.edge_index(2, 0, &canon),
            adjacency.edge_index(0, 2, &canon)
        );
    }

    #[test]
    fn unreferenced_edge_keeps_sentinels() {
        let mut snapshot = quad_snapshot();
        snapshot.push_vertex(5.0, 5.0, 5.0);
        snapshot.edges.push([0, 4]); // dangling edge, no polygon uses it

        let canon = CanonicalVertexMap::build(&snapshot.vertices);
        let adjacency = EdgeAdjacency::build(&snapshot, &canon).unwrap();

        let dangling = adjacency.edge_index(0, 4, &canon).unwrap();
        assert_eq!(
            adjacency.edges()[dangling as usize].polygons,
            [NO_POLYGON, NO_POLYGON]
        );
    }

    #[test]
    fn third_polygon_on_edge_is_non_manifold() {
        let mut snapshot = MeshSnapshot::new(Vector3::zeros());
        snapshot.push_vertex(0.0, 0.0, 0.0);
        snapshot.push_vertex(1.0, 0.0, 0.0);
        snapshot.push_vertex(0.0, 1.0, 0.0);
        snapshot.push_vertex(0.0, 0.0, 1.0);
        snapshot.push_vertex(0.0, -1.0, 0.0);
        // Three triangles all sharing edge (0, 1).
        snapshot.push_triangle([0, 1, 2]);
        snapshot.push_triangle([0, 1, 3]);
        snapshot.push_triangle([0, 1, 4]);

        let canon = CanonicalVertexMap::build(&snapshot.vertices);
        let result = EdgeAdjacency::build(&snapshot, &canon);
        assert!(matches!(
            result,
            Err(ExportError::NonManifoldEdge {
                polygon_count: 3,
                ..
            })
        ));
    }

    #[test]
    fn polygon_with_unlisted_edge_is_rejected() {
        let mut snapshot = quad_snapshot();
        snapshot.edges.retain(|&edge| edge != [1, 2]);

        let canon = CanonicalVertexMap::build(&snapshot.vertices);
        let result = EdgeAdjacency::build(&snapshot, &canon);
        assert!(matches!(
            result,
            Err(ExportError::UnknownEdge { polygon: 0, .. })
        ));
    }
}

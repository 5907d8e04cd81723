//! Fixed-size polygon records.

use nalgebra::{Point3, Vector3};
use navmesh_types::MeshSnapshot;

use crate::adjacency::EdgeAdjacency;
use crate::dedup::CanonicalVertexMap;
use crate::error::{ExportError, ExportResult};

/// One serialized triangle: vertex indices, edge indices, normal, centroid.
///
/// Vertex indices are the original (unsubstituted) ones; edge indices point
/// into the canonical edge table. Normal and centroid come from the mesh
/// source unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonRecord {
    /// Original vertex indices.
    pub vertices: [u16; 3],

    /// Canonical edge indices for the three loop edges.
    pub edges: [u16; 3],

    /// Unit face normal.
    pub normal: Vector3<f32>,

    /// Face centroid.
    pub centroid: Point3<f32>,
}

/// Encode every polygon of the snapshot in input order.
///
/// Output order equals input order; polygon indices stored in the edge
/// section refer to positions in this sequence.
///
/// # Errors
///
/// - [`ExportError::NonTriangularPolygon`] if a polygon does not have
///   exactly three vertices
/// - [`ExportError::UnknownEdge`] if a polygon edge has no entry in the
///   canonical edge table
#[allow(clippy::cast_possible_truncation)]
// Truncation: counts are checked against the 16-bit limit before encoding
pub fn encode_polygons(
    snapshot: &MeshSnapshot,
    canon: &CanonicalVertexMap,
    adjacency: &EdgeAdjacency,
) -> ExportResult<Vec<PolygonRecord>> {
    let mut records = Vec::with_capacity(snapshot.polygons.len());

    for (poly_index, polygon) in snapshot.polygons.iter().enumerate() {
        if !polygon.is_triangle() {
            return Err(ExportError::NonTriangularPolygon {
                polygon: poly_index,
                vertex_count: polygon.vertices.len(),
            });
        }

        let mut edges = [0u16; 3];
        for (slot, [ea, eb]) in polygon.edge_keys().enumerate() {
            let Some(edge_index) = adjacency.edge_index(ea, eb, canon) else {
                return Err(ExportError::UnknownEdge {
                    polygon: poly_index,
                    v0: ea,
                    v1: eb,
                });
            };
            edges[slot] = edge_index as u16;
        }

        records.push(PolygonRecord {
            vertices: [
                polygon.vertices[0] as u16,
                polygon.vertices[1] as u16,
                polygon.vertices[2] as u16,
            ],
            edges,
            normal: polygon.normal,
            centroid: polygon.centroid,
        });
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use navmesh_types::Polygon;

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

    fn encode(snapshot: &MeshSnapshot) -> ExportResult<Vec<PolygonRecord>> {
        let canon = CanonicalVertexMap::build(&snapshot.vertices);
        let adjacency = EdgeAdjacency::build(snapshot, &canon)?;
        encode_polygons(snapshot, &canon, &adjacency)
    }

    #[test]
    fn quad_records_in_input_order() {
        let snapshot = quad_snapshot();
        let records = encode(&snapshot).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].vertices, [0, 1, 2]);
        assert_eq!(records[1].vertices, [0, 2, 3]);
    }

    #[test]
    fn edge_indices_follow_first_encounter_order() {
        let snapshot = quad_snapshot();
        let records = encode(&snapshot).unwrap();

        // push_triangle registered edges as (0,1), (1,2), (0,2), (2,3), (0,3).
        assert_eq!(records[0].edges, [0, 1, 2]);
        assert_eq!(records[1].edges, [2, 3, 4]);
    }

    #[test]
    fn both_triangles_reference_the_shared_diagonal() {
        let snapshot = quad_snapshot();
        let records = encode(&snapshot).unwrap();

        let shared: Vec<u16> = records[0]
            .edges
            .iter()
            .filter(|e| records[1].edges.contains(e))
            .copied()
            .collect();
        assert_eq!(shared, vec![2]);
    }

    #[test]
    fn normal_and_centroid_pass_through() {
        let snapshot = quad_snapshot();
        let records = encode(&snapshot).unwrap();
        assert_eq!(records[0].normal, snapshot.polygons[0].normal);
        assert_eq!(records[0].centroid, snapshot.polygons[0].centroid);
    }

    #[test]
    fn quad_polygon_is_rejected() {
        let mut snapshot = quad_snapshot();
        snapshot.polygons.push(Polygon {
            vertices: vec![0, 1, 2, 3],
            normal: Vector3::new(0.0, 0.0, 1.0),
            centroid: Point3::new(0.5, 0.5, 0.0),
        });

        let canon = CanonicalVertexMap::build(&snapshot.vertices);
        // Adjacency is built on the valid triangles only.
        let valid = quad_snapshot();
        let adjacency = EdgeAdjacency::build(&valid, &canon).unwrap();

        let result = encode_polygons(&snapshot, &canon, &adjacency);
        assert!(matches!(
            result,
            Err(ExportError::NonTriangularPolygon {
                polygon: 2,
                vertex_count: 4,
            })
        ));
    }
}

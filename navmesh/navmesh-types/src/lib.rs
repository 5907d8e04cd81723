//! Input data model for navigation mesh export.
//!
//! This crate provides the types a caller uses to describe a triangulated
//! mesh to the export pipeline:
//!
//! - [`MeshSnapshot`] - An immutable view of vertices, edges, polygons and
//!   the world gravity vector
//! - [`Polygon`] - A face with vertex indices, unit normal and centroid
//!
//! The snapshot is deliberately host-agnostic: there is no notion of a
//! selected object, scene state or editor session. Whatever produced the
//! mesh (a DCC tool, a level importer, test code) constructs a snapshot and
//! hands it to the exporter, which treats it as read-only input.
//!
//! # Coordinate System
//!
//! The format is coordinate-system agnostic. Positions, normals and the
//! gravity vector are `f32` and are serialized as-is; it is the caller's
//! responsibility to bake any object-to-world transform first (see
//! [`MeshSnapshot::bake_transform`]).
//!
//! # Example
//!
//! ```
//! use navmesh_types::{MeshSnapshot, Vector3};
//!
//! let mut snapshot = MeshSnapshot::new(Vector3::new(0.0, 0.0, -9.81));
//! snapshot.push_vertex(0.0, 0.0, 0.0);
//! snapshot.push_vertex(1.0, 0.0, 0.0);
//! snapshot.push_vertex(0.0, 1.0, 0.0);
//! snapshot.push_triangle([0, 1, 2]);
//!
//! assert_eq!(snapshot.vertex_count(), 3);
//! assert_eq!(snapshot.edge_count(), 3);
//! assert_eq!(snapshot.polygon_count(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod polygon;
mod snapshot;

pub use polygon::Polygon;
pub use snapshot::MeshSnapshot;

// Re-export nalgebra types for convenience
pub use nalgebra::{Matrix4, Point3, Vector3};

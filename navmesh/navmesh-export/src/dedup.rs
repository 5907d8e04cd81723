//! Canonical vertex substitution.
//!
//! Editors routinely emit several vertex records at one spatial location
//! because the corners differ in UVs or shading normals. Navigation data
//! only cares about position, so all vertices sharing a coordinate value
//! collapse onto a single canonical index before edges are keyed.

use hashbrown::HashMap;
use nalgebra::Point3;

/// Substitution table from original vertex index to canonical vertex index.
///
/// For every group of vertices with identical coordinates the canonical
/// index is the smallest original index of the group; a vertex with unique
/// coordinates maps to itself. Grouping uses the raw bit patterns of the
/// three `f32` components, so equality is exact: no epsilon, no dependence
/// on decimal formatting. `-0.0` and `0.0` are distinct, and `NaN` only
/// matches a bit-identical `NaN`.
#[derive(Debug, Clone)]
pub struct CanonicalVertexMap {
    remap: Vec<u32>,
}

impl CanonicalVertexMap {
    /// Build the substitution table for a vertex array.
    ///
    /// Pure function of its input; an empty array yields an empty map.
    ///
    /// # Example
    ///
    /// ```
    /// use nalgebra::Point3;
    /// use navmesh_export::CanonicalVertexMap;
    ///
    /// let vertices = vec![
    ///     Point3::new(0.0, 0.0, 0.0),
    ///     Point3::new(1.0, 0.0, 0.0),
    ///     Point3::new(0.0, 0.0, 0.0), // duplicate of vertex 0
    /// ];
    /// let canon = CanonicalVertexMap::build(&vertices);
    /// assert_eq!(canon.canonical(2), 0);
    /// ```
    #[allow(clippy::cast_possible_truncation)]
    // Truncation: mesh indices are u32, meshes with >4B vertices are unsupported
    #[must_use]
    pub fn build(vertices: &[Point3<f32>]) -> Self {
        let mut first_seen: HashMap<[u32; 3], u32> = HashMap::with_capacity(vertices.len());
        let mut remap = Vec::with_capacity(vertices.len());

        for (index, position) in vertices.iter().enumerate() {
            let key = [
                position.x.to_bits(),
                position.y.to_bits(),
                position.z.to_bits(),
            ];
            // First-seen index of a group is necessarily the smallest.
            let canonical = *first_seen.entry(key).or_insert(index as u32);
            remap.push(canonical);
        }

        Self { remap }
    }

    /// Canonical index for an original vertex index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range for the vertex array the map was
    /// built from.
    #[inline]
    #[must_use]
    pub fn canonical(&self, index: u32) -> u32 {
        self.remap[index as usize]
    }

    /// Number of entries (== vertex count of the source array).
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.remap.len()
    }

    /// Whether the map is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.remap.is_empty()
    }

    /// Number of vertices that were remapped onto another vertex.
    #[must_use]
    pub fn merged_count(&self) -> usize {
        self.remap
            .iter()
            .enumerate()
            .filter(|&(index, &canonical)| canonical as usize != index)
            .count()
    }
}

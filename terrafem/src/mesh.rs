//! Lightweight view of the domain mesh.
//!
//! The mesh itself is produced and owned by external tooling; this layer only needs
//! vertex/cell counts and the material region id that mesh generation assigned to
//! each cell.

use itertools::Itertools;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    dimension: usize,
    vertices: Vec<Point3<f64>>,
    /// Material region id per cell, assigned by mesh generation.
    cell_regions: Vec<i32>,
}

impl Mesh {
    pub fn new(dimension: usize, vertices: Vec<Point3<f64>>, cell_regions: Vec<i32>) -> Self {
        Self {
            dimension,
            vertices,
            cell_regions,
        }
    }

    /// Convenience constructor for a mesh whose cells all belong to a single region.
    pub fn single_region(dimension: usize, num_cells: usize, region: i32) -> Self {
        Self {
            dimension,
            vertices: Vec::new(),
            cell_regions: vec![region; num_cells],
        }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_cells(&self) -> usize {
        self.cell_regions.len()
    }

    pub fn vertices(&self) -> &[Point3<f64>] {
        &self.vertices
    }

    pub fn cell_regions(&self) -> &[i32] {
        &self.cell_regions
    }

    /// All distinct region ids present in the mesh, sorted ascending.
    pub fn region_ids(&self) -> Vec<i32> {
        self.cell_regions.iter().copied().sorted().dedup().collect()
    }

    pub fn has_region(&self, region: i32) -> bool {
        self.cell_regions.contains(&region)
    }

    pub fn cells_in_region(&self, region: i32) -> usize {
        self.cell_regions.iter().filter(|&&r| r == region).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_ids_are_sorted_and_unique() {
        let mesh = Mesh::new(2, Vec::new(), vec![4, 2, 4, 7, 2, 2]);
        assert_eq!(mesh.region_ids(), vec![2, 4, 7]);
        assert_eq!(mesh.cells_in_region(2), 3);
        assert_eq!(mesh.cells_in_region(4), 2);
        assert!(mesh.has_region(7));
        assert!(!mesh.has_region(1));
    }

    #[test]
    fn single_region_mesh() {
        let mesh = Mesh::single_region(3, 10, 5);
        assert_eq!(mesh.num_cells(), 10);
        assert_eq!(mesh.region_ids(), vec![5]);
    }
}

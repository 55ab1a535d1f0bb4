use std::collections::HashSet;

use breach_core::{VoxelCoord, VoxelModel};
use glam::IVec3;

/// The set of integer-quantized voxel coordinates an entity occupies.
///
/// Logically distinct from render-time voxel instances, but built from
/// the same model cells under the same discretization contract: unit
/// voxels, floor-quantized membership.
#[derive(Debug, Clone, Default)]
pub struct VoxelVolume {
    cells: HashSet<VoxelCoord>,
}

impl VoxelVolume {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a volume from the cells of a voxel model.
    pub fn from_model(model: &VoxelModel) -> Self {
        Self {
            cells: model.cells.iter().map(|&(cell, _)| cell).collect(),
        }
    }

    pub fn insert(&mut self, cell: VoxelCoord) {
        self.cells.insert(cell);
    }

    /// Membership test on integer coordinates. The only way a sample
    /// point ever matches a voxel.
    pub fn contains(&self, cell: VoxelCoord) -> bool {
        self.cells.contains(&cell)
    }

    /// A copy of this volume shifted by a whole-voxel delta.
    pub fn translated(&self, delta: IVec3) -> Self {
        Self {
            cells: self.cells.iter().map(|&c| c + delta).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl FromIterator<VoxelCoord> for VoxelVolume {
    fn from_iter<I: IntoIterator<Item = VoxelCoord>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

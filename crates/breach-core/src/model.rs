use glam::IVec3;

use crate::constants::MATERIAL_CAPACITY;
use crate::error::BreachError;
use crate::types::{MaterialId, VoxelCoord};

/// A voxel model: the set of cells an entity or prop occupies, each with
/// a material. The same cells drive both sides of the engine — they are
/// streamed as render instances and quantized into the damage volume —
/// so both sides agree on the unit-voxel discretization.
///
/// Cell order is stable (insertion order), which keeps the emitted
/// instance stream deterministic.
#[derive(Debug, Clone, Default)]
pub struct VoxelModel {
    pub cells: Vec<(VoxelCoord, MaterialId)>,
}

impl VoxelModel {
    /// Build a model from (cell, material) pairs.
    pub fn from_cells(cells: impl IntoIterator<Item = (VoxelCoord, MaterialId)>) -> Self {
        Self {
            cells: cells.into_iter().collect(),
        }
    }

    /// A copy of this model shifted by a whole-voxel delta.
    pub fn translated(&self, delta: IVec3) -> Self {
        Self {
            cells: self.cells.iter().map(|&(c, m)| (c + delta, m)).collect(),
        }
    }

    /// Check that every material id fits the material table.
    pub fn validate(&self) -> Result<(), BreachError> {
        for &(_, material) in &self.cells {
            if material.0 as usize >= MATERIAL_CAPACITY {
                return Err(BreachError::OutOfRange {
                    table: "material",
                    index: material.0 as usize,
                    capacity: MATERIAL_CAPACITY,
                });
            }
        }
        Ok(())
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the model has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

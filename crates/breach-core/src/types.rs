use glam::IVec3;

/// Newtype for material identifiers. Valid ids are below
/// `constants::MATERIAL_CAPACITY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MaterialId(pub u16);

/// Newtype for chunk-transform identifiers. Valid ids are below
/// `constants::CHUNK_CAPACITY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ChunkId(pub u16);

/// Integer-quantized coordinate in voxel-space.
pub type VoxelCoord = IVec3;

//! Base voxel mesh and the per-instance attribute stream.

use breach_core::constants::{CHUNK_CAPACITY, MATERIAL_CAPACITY};
use breach_core::types::{ChunkId, MaterialId};
use breach_core::{BreachError, VoxelModel};
use glam::Vec3;
use wgpu::util::DeviceExt;

/// Base-mesh vertex (24 bytes): position + normal, locations 0 and 1.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CubeVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl CubeVertex {
    const fn new(position: [f32; 3], normal: [f32; 3]) -> Self {
        Self { position, normal }
    }

    /// Vertex-buffer layout for the base mesh (binding 0, per-vertex).
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CubeVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 12,
                    shader_location: 1,
                },
            ],
        }
    }
}

/// Unit cube centered at the origin, 36 vertices with face normals.
/// Every voxel instance is this mesh displaced by its offset.
#[rustfmt::skip]
pub const CUBE: [CubeVertex; 36] = [
    // -Z face
    CubeVertex::new([-0.5, -0.5, -0.5], [0.0, 0.0, -1.0]),
    CubeVertex::new([ 0.5, -0.5, -0.5], [0.0, 0.0, -1.0]),
    CubeVertex::new([ 0.5,  0.5, -0.5], [0.0, 0.0, -1.0]),
    CubeVertex::new([ 0.5,  0.5, -0.5], [0.0, 0.0, -1.0]),
    CubeVertex::new([-0.5,  0.5, -0.5], [0.0, 0.0, -1.0]),
    CubeVertex::new([-0.5, -0.5, -0.5], [0.0, 0.0, -1.0]),
    // +Z face
    CubeVertex::new([-0.5, -0.5,  0.5], [0.0, 0.0, 1.0]),
    CubeVertex::new([ 0.5, -0.5,  0.5], [0.0, 0.0, 1.0]),
    CubeVertex::new([ 0.5,  0.5,  0.5], [0.0, 0.0, 1.0]),
    CubeVertex::new([ 0.5,  0.5,  0.5], [0.0, 0.0, 1.0]),
    CubeVertex::new([-0.5,  0.5,  0.5], [0.0, 0.0, 1.0]),
    CubeVertex::new([-0.5, -0.5,  0.5], [0.0, 0.0, 1.0]),
    // -X face
    CubeVertex::new([-0.5,  0.5,  0.5], [-1.0, 0.0, 0.0]),
    CubeVertex::new([-0.5,  0.5, -0.5], [-1.0, 0.0, 0.0]),
    CubeVertex::new([-0.5, -0.5, -0.5], [-1.0, 0.0, 0.0]),
    CubeVertex::new([-0.5, -0.5, -0.5], [-1.0, 0.0, 0.0]),
    CubeVertex::new([-0.5, -0.5,  0.5], [-1.0, 0.0, 0.0]),
    CubeVertex::new([-0.5,  0.5,  0.5], [-1.0, 0.0, 0.0]),
    // +X face
    CubeVertex::new([ 0.5,  0.5,  0.5], [1.0, 0.0, 0.0]),
    CubeVertex::new([ 0.5,  0.5, -0.5], [1.0, 0.0, 0.0]),
    CubeVertex::new([ 0.5, -0.5, -0.5], [1.0, 0.0, 0.0]),
    CubeVertex::new([ 0.5, -0.5, -0.5], [1.0, 0.0, 0.0]),
    CubeVertex::new([ 0.5, -0.5,  0.5], [1.0, 0.0, 0.0]),
    CubeVertex::new([ 0.5,  0.5,  0.5], [1.0, 0.0, 0.0]),
    // -Y face
    CubeVertex::new([-0.5, -0.5, -0.5], [0.0, -1.0, 0.0]),
    CubeVertex::new([ 0.5, -0.5, -0.5], [0.0, -1.0, 0.0]),
    CubeVertex::new([ 0.5, -0.5,  0.5], [0.0, -1.0, 0.0]),
    CubeVertex::new([ 0.5, -0.5,  0.5], [0.0, -1.0, 0.0]),
    CubeVertex::new([-0.5, -0.5,  0.5], [0.0, -1.0, 0.0]),
    CubeVertex::new([-0.5, -0.5, -0.5], [0.0, -1.0, 0.0]),
    // +Y face
    CubeVertex::new([-0.5,  0.5, -0.5], [0.0, 1.0, 0.0]),
    CubeVertex::new([ 0.5,  0.5, -0.5], [0.0, 1.0, 0.0]),
    CubeVertex::new([ 0.5,  0.5,  0.5], [0.0, 1.0, 0.0]),
    CubeVertex::new([ 0.5,  0.5,  0.5], [0.0, 1.0, 0.0]),
    CubeVertex::new([-0.5,  0.5,  0.5], [0.0, 1.0, 0.0]),
    CubeVertex::new([-0.5,  0.5, -0.5], [0.0, 1.0, 0.0]),
];

/// Per-instance attribute record (20 bytes, matches the WGSL vertex
/// inputs at locations 2/3/4). An instance never carries its own
/// transform — only a chunk-local offset and two foreign keys.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct VoxelInstance {
    pub offset: [f32; 3],
    pub chunk_id: u32,
    pub material_id: u32,
}

impl VoxelInstance {
    /// Vertex-buffer layout for the instance stream (binding 1,
    /// per-instance).
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<VoxelInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 2,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Uint32,
                    offset: 12,
                    shader_location: 3,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Uint32,
                    offset: 16,
                    shader_location: 4,
                },
            ],
        }
    }
}

/// Authoring funnel for the instance stream. Both foreign keys are
/// range-checked here, at authoring time: an out-of-range id reaching
/// the GPU would read a displaced table record, not fail.
#[derive(Debug, Default)]
pub struct InstanceBatch {
    instances: Vec<VoxelInstance>,
}

impl InstanceBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one instance after validating its foreign keys.
    pub fn push(
        &mut self,
        offset: Vec3,
        chunk: ChunkId,
        material: MaterialId,
    ) -> Result<(), BreachError> {
        if chunk.0 as usize >= CHUNK_CAPACITY {
            return Err(BreachError::OutOfRange {
                table: "chunk",
                index: chunk.0 as usize,
                capacity: CHUNK_CAPACITY,
            });
        }
        if material.0 as usize >= MATERIAL_CAPACITY {
            return Err(BreachError::OutOfRange {
                table: "material",
                index: material.0 as usize,
                capacity: MATERIAL_CAPACITY,
            });
        }
        self.instances.push(VoxelInstance {
            offset: offset.to_array(),
            chunk_id: chunk.0 as u32,
            material_id: material.0 as u32,
        });
        Ok(())
    }

    /// Append every cell of a model as instances of one chunk.
    pub fn push_model(&mut self, model: &VoxelModel, chunk: ChunkId) -> Result<(), BreachError> {
        for &(cell, material) in &model.cells {
            self.push(cell.as_vec3(), chunk, material)?;
        }
        Ok(())
    }

    /// Number of instances in the batch.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Whether the batch is empty.
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Packed instance records, 20 bytes each.
    pub fn bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }

    /// Create the per-draw vertex buffer for this batch.
    pub fn upload(&self, device: &wgpu::Device) -> wgpu::Buffer {
        device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("voxel-instances"),
            contents: self.bytes(),
            usage: wgpu::BufferUsages::VERTEX,
        })
    }
}

//! Deferred voxel rendering: resource tables, geometry pass, lighting
//! pass, and the facade that sequences them.
//!
//! The pipeline is split in two. The geometry pass rasterizes instanced
//! unit cubes into a four-target G-buffer (world position, normal,
//! albedo, roughness/metalness); the lighting pass reads the finalized
//! G-buffer plus the light table and shades each covered pixel. Both
//! passes consume the same fixed-capacity uniform tables, authored on
//! the CPU through [`tables::FrameTables`] and uploaded once per frame.

pub mod camera;
pub mod gbuffer;
pub mod geometry;
pub mod lighting;
pub mod mesh;
pub mod renderer;
pub mod tables;

pub use camera::Camera;
pub use gbuffer::GBuffer;
pub use geometry::GeometryPass;
pub use lighting::{GpuLightParams, LightingPass};
pub use mesh::{CubeVertex, InstanceBatch, VoxelInstance, CUBE};
pub use renderer::DeferredRenderer;
pub use tables::{FrameTables, GpuChunkTransform, GpuLight, GpuMaterial, TableBuffers};

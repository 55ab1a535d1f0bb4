//! Fixed-capacity resource tables shared by both render passes.
//!
//! The tables live in GPU uniform buffers with a fixed per-record stride
//! and 16-byte-aligned fields. The packing rule is load-bearing: a
//! mismatched stride does not crash, it makes the shader read spatially
//! displaced records. Every 3-component value is padded to 4 components
//! and matrices are stored as four aligned column vectors, so the CPU
//! records here are byte-compatible with the WGSL structs.

use breach_core::constants::{CHUNK_CAPACITY, LIGHT_CAPACITY, MATERIAL_CAPACITY};
use breach_core::types::{ChunkId, MaterialId};
use breach_core::BreachError;
use bytemuck::Zeroable;
use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;

/// Material record (32 bytes, matches WGSL Material).
/// 24 bytes of payload padded to the next 16-byte multiple:
/// `surface = [roughness, metalness, 0, 0]`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuMaterial {
    pub albedo: [f32; 4],
    pub surface: [f32; 4],
}

/// Chunk transform record (128 bytes, matches WGSL ChunkTransform).
/// Both matrices are column-major: four aligned vec4 columns each.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuChunkTransform {
    pub model: [[f32; 4]; 4],
    pub mvp: [[f32; 4]; 4],
}

/// Light record (32 bytes, matches WGSL Light). Positions and colors are
/// vec3 payloads padded to vec4 with w = 1.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuLight {
    pub position: [f32; 4],
    pub color: [f32; 4],
}

/// CPU-side authoring surface for the three per-frame tables.
///
/// All mutation funnels through the `set_*` operations below, which fail
/// fast with `OutOfRange` before touching any record. The GPU never sees
/// a partially mutated table: upload happens explicitly via
/// [`TableBuffers::upload`], and the tables are read-only for the
/// duration of the frame's passes. Re-author between frames only.
pub struct FrameTables {
    materials: Vec<GpuMaterial>,
    chunks: Vec<GpuChunkTransform>,
    lights: Vec<GpuLight>,
    light_count: u32,
}

impl Default for FrameTables {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTables {
    /// Create zeroed tables at full capacity. The stride never changes
    /// after this point, so uploads are always whole-table writes.
    pub fn new() -> Self {
        Self {
            materials: vec![GpuMaterial::zeroed(); MATERIAL_CAPACITY],
            chunks: vec![GpuChunkTransform::zeroed(); CHUNK_CAPACITY],
            lights: vec![GpuLight::zeroed(); LIGHT_CAPACITY],
            light_count: 0,
        }
    }

    /// Author one material record.
    pub fn set_material(
        &mut self,
        id: MaterialId,
        albedo: [f32; 4],
        roughness: f32,
        metalness: f32,
    ) -> Result<(), BreachError> {
        let index = id.0 as usize;
        if index >= MATERIAL_CAPACITY {
            return Err(BreachError::OutOfRange {
                table: "material",
                index,
                capacity: MATERIAL_CAPACITY,
            });
        }
        self.materials[index] = GpuMaterial {
            albedo,
            surface: [roughness, metalness, 0.0, 0.0],
        };
        Ok(())
    }

    /// Author one chunk transform record.
    pub fn set_chunk_transform(
        &mut self,
        id: ChunkId,
        model: Mat4,
        mvp: Mat4,
    ) -> Result<(), BreachError> {
        let index = id.0 as usize;
        if index >= CHUNK_CAPACITY {
            return Err(BreachError::OutOfRange {
                table: "chunk",
                index,
                capacity: CHUNK_CAPACITY,
            });
        }
        self.chunks[index] = GpuChunkTransform {
            model: model.to_cols_array_2d(),
            mvp: mvp.to_cols_array_2d(),
        };
        Ok(())
    }

    /// Author one light slot. Raises the active light count to cover the
    /// slot, so the lighting pass skips everything beyond the highest
    /// authored light.
    pub fn set_light(
        &mut self,
        slot: usize,
        position: Vec3,
        color: Vec3,
    ) -> Result<(), BreachError> {
        if slot >= LIGHT_CAPACITY {
            return Err(BreachError::OutOfRange {
                table: "light",
                index: slot,
                capacity: LIGHT_CAPACITY,
            });
        }
        self.lights[slot] = GpuLight {
            position: position.extend(1.0).to_array(),
            color: color.extend(1.0).to_array(),
        };
        self.light_count = self.light_count.max(slot as u32 + 1);
        Ok(())
    }

    /// Number of active lights (highest authored slot + 1).
    pub fn light_count(&self) -> u32 {
        self.light_count
    }

    /// Zero all light slots and reset the active count.
    pub fn clear_lights(&mut self) {
        self.lights.fill(GpuLight::zeroed());
        self.light_count = 0;
    }

    /// Packed material table, one 32-byte record per slot.
    pub fn material_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.materials)
    }

    /// Packed chunk-transform table, one 128-byte record per slot.
    pub fn chunk_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.chunks)
    }

    /// Packed light table, one 32-byte record per slot.
    pub fn light_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.lights)
    }
}

/// GPU residence for the three tables. Allocated once at init; uploads
/// are whole-table `write_buffer` calls, so an upload of an identical
/// `FrameTables` is byte-identical on the GPU.
pub struct TableBuffers {
    pub material_buffer: wgpu::Buffer,
    pub chunk_buffer: wgpu::Buffer,
    pub light_buffer: wgpu::Buffer,
}

impl TableBuffers {
    /// Allocate the uniform buffers at full capacity, zero-initialized.
    pub fn new(device: &wgpu::Device) -> Self {
        let zeroed = FrameTables::new();

        let material_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("material-table"),
            contents: zeroed.material_bytes(),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let chunk_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("chunk-table"),
            contents: zeroed.chunk_bytes(),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let light_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("light-table"),
            contents: zeroed.light_bytes(),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        Self {
            material_buffer,
            chunk_buffer,
            light_buffer,
        }
    }

    /// Upload all three tables. Call between frames, before any pass of
    /// the next frame is recorded; the tables must not change while a
    /// frame that reads them is in flight.
    pub fn upload(&self, queue: &wgpu::Queue, tables: &FrameTables) {
        queue.write_buffer(&self.material_buffer, 0, tables.material_bytes());
        queue.write_buffer(&self.chunk_buffer, 0, tables.chunk_bytes());
        queue.write_buffer(&self.light_buffer, 0, tables.light_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec3;

    #[test]
    fn test_record_sizes() {
        assert_eq!(std::mem::size_of::<GpuMaterial>(), 32);
        assert_eq!(std::mem::size_of::<GpuChunkTransform>(), 128);
        assert_eq!(std::mem::size_of::<GpuLight>(), 32);
    }

    #[test]
    fn test_table_byte_lengths() {
        let tables = FrameTables::new();
        assert_eq!(tables.material_bytes().len(), 256 * 32);
        assert_eq!(tables.chunk_bytes().len(), 170 * 128);
        assert_eq!(tables.light_bytes().len(), 256 * 32);
    }

    #[test]
    fn test_set_material_lands_at_stride_offset() {
        let mut tables = FrameTables::new();
        tables
            .set_material(MaterialId(3), [0.1, 0.2, 0.3, 1.0], 0.7, 0.25)
            .unwrap();

        let bytes = tables.material_bytes();
        let record: &[f32] = bytemuck::cast_slice(&bytes[3 * 32..4 * 32]);
        assert_eq!(record, &[0.1, 0.2, 0.3, 1.0, 0.7, 0.25, 0.0, 0.0]);
        // neighbours untouched
        let next: &[f32] = bytemuck::cast_slice(&bytes[4 * 32..5 * 32]);
        assert!(next.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_set_material_out_of_range_leaves_table_unchanged() {
        let mut tables = FrameTables::new();
        let before = tables.material_bytes().to_vec();
        let err = tables
            .set_material(MaterialId(256), [1.0; 4], 0.5, 0.5)
            .unwrap_err();
        assert_eq!(
            err,
            BreachError::OutOfRange {
                table: "material",
                index: 256,
                capacity: 256,
            }
        );
        assert_eq!(tables.material_bytes(), &before[..]);
    }

    #[test]
    fn test_set_chunk_transform_out_of_range() {
        let mut tables = FrameTables::new();
        assert!(matches!(
            tables.set_chunk_transform(ChunkId(170), Mat4::IDENTITY, Mat4::IDENTITY),
            Err(BreachError::OutOfRange { table: "chunk", index: 170, capacity: 170 })
        ));
    }

    #[test]
    fn test_chunk_transform_packs_column_vectors() {
        let mut tables = FrameTables::new();
        let model = Mat4::from_translation(vec3(7.0, 8.0, 9.0));
        tables
            .set_chunk_transform(ChunkId(0), model, Mat4::IDENTITY)
            .unwrap();

        let floats: &[f32] = bytemuck::cast_slice(&tables.chunk_bytes()[..128]);
        // translation lives in the fourth column of the model matrix
        assert_eq!(&floats[12..16], &[7.0, 8.0, 9.0, 1.0]);
        // mvp identity: first column of the second matrix
        assert_eq!(&floats[16..20], &[1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_set_light_pads_to_vec4() {
        let mut tables = FrameTables::new();
        tables
            .set_light(0, vec3(1.0, 2.0, 3.0), vec3(0.5, 0.6, 0.7))
            .unwrap();
        let floats: &[f32] = bytemuck::cast_slice(&tables.light_bytes()[..32]);
        assert_eq!(floats, &[1.0, 2.0, 3.0, 1.0, 0.5, 0.6, 0.7, 1.0]);
    }

    #[test]
    fn test_light_count_tracks_highest_slot() {
        let mut tables = FrameTables::new();
        assert_eq!(tables.light_count(), 0);
        tables.set_light(4, Vec3::ZERO, Vec3::ONE).unwrap();
        assert_eq!(tables.light_count(), 5);
        tables.set_light(1, Vec3::ZERO, Vec3::ONE).unwrap();
        assert_eq!(tables.light_count(), 5);
        tables.clear_lights();
        assert_eq!(tables.light_count(), 0);
    }

    #[test]
    fn test_set_light_out_of_range() {
        let mut tables = FrameTables::new();
        assert!(tables.set_light(256, Vec3::ZERO, Vec3::ONE).is_err());
    }

    #[test]
    fn test_identical_tables_pack_identically() {
        let author = |tables: &mut FrameTables| {
            tables
                .set_material(MaterialId(1), [0.9, 0.1, 0.1, 1.0], 0.4, 0.0)
                .unwrap();
            tables
                .set_chunk_transform(ChunkId(2), Mat4::from_rotation_x(0.3), Mat4::IDENTITY)
                .unwrap();
            tables.set_light(0, vec3(0.0, 5.0, 0.0), Vec3::ONE).unwrap();
        };
        let mut a = FrameTables::new();
        let mut b = FrameTables::new();
        author(&mut a);
        author(&mut b);
        assert_eq!(a.material_bytes(), b.material_bytes());
        assert_eq!(a.chunk_bytes(), b.chunk_bytes());
        assert_eq!(a.light_bytes(), b.light_bytes());
        // re-authoring the same records is a no-op at the byte level
        let first = a.material_bytes().to_vec();
        author(&mut a);
        assert_eq!(a.material_bytes(), &first[..]);
    }
}

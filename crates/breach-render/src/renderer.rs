//! Facade that owns every deferred-pipeline resource and sequences the
//! two passes.

use glam::Vec3;
use log::info;

use crate::gbuffer::GBuffer;
use crate::geometry::GeometryPass;
use crate::lighting::LightingPass;
use crate::tables::{FrameTables, TableBuffers};

/// Single public entry point for rendering: owns the G-buffer, both
/// passes, and the GPU-resident resource tables. All GPU resources are
/// created at init time; per-frame work is uploads and pass recording.
pub struct DeferredRenderer {
    gbuffer: GBuffer,
    geometry: GeometryPass,
    lighting: LightingPass,
    tables: TableBuffers,
}

impl DeferredRenderer {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        info!("creating deferred renderer at {width}x{height}");
        let tables = TableBuffers::new(device);
        let gbuffer = GBuffer::new(device, width, height);
        let geometry = GeometryPass::new(device, &tables);
        let lighting = LightingPass::new(device, surface_format, &tables, &gbuffer);
        Self {
            gbuffer,
            geometry,
            lighting,
            tables,
        }
    }

    /// Upload the authored tables and lighting parameters for the coming
    /// frame. Must complete before `render` records the frame's passes;
    /// re-authoring `tables` is only safe again after the frame's
    /// command buffer has been submitted and retired.
    pub fn upload_frame(
        &self,
        queue: &wgpu::Queue,
        tables: &FrameTables,
        camera_position: Vec3,
    ) {
        self.tables.upload(queue, tables);
        self.lighting
            .update_params(queue, camera_position, tables.light_count());
    }

    /// Record one frame: geometry pass, then lighting pass, into the same
    /// encoder. Encoding order is the frame-level barrier — the G-buffer
    /// is fully written before the lighting pass reads it, with no locks
    /// involved.
    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        surface_view: &wgpu::TextureView,
        instance_buffer: &wgpu::Buffer,
        instance_count: u32,
    ) {
        self.geometry
            .record(encoder, &self.gbuffer, instance_buffer, instance_count);
        self.lighting.record(encoder, surface_view);
    }

    /// Recreate the G-buffer at a new resolution and rebind the lighting
    /// pass inputs to the new target views.
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.gbuffer.resize(device, width, height);
        self.lighting.rebind_gbuffer(device, &self.gbuffer);
    }

    pub fn gbuffer(&self) -> &GBuffer {
        &self.gbuffer
    }
}

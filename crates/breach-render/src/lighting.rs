//! Lighting pass: full-screen resolve of the G-buffer against the light
//! table.

use glam::Vec3;
use log::debug;

use crate::gbuffer::GBuffer;
use crate::geometry::shader_with_capacities;
use crate::tables::TableBuffers;

/// Per-frame lighting parameters (32 bytes, matches WGSL LightParams).
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuLightParams {
    pub camera_position: [f32; 4],
    pub light_count: u32,
    pub _pad: [u32; 3],
}

/// Owns the full-screen lighting pipeline. The pass reads the four
/// G-buffer targets with textureLoad at integer pixel coordinates — no
/// sampler, no filtering — so its output is a deterministic function of
/// (G-buffer, light table, camera).
pub struct LightingPass {
    pipeline: wgpu::RenderPipeline,
    gbuffer_bgl: wgpu::BindGroupLayout,
    gbuffer_bind_group: wgpu::BindGroup,
    light_bind_group: wgpu::BindGroup,
    params_buffer: wgpu::Buffer,
}

impl LightingPass {
    const SHADER_SRC: &'static str = include_str!("../../../shaders/lighting.wgsl");

    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        tables: &TableBuffers,
        gbuffer: &GBuffer,
    ) -> Self {
        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("lighting-shader"),
            source: wgpu::ShaderSource::Wgsl(shader_with_capacities(Self::SHADER_SRC).into()),
        });

        // G-buffer inputs: binding order matches the geometry pass's
        // target order exactly.
        let texture_entry = |binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture {
                sample_type: wgpu::TextureSampleType::Float { filterable: false },
                view_dimension: wgpu::TextureViewDimension::D2,
                multisampled: false,
            },
            count: None,
        };
        let gbuffer_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("lighting-gbuffer-bgl"),
            entries: &[
                texture_entry(0),
                texture_entry(1),
                texture_entry(2),
                texture_entry(3),
            ],
        });

        let uniform_entry = |binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };
        let light_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("lighting-table-bgl"),
            entries: &[uniform_entry(0), uniform_entry(1)],
        });

        let params_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("light-params"),
            size: std::mem::size_of::<GpuLightParams>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let gbuffer_bind_group = Self::create_gbuffer_bind_group(device, &gbuffer_bgl, gbuffer);

        let light_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("lighting-table-bg"),
            layout: &light_bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: tables.light_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: params_buffer.as_entire_binding(),
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("lighting-pipeline-layout"),
            bind_group_layouts: &[&gbuffer_bgl, &light_bgl],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("lighting-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &module,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: Default::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &module,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            multiview: None,
            cache: None,
        });

        Self {
            pipeline,
            gbuffer_bgl,
            gbuffer_bind_group,
            light_bind_group,
            params_buffer,
        }
    }

    /// Rebuild the G-buffer bind group after a resize recreated the
    /// target views.
    pub fn rebind_gbuffer(&mut self, device: &wgpu::Device, gbuffer: &GBuffer) {
        self.gbuffer_bind_group =
            Self::create_gbuffer_bind_group(device, &self.gbuffer_bgl, gbuffer);
    }

    /// Upload camera position and active light count. Lights at or above
    /// `light_count` are never read by the shader.
    pub fn update_params(&self, queue: &wgpu::Queue, camera_position: Vec3, light_count: u32) {
        debug!("lighting pass: {light_count} active lights");
        let params = GpuLightParams {
            camera_position: camera_position.extend(1.0).to_array(),
            light_count,
            _pad: [0; 3],
        };
        queue.write_buffer(&self.params_buffer, 0, bytemuck::bytes_of(&params));
    }

    /// Record the full-screen lighting pass into `target_view`. Must run
    /// after the geometry pass in the same encoder: the pass order is the
    /// frame-level barrier that guarantees the G-buffer is finalized
    /// before it is read.
    pub fn record(&self, encoder: &mut wgpu::CommandEncoder, target_view: &wgpu::TextureView) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("lighting-pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.gbuffer_bind_group, &[]);
        pass.set_bind_group(1, &self.light_bind_group, &[]);
        // full-screen triangle, no vertex buffer
        pass.draw(0..3, 0..1);
    }

    fn create_gbuffer_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        gbuffer: &GBuffer,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("lighting-gbuffer-bg"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&gbuffer.position),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&gbuffer.normal),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(&gbuffer.albedo),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::TextureView(&gbuffer.rough_metal),
                },
            ],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_light_params_size() {
        assert_eq!(std::mem::size_of::<GpuLightParams>(), 32);
    }
}

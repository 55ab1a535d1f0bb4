//! Geometry pass: rasterizes instanced voxel cubes into the G-buffer.

use breach_core::constants::{CHUNK_CAPACITY, LIGHT_CAPACITY, MATERIAL_CAPACITY};
use log::debug;
use wgpu::util::DeviceExt;

use crate::gbuffer::{GBuffer, COLOR_FORMATS, DEPTH_FORMAT, SENTINEL};
use crate::mesh::{CubeVertex, VoxelInstance, CUBE};
use crate::tables::TableBuffers;

/// Compose a shader source with the capacity constants injected, so the
/// WGSL table array lengths cannot drift from the Rust constants.
pub(crate) fn shader_with_capacities(body: &str) -> String {
    let preamble = format!(
        "const MATERIAL_CAPACITY: u32 = {}u;\nconst CHUNK_CAPACITY: u32 = {}u;\nconst LIGHT_CAPACITY: u32 = {}u;\n",
        MATERIAL_CAPACITY, CHUNK_CAPACITY, LIGHT_CAPACITY,
    );
    format!("{preamble}\n{body}")
}

/// Owns the geometry pipeline, the static cube mesh, and the bind group
/// over the chunk and material tables. Built once at init.
pub struct GeometryPass {
    pipeline: wgpu::RenderPipeline,
    table_bind_group: wgpu::BindGroup,
    cube_buffer: wgpu::Buffer,
}

impl GeometryPass {
    const SHADER_SRC: &'static str = include_str!("../../../shaders/geometry.wgsl");

    pub fn new(device: &wgpu::Device, tables: &TableBuffers) -> Self {
        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("geometry-shader"),
            source: wgpu::ShaderSource::Wgsl(shader_with_capacities(Self::SHADER_SRC).into()),
        });

        // The cube mesh is static under instanced rendering: uploaded once.
        let cube_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube-mesh"),
            contents: bytemuck::cast_slice(&CUBE),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let table_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("geometry-table-bgl"),
            entries: &[
                // chunk transforms, read by the vertex stage
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                // materials, read by the fragment stage
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let table_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("geometry-table-bg"),
            layout: &table_bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: tables.chunk_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: tables.material_buffer.as_entire_binding(),
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("geometry-pipeline-layout"),
            bind_group_layouts: &[&table_bgl],
            push_constant_ranges: &[],
        });

        let targets: Vec<Option<wgpu::ColorTargetState>> = COLOR_FORMATS
            .iter()
            .map(|&format| {
                Some(wgpu::ColorTargetState {
                    format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })
            })
            .collect();

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("geometry-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &module,
                entry_point: Some("vs_main"),
                buffers: &[CubeVertex::layout(), VoxelInstance::layout()],
                compilation_options: Default::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                // the cube's face winding is mixed; depth testing alone
                // resolves occlusion
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &module,
                entry_point: Some("fs_main"),
                targets: &targets,
                compilation_options: Default::default(),
            }),
            multiview: None,
            cache: None,
        });

        Self {
            pipeline,
            table_bind_group,
            cube_buffer,
        }
    }

    /// Record the geometry pass: clear every target to the sentinel, then
    /// draw the cube mesh once per instance. Pixels no instance covers
    /// keep the sentinel and are skipped by the lighting pass.
    pub fn record(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        gbuffer: &GBuffer,
        instance_buffer: &wgpu::Buffer,
        instance_count: u32,
    ) {
        debug!("geometry pass: {instance_count} instances");

        let color_attachment = |view| {
            Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(SENTINEL),
                    store: wgpu::StoreOp::Store,
                },
            })
        };

        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("geometry-pass"),
            color_attachments: &[
                color_attachment(&gbuffer.position),
                color_attachment(&gbuffer.normal),
                color_attachment(&gbuffer.albedo),
                color_attachment(&gbuffer.rough_metal),
            ],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &gbuffer.depth,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        if instance_count == 0 {
            return;
        }

        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.table_bind_group, &[]);
        pass.set_vertex_buffer(0, self.cube_buffer.slice(..));
        pass.set_vertex_buffer(1, instance_buffer.slice(..));
        pass.draw(0..CUBE.len() as u32, 0..instance_count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preamble_injects_all_capacities() {
        let src = shader_with_capacities("fn main() {}");
        assert!(src.contains("const MATERIAL_CAPACITY: u32 = 256u;"));
        assert!(src.contains("const CHUNK_CAPACITY: u32 = 170u;"));
        assert!(src.contains("const LIGHT_CAPACITY: u32 = 256u;"));
        assert!(src.ends_with("fn main() {}"));
    }
}

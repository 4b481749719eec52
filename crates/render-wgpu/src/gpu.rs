use bytemuck::{Pod, Zeroable};
use campusview_render::{RenderView, Scene};
use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;

use crate::mesh::{self, LineVertex, MeshVertex};
use crate::pipeline::{self, PipelineDesc};
use crate::shaders;

const MODEL_TINT: [f32; 4] = [0.55, 0.7, 0.85, 1.0];
const CLEAR: wgpu::Color = wgpu::Color {
    r: 0.62,
    g: 0.74,
    b: 0.86,
    a: 1.0,
};

/// Floor under the fitted model.
const FLOOR_HEIGHT: f32 = -0.5;
const FLOOR_HALF_LINES: i32 = 12;
const FLOOR_SPACING: f32 = 0.25;
const MARKER_SIZE: f32 = 0.06;

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct FrameUniforms {
    view_proj: [[f32; 4]; 4],
    light: [f32; 4],
    tint: [f32; 4],
}

impl FrameUniforms {
    fn new(view_proj: Mat4, scene: &Scene) -> Self {
        let d = scene.light.direction();
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            light: [d.x, d.y, d.z, scene.light.intensity()],
            tint: MODEL_TINT,
        }
    }
}

struct IndexedMesh {
    vertices: wgpu::Buffer,
    indices: wgpu::Buffer,
    count: u32,
}

struct Lines {
    vertices: wgpu::Buffer,
    count: u32,
}

/// wgpu renderer for the campus scene: floor grid, model proxy and target marker.
pub struct WgpuRenderer {
    mesh_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    frame_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    model: IndexedMesh,
    floor: Lines,
    marker: Lines,
    depth: wgpu::TextureView,
    surface_format: wgpu::TextureFormat,
}

impl WgpuRenderer {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let frame_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("frame_uniforms"),
            size: std::mem::size_of::<FrameUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let frame_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("frame_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("frame_bind_group"),
            layout: &frame_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            }],
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_layout"),
            bind_group_layouts: &[&frame_layout],
            push_constant_ranges: &[],
        });
        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::SCENE_SHADER.into()),
        });

        let mesh_pipeline = pipeline::build(
            device,
            &layout,
            &module,
            surface_format,
            PipelineDesc {
                label: "mesh_pipeline",
                vs_entry: "vs_mesh",
                fs_entry: "fs_mesh",
                vertex_layout: MeshVertex::layout(),
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Back),
            },
        );
        let line_pipeline = pipeline::build(
            device,
            &layout,
            &module,
            surface_format,
            PipelineDesc {
                label: "line_pipeline",
                vs_entry: "vs_line",
                fs_entry: "fs_line",
                vertex_layout: LineVertex::layout(),
                topology: wgpu::PrimitiveTopology::LineList,
                cull_mode: None,
            },
        );

        let (cube_vertices, cube_indices) = mesh::unit_cube();
        let model = IndexedMesh {
            vertices: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("model_vertices"),
                contents: bytemuck::cast_slice(&cube_vertices),
                usage: wgpu::BufferUsages::VERTEX,
            }),
            indices: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("model_indices"),
                contents: bytemuck::cast_slice(&cube_indices),
                usage: wgpu::BufferUsages::INDEX,
            }),
            count: cube_indices.len() as u32,
        };

        let floor_lines = mesh::floor_grid(FLOOR_HALF_LINES, FLOOR_SPACING, FLOOR_HEIGHT);
        let floor = Lines {
            vertices: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("floor_lines"),
                contents: bytemuck::cast_slice(&floor_lines),
                usage: wgpu::BufferUsages::VERTEX,
            }),
            count: floor_lines.len() as u32,
        };

        let marker_lines = mesh::target_marker(Vec3::ZERO, MARKER_SIZE);
        let marker = Lines {
            vertices: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("target_marker"),
                contents: bytemuck::cast_slice(&marker_lines),
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            }),
            count: marker_lines.len() as u32,
        };

        Self {
            mesh_pipeline,
            line_pipeline,
            frame_buffer,
            frame_bind_group,
            model,
            floor,
            marker,
            depth: pipeline::depth_view(device, width, height),
            surface_format,
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth = pipeline::depth_view(device, width, height);
        tracing::debug!(width, height, "depth buffer resized");
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_format
    }

    /// Draw one frame of `scene` as seen from `view` into `target`.
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        target: &wgpu::TextureView,
        scene: &Scene,
        view: &RenderView,
    ) {
        queue.write_buffer(
            &self.frame_buffer,
            0,
            bytemuck::bytes_of(&FrameUniforms::new(view.view_projection(), scene)),
        );
        queue.write_buffer(
            &self.marker.vertices,
            0,
            bytemuck::cast_slice(&mesh::target_marker(view.look_at.target, MARKER_SIZE)),
        );

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("scene_encoder"),
        });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });
            pass.set_bind_group(0, &self.frame_bind_group, &[]);

            pass.set_pipeline(&self.line_pipeline);
            for lines in [&self.floor, &self.marker] {
                pass.set_vertex_buffer(0, lines.vertices.slice(..));
                pass.draw(0..lines.count, 0..1);
            }

            pass.set_pipeline(&self.mesh_pipeline);
            pass.set_vertex_buffer(0, self.model.vertices.slice(..));
            pass.set_index_buffer(self.model.indices.slice(..), wgpu::IndexFormat::Uint16);
            pass.draw_indexed(0..self.model.count, 0, 0..1);
        }
        queue.submit(std::iter::once(encoder.finish()));
    }
}

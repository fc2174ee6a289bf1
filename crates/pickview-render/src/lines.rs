//! World-space line rendering (coordinate axes, direction vectors).

use glam::{Vec3, Vec4};
use pickview_core::color;

use crate::engine::DEPTH_FORMAT;

/// One line vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl LineVertex {
    #[must_use]
    pub fn new(position: Vec3, color: Vec4) -> Self {
        Self {
            position: position.to_array(),
            color: color.to_array(),
        }
    }
}

/// Builds the vertices for RGB coordinate axes of the given length.
#[must_use]
pub fn axis_lines(length: f32) -> Vec<LineVertex> {
    vec![
        LineVertex::new(Vec3::ZERO, color::RED),
        LineVertex::new(Vec3::X * length, color::RED),
        LineVertex::new(Vec3::ZERO, color::LIME),
        LineVertex::new(Vec3::Y * length, color::LIME),
        LineVertex::new(Vec3::ZERO, color::BLUE),
        LineVertex::new(Vec3::Z * length, color::BLUE),
    ]
}

/// The line-list rendering pipeline.
pub struct LineRenderer {
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
}

impl LineRenderer {
    /// Creates the line pipeline for the given color target format.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        target_format: wgpu::TextureFormat,
        camera_buffer: &wgpu::Buffer,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("line shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/lines.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("line bind group layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("line bind group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("line pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("line pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: wgpu::PipelineCompilationOptions::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<LineVertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x4],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: wgpu::PipelineCompilationOptions::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: target_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                ..wgpu::PrimitiveState::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Self {
            pipeline,
            bind_group,
        }
    }

    /// Records the draw for an uploaded line buffer.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>, lines: &LineBuffer) {
        if lines.len == 0 {
            return;
        }
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, lines.buffer.slice(..));
        pass.draw(0..lines.len, 0..1);
    }
}

/// A reusable vertex buffer for line lists that change per frame.
pub struct LineBuffer {
    buffer: wgpu::Buffer,
    capacity: u32,
    len: u32,
}

impl LineBuffer {
    /// Creates an empty buffer holding up to `capacity` vertices.
    #[must_use]
    pub fn new(device: &wgpu::Device, capacity: u32) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("line vertices"),
            size: u64::from(capacity) * std::mem::size_of::<LineVertex>() as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        Self {
            buffer,
            capacity,
            len: 0,
        }
    }

    /// Uploads vertices, truncating at capacity.
    pub fn upload(&mut self, queue: &wgpu::Queue, vertices: &[LineVertex]) {
        let mut vertices = vertices;
        if vertices.len() > self.capacity as usize {
            log::warn!(
                "line buffer overflow: {} vertices, capacity {}",
                vertices.len(),
                self.capacity
            );
            vertices = &vertices[..self.capacity as usize];
        }
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(vertices));
        self.len = vertices.len() as u32;
    }
}

//! Screen-space drag-rectangle overlay.
//!
//! Drawn in pixel coordinates over the whole scene while a selection drag is
//! in progress: a semi-transparent fill plus an opaque border, with depth
//! testing and depth writes disabled.

use glam::Vec4;
use pickview_core::ScreenRect;

use crate::engine::DEPTH_FORMAT;

const FILL_COLOR: Vec4 = Vec4::new(0.0, 0.4, 0.4, 0.5);
const BORDER_COLOR: Vec4 = Vec4::new(0.4, 0.8, 1.0, 1.0);

#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct OverlayVertex {
    position: [f32; 2],
    color: [f32; 4],
}

/// Renders the selection rectangle.
pub struct OverlayRenderer {
    fill_pipeline: wgpu::RenderPipeline,
    border_pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    fill_buffer: wgpu::Buffer,
    border_buffer: wgpu::Buffer,
}

impl OverlayRenderer {
    /// Creates the overlay pipelines for the given color target format.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        target_format: wgpu::TextureFormat,
        camera_buffer: &wgpu::Buffer,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("overlay shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/overlay.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("overlay bind group layout"),
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
            label: Some("overlay bind group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("overlay pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let make_pipeline = |label: &str, topology: wgpu::PrimitiveTopology| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                    buffers: &[wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<OverlayVertex>() as u64,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4],
                    }],
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: target_format,
                        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),
                primitive: wgpu::PrimitiveState {
                    topology,
                    ..wgpu::PrimitiveState::default()
                },
                // Always on top; the overlay neither reads nor writes depth.
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled: false,
                    depth_compare: wgpu::CompareFunction::Always,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            })
        };

        let fill_pipeline = make_pipeline("overlay fill pipeline", wgpu::PrimitiveTopology::TriangleStrip);
        let border_pipeline = make_pipeline("overlay border pipeline", wgpu::PrimitiveTopology::LineStrip);

        let fill_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("overlay fill vertices"),
            size: 4 * std::mem::size_of::<OverlayVertex>() as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let border_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("overlay border vertices"),
            size: 5 * std::mem::size_of::<OverlayVertex>() as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            fill_pipeline,
            border_pipeline,
            bind_group,
            fill_buffer,
            border_buffer,
        }
    }

    /// Uploads and draws the rectangle in pixel coordinates.
    pub fn draw_rect(&self, queue: &wgpu::Queue, pass: &mut wgpu::RenderPass<'_>, rect: &ScreenRect) {
        let (l, t) = (rect.min.x, rect.min.y);
        let (r, b) = (rect.max.x, rect.max.y);

        let fill = [
            OverlayVertex {
                position: [l, t],
                color: FILL_COLOR.to_array(),
            },
            OverlayVertex {
                position: [r, t],
                color: FILL_COLOR.to_array(),
            },
            OverlayVertex {
                position: [l, b],
                color: FILL_COLOR.to_array(),
            },
            OverlayVertex {
                position: [r, b],
                color: FILL_COLOR.to_array(),
            },
        ];
        let border = [
            OverlayVertex {
                position: [l, t],
                color: BORDER_COLOR.to_array(),
            },
            OverlayVertex {
                position: [r, t],
                color: BORDER_COLOR.to_array(),
            },
            OverlayVertex {
                position: [r, b],
                color: BORDER_COLOR.to_array(),
            },
            OverlayVertex {
                position: [l, b],
                color: BORDER_COLOR.to_array(),
            },
            OverlayVertex {
                position: [l, t],
                color: BORDER_COLOR.to_array(),
            },
        ];
        queue.write_buffer(&self.fill_buffer, 0, bytemuck::cast_slice(&fill));
        queue.write_buffer(&self.border_buffer, 0, bytemuck::cast_slice(&border));

        pass.set_bind_group(0, &self.bind_group, &[]);

        pass.set_pipeline(&self.fill_pipeline);
        pass.set_vertex_buffer(0, self.fill_buffer.slice(..));
        pass.draw(0..4, 0..1);

        pass.set_pipeline(&self.border_pipeline);
        pass.set_vertex_buffer(0, self.border_buffer.slice(..));
        pass.draw(0..5, 0..1);
    }
}

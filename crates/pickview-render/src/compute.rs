//! Compute-shader texture generation.
//!
//! A compute shader fills a single-channel float texture with an animated
//! pattern, and a fullscreen pass displays it. The `roll` uniform advances a
//! little each frame, wrapping with the frame counter.

use wgpu::util::DeviceExt;

use crate::capture;
use crate::error::{RenderError, RenderResult};

/// Default generated texture width.
pub const TEX_WIDTH: u32 = 512;
/// Default generated texture height.
pub const TEX_HEIGHT: u32 = 512;
/// Compute workgroup size in both dimensions.
pub const WORKGROUP_SIZE: u32 = 16;
/// Frame count at which the animation wraps.
pub const FRAME_WRAP: u32 = 1024;
/// Roll advance per frame.
pub const ROLL_STEP: f32 = 0.01;

#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct RollUniform {
    roll: f32,
    _padding: [f32; 3],
}

/// The compute-generated texture and its display pass.
pub struct ComputeTexturePass {
    texture: wgpu::Texture,
    compute_pipeline: wgpu::ComputePipeline,
    compute_bind_group: wgpu::BindGroup,
    display_pipeline: wgpu::RenderPipeline,
    display_bind_group: wgpu::BindGroup,
    roll_buffer: wgpu::Buffer,
    width: u32,
    height: u32,
    frame: u32,
}

impl ComputeTexturePass {
    /// Creates the pass for the given color target format.
    ///
    /// `width` and `height` must be nonzero multiples of [`WORKGROUP_SIZE`]
    /// so the dispatch covers the texture exactly.
    pub fn new(
        device: &wgpu::Device,
        target_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> RenderResult<Self> {
        if width == 0 || height == 0 || width % WORKGROUP_SIZE != 0 || height % WORKGROUP_SIZE != 0
        {
            return Err(RenderError::InvalidDimensions {
                width,
                height,
                reason: format!("must be nonzero multiples of {WORKGROUP_SIZE}"),
            });
        }

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("compute texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R32Float,
            usage: wgpu::TextureUsages::STORAGE_BINDING
                | wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let texture_view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let roll_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("roll uniform"),
            contents: bytemuck::cast_slice(&[RollUniform {
                roll: 0.0,
                _padding: [0.0; 3],
            }]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        // Compute pipeline
        let compute_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("compute texture shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/compute_tex.wgsl").into()),
        });

        let compute_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("compute texture bind group layout"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::COMPUTE,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::COMPUTE,
                        ty: wgpu::BindingType::StorageTexture {
                            access: wgpu::StorageTextureAccess::WriteOnly,
                            format: wgpu::TextureFormat::R32Float,
                            view_dimension: wgpu::TextureViewDimension::D2,
                        },
                        count: None,
                    },
                ],
            });

        let compute_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("compute texture bind group"),
            layout: &compute_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: roll_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&texture_view),
                },
            ],
        });

        let compute_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("compute texture pipeline layout"),
                bind_group_layouts: &[&compute_bind_group_layout],
                push_constant_ranges: &[],
            });

        let compute_pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("compute texture pipeline"),
            layout: Some(&compute_pipeline_layout),
            module: &compute_shader,
            entry_point: Some("main"),
            compilation_options: wgpu::PipelineCompilationOptions::default(),
            cache: None,
        });

        // Display pipeline
        let display_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("texture display shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/tex_display.wgsl").into()),
        });

        let display_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("texture display bind group layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        // R32Float is not filterable without an extra
                        // feature; the shader uses textureLoad.
                        sample_type: wgpu::TextureSampleType::Float { filterable: false },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                }],
            });

        let display_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("texture display bind group"),
            layout: &display_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&texture_view),
            }],
        });

        let display_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("texture display pipeline layout"),
                bind_group_layouts: &[&display_bind_group_layout],
                push_constant_ranges: &[],
            });

        let display_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("texture display pipeline"),
            layout: Some(&display_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &display_shader,
                entry_point: Some("vs_main"),
                compilation_options: wgpu::PipelineCompilationOptions::default(),
                buffers: &[],
            },
            fragment: Some(wgpu::FragmentState {
                module: &display_shader,
                entry_point: Some("fs_main"),
                compilation_options: wgpu::PipelineCompilationOptions::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: target_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                ..wgpu::PrimitiveState::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Ok(Self {
            texture,
            compute_pipeline,
            compute_bind_group,
            display_pipeline,
            display_bind_group,
            roll_buffer,
            width,
            height,
            frame: 0,
        })
    }

    /// Returns the current frame counter.
    #[must_use]
    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Returns the current roll angle.
    #[must_use]
    pub fn roll(&self) -> f32 {
        self.frame as f32 * ROLL_STEP
    }

    /// Uploads the current roll to the GPU.
    pub fn write_roll(&self, queue: &wgpu::Queue) {
        queue.write_buffer(
            &self.roll_buffer,
            0,
            bytemuck::cast_slice(&[RollUniform {
                roll: self.roll(),
                _padding: [0.0; 3],
            }]),
        );
    }

    /// Advances the frame counter, wrapping at [`FRAME_WRAP`].
    pub fn advance_frame(&mut self) {
        self.frame = (self.frame + 1) % FRAME_WRAP;
    }

    /// Records the compute dispatch covering the whole texture.
    pub fn dispatch(&self, encoder: &mut wgpu::CommandEncoder) {
        let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
            label: Some("texture generation pass"),
            timestamp_writes: None,
        });
        pass.set_pipeline(&self.compute_pipeline);
        pass.set_bind_group(0, &self.compute_bind_group, &[]);
        pass.dispatch_workgroups(self.width / WORKGROUP_SIZE, self.height / WORKGROUP_SIZE, 1);
    }

    /// Records the fullscreen display draw.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_pipeline(&self.display_pipeline);
        pass.set_bind_group(0, &self.display_bind_group, &[]);
        pass.draw(0..4, 0..1);
    }

    /// Reads the generated texels back as f32 values, row-major.
    ///
    /// Blocks until the GPU finishes; intended for tests and debugging.
    pub fn read_texels(&self, device: &wgpu::Device, queue: &wgpu::Queue) -> RenderResult<Vec<f32>> {
        let bytes = capture::read_texture_bytes(device, queue, &self.texture, self.width, self.height, 4)?;
        Ok(bytes
            .chunks_exact(4)
            .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect())
    }
}

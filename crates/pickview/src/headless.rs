//! Headless rendering for tests, screenshots, and batch use.
//!
//! Creates an offscreen GPU context, renders one frame, and reads the
//! pixels back. Requires a GPU adapter (real or software fallback); callers
//! that may run without one should treat engine-creation errors as a skip.

use pollster::FutureExt;

use pickview_render::{
    axis_lines, capture, ComputeTexturePass, LineBuffer, LineRenderer, PointRenderData,
    PointRenderer, RenderEngine, HEADLESS_FORMAT,
};

use crate::error::{PickviewError, Result};
use crate::scene::PickScene;

/// Renders the ray-pickup scene to a tightly packed RGBA byte buffer.
///
/// The scene is resized to the requested dimensions so picking math and the
/// rendered image agree.
pub fn render_scene_to_image(scene: &mut PickScene, width: u32, height: u32) -> Result<Vec<u8>> {
    let engine = RenderEngine::new_headless(width, height).block_on()?;
    scene.resize(engine.width, engine.height);

    let point_renderer = PointRenderer::new(&engine.device, HEADLESS_FORMAT);
    let point_data = PointRenderData::new(
        &engine.device,
        &point_renderer,
        &engine.camera_buffer,
        &scene.cloud.positions(),
        &scene.cloud.display_colors(&[]),
        scene.options.point_size,
    );
    let line_renderer = LineRenderer::new(&engine.device, HEADLESS_FORMAT, &engine.camera_buffer);
    let mut axes = LineBuffer::new(&engine.device, 8);
    axes.upload(&engine.queue, &axis_lines(scene.options.axis_length));

    engine.update_camera_uniforms(scene.view_matrix(), scene.projection_matrix());

    let target = engine
        .headless_target_view()
        .ok_or_else(|| pickview_render::RenderError::CaptureFailed("no headless target".into()))
        .map_err(PickviewError::from)?;

    let mut encoder = engine
        .device
        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("headless encoder"),
        });
    {
        let bg = scene.options.background;
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("headless pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color {
                        r: f64::from(bg.x),
                        g: f64::from(bg.y),
                        b: f64::from(bg.z),
                        a: f64::from(bg.w),
                    }),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &engine.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            ..Default::default()
        });

        if scene.options.draw_axes {
            line_renderer.draw(&mut pass, &axes);
        }
        point_renderer.draw(&mut pass, &point_data);
    }
    engine.queue.submit(std::iter::once(encoder.finish()));

    let texture = engine
        .headless_target
        .as_ref()
        .ok_or_else(|| pickview_render::RenderError::CaptureFailed("no headless target".into()))
        .map_err(PickviewError::from)?;
    let bytes = capture::read_texture_bytes(
        &engine.device,
        &engine.queue,
        texture,
        engine.width,
        engine.height,
        4,
    )?;
    Ok(bytes)
}

/// Renders the ray-pickup scene straight to an image file.
pub fn render_scene_to_file(
    scene: &mut PickScene,
    path: &str,
    width: u32,
    height: u32,
) -> Result<()> {
    let data = render_scene_to_image(scene, width, height)?;
    capture::save_image(path, &data, width.max(1), height.max(1))?;
    log::info!("scene rendered to {path}");
    Ok(())
}

/// Generates the compute texture offscreen and returns its texels.
///
/// `width`/`height` must be multiples of the compute workgroup size.
pub fn generate_texture(width: u32, height: u32) -> Result<Vec<f32>> {
    let engine = RenderEngine::new_headless(width.max(1), height.max(1)).block_on()?;
    let compute = ComputeTexturePass::new(&engine.device, HEADLESS_FORMAT, width, height)?;

    compute.write_roll(&engine.queue);
    let mut encoder = engine
        .device
        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("headless compute encoder"),
        });
    compute.dispatch(&mut encoder);
    engine.queue.submit(std::iter::once(encoder.finish()));

    Ok(compute.read_texels(&engine.device, &engine.queue)?)
}

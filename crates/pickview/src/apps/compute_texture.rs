//! GPU compute-shader texture generation.
//!
//! Every frame the compute pass regenerates the texture with an advancing
//! roll angle and a fullscreen pass displays it. `Escape` quits.

use pickview_render::{ComputeTexturePass, RenderEngine, TEX_HEIGHT, TEX_WIDTH};

use super::{
    ActiveEventLoop, ApplicationHandler, Arc, ControlFlow, ElementState, EventLoop, FutureExt,
    KeyCode, LogicalSize, PhysicalKey, Window, WindowEvent, WindowId,
};
use crate::error::Result;

const WINDOW_TITLE: &str = "pickview - compute texture";

struct Gfx {
    engine: RenderEngine,
    compute: ComputeTexturePass,
}

/// The compute-texture application.
pub struct ComputeTextureApp {
    window: Option<Arc<Window>>,
    gfx: Option<Gfx>,
    close_requested: bool,
}

impl ComputeTextureApp {
    #[must_use]
    pub fn new() -> Self {
        Self {
            window: None,
            gfx: None,
            close_requested: false,
        }
    }

    fn render(&mut self) {
        let Some(gfx) = &mut self.gfx else {
            return;
        };

        gfx.compute.write_roll(&gfx.engine.queue);

        let Some(surface) = &gfx.engine.surface else {
            return;
        };
        let frame = match surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gfx.engine.reconfigure_surface();
                return;
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("surface out of memory, closing");
                self.close_requested = true;
                return;
            }
            Err(e) => {
                log::warn!("dropping frame: {e}");
                return;
            }
        };
        let target = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder =
            gfx.engine
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("compute texture encoder"),
                });

        gfx.compute.dispatch(&mut encoder);

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("texture display pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });

            gfx.compute.draw(&mut pass);
        }

        gfx.engine.queue.submit(std::iter::once(encoder.finish()));
        frame.present();

        gfx.compute.advance_frame();
    }
}

impl Default for ComputeTextureApp {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationHandler for ComputeTextureApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attributes = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(LogicalSize::new(TEX_WIDTH, TEX_HEIGHT));

        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .expect("failed to create window"),
        );

        let engine = RenderEngine::new_windowed(window.clone())
            .block_on()
            .expect("failed to create render engine");

        let info = engine.adapter.get_info();
        log::info!("vendor: {:#06x}, device: {}", info.vendor, info.name);
        log::info!("driver: {} {}", info.driver, info.driver_info);

        let compute = ComputeTexturePass::new(
            &engine.device,
            engine.surface_format(),
            TEX_WIDTH,
            TEX_HEIGHT,
        )
        .expect("failed to create compute texture pass");

        self.window = Some(window);
        self.gfx = Some(Gfx { engine, compute });
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.close_requested = true;
            }
            WindowEvent::Resized(size) => {
                if let Some(gfx) = &mut self.gfx {
                    gfx.engine.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                self.render();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed
                    && event.physical_key == PhysicalKey::Code(KeyCode::Escape)
                {
                    self.close_requested = true;
                }
            }
            _ => {}
        }

        if self.close_requested {
            event_loop.exit();
        }
    }
}

/// Runs the compute-texture demo until the window closes.
pub fn run_compute_texture() -> Result<()> {
    let _ = env_logger::try_init();

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = ComputeTextureApp::new();
    event_loop.run_app(&mut app)?;
    Ok(())
}

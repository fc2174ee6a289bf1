//! Mouse ray-picking against a point cloud with trackball rotation.
//!
//! Controls: left click or drag selects points, right drag rotates, the
//! wheel zooms. `A` toggles the axes, `S`/`W` switch between screen-space
//! and world-space pick margins, `Escape` quits.

use glam::Vec2;

use pickview_core::cloud::PickSpace;
use pickview_core::{Options, ScreenRect};
use pickview_render::{
    axis_lines, LineBuffer, LineRenderer, OverlayRenderer, PointRenderData, PointRenderer,
    RenderEngine,
};

use super::{
    scroll_amount, ActiveEventLoop, ApplicationHandler, Arc, ControlFlow, ElementState, EventLoop,
    FutureExt, KeyCode, LogicalSize, MouseButton, PhysicalKey, Window, WindowEvent, WindowId,
};
use crate::error::Result;
use crate::mouse::MouseState;
use crate::scene::PickScene;

const WINDOW_TITLE: &str = "pickview - ray pickup";

/// GPU-side state, created once the window exists.
struct Gfx {
    engine: RenderEngine,
    point_renderer: PointRenderer,
    point_data: PointRenderData,
    line_renderer: LineRenderer,
    axes: LineBuffer,
    overlay: OverlayRenderer,
}

/// The ray-pickup application.
pub struct RayPickupApp {
    window: Option<Arc<Window>>,
    gfx: Option<Gfx>,
    scene: PickScene,
    mouse: MouseState,
    close_requested: bool,
}

impl RayPickupApp {
    /// Creates the application around an already-built scene.
    #[must_use]
    pub fn new(scene: PickScene) -> Self {
        Self {
            window: None,
            gfx: None,
            scene,
            mouse: MouseState::default(),
            close_requested: false,
        }
    }

    fn render(&mut self) {
        let Some(gfx) = &mut self.gfx else {
            return;
        };

        gfx.engine
            .update_camera_uniforms(self.scene.view_matrix(), self.scene.projection_matrix());

        // Hover feedback: recompute the color buffer every frame.
        let hovered = self.scene.hover(self.mouse.position);
        let colors = self.scene.cloud.display_colors(&hovered);
        gfx.point_data.update_colors(&gfx.engine.queue, &colors);

        // The window title carries the unprojected cursor coordinates.
        if let (Some(window), Some(line)) = (
            &self.window,
            self.scene.cursor_line(self.mouse.position),
        ) {
            log::trace!(
                "cursor {} -> near {} far {}",
                self.mouse.position,
                line.near,
                line.far
            );
            window.set_title(&format!(
                "{WINDOW_TITLE} | cursor ({:4.0},{:4.0}) near ({:+8.2},{:+8.2},{:+8.2}) far ({:+8.2},{:+8.2},{:+8.2})",
                self.mouse.position.x,
                self.mouse.position.y,
                line.near.x,
                line.near.y,
                line.near.z,
                line.far.x,
                line.far.y,
                line.far.z,
            ));
        }

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
                    label: Some("ray pickup encoder"),
                });

        {
            let bg = self.scene.options.background;
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("ray pickup pass"),
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
                    view: &gfx.engine.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            if self.scene.options.draw_axes {
                gfx.line_renderer.draw(&mut pass, &gfx.axes);
            }
            gfx.point_renderer.draw(&mut pass, &gfx.point_data);

            // The selection rectangle rides on top while dragging.
            if self.mouse.left_pressed {
                let rect =
                    ScreenRect::from_corners(self.mouse.left_drag_start, self.mouse.position);
                gfx.overlay.draw_rect(&gfx.engine.queue, &mut pass, &rect);
            }
        }

        gfx.engine.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
    }
}

impl ApplicationHandler for RayPickupApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attributes = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(LogicalSize::new(
                self.scene.options.window_width,
                self.scene.options.window_height,
            ));

        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .expect("failed to create window"),
        );

        let engine = RenderEngine::new_windowed(window.clone())
            .block_on()
            .expect("failed to create render engine");

        let format = engine.surface_format();
        let point_renderer = PointRenderer::new(&engine.device, format);
        let point_data = PointRenderData::new(
            &engine.device,
            &point_renderer,
            &engine.camera_buffer,
            &self.scene.cloud.positions(),
            &self.scene.cloud.display_colors(&[]),
            self.scene.options.point_size,
        );
        let line_renderer = LineRenderer::new(&engine.device, format, &engine.camera_buffer);
        let mut axes = LineBuffer::new(&engine.device, 8);
        axes.upload(&engine.queue, &axis_lines(self.scene.options.axis_length));
        let overlay = OverlayRenderer::new(&engine.device, format, &engine.camera_buffer);

        self.scene.resize(engine.width, engine.height);

        log::info!("L-click/L-drag: select, R-drag: rotate, wheel: zoom, A: axes, S/W: margin space");

        self.window = Some(window);
        self.gfx = Some(Gfx {
            engine,
            point_renderer,
            point_data,
            line_renderer,
            axes,
            overlay,
        });
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
                self.scene.resize(size.width, size.height);
            }
            WindowEvent::RedrawRequested => {
                self.render();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.mouse.position = Vec2::new(position.x as f32, position.y as f32);
                if self.mouse.right_pressed {
                    self.scene.trackball.drag_to(self.mouse.position);
                }
            }
            WindowEvent::MouseInput { state, button, .. } => match (button, state) {
                (MouseButton::Left, ElementState::Pressed) => {
                    self.mouse.press_left();
                }
                (MouseButton::Left, ElementState::Released) => {
                    let (press, release) = self.mouse.release_left();
                    self.scene.finish_left_drag(press, release);
                    log::info!("{} point(s) selected", self.scene.cloud.selected_count());
                }
                (MouseButton::Right, ElementState::Pressed) => {
                    self.mouse.press_right();
                    self.scene.trackball.begin_drag(self.mouse.position);
                }
                (MouseButton::Right, ElementState::Released) => {
                    self.mouse.release_right();
                    self.scene.trackball.end_drag(self.mouse.position);
                }
                _ => {}
            },
            WindowEvent::MouseWheel { delta, .. } => {
                self.scene.wheel_dolly(scroll_amount(delta));
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed {
                    if let PhysicalKey::Code(code) = event.physical_key {
                        match code {
                            KeyCode::Escape => {
                                self.close_requested = true;
                            }
                            KeyCode::KeyA => {
                                let on = self.scene.toggle_axes();
                                log::info!("draw axes: {on}");
                            }
                            KeyCode::KeyS => {
                                self.scene.set_pick_space(PickSpace::Screen);
                                log::info!("pick margin space: screen");
                            }
                            KeyCode::KeyW => {
                                self.scene.set_pick_space(PickSpace::World);
                                log::info!("pick margin space: world");
                            }
                            _ => {}
                        }
                    }
                }
            }
            _ => {}
        }

        if self.close_requested {
            event_loop.exit();
        }
    }
}

/// Runs the ray-pickup demo until the window closes.
pub fn run_ray_pickup(options: Options) -> Result<()> {
    let _ = env_logger::try_init();

    let mut rng = rand::thread_rng();
    let scene = PickScene::new(options, &mut rng);

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = RayPickupApp::new(scene);
    event_loop.run_app(&mut app)?;
    Ok(())
}

//! Camera-orientation/Euler-angle visualization.
//!
//! A movable target point and the base direction (0, 0, -1) rotated by the
//! yaw/pitch computed from that target: the rotated (yellow) vector always
//! points at the (cyan) target, demonstrating the angle extraction.
//!
//! Controls: `X`/`Y`/`Z` move the target (+0.5, shift negates), arrow keys
//! move the eye, wheel zooms, `Q`/`Escape` quits.

use glam::Vec3;

use pickview_core::transform::PerspectiveParams;
use pickview_core::{color, euler};
use pickview_render::{
    LineBuffer, LineRenderer, LineVertex, PointRenderData, PointRenderer, RenderEngine,
};

use super::{
    scroll_amount, ActiveEventLoop, ApplicationHandler, Arc, ControlFlow, ElementState, EventLoop,
    FutureExt, KeyCode, LogicalSize, PhysicalKey, Window, WindowEvent, WindowId,
};
use crate::error::Result;

const WINDOW_TITLE: &str = "pickview - rotation angles";
const STEP: f32 = 0.5;
const WHEEL_STEP: f32 = 0.5;

struct Gfx {
    engine: RenderEngine,
    line_renderer: LineRenderer,
    lines: LineBuffer,
    point_renderer: PointRenderer,
    point_data: PointRenderData,
}

/// The rotation-angle application.
pub struct RotAngleApp {
    window: Option<Arc<Window>>,
    gfx: Option<Gfx>,
    target_point: Vec3,
    shift_down: bool,
    close_requested: bool,
}

impl RotAngleApp {
    #[must_use]
    pub fn new() -> Self {
        Self {
            window: None,
            gfx: None,
            target_point: Vec3::new(1.0, 1.0, -1.0),
            shift_down: false,
            close_requested: false,
        }
    }

    fn log_target(&self) {
        let t = self.target_point;
        log::info!("target point = ({:+.1}, {:+.1}, {:+.1})", t.x, t.y, t.z);
    }

    fn log_eye(&self) {
        if let Some(gfx) = &self.gfx {
            let e = gfx.engine.camera.position;
            log::info!("camera eye = ({:+.1}, {:+.1}, {:+.1})", e.x, e.y, e.z);
        }
    }

    /// Unit axes plus the rotated base direction.
    fn line_vertices(&self) -> Vec<LineVertex> {
        let mut vertices = pickview_render::axis_lines(1.0);
        let rotated = euler::base_direction_toward(self.target_point);
        vertices.push(LineVertex::new(Vec3::ZERO, color::YELLOW));
        vertices.push(LineVertex::new(rotated, color::YELLOW));
        vertices
    }

    fn render(&mut self) {
        let line_vertices = self.line_vertices();
        let Some(gfx) = &mut self.gfx else {
            return;
        };

        gfx.engine.update_camera_uniforms(
            gfx.engine.camera.view_matrix(),
            gfx.engine.camera.projection_matrix(),
        );
        gfx.lines.upload(&gfx.engine.queue, &line_vertices);
        gfx.point_data
            .update_positions(&gfx.engine.queue, &[self.target_point]);

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
                    label: Some("rot angle encoder"),
                });

        {
            let bg = color::TEAL;
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("rot angle pass"),
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

            gfx.line_renderer.draw(&mut pass, &gfx.lines);
            gfx.point_renderer.draw(&mut pass, &gfx.point_data);
        }

        gfx.engine.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
    }
}

impl Default for RotAngleApp {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationHandler for RotAngleApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attributes = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(LogicalSize::new(720, 720));

        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .expect("failed to create window"),
        );

        let mut engine = RenderEngine::new_windowed(window.clone())
            .block_on()
            .expect("failed to create render engine");

        engine.camera.position = Vec3::new(3.0, 4.0, 5.0);
        engine.camera.target = Vec3::ZERO;
        engine.camera.perspective = PerspectiveParams::from_degrees(30.0, 1.0, 100.0);

        let format = engine.surface_format();
        let line_renderer = LineRenderer::new(&engine.device, format, &engine.camera_buffer);
        let lines = LineBuffer::new(&engine.device, 8);
        let point_renderer = PointRenderer::new(&engine.device, format);
        let point_data = PointRenderData::new(
            &engine.device,
            &point_renderer,
            &engine.camera_buffer,
            &[self.target_point],
            &[color::CYAN],
            2.0,
        );

        log::info!("X/Y/Z: move target (shift negates), arrows: move eye, wheel: zoom");
        self.log_target();
        self.log_eye();

        self.window = Some(window);
        self.gfx = Some(Gfx {
            engine,
            line_renderer,
            lines,
            point_renderer,
            point_data,
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
            }
            WindowEvent::RedrawRequested => {
                self.render();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                self.shift_down = modifiers.state().shift_key();
            }
            WindowEvent::MouseWheel { delta, .. } => {
                if let Some(gfx) = &mut self.gfx {
                    gfx.engine.camera.dolly(scroll_amount(delta) * WHEEL_STEP);
                }
                self.log_eye();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return;
                }
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };

                let step = if self.shift_down { -STEP } else { STEP };
                match code {
                    KeyCode::KeyX => {
                        self.target_point.x += step;
                        self.log_target();
                    }
                    KeyCode::KeyY => {
                        self.target_point.y += step;
                        self.log_target();
                    }
                    KeyCode::KeyZ => {
                        self.target_point.z += step;
                        self.log_target();
                    }
                    KeyCode::ArrowLeft | KeyCode::ArrowRight => {
                        if let Some(gfx) = &mut self.gfx {
                            let dir = if code == KeyCode::ArrowLeft { -STEP } else { STEP };
                            gfx.engine.camera.position.x += dir;
                        }
                        self.log_eye();
                    }
                    KeyCode::ArrowUp | KeyCode::ArrowDown => {
                        if let Some(gfx) = &mut self.gfx {
                            let dir = if code == KeyCode::ArrowDown { -STEP } else { STEP };
                            gfx.engine.camera.position.y += dir;
                        }
                        self.log_eye();
                    }
                    KeyCode::KeyQ | KeyCode::Escape => {
                        self.close_requested = true;
                    }
                    _ => {}
                }
            }
            _ => {}
        }

        if self.close_requested {
            event_loop.exit();
        }
    }
}

/// Runs the rotation-angle demo until the window closes.
pub fn run_rot_angle() -> Result<()> {
    let _ = env_logger::try_init();

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = RotAngleApp::new();
    event_loop.run_app(&mut app)?;
    Ok(())
}

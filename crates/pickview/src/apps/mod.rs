//! Demo applications: winit event loops over the render engine.

mod compute_texture;
mod ray_pickup;
mod rot_angle;

pub(crate) use std::sync::Arc;

pub(crate) use pollster::FutureExt;
pub(crate) use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

pub use compute_texture::run_compute_texture;
pub use ray_pickup::run_ray_pickup;
pub use rot_angle::run_rot_angle;

/// Extracts a wheel scroll amount in notches.
pub(crate) fn scroll_amount(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => y,
        MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.1,
    }
}

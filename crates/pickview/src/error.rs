//! Error type for the application layer.

use thiserror::Error;

/// Errors surfaced by the demo applications.
#[derive(Error, Debug)]
pub enum PickviewError {
    /// Core math/configuration error.
    #[error(transparent)]
    Core(#[from] pickview_core::CoreError),

    /// Rendering error.
    #[error(transparent)]
    Render(#[from] pickview_render::RenderError),

    /// Event loop error.
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
}

/// A specialized Result type for the application layer.
pub type Result<T> = std::result::Result<T, PickviewError>;

//! Render pipelines
//!
//! A pipeline owns its passes and runs them in a fixed stage order
//! each frame. [`DeferredPipeline`] is the implemented path;
//! [`ForwardPipeline`] is a placeholder that renders nothing.

pub mod deferred_pipeline;
pub mod forward_pipeline;

pub use deferred_pipeline::DeferredPipeline;
pub use forward_pipeline::ForwardPipeline;

use crate::device::GraphicsDevice;
use crate::pass::RenderContext;

/// A frame-rendering strategy
pub trait Pipeline {
    /// One-time setup after the renderer's subsystems exist
    fn initialize(&mut self);

    /// Render one frame through the pipeline's stages
    fn render(&mut self, ctx: &mut RenderContext);

    /// Release GPU resources owned by the pipeline
    fn terminate(&mut self, device: &mut dyn GraphicsDevice);
}

//! Render passes
//!
//! Each stage of the pipeline implements [`RenderPass`]: `prepare`
//! binds the output target and pushes the pass's state snapshot, `draw`
//! issues the work, and `clean` pops the snapshot and releases
//! bindings. The pipeline calls the three in order and a pass that
//! returns `false` from `prepare` is skipped for the frame.

pub mod gbuffer_pass;
pub mod lighting_pass;

pub use gbuffer_pass::{GBufferPass, RenderObject};
pub use lighting_pass::{DirectionalLight, LightingPass, PointLight};

use crate::device::GraphicsDevice;
use crate::framebuffer::FramebufferRegistry;
use crate::state::StateManager;

/// Everything a pass needs for one frame, borrowed from the renderer
pub struct RenderContext<'a> {
    pub device: &'a mut dyn GraphicsDevice,
    pub framebuffers: &'a mut FramebufferRegistry,
    pub state: &'a mut StateManager,
}

/// A pipeline stage
pub trait RenderPass {
    /// Bind outputs and push pass state. Returns false to skip the pass.
    fn prepare(&mut self, ctx: &mut RenderContext) -> bool;

    /// Issue the pass's draw calls
    fn draw(&mut self, ctx: &mut RenderContext);

    /// Pop pass state and release bindings
    fn clean(&mut self, ctx: &mut RenderContext);
}

//! Forward pipeline placeholder
//!
//! Renders nothing. Exists so the renderer's mode switch has a second
//! concrete pipeline to instantiate; the forward path gets its passes
//! once forward shading lands.

use crate::device::GraphicsDevice;
use crate::engine_warn;
use crate::pass::RenderContext;
use crate::pipeline::Pipeline;

const SOURCE: &str = "ember3d::ForwardPipeline";

#[derive(Default)]
pub struct ForwardPipeline;

impl ForwardPipeline {
    pub fn new() -> Self {
        Self
    }
}

impl Pipeline for ForwardPipeline {
    fn initialize(&mut self) {
        engine_warn!(SOURCE, "Forward pipeline is not implemented, frames will be empty");
    }

    fn render(&mut self, _ctx: &mut RenderContext) {}

    fn terminate(&mut self, _device: &mut dyn GraphicsDevice) {}
}

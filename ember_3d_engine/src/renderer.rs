//! Renderer - top-level owner of the rendering subsystems
//!
//! The application creates one `Renderer`, hands it a boxed
//! `GraphicsDevice`, and drives it: submit camera/objects/lights, call
//! `render_frame`, forward window resizes, terminate on shutdown.
//! Nothing here is global; ownership flows down from the application.
//!
//! Submissions are per-frame: `render_frame` consumes and clears the
//! object and light lists when it finishes.

use std::sync::Arc;

use glam::Mat4;

use crate::camera::Camera;
use crate::device::{ClearMask, GraphicsDevice};
use crate::error::{Error, Result};
use crate::framebuffer::FramebufferRegistry;
use crate::pass::{DirectionalLight, PointLight, RenderContext};
use crate::pipeline::{DeferredPipeline, ForwardPipeline, Pipeline};
use crate::resource::{Model, ShaderProgram};
use crate::state::StateManager;
use crate::{engine_fatal, engine_info, engine_warn};

const SOURCE: &str = "ember3d::Renderer";

/// Background color for the default target
const CLEAR_COLOR: [f32; 4] = [0.05, 0.05, 0.05, 1.0];

/// Which pipeline the renderer instantiates at initialization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Forward,
    Deferred,
}

/// The instantiated pipeline, dispatched by tag
///
/// A closed enum instead of a boxed trait object: the renderer needs
/// mode-specific submission methods, and matching on the tag keeps
/// those calls free of downcasting.
enum PipelineKind {
    Forward(ForwardPipeline),
    Deferred(DeferredPipeline),
}

/// Top-level renderer owning device, state, targets, and pipeline
pub struct Renderer {
    device: Box<dyn GraphicsDevice>,
    state: StateManager,
    framebuffers: FramebufferRegistry,
    pipeline: Option<PipelineKind>,
    mode: RenderMode,
    initialized: bool,
}

impl Renderer {
    /// Wrap a device; no GPU work happens until `initialize`
    pub fn new(device: Box<dyn GraphicsDevice>) -> Self {
        Self {
            device,
            state: StateManager::new(),
            framebuffers: FramebufferRegistry::new(),
            pipeline: None,
            mode: RenderMode::Deferred,
            initialized: false,
        }
    }

    /// Choose the pipeline to build at initialization
    ///
    /// Ignored (with a warning) once initialized; switching pipelines
    /// requires terminate + initialize.
    pub fn set_render_mode(&mut self, mode: RenderMode) {
        if self.initialized {
            engine_warn!(SOURCE, "Cannot change render mode while initialized");
            return;
        }
        self.mode = mode;
    }

    /// Bring up state tracking, render targets, and the pipeline
    ///
    /// The shaders are the deferred path's G-buffer and lighting
    /// programs; the forward pipeline ignores them.
    pub fn initialize(
        &mut self,
        width: u32,
        height: u32,
        gbuffer_shader: Arc<dyn ShaderProgram>,
        lighting_shader: Arc<dyn ShaderProgram>,
    ) -> Result<()> {
        if self.initialized {
            engine_warn!(SOURCE, "Renderer already initialized, ignoring");
            return Ok(());
        }
        if width == 0 || height == 0 {
            engine_fatal!(SOURCE, "Cannot initialize renderer at {}x{}", width, height);
            return Err(Error::InitializationFailed(format!(
                "invalid dimensions {}x{}",
                width, height
            )));
        }

        self.state.initialize(self.device.as_mut());
        self.framebuffers
            .initialize(self.device.as_mut(), width, height)?;

        let mut pipeline = match self.mode {
            RenderMode::Deferred => PipelineKind::Deferred(DeferredPipeline::new(
                self.device.as_mut(),
                gbuffer_shader,
                lighting_shader,
            )),
            RenderMode::Forward => PipelineKind::Forward(ForwardPipeline::new()),
        };
        match &mut pipeline {
            PipelineKind::Forward(p) => p.initialize(),
            PipelineKind::Deferred(p) => p.initialize(),
        }
        self.pipeline = Some(pipeline);

        self.initialized = true;
        engine_info!(SOURCE, "Renderer initialized at {}x{} ({:?})", width, height, self.mode);
        Ok(())
    }

    /// Forward a window resize to the render targets
    pub fn resize(&mut self, width: u32, height: u32) {
        if !self.initialized {
            engine_warn!(SOURCE, "Resize before initialization, ignoring");
            return;
        }
        self.framebuffers.resize(self.device.as_mut(), width, height);
    }

    // ===== PER-FRAME SUBMISSION =====

    /// Hand the frame's camera to the active pipeline
    pub fn set_camera(&mut self, camera: &Camera) {
        if let Some(PipelineKind::Deferred(pipeline)) = &mut self.pipeline {
            pipeline.set_camera(camera);
        }
    }

    /// Submit a drawable for this frame
    pub fn add_render_object(&mut self, model: Option<Arc<dyn Model>>, transform: Mat4) {
        if let Some(PipelineKind::Deferred(pipeline)) = &mut self.pipeline {
            pipeline.add_render_object(model, transform);
        }
    }

    pub fn add_directional_light(&mut self, light: DirectionalLight) {
        if let Some(PipelineKind::Deferred(pipeline)) = &mut self.pipeline {
            pipeline.add_directional_light(light);
        }
    }

    pub fn add_point_light(&mut self, light: PointLight) {
        if let Some(PipelineKind::Deferred(pipeline)) = &mut self.pipeline {
            pipeline.add_point_light(light);
        }
    }

    /// Render one frame and consume the submissions
    pub fn render_frame(&mut self) {
        if !self.initialized {
            engine_warn!(SOURCE, "render_frame before initialization, ignoring");
            return;
        }

        self.framebuffers.bind_default_target(self.device.as_mut());
        self.device.set_clear_color(CLEAR_COLOR);
        self.device.clear(ClearMask::COLOR | ClearMask::DEPTH);

        if let Some(pipeline) = &mut self.pipeline {
            let mut ctx = RenderContext {
                device: self.device.as_mut(),
                framebuffers: &mut self.framebuffers,
                state: &mut self.state,
            };
            match pipeline {
                PipelineKind::Forward(p) => p.render(&mut ctx),
                PipelineKind::Deferred(p) => p.render(&mut ctx),
            }
        }

        if let Some(PipelineKind::Deferred(pipeline)) = &mut self.pipeline {
            pipeline.clear_render_objects();
            pipeline.clear_lights();
        }
    }

    /// Tear down the pipeline, render targets, and state tracking
    ///
    /// Terminating twice (or before initializing) is a logged no-op.
    pub fn terminate(&mut self) {
        if !self.initialized {
            engine_warn!(SOURCE, "Terminate without initialization, ignoring");
            return;
        }

        if let Some(mut pipeline) = self.pipeline.take() {
            match &mut pipeline {
                PipelineKind::Forward(p) => p.terminate(self.device.as_mut()),
                PipelineKind::Deferred(p) => p.terminate(self.device.as_mut()),
            }
        }
        self.framebuffers.terminate(self.device.as_mut());
        self.state.terminate(self.device.as_mut());

        self.initialized = false;
        engine_info!(SOURCE, "Renderer terminated");
    }

    // ===== ACCESSORS =====

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn render_mode(&self) -> RenderMode {
        self.mode
    }

    /// The render target registry (read access for tooling/tests)
    pub fn framebuffers(&self) -> &FramebufferRegistry {
        &self.framebuffers
    }

    /// The state manager (read access for tooling/tests)
    pub fn state(&self) -> &StateManager {
        &self.state
    }

    /// Objects currently submitted for the next frame
    pub fn render_object_count(&self) -> usize {
        match &self.pipeline {
            Some(PipelineKind::Deferred(pipeline)) => pipeline.render_object_count(),
            _ => 0,
        }
    }

    /// Lights currently submitted for the next frame
    pub fn light_count(&self) -> usize {
        match &self.pipeline {
            Some(PipelineKind::Deferred(pipeline)) => {
                pipeline.directional_light_count() + pipeline.point_light_count()
            }
            _ => 0,
        }
    }
}

#[cfg(test)]
#[path = "renderer_tests.rs"]
mod tests;

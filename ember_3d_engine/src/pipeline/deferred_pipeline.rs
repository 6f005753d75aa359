//! Deferred pipeline - fixed stage order over the deferred passes
//!
//! Stage order per frame: shadow, G-buffer, lighting, forward,
//! post-process, UI. The G-buffer and lighting stages are implemented;
//! the rest are placeholders that keep their slot in the sequence.
//!
//! The pipeline tracks the previous frame's view-projection so the
//! G-buffer pass can write motion vectors: `set_camera` hands the old
//! matrix to the pass before storing the new one.

use std::sync::Arc;

use glam::Mat4;

use crate::camera::Camera;
use crate::device::GraphicsDevice;
use crate::engine_debug;
use crate::pass::{
    DirectionalLight, GBufferPass, LightingPass, PointLight, RenderContext, RenderObject,
    RenderPass,
};
use crate::pipeline::Pipeline;
use crate::resource::{Model, ShaderProgram};

const SOURCE: &str = "ember3d::DeferredPipeline";

/// The deferred shading path
pub struct DeferredPipeline {
    gbuffer_pass: GBufferPass,
    lighting_pass: LightingPass,
    prev_view_projection: Mat4,
}

impl DeferredPipeline {
    pub fn new(
        device: &mut dyn GraphicsDevice,
        gbuffer_shader: Arc<dyn ShaderProgram>,
        lighting_shader: Arc<dyn ShaderProgram>,
    ) -> Self {
        Self {
            gbuffer_pass: GBufferPass::new(gbuffer_shader),
            lighting_pass: LightingPass::new(device, lighting_shader),
            prev_view_projection: Mat4::IDENTITY,
        }
    }

    // ===== PER-FRAME SUBMISSION =====

    /// Feed camera matrices to the passes
    ///
    /// The G-buffer pass receives the view-projection this pipeline
    /// rendered the *previous* frame with; only then is the stored
    /// matrix advanced to the current one.
    pub fn set_camera(&mut self, camera: &Camera) {
        let view = *camera.view_matrix();
        let projection = *camera.projection_matrix();
        let view_projection = projection * view;

        self.gbuffer_pass.set_matrices(view, projection);
        self.gbuffer_pass
            .set_prev_view_projection(self.prev_view_projection);

        self.lighting_pass.set_view_position(camera.position());
        self.lighting_pass
            .set_inv_view_projection(view_projection.inverse());

        self.prev_view_projection = view_projection;
    }

    /// Submit a drawable for this frame
    ///
    /// Without per-object transform history the previous transform is
    /// the current one, so object motion vectors read zero; camera
    /// motion still comes through the previous view-projection.
    pub fn add_render_object(&mut self, model: Option<Arc<dyn Model>>, transform: Mat4) {
        self.gbuffer_pass.add_render_object(RenderObject {
            model,
            transform,
            prev_transform: transform,
        });
    }

    pub fn add_directional_light(&mut self, light: DirectionalLight) {
        self.lighting_pass.add_directional_light(light);
    }

    pub fn add_point_light(&mut self, light: PointLight) {
        self.lighting_pass.add_point_light(light);
    }

    pub fn clear_render_objects(&mut self) {
        self.gbuffer_pass.clear_render_objects();
    }

    pub fn clear_lights(&mut self) {
        self.lighting_pass.clear_lights();
    }

    pub fn render_object_count(&self) -> usize {
        self.gbuffer_pass.render_object_count()
    }

    pub fn directional_light_count(&self) -> usize {
        self.lighting_pass.directional_light_count()
    }

    pub fn point_light_count(&self) -> usize {
        self.lighting_pass.point_light_count()
    }

    // ===== STAGES =====

    fn run_pass(pass: &mut dyn RenderPass, ctx: &mut RenderContext) {
        if pass.prepare(ctx) {
            pass.draw(ctx);
            pass.clean(ctx);
        }
    }

    fn shadow_stage(&mut self, _ctx: &mut RenderContext) {
        // Shadow map rendering lands here; the targets already exist in
        // the registry.
    }

    fn forward_stage(&mut self, _ctx: &mut RenderContext) {
        // Transparent/forward-shaded geometry over the resolved HDR buffer.
    }

    fn post_process_stage(&mut self, _ctx: &mut RenderContext) {
        // Tone mapping and effects, ping-ponging the post-process buffers.
    }

    fn ui_stage(&mut self, _ctx: &mut RenderContext) {
        // UI composited onto the default target.
    }
}

impl Pipeline for DeferredPipeline {
    fn initialize(&mut self) {
        engine_debug!(SOURCE, "Deferred pipeline ready");
    }

    fn render(&mut self, ctx: &mut RenderContext) {
        self.shadow_stage(ctx);
        Self::run_pass(&mut self.gbuffer_pass, ctx);
        Self::run_pass(&mut self.lighting_pass, ctx);
        self.forward_stage(ctx);
        self.post_process_stage(ctx);
        self.ui_stage(ctx);
    }

    fn terminate(&mut self, device: &mut dyn GraphicsDevice) {
        self.lighting_pass.destroy(device);
    }
}

#[cfg(test)]
#[path = "deferred_pipeline_tests.rs"]
mod tests;

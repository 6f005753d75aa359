//! G-buffer pass - geometry attributes into the G-buffer
//!
//! Rasterizes every submitted object into the G-buffer's three color
//! attachments (albedo+metallic, normal+roughness, motion+shading
//! model) and its depth attachment. Lighting is deferred entirely to
//! the resolve pass; this pass only writes attributes.

use std::sync::Arc;

use glam::Mat4;

use crate::device::{ClearMask, CompareFunc, CullFace};
use crate::framebuffer::TargetKind;
use crate::pass::{RenderContext, RenderPass};
use crate::resource::{Model, ShaderProgram};
use crate::state::RenderState;

/// One submitted drawable
///
/// `prev_transform` is the object's transform from the previous frame;
/// the pass composes it with the previous view-projection to produce
/// per-pixel motion vectors.
pub struct RenderObject {
    pub model: Option<Arc<dyn Model>>,
    pub transform: Mat4,
    pub prev_transform: Mat4,
}

/// Geometry pass writing the G-buffer
pub struct GBufferPass {
    shader: Arc<dyn ShaderProgram>,
    render_objects: Vec<RenderObject>,
    view: Mat4,
    projection: Mat4,
    prev_view_projection: Mat4,
}

impl GBufferPass {
    pub fn new(shader: Arc<dyn ShaderProgram>) -> Self {
        Self {
            shader,
            render_objects: Vec::new(),
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            prev_view_projection: Mat4::IDENTITY,
        }
    }

    // ===== PER-FRAME INPUTS =====

    pub fn set_matrices(&mut self, view: Mat4, projection: Mat4) {
        self.view = view;
        self.projection = projection;
    }

    /// View-projection the previous frame was rendered with
    pub fn set_prev_view_projection(&mut self, prev_view_projection: Mat4) {
        self.prev_view_projection = prev_view_projection;
    }

    pub fn add_render_object(&mut self, object: RenderObject) {
        self.render_objects.push(object);
    }

    pub fn clear_render_objects(&mut self) {
        self.render_objects.clear();
    }

    pub fn render_object_count(&self) -> usize {
        self.render_objects.len()
    }
}

impl RenderPass for GBufferPass {
    fn prepare(&mut self, ctx: &mut RenderContext) -> bool {
        ctx.framebuffers.clear_target(
            ctx.device,
            TargetKind::GBuffer,
            ClearMask::COLOR | ClearMask::DEPTH,
        );

        ctx.state.push_state(
            ctx.device,
            RenderState {
                depth_test: true,
                depth_func: CompareFunc::Less,
                culling: true,
                cull_face: CullFace::Back,
                blending: false,
                ..Default::default()
            },
        );

        self.shader.activate();
        self.shader.set_mat4("view", self.view);
        self.shader.set_mat4("projection", self.projection);

        true
    }

    fn draw(&mut self, ctx: &mut RenderContext) {
        for object in &self.render_objects {
            let Some(model) = &object.model else {
                continue;
            };

            self.shader.set_mat4("model", object.transform);
            self.shader.set_mat4(
                "prevMVP",
                self.prev_view_projection * object.prev_transform,
            );

            // Material defaults; models override these per mesh if they
            // carry their own material data
            self.shader.set_float("metallic", 0.0);
            self.shader.set_float("roughness", 0.5);
            self.shader.set_int("shadingModel", 0);

            model.draw(ctx.device, self.shader.program());
        }
    }

    fn clean(&mut self, ctx: &mut RenderContext) {
        ctx.state.pop_state(ctx.device);
        ctx.state.unbind_vertex_array(ctx.device);
    }
}

#[cfg(test)]
#[path = "gbuffer_pass_tests.rs"]
mod tests;

//! Lighting pass - fullscreen deferred resolve
//!
//! Reads the G-buffer attachments, reconstructs world position from
//! depth via the inverse view-projection, and accumulates lighting for
//! every submitted light into the HDR post-process buffer. Runs as a
//! single fullscreen quad; per-light cost is paid in the fragment
//! shader, not in draw calls.

use std::sync::Arc;

use glam::{Mat4, Vec3};

use crate::device::{BufferHandle, ClearMask, GraphicsDevice, VertexArrayHandle};
use crate::engine_warn;
use crate::framebuffer::{AttachmentKind, TargetKind};
use crate::pass::{RenderContext, RenderPass};
use crate::resource::ShaderProgram;
use crate::state::RenderState;

const SOURCE: &str = "ember3d::LightingPass";

/// Shader-side directional light array size
pub const MAX_DIRECTIONAL_LIGHTS: usize = 4;

/// Shader-side point light array size
pub const MAX_POINT_LIGHTS: usize = 32;

/// Fullscreen quad: two triangles, interleaved position (xy) + uv
#[rustfmt::skip]
const QUAD_VERTICES: [f32; 24] = [
    -1.0,  1.0,  0.0, 1.0,
    -1.0, -1.0,  0.0, 0.0,
     1.0, -1.0,  1.0, 0.0,

    -1.0,  1.0,  0.0, 1.0,
     1.0, -1.0,  1.0, 0.0,
     1.0,  1.0,  1.0, 1.0,
];

/// A directional (sun-style) light
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub direction: Vec3,
    pub color: Vec3,
    pub intensity: f32,
}

impl DirectionalLight {
    pub fn new(direction: Vec3, color: Vec3, intensity: f32) -> Self {
        Self {
            direction,
            color,
            intensity,
        }
    }
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            direction: Vec3::new(0.0, -1.0, 0.0),
            color: Vec3::ONE,
            intensity: 1.0,
        }
    }
}

/// A point light with quadratic distance attenuation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Vec3,
    pub intensity: f32,
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
}

impl PointLight {
    /// Light with the standard ~50 unit falloff coefficients
    pub fn new(position: Vec3, color: Vec3, intensity: f32) -> Self {
        Self {
            position,
            color,
            intensity,
            ..Default::default()
        }
    }
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            color: Vec3::ONE,
            intensity: 1.0,
            constant: 1.0,
            linear: 0.09,
            quadratic: 0.032,
        }
    }
}

/// Deferred lighting resolve into the HDR buffer
pub struct LightingPass {
    shader: Arc<dyn ShaderProgram>,
    quad_vao: VertexArrayHandle,
    quad_vbo: BufferHandle,
    directional_lights: Vec<DirectionalLight>,
    point_lights: Vec<PointLight>,
    view_position: Vec3,
    inv_view_projection: Mat4,
}

impl LightingPass {
    /// Create the pass and its fullscreen quad geometry
    pub fn new(device: &mut dyn GraphicsDevice, shader: Arc<dyn ShaderProgram>) -> Self {
        let quad_vao = device.create_vertex_array();
        device.bind_vertex_array(quad_vao);

        let quad_vbo = device.create_buffer(bytemuck::cast_slice(&QUAD_VERTICES));
        // position (xy) then uv, 16-byte stride
        device.set_vertex_attribute(0, 2, 16, 0);
        device.set_vertex_attribute(1, 2, 16, 8);

        device.bind_vertex_array(VertexArrayHandle::NONE);

        Self {
            shader,
            quad_vao,
            quad_vbo,
            directional_lights: Vec::new(),
            point_lights: Vec::new(),
            view_position: Vec3::ZERO,
            inv_view_projection: Mat4::IDENTITY,
        }
    }

    /// Release the quad geometry
    pub fn destroy(&mut self, device: &mut dyn GraphicsDevice) {
        device.delete_buffer(self.quad_vbo);
        device.delete_vertex_array(self.quad_vao);
        self.quad_vbo = BufferHandle::NONE;
        self.quad_vao = VertexArrayHandle::NONE;
    }

    // ===== PER-FRAME INPUTS =====

    pub fn set_view_position(&mut self, position: Vec3) {
        self.view_position = position;
    }

    /// Inverse of the current view-projection, for world-position
    /// reconstruction from depth
    pub fn set_inv_view_projection(&mut self, inv_view_projection: Mat4) {
        self.inv_view_projection = inv_view_projection;
    }

    pub fn add_directional_light(&mut self, light: DirectionalLight) {
        self.directional_lights.push(light);
    }

    pub fn add_point_light(&mut self, light: PointLight) {
        self.point_lights.push(light);
    }

    pub fn clear_lights(&mut self) {
        self.directional_lights.clear();
        self.point_lights.clear();
    }

    pub fn directional_light_count(&self) -> usize {
        self.directional_lights.len()
    }

    pub fn point_light_count(&self) -> usize {
        self.point_lights.len()
    }

    /// Upload light arrays, capped to the shader-side array sizes
    ///
    /// The uploaded counts are the capped counts, so the shader never
    /// indexes past the end of its arrays.
    fn upload_light_uniforms(&self) {
        if self.directional_lights.len() > MAX_DIRECTIONAL_LIGHTS {
            engine_warn!(
                SOURCE,
                "{} directional lights submitted, rendering first {}",
                self.directional_lights.len(),
                MAX_DIRECTIONAL_LIGHTS
            );
        }
        if self.point_lights.len() > MAX_POINT_LIGHTS {
            engine_warn!(
                SOURCE,
                "{} point lights submitted, rendering first {}",
                self.point_lights.len(),
                MAX_POINT_LIGHTS
            );
        }

        let dir_count = self.directional_lights.len().min(MAX_DIRECTIONAL_LIGHTS);
        self.shader.set_int("numDirLights", dir_count as i32);
        for (i, light) in self.directional_lights.iter().take(dir_count).enumerate() {
            self.shader
                .set_vec3(&format!("dirLights[{}].direction", i), light.direction);
            self.shader
                .set_vec3(&format!("dirLights[{}].color", i), light.color);
            self.shader
                .set_float(&format!("dirLights[{}].intensity", i), light.intensity);
        }

        let point_count = self.point_lights.len().min(MAX_POINT_LIGHTS);
        self.shader.set_int("numPointLights", point_count as i32);
        for (i, light) in self.point_lights.iter().take(point_count).enumerate() {
            self.shader
                .set_vec3(&format!("pointLights[{}].position", i), light.position);
            self.shader
                .set_vec3(&format!("pointLights[{}].color", i), light.color);
            self.shader
                .set_float(&format!("pointLights[{}].intensity", i), light.intensity);
            self.shader
                .set_float(&format!("pointLights[{}].constant", i), light.constant);
            self.shader
                .set_float(&format!("pointLights[{}].linear", i), light.linear);
            self.shader
                .set_float(&format!("pointLights[{}].quadratic", i), light.quadratic);
        }
    }
}

impl RenderPass for LightingPass {
    fn prepare(&mut self, ctx: &mut RenderContext) -> bool {
        ctx.framebuffers
            .clear_target(ctx.device, TargetKind::PostProcessA, ClearMask::COLOR);

        // Fullscreen resolve: no depth, no culling, no blending
        ctx.state.push_state(
            ctx.device,
            RenderState {
                depth_test: false,
                culling: false,
                blending: false,
                ..Default::default()
            },
        );

        self.shader.activate();

        ctx.framebuffers.bind_attachment(
            ctx.device,
            ctx.state,
            TargetKind::GBuffer,
            AttachmentKind::Albedo,
            0,
        );
        ctx.framebuffers.bind_attachment(
            ctx.device,
            ctx.state,
            TargetKind::GBuffer,
            AttachmentKind::Normal,
            1,
        );
        ctx.framebuffers.bind_attachment(
            ctx.device,
            ctx.state,
            TargetKind::GBuffer,
            AttachmentKind::Motion,
            2,
        );
        ctx.framebuffers.bind_attachment(
            ctx.device,
            ctx.state,
            TargetKind::GBuffer,
            AttachmentKind::Depth,
            3,
        );

        self.shader.set_int("gAlbedoMetallic", 0);
        self.shader.set_int("gNormalRoughness", 1);
        self.shader.set_int("gMotionShadingModel", 2);
        self.shader.set_int("gDepth", 3);

        self.shader
            .set_mat4("invViewProjection", self.inv_view_projection);
        self.shader.set_vec3("viewPos", self.view_position);

        self.upload_light_uniforms();

        true
    }

    fn draw(&mut self, ctx: &mut RenderContext) {
        ctx.state.bind_vertex_array(ctx.device, self.quad_vao);
        ctx.device.draw_arrays(0, 6);
    }

    fn clean(&mut self, ctx: &mut RenderContext) {
        ctx.state.pop_state(ctx.device);
        ctx.state.unbind_vertex_array(ctx.device);
        ctx.state.unbind_all_textures(ctx.device);
    }
}

#[cfg(test)]
#[path = "lighting_pass_tests.rs"]
mod tests;

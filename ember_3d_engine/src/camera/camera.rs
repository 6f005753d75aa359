//! Camera — low-level passive data container.
//!
//! The Camera computes nothing per frame. The caller (game layer) is
//! responsible for computing and setting the view matrix, projection
//! matrix, and world position; the renderer only reads them when the
//! camera is handed over via `Renderer::set_camera`.

use glam::{Mat4, Vec3};

/// Low-level camera. A passive data container.
///
/// The engine does NOT store or manage cameras. They are tools provided
/// by the engine, owned and driven by the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    view_matrix: Mat4,
    projection_matrix: Mat4,
    position: Vec3,
}

impl Camera {
    /// Create a camera from precomputed matrices
    pub fn new(view: Mat4, projection: Mat4, position: Vec3) -> Self {
        Self {
            view_matrix: view,
            projection_matrix: projection,
            position,
        }
    }

    /// Convenience constructor: look-at view + perspective projection
    pub fn perspective(
        position: Vec3,
        target: Vec3,
        up: Vec3,
        fov_y_radians: f32,
        aspect: f32,
        z_near: f32,
        z_far: f32,
    ) -> Self {
        Self {
            view_matrix: Mat4::look_at_rh(position, target, up),
            projection_matrix: Mat4::perspective_rh_gl(fov_y_radians, aspect, z_near, z_far),
            position,
        }
    }

    // ===== GETTERS =====

    /// View matrix (inverse of the camera's world transform)
    pub fn view_matrix(&self) -> &Mat4 {
        &self.view_matrix
    }

    /// Projection matrix (perspective or orthographic)
    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }

    /// Combined view-projection matrix (projection * view)
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix * self.view_matrix
    }

    /// Camera position in world space
    pub fn position(&self) -> Vec3 {
        self.position
    }

    // ===== SETTERS — store, compute nothing =====

    pub fn set_view(&mut self, matrix: Mat4) {
        self.view_matrix = matrix;
    }

    pub fn set_projection(&mut self, matrix: Mat4) {
        self.projection_matrix = matrix;
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            view_matrix: Mat4::IDENTITY,
            projection_matrix: Mat4::IDENTITY,
            position: Vec3::ZERO,
        }
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;

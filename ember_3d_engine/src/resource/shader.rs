//! ShaderProgram collaborator trait

use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::device::ProgramHandle;

/// A compiled, linked shader program
///
/// Passes activate the program and upload uniforms by name; compilation
/// and uniform location caching are the implementor's concern.
pub trait ShaderProgram {
    /// Make this program current
    fn activate(&self);

    /// The underlying program handle (for draw calls that need it)
    fn program(&self) -> ProgramHandle;

    fn set_bool(&self, name: &str, value: bool);
    fn set_int(&self, name: &str, value: i32);
    fn set_float(&self, name: &str, value: f32);
    fn set_vec2(&self, name: &str, value: Vec2);
    fn set_vec3(&self, name: &str, value: Vec3);
    fn set_vec4(&self, name: &str, value: Vec4);
    fn set_mat4(&self, name: &str, value: Mat4);
}

//! Mock shader program and model for unit tests (no GPU required)
//!
//! The mock shader records every uniform upload so pass tests can
//! assert exact names and values; the mock model records each draw.

use std::sync::{Arc, Mutex};

use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::device::{GraphicsDevice, ProgramHandle};
use crate::resource::model::Model;
use crate::resource::shader::ShaderProgram;

/// A recorded uniform value
#[derive(Debug, Clone, PartialEq)]
pub enum UniformValue {
    Bool(bool),
    Int(i32),
    Float(f32),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Mat4(Mat4),
}

/// Recording shader program
#[derive(Clone)]
pub struct MockShaderProgram {
    program: ProgramHandle,
    activations: Arc<Mutex<usize>>,
    uniforms: Arc<Mutex<Vec<(String, UniformValue)>>>,
}

impl MockShaderProgram {
    pub fn new() -> Self {
        Self {
            program: ProgramHandle(100),
            activations: Arc::new(Mutex::new(0)),
            uniforms: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn activation_count(&self) -> usize {
        *self.activations.lock().unwrap()
    }

    /// All recorded uniform uploads, in order
    pub fn uniforms(&self) -> Vec<(String, UniformValue)> {
        self.uniforms.lock().unwrap().clone()
    }

    /// Most recent value uploaded under `name`, if any
    pub fn uniform(&self, name: &str) -> Option<UniformValue> {
        self.uniforms
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
    }

    pub fn int_uniform(&self, name: &str) -> Option<i32> {
        match self.uniform(name) {
            Some(UniformValue::Int(v)) => Some(v),
            _ => None,
        }
    }

    pub fn float_uniform(&self, name: &str) -> Option<f32> {
        match self.uniform(name) {
            Some(UniformValue::Float(v)) => Some(v),
            _ => None,
        }
    }

    pub fn vec3_uniform(&self, name: &str) -> Option<Vec3> {
        match self.uniform(name) {
            Some(UniformValue::Vec3(v)) => Some(v),
            _ => None,
        }
    }

    pub fn mat4_uniform(&self, name: &str) -> Option<Mat4> {
        match self.uniform(name) {
            Some(UniformValue::Mat4(v)) => Some(v),
            _ => None,
        }
    }

    pub fn clear_uniforms(&self) {
        self.uniforms.lock().unwrap().clear();
    }

    fn record(&self, name: &str, value: UniformValue) {
        self.uniforms
            .lock()
            .unwrap()
            .push((name.to_string(), value));
    }
}

impl Default for MockShaderProgram {
    fn default() -> Self {
        Self::new()
    }
}

impl ShaderProgram for MockShaderProgram {
    fn activate(&self) {
        *self.activations.lock().unwrap() += 1;
    }

    fn program(&self) -> ProgramHandle {
        self.program
    }

    fn set_bool(&self, name: &str, value: bool) {
        self.record(name, UniformValue::Bool(value));
    }

    fn set_int(&self, name: &str, value: i32) {
        self.record(name, UniformValue::Int(value));
    }

    fn set_float(&self, name: &str, value: f32) {
        self.record(name, UniformValue::Float(value));
    }

    fn set_vec2(&self, name: &str, value: Vec2) {
        self.record(name, UniformValue::Vec2(value));
    }

    fn set_vec3(&self, name: &str, value: Vec3) {
        self.record(name, UniformValue::Vec3(value));
    }

    fn set_vec4(&self, name: &str, value: Vec4) {
        self.record(name, UniformValue::Vec4(value));
    }

    fn set_mat4(&self, name: &str, value: Mat4) {
        self.record(name, UniformValue::Mat4(value));
    }
}

/// Recording model
#[derive(Clone)]
pub struct MockModel {
    draws: Arc<Mutex<Vec<ProgramHandle>>>,
}

impl MockModel {
    pub fn new() -> Self {
        Self {
            draws: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn draw_count(&self) -> usize {
        self.draws.lock().unwrap().len()
    }

    /// Programs each draw ran with, in order
    pub fn draw_programs(&self) -> Vec<ProgramHandle> {
        self.draws.lock().unwrap().clone()
    }
}

impl Default for MockModel {
    fn default() -> Self {
        Self::new()
    }
}

impl Model for MockModel {
    fn draw(&self, _device: &mut dyn GraphicsDevice, program: ProgramHandle) {
        self.draws.lock().unwrap().push(program);
    }
}

//! Resource collaborator traits
//!
//! Shader programs and models are owned by the application's resource
//! layer; the render passes only need the narrow surfaces defined here.

pub mod model;
pub mod shader;

#[cfg(test)]
pub mod mock_resource;

pub use model::Model;
pub use shader::ShaderProgram;

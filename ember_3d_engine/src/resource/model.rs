//! Model collaborator trait

use crate::device::{GraphicsDevice, ProgramHandle};

/// Drawable geometry owned by the application's resource layer
///
/// The G-buffer pass has already activated the program and uploaded the
/// per-object uniforms when `draw` runs; the model only issues its own
/// vertex array binds and draw calls (and any per-mesh material
/// uniforms it manages itself).
pub trait Model {
    fn draw(&self, device: &mut dyn GraphicsDevice, program: ProgramHandle);
}

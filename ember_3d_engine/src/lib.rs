/*!
# Ember 3D Engine

Deferred-rendering core for the Ember3D engine: framebuffer management,
scoped GPU state tracking, the G-buffer and lighting passes, and the
pipeline that orchestrates them into a frame.

The GPU itself sits behind the [`device::GraphicsDevice`] trait; backend
crates (OpenGL, etc.) implement it, and the whole core can be exercised
against a recording mock without a GPU.

## Architecture

- **GraphicsDevice**: raw GPU operations (state, bindings, framebuffers)
- **StateManager**: snapshot stack + redundant-bind elision
- **FramebufferRegistry**: owns all off-screen render targets
- **GBufferPass / LightingPass**: the two implemented deferred stages
- **DeferredPipeline**: fixed stage order + per-frame submission lists
- **Renderer**: top-level owner tying the pieces together
*/

// Internal modules
mod engine;
mod error;
pub mod log;

pub mod camera;
pub mod device;
pub mod framebuffer;
pub mod pass;
pub mod pipeline;
pub mod renderer;
pub mod resource;
pub mod state;

// Main ember3d namespace module
pub mod ember3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine facade (global logging host)
    pub use crate::engine::Engine;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{DefaultLogger, LogEntry, LogSeverity, Logger};
    }

    // GPU device abstraction
    pub mod device {
        pub use crate::device::*;
    }

    // Render sub-module with all rendering types
    pub mod render {
        pub use crate::framebuffer::*;
        pub use crate::pass::*;
        pub use crate::pipeline::*;
        pub use crate::renderer::*;
        pub use crate::state::*;
    }

    // Resource collaborator traits
    pub mod resource {
        pub use crate::resource::*;
    }

    // Camera
    pub mod camera {
        pub use crate::camera::*;
    }
}

// Re-export math library at crate root
pub use glam;

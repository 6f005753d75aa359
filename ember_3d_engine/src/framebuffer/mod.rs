//! Off-screen render targets
//!
//! [`FramebufferRegistry`] owns the fixed set of targets the deferred
//! pipeline renders into (shadow maps, G-buffer, post-process buffers)
//! and rebuilds the screen-dependent ones on resize. Individual targets
//! are described by [`TargetKind`] and their textures by
//! [`AttachmentKind`].

pub mod framebuffer_registry;
pub mod target;

pub use framebuffer_registry::FramebufferRegistry;
pub use target::{AttachmentKind, FramebufferTarget, TargetKind};

//! Render target identity and per-target data

use rustc_hash::FxHashMap;

use crate::device::{FramebufferHandle, TextureHandle};

/// The fixed set of render targets the pipeline draws into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    /// Depth-only map for the primary directional light (fixed size)
    DirectionalShadowMap,
    /// Depth cube map for omnidirectional point light shadows (fixed size)
    PointShadowCubeMap,
    /// Geometry attributes (3 color attachments + depth, screen-sized)
    GBuffer,
    /// HDR scene color, output of the lighting resolve (screen-sized)
    PostProcessA,
    /// LDR color for post-process ping-pong (screen-sized)
    PostProcessB,
    /// The window-system framebuffer
    Default,
}

/// Textures a target can carry
///
/// Lookups are always by `(TargetKind, AttachmentKind)` pair; two
/// targets may both carry a depth-class attachment without ambiguity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttachmentKind {
    /// RGB albedo + metallic in alpha (G-buffer color 0)
    Albedo,
    /// World-space normal + roughness in alpha (G-buffer color 1)
    Normal,
    /// Motion vector + shading model id (G-buffer color 2)
    Motion,
    /// Scene depth (G-buffer depth attachment)
    Depth,
    /// HDR lighting output
    HdrColor,
    /// LDR post-process output
    LdrColor,
    /// Shadow map depth
    ShadowDepth,
}

/// A framebuffer plus the textures attached to it
#[derive(Debug)]
pub struct FramebufferTarget {
    framebuffer: FramebufferHandle,
    attachments: FxHashMap<AttachmentKind, TextureHandle>,
    width: u32,
    height: u32,
}

impl FramebufferTarget {
    pub fn new(
        framebuffer: FramebufferHandle,
        attachments: FxHashMap<AttachmentKind, TextureHandle>,
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            framebuffer,
            attachments,
            width,
            height,
        }
    }

    pub fn framebuffer(&self) -> FramebufferHandle {
        self.framebuffer
    }

    pub fn attachment(&self, kind: AttachmentKind) -> Option<TextureHandle> {
        self.attachments.get(&kind).copied()
    }

    /// All attached textures (iteration order is unspecified)
    pub fn attachments(&self) -> impl Iterator<Item = TextureHandle> + '_ {
        self.attachments.values().copied()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

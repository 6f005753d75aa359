//! FramebufferRegistry - owner of all off-screen render targets
//!
//! Builds the full target set at initialization and rebuilds it on
//! resize. A resize to the current dimensions is a no-op; a real
//! resize destroys every target first and only then recreates, so a
//! failure mid-rebuild can never leak the old GPU objects.
//!
//! Incomplete framebuffers are logged as errors rather than returned:
//! a missing target degrades the frame but must not abort it.

use rustc_hash::FxHashMap;

use crate::device::{
    AttachmentPoint, ClearMask, FramebufferHandle, GraphicsDevice, TextureDesc, TextureFormat,
    TextureHandle, TextureTarget,
};
use crate::framebuffer::target::{AttachmentKind, FramebufferTarget, TargetKind};
use crate::state::StateManager;
use crate::{engine_bail, engine_debug, engine_error, engine_info, engine_warn};

const SOURCE: &str = "ember3d::FramebufferRegistry";

/// Directional shadow map resolution (fixed, independent of screen size)
pub const SHADOW_MAP_SIZE: u32 = 2048;

/// Point light shadow cube face resolution
pub const POINT_SHADOW_SIZE: u32 = 1024;

/// Owns every off-screen target and tracks the screen dimensions
pub struct FramebufferRegistry {
    targets: FxHashMap<TargetKind, FramebufferTarget>,
    width: u32,
    height: u32,
}

impl FramebufferRegistry {
    pub fn new() -> Self {
        Self {
            targets: FxHashMap::default(),
            width: 0,
            height: 0,
        }
    }

    /// Build the full target set for the given screen dimensions
    pub fn initialize(
        &mut self,
        device: &mut dyn GraphicsDevice,
        width: u32,
        height: u32,
    ) -> crate::error::Result<()> {
        if width == 0 || height == 0 {
            engine_bail!(SOURCE, "Cannot initialize with {}x{} dimensions", width, height);
        }

        // Re-initialization rebuilds from scratch
        self.destroy_all(device);

        self.width = width;
        self.height = height;
        self.create_all(device);

        engine_info!(SOURCE, "Initialized render targets at {}x{}", width, height);
        Ok(())
    }

    /// Rebuild targets for new screen dimensions
    ///
    /// A resize to the current dimensions is a no-op: no GPU object is
    /// touched. Otherwise every target is destroyed before any new one
    /// is created.
    pub fn resize(&mut self, device: &mut dyn GraphicsDevice, width: u32, height: u32) {
        if width == self.width && height == self.height {
            return;
        }
        if width == 0 || height == 0 {
            engine_warn!(SOURCE, "Ignoring resize to {}x{}", width, height);
            return;
        }

        self.destroy_all(device);

        self.width = width;
        self.height = height;
        self.create_all(device);

        engine_debug!(SOURCE, "Resized render targets to {}x{}", width, height);
    }

    /// Bind a target and set its viewport
    ///
    /// `TargetKind::Default` binds the window framebuffer at screen
    /// dimensions. Unknown targets are a logged no-op.
    pub fn bind_target(&self, device: &mut dyn GraphicsDevice, kind: TargetKind) {
        if kind == TargetKind::Default {
            self.bind_default_target(device);
            return;
        }

        match self.targets.get(&kind) {
            Some(target) => {
                device.bind_framebuffer(target.framebuffer());
                device.set_viewport(target.width(), target.height());
            }
            None => {
                engine_error!(SOURCE, "Cannot bind unknown render target {:?}", kind);
            }
        }
    }

    /// Bind the window framebuffer at screen dimensions
    pub fn bind_default_target(&self, device: &mut dyn GraphicsDevice) {
        device.bind_framebuffer(FramebufferHandle::DEFAULT);
        device.set_viewport(self.width, self.height);
    }

    /// Bind a target and clear the requested buffers
    pub fn clear_target(&self, device: &mut dyn GraphicsDevice, kind: TargetKind, mask: ClearMask) {
        self.bind_target(device, kind);
        device.clear(mask);
    }

    /// Look up an attachment texture by (target, attachment) pair
    pub fn attachment_texture(
        &self,
        kind: TargetKind,
        attachment: AttachmentKind,
    ) -> Option<TextureHandle> {
        self.targets.get(&kind)?.attachment(attachment)
    }

    /// Bind an attachment texture to a texture unit
    ///
    /// Goes through the state manager so the binding cache stays
    /// coherent. Missing attachments are a logged no-op.
    pub fn bind_attachment(
        &self,
        device: &mut dyn GraphicsDevice,
        state: &mut StateManager,
        kind: TargetKind,
        attachment: AttachmentKind,
        unit: u32,
    ) {
        match self.attachment_texture(kind, attachment) {
            Some(texture) => {
                let target = match kind {
                    TargetKind::PointShadowCubeMap => TextureTarget::CubeMap,
                    _ => TextureTarget::Texture2d,
                };
                state.bind_texture(device, unit, target, texture);
            }
            None => {
                engine_error!(
                    SOURCE,
                    "No attachment {:?} on render target {:?}",
                    attachment,
                    kind
                );
            }
        }
    }

    /// Destroy every target
    pub fn terminate(&mut self, device: &mut dyn GraphicsDevice) {
        self.destroy_all(device);
        self.width = 0;
        self.height = 0;
    }

    // ===== ACCESSORS =====

    pub fn target(&self, kind: TargetKind) -> Option<&FramebufferTarget> {
        self.targets.get(&kind)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    // ===== TARGET CONSTRUCTION =====

    fn create_all(&mut self, device: &mut dyn GraphicsDevice) {
        let gbuffer = self.create_gbuffer(device);
        self.targets.insert(TargetKind::GBuffer, gbuffer);

        let shadow = self.create_directional_shadow_map(device);
        self.targets.insert(TargetKind::DirectionalShadowMap, shadow);

        let point_shadow = self.create_point_shadow_cube_map(device);
        self.targets.insert(TargetKind::PointShadowCubeMap, point_shadow);

        let post_a = self.create_post_process(
            device,
            TargetKind::PostProcessA,
            TextureFormat::Rgba16F,
            AttachmentKind::HdrColor,
        );
        self.targets.insert(TargetKind::PostProcessA, post_a);

        let post_b = self.create_post_process(
            device,
            TargetKind::PostProcessB,
            TextureFormat::Rgba8,
            AttachmentKind::LdrColor,
        );
        self.targets.insert(TargetKind::PostProcessB, post_b);
    }

    fn destroy_all(&mut self, device: &mut dyn GraphicsDevice) {
        for (_, target) in self.targets.drain() {
            for texture in target.attachments() {
                device.delete_texture(texture);
            }
            device.delete_framebuffer(target.framebuffer());
        }
    }

    /// Geometry buffer: albedo+metallic, normal+roughness,
    /// motion+shading-model, plus a depth attachment
    fn create_gbuffer(&self, device: &mut dyn GraphicsDevice) -> FramebufferTarget {
        let framebuffer = device.create_framebuffer();
        device.bind_framebuffer(framebuffer);

        let mut attachments = FxHashMap::default();

        let albedo =
            device.create_texture(&TextureDesc::color(self.width, self.height, TextureFormat::Rgba8));
        device.attach_texture(AttachmentPoint::Color(0), albedo);
        attachments.insert(AttachmentKind::Albedo, albedo);

        let normal = device.create_texture(&TextureDesc::color(
            self.width,
            self.height,
            TextureFormat::Rgba16F,
        ));
        device.attach_texture(AttachmentPoint::Color(1), normal);
        attachments.insert(AttachmentKind::Normal, normal);

        let motion =
            device.create_texture(&TextureDesc::color(self.width, self.height, TextureFormat::Rgba8));
        device.attach_texture(AttachmentPoint::Color(2), motion);
        attachments.insert(AttachmentKind::Motion, motion);

        let depth = device.create_texture(&TextureDesc::depth(self.width, self.height));
        device.attach_texture(AttachmentPoint::Depth, depth);
        attachments.insert(AttachmentKind::Depth, depth);

        device.set_draw_buffers(3);
        self.check_complete(device, TargetKind::GBuffer);

        FramebufferTarget::new(framebuffer, attachments, self.width, self.height)
    }

    /// Depth-only map for the directional light, fixed resolution
    fn create_directional_shadow_map(&self, device: &mut dyn GraphicsDevice) -> FramebufferTarget {
        let framebuffer = device.create_framebuffer();
        device.bind_framebuffer(framebuffer);

        let mut attachments = FxHashMap::default();

        let depth = device.create_texture(&TextureDesc::depth(SHADOW_MAP_SIZE, SHADOW_MAP_SIZE));
        device.attach_texture(AttachmentPoint::Depth, depth);
        attachments.insert(AttachmentKind::ShadowDepth, depth);

        device.disable_color_output();
        self.check_complete(device, TargetKind::DirectionalShadowMap);

        FramebufferTarget::new(framebuffer, attachments, SHADOW_MAP_SIZE, SHADOW_MAP_SIZE)
    }

    /// Depth cube map for point light shadows, fixed resolution
    fn create_point_shadow_cube_map(&self, device: &mut dyn GraphicsDevice) -> FramebufferTarget {
        let framebuffer = device.create_framebuffer();
        device.bind_framebuffer(framebuffer);

        let mut attachments = FxHashMap::default();

        let depth = device.create_texture(&TextureDesc::depth_cube(POINT_SHADOW_SIZE));
        device.attach_texture(AttachmentPoint::Depth, depth);
        attachments.insert(AttachmentKind::ShadowDepth, depth);

        device.disable_color_output();
        self.check_complete(device, TargetKind::PointShadowCubeMap);

        FramebufferTarget::new(framebuffer, attachments, POINT_SHADOW_SIZE, POINT_SHADOW_SIZE)
    }

    /// Single-color post-process buffer at screen resolution
    fn create_post_process(
        &self,
        device: &mut dyn GraphicsDevice,
        kind: TargetKind,
        format: TextureFormat,
        attachment: AttachmentKind,
    ) -> FramebufferTarget {
        let framebuffer = device.create_framebuffer();
        device.bind_framebuffer(framebuffer);

        let mut attachments = FxHashMap::default();

        let color = device.create_texture(&TextureDesc::color(self.width, self.height, format));
        device.attach_texture(AttachmentPoint::Color(0), color);
        attachments.insert(attachment, color);

        device.set_draw_buffers(1);
        self.check_complete(device, kind);

        FramebufferTarget::new(framebuffer, attachments, self.width, self.height)
    }

    fn check_complete(&self, device: &mut dyn GraphicsDevice, kind: TargetKind) {
        if !device.framebuffer_complete() {
            engine_error!(SOURCE, "Render target {:?} is incomplete", kind);
        }
    }
}

impl Default for FramebufferRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "framebuffer_registry_tests.rs"]
mod tests;

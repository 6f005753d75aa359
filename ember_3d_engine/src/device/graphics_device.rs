//! GraphicsDevice trait and the handle/descriptor types it speaks
//!
//! The trait covers exactly the GPU surface the deferred pipeline
//! needs: pipeline state switches, texture/buffer/framebuffer lifetime,
//! binding points, and non-indexed draws. Backends implement it against
//! a real API; the engine core and its tests only ever see the trait.

use bitflags::bitflags;

// ===== OPAQUE HANDLES =====

/// Opaque GPU texture handle (0 = none)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u64);

/// Opaque GPU buffer handle (0 = none)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferHandle(pub u64);

/// Opaque vertex array handle (0 = none)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexArrayHandle(pub u64);

/// Opaque framebuffer handle (0 = the default framebuffer)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FramebufferHandle(pub u64);

/// Opaque shader program handle (0 = none)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramHandle(pub u64);

impl TextureHandle {
    /// The "nothing bound" handle
    pub const NONE: TextureHandle = TextureHandle(0);
}

impl BufferHandle {
    /// The "nothing bound" handle
    pub const NONE: BufferHandle = BufferHandle(0);
}

impl VertexArrayHandle {
    /// The "nothing bound" handle
    pub const NONE: VertexArrayHandle = VertexArrayHandle(0);
}

impl FramebufferHandle {
    /// The window-system default framebuffer
    pub const DEFAULT: FramebufferHandle = FramebufferHandle(0);
}

// ===== PIPELINE STATE ENUMS =====

/// Polygon rasterization mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolygonMode {
    Fill,
    Line,
    Point,
}

/// Depth comparison function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareFunc {
    Never,
    Less,
    Equal,
    LessEqual,
    Greater,
    NotEqual,
    GreaterEqual,
    Always,
}

/// Blend factor for source/destination color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendFactor {
    Zero,
    One,
    SrcColor,
    OneMinusSrcColor,
    SrcAlpha,
    OneMinusSrcAlpha,
    DstAlpha,
    OneMinusDstAlpha,
}

/// Which polygon faces are culled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CullFace {
    Front,
    Back,
    FrontAndBack,
}

/// Winding order that counts as front-facing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontFace {
    Ccw,
    Cw,
}

// ===== TEXTURE DESCRIPTORS =====

/// Texture binding target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureTarget {
    Texture2d,
    CubeMap,
}

/// Texture storage format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFormat {
    /// 8-bit normalized RGBA (LDR color, packed material channels)
    Rgba8,
    /// 16-bit float RGBA (HDR color, world-space normals)
    Rgba16F,
    /// 24-bit depth
    Depth24,
}

/// Texture filtering mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFilter {
    Nearest,
    Linear,
}

/// Texture coordinate wrapping mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureWrap {
    ClampToEdge,
    ClampToBorder,
    Repeat,
}

/// Description of a texture to create
///
/// Render-target textures are created through the helpers so the
/// registry allocates every attachment with consistent parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureDesc {
    pub target: TextureTarget,
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
    pub min_filter: TextureFilter,
    pub mag_filter: TextureFilter,
    pub wrap: TextureWrap,
    /// Border color, only meaningful with `TextureWrap::ClampToBorder`
    pub border_color: Option<[f32; 4]>,
}

impl TextureDesc {
    /// Color render-target texture (nearest filtering, clamp to edge)
    pub fn color(width: u32, height: u32, format: TextureFormat) -> Self {
        Self {
            target: TextureTarget::Texture2d,
            width,
            height,
            format,
            min_filter: TextureFilter::Nearest,
            mag_filter: TextureFilter::Nearest,
            wrap: TextureWrap::ClampToEdge,
            border_color: None,
        }
    }

    /// Depth render-target texture
    ///
    /// Clamps to a white border so shadow lookups outside the map read
    /// "fully lit" instead of wrapping into a neighboring texel.
    pub fn depth(width: u32, height: u32) -> Self {
        Self {
            target: TextureTarget::Texture2d,
            width,
            height,
            format: TextureFormat::Depth24,
            min_filter: TextureFilter::Nearest,
            mag_filter: TextureFilter::Nearest,
            wrap: TextureWrap::ClampToBorder,
            border_color: Some([1.0, 1.0, 1.0, 1.0]),
        }
    }

    /// Depth cube map for omnidirectional (point light) shadows
    pub fn depth_cube(size: u32) -> Self {
        Self {
            target: TextureTarget::CubeMap,
            width: size,
            height: size,
            format: TextureFormat::Depth24,
            min_filter: TextureFilter::Nearest,
            mag_filter: TextureFilter::Nearest,
            wrap: TextureWrap::ClampToEdge,
            border_color: None,
        }
    }
}

// ===== FRAMEBUFFER TYPES =====

/// Framebuffer attachment point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentPoint {
    /// Color attachment at the given index
    Color(u32),
    /// The depth attachment
    Depth,
}

bitflags! {
    /// Which buffers a clear operation touches
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ClearMask: u32 {
        const COLOR = 1;
        const DEPTH = 1 << 1;
        const STENCIL = 1 << 2;
    }
}

// ===== DEVICE LIMITS =====

/// Queryable device limits relevant to the binding cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceLimits {
    pub max_texture_units: u32,
    pub max_uniform_buffer_bindings: u32,
}

impl Default for DeviceLimits {
    fn default() -> Self {
        Self {
            max_texture_units: 32,
            max_uniform_buffer_bindings: 16,
        }
    }
}

// ===== THE DEVICE TRAIT =====

/// Raw GPU operations behind a backend-agnostic trait
///
/// No call here is elided or validated; redundancy filtering lives in
/// `StateManager`. Implementations translate each method 1:1 into the
/// backend API. The trait is deliberately not `Send`/`Sync`: device
/// contexts are bound to the thread that created them.
pub trait GraphicsDevice {
    /// Query device limits
    fn limits(&self) -> DeviceLimits;

    // --- pipeline state ---

    fn set_polygon_mode(&mut self, mode: PolygonMode);
    fn set_line_width(&mut self, width: f32);
    fn set_point_size(&mut self, size: f32);
    fn set_depth_test(&mut self, enabled: bool, func: CompareFunc);
    fn set_blend(&mut self, enabled: bool, src: BlendFactor, dst: BlendFactor);
    fn set_cull(&mut self, enabled: bool, face: CullFace, front: FrontFace);
    fn set_swap_interval(&mut self, interval: i32);
    fn set_multisample(&mut self, enabled: bool);

    // --- binding points ---

    fn bind_texture(&mut self, unit: u32, target: TextureTarget, texture: TextureHandle);
    fn bind_uniform_buffer(&mut self, binding_point: u32, buffer: BufferHandle);
    fn bind_vertex_array(&mut self, vao: VertexArrayHandle);

    // --- textures ---

    fn create_texture(&mut self, desc: &TextureDesc) -> TextureHandle;
    fn delete_texture(&mut self, texture: TextureHandle);

    // --- framebuffers ---

    fn create_framebuffer(&mut self) -> FramebufferHandle;
    fn delete_framebuffer(&mut self, framebuffer: FramebufferHandle);
    /// Bind for subsequent attachment/draw calls (0 = default framebuffer)
    fn bind_framebuffer(&mut self, framebuffer: FramebufferHandle);
    /// Attach a texture to the currently bound framebuffer
    fn attach_texture(&mut self, point: AttachmentPoint, texture: TextureHandle);
    /// Enable the first `count` color attachments as draw buffers (MRT)
    fn set_draw_buffers(&mut self, count: u32);
    /// Disable color reads/writes on the bound framebuffer (depth-only targets)
    fn disable_color_output(&mut self);
    /// Completeness check for the currently bound framebuffer
    fn framebuffer_complete(&mut self) -> bool;

    // --- viewport and clearing ---

    fn set_viewport(&mut self, width: u32, height: u32);
    fn set_clear_color(&mut self, color: [f32; 4]);
    fn clear(&mut self, mask: ClearMask);

    // --- geometry ---

    fn create_vertex_array(&mut self) -> VertexArrayHandle;
    fn delete_vertex_array(&mut self, vao: VertexArrayHandle);
    /// Create an immutable vertex buffer from raw bytes, attached to the
    /// currently bound vertex array
    fn create_buffer(&mut self, data: &[u8]) -> BufferHandle;
    fn delete_buffer(&mut self, buffer: BufferHandle);
    /// Describe a float attribute on the currently bound vertex array
    fn set_vertex_attribute(&mut self, index: u32, components: u32, stride: u32, offset: u32);
    /// Non-indexed draw from the currently bound vertex array
    fn draw_arrays(&mut self, first: u32, count: u32);
}

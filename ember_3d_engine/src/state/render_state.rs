//! RenderState snapshot
//!
//! A flat value type holding every piece of mutable pipeline state the
//! engine manages. Snapshots are pushed/popped as a unit; a pass that
//! needs overrides builds one from `Default` with struct update syntax
//! and never has to know what the previous pass left behind.

use crate::device::{BlendFactor, CompareFunc, CullFace, FrontFace, PolygonMode};

/// Full pipeline state snapshot
///
/// `Default` is the neutral baseline every frame starts from: filled
/// polygons, depth testing on with `Less`, blending off (standard alpha
/// factors preloaded), culling off (back faces, CCW front preloaded),
/// vsync on, multisampling on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderState {
    pub polygon_mode: PolygonMode,
    pub line_width: f32,
    pub point_size: f32,

    pub depth_test: bool,
    pub depth_func: CompareFunc,

    pub blending: bool,
    pub src_blend: BlendFactor,
    pub dst_blend: BlendFactor,

    pub culling: bool,
    pub cull_face: CullFace,
    pub front_face: FrontFace,

    /// Swap interval (1 = vsync on, 0 = off)
    pub v_sync_interval: i32,
    pub multisample: bool,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            polygon_mode: PolygonMode::Fill,
            line_width: 1.0,
            point_size: 1.0,
            depth_test: true,
            depth_func: CompareFunc::Less,
            blending: false,
            src_blend: BlendFactor::SrcAlpha,
            dst_blend: BlendFactor::OneMinusSrcAlpha,
            culling: false,
            cull_face: CullFace::Back,
            front_face: FrontFace::Ccw,
            v_sync_interval: 1,
            multisample: true,
        }
    }
}

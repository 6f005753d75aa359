//! Mock GraphicsDevice for unit tests (no GPU required)
//!
//! Records every device call as a formatted string, tracks live
//! resource handles, and hands out monotonically increasing handle
//! values, so tests can assert exactly which calls reached the device
//! and that no resource leaked.

use std::sync::{Arc, Mutex};

use rustc_hash::FxHashSet;

use crate::device::graphics_device::{
    AttachmentPoint, BlendFactor, BufferHandle, ClearMask, CompareFunc, CullFace, DeviceLimits,
    FramebufferHandle, FrontFace, GraphicsDevice, PolygonMode, TextureDesc, TextureHandle,
    TextureTarget, VertexArrayHandle,
};

#[derive(Debug, Default)]
struct MockState {
    calls: Vec<String>,
    next_handle: u64,
    live_textures: FxHashSet<u64>,
    live_buffers: FxHashSet<u64>,
    live_vertex_arrays: FxHashSet<u64>,
    live_framebuffers: FxHashSet<u64>,
    framebuffer_complete: bool,
}

/// Recording mock device
///
/// Clones share the same journal and handle state, so a test can keep
/// a clone for assertions while the renderer owns the boxed original.
#[derive(Debug, Clone)]
pub struct MockGraphicsDevice {
    state: Arc<Mutex<MockState>>,
}

impl MockGraphicsDevice {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                calls: Vec::new(),
                next_handle: 0,
                live_textures: FxHashSet::default(),
                live_buffers: FxHashSet::default(),
                live_vertex_arrays: FxHashSet::default(),
                live_framebuffers: FxHashSet::default(),
                framebuffer_complete: true,
            })),
        }
    }

    fn record(&self, call: String) {
        self.state.lock().unwrap().calls.push(call);
    }

    fn next_handle(&self) -> u64 {
        let mut state = self.state.lock().unwrap();
        state.next_handle += 1;
        state.next_handle
    }

    /// All recorded calls, in order
    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Number of recorded calls starting with `prefix`
    pub fn count_calls(&self, prefix: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    /// Drop the journal (live-resource tracking is unaffected)
    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    pub fn live_texture_count(&self) -> usize {
        self.state.lock().unwrap().live_textures.len()
    }

    pub fn live_buffer_count(&self) -> usize {
        self.state.lock().unwrap().live_buffers.len()
    }

    pub fn live_vertex_array_count(&self) -> usize {
        self.state.lock().unwrap().live_vertex_arrays.len()
    }

    pub fn live_framebuffer_count(&self) -> usize {
        self.state.lock().unwrap().live_framebuffers.len()
    }

    pub fn is_texture_live(&self, texture: TextureHandle) -> bool {
        self.state.lock().unwrap().live_textures.contains(&texture.0)
    }

    pub fn is_framebuffer_live(&self, framebuffer: FramebufferHandle) -> bool {
        self.state
            .lock()
            .unwrap()
            .live_framebuffers
            .contains(&framebuffer.0)
    }

    /// Force the completeness check result for subsequently bound framebuffers
    pub fn set_framebuffer_complete(&self, complete: bool) {
        self.state.lock().unwrap().framebuffer_complete = complete;
    }
}

impl Default for MockGraphicsDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    fn limits(&self) -> DeviceLimits {
        DeviceLimits::default()
    }

    fn set_polygon_mode(&mut self, mode: PolygonMode) {
        self.record(format!("set_polygon_mode {:?}", mode));
    }

    fn set_line_width(&mut self, width: f32) {
        self.record(format!("set_line_width {}", width));
    }

    fn set_point_size(&mut self, size: f32) {
        self.record(format!("set_point_size {}", size));
    }

    fn set_depth_test(&mut self, enabled: bool, func: CompareFunc) {
        self.record(format!("set_depth_test enabled={} func={:?}", enabled, func));
    }

    fn set_blend(&mut self, enabled: bool, src: BlendFactor, dst: BlendFactor) {
        self.record(format!(
            "set_blend enabled={} src={:?} dst={:?}",
            enabled, src, dst
        ));
    }

    fn set_cull(&mut self, enabled: bool, face: CullFace, front: FrontFace) {
        self.record(format!(
            "set_cull enabled={} face={:?} front={:?}",
            enabled, face, front
        ));
    }

    fn set_swap_interval(&mut self, interval: i32) {
        self.record(format!("set_swap_interval {}", interval));
    }

    fn set_multisample(&mut self, enabled: bool) {
        self.record(format!("set_multisample {}", enabled));
    }

    fn bind_texture(&mut self, unit: u32, target: TextureTarget, texture: TextureHandle) {
        self.record(format!(
            "bind_texture unit={} target={:?} texture={}",
            unit, target, texture.0
        ));
    }

    fn bind_uniform_buffer(&mut self, binding_point: u32, buffer: BufferHandle) {
        self.record(format!(
            "bind_uniform_buffer point={} buffer={}",
            binding_point, buffer.0
        ));
    }

    fn bind_vertex_array(&mut self, vao: VertexArrayHandle) {
        self.record(format!("bind_vertex_array vao={}", vao.0));
    }

    fn create_texture(&mut self, desc: &TextureDesc) -> TextureHandle {
        let handle = self.next_handle();
        self.state.lock().unwrap().live_textures.insert(handle);
        self.record(format!(
            "create_texture {}x{} {:?} -> {}",
            desc.width, desc.height, desc.format, handle
        ));
        TextureHandle(handle)
    }

    fn delete_texture(&mut self, texture: TextureHandle) {
        self.state.lock().unwrap().live_textures.remove(&texture.0);
        self.record(format!("delete_texture {}", texture.0));
    }

    fn create_framebuffer(&mut self) -> FramebufferHandle {
        let handle = self.next_handle();
        self.state.lock().unwrap().live_framebuffers.insert(handle);
        self.record(format!("create_framebuffer -> {}", handle));
        FramebufferHandle(handle)
    }

    fn delete_framebuffer(&mut self, framebuffer: FramebufferHandle) {
        self.state
            .lock()
            .unwrap()
            .live_framebuffers
            .remove(&framebuffer.0);
        self.record(format!("delete_framebuffer {}", framebuffer.0));
    }

    fn bind_framebuffer(&mut self, framebuffer: FramebufferHandle) {
        self.record(format!("bind_framebuffer {}", framebuffer.0));
    }

    fn attach_texture(&mut self, point: AttachmentPoint, texture: TextureHandle) {
        self.record(format!("attach_texture {:?} texture={}", point, texture.0));
    }

    fn set_draw_buffers(&mut self, count: u32) {
        self.record(format!("set_draw_buffers {}", count));
    }

    fn disable_color_output(&mut self) {
        self.record("disable_color_output".to_string());
    }

    fn framebuffer_complete(&mut self) -> bool {
        let complete = self.state.lock().unwrap().framebuffer_complete;
        self.record(format!("framebuffer_complete -> {}", complete));
        complete
    }

    fn set_viewport(&mut self, width: u32, height: u32) {
        self.record(format!("set_viewport {}x{}", width, height));
    }

    fn set_clear_color(&mut self, color: [f32; 4]) {
        self.record(format!("set_clear_color {:?}", color));
    }

    fn clear(&mut self, mask: ClearMask) {
        self.record(format!("clear {:?}", mask));
    }

    fn create_vertex_array(&mut self) -> VertexArrayHandle {
        let handle = self.next_handle();
        self.state.lock().unwrap().live_vertex_arrays.insert(handle);
        self.record(format!("create_vertex_array -> {}", handle));
        VertexArrayHandle(handle)
    }

    fn delete_vertex_array(&mut self, vao: VertexArrayHandle) {
        self.state.lock().unwrap().live_vertex_arrays.remove(&vao.0);
        self.record(format!("delete_vertex_array {}", vao.0));
    }

    fn create_buffer(&mut self, data: &[u8]) -> BufferHandle {
        let handle = self.next_handle();
        self.state.lock().unwrap().live_buffers.insert(handle);
        self.record(format!("create_buffer bytes={} -> {}", data.len(), handle));
        BufferHandle(handle)
    }

    fn delete_buffer(&mut self, buffer: BufferHandle) {
        self.state.lock().unwrap().live_buffers.remove(&buffer.0);
        self.record(format!("delete_buffer {}", buffer.0));
    }

    fn set_vertex_attribute(&mut self, index: u32, components: u32, stride: u32, offset: u32) {
        self.record(format!(
            "set_vertex_attribute index={} components={} stride={} offset={}",
            index, components, stride, offset
        ));
    }

    fn draw_arrays(&mut self, first: u32, count: u32) {
        self.record(format!("draw_arrays first={} count={}", first, count));
    }
}

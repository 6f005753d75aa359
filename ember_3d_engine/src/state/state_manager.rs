//! StateManager - snapshot stack and binding cache
//!
//! Owns the authoritative copy of the pipeline state and the binding
//! cache. Passes never talk to the device's state/bind calls directly;
//! they push a snapshot on entry and pop on exit, so state leaks
//! between passes are structurally impossible.
//!
//! Snapshot application is unconditional: a pop reapplies the restored
//! snapshot in full rather than diffing against what "should" be
//! current, which keeps the manager correct even if something wrote
//! device state behind its back. Redundancy filtering applies only to
//! the binding cache, where rebinding the same handle is both frequent
//! and observable purely by cost.

use crate::device::{
    BufferHandle, DeviceLimits, GraphicsDevice, TextureHandle, TextureTarget, VertexArrayHandle,
};
use crate::state::render_state::RenderState;
use crate::{engine_debug, engine_error, engine_warn};

const SOURCE: &str = "ember3d::StateManager";

/// Upper bound on cached texture units (device may report fewer)
pub const MAX_TEXTURE_UNITS: usize = 32;

/// Upper bound on cached uniform buffer binding points
pub const MAX_UNIFORM_BUFFER_BINDINGS: usize = 16;

/// Pipeline state owner: snapshot stack + binding cache
pub struct StateManager {
    current: RenderState,
    stack: Vec<RenderState>,

    bound_vertex_array: VertexArrayHandle,
    bound_textures: [TextureHandle; MAX_TEXTURE_UNITS],
    bound_uniform_buffers: [BufferHandle; MAX_UNIFORM_BUFFER_BINDINGS],

    limits: DeviceLimits,
}

impl StateManager {
    /// Create a manager with the neutral default snapshot
    ///
    /// No device calls are made; `initialize` pushes the defaults to
    /// the GPU once a device is available.
    pub fn new() -> Self {
        Self {
            current: RenderState::default(),
            stack: Vec::new(),
            bound_vertex_array: VertexArrayHandle::NONE,
            bound_textures: [TextureHandle::NONE; MAX_TEXTURE_UNITS],
            bound_uniform_buffers: [BufferHandle::NONE; MAX_UNIFORM_BUFFER_BINDINGS],
            limits: DeviceLimits::default(),
        }
    }

    /// Query device limits and apply the default snapshot
    ///
    /// Safe to call again after a context change: the binding cache is
    /// left untouched so previously elided binds stay elided if the
    /// underlying bindings survived.
    pub fn initialize(&mut self, device: &mut dyn GraphicsDevice) {
        let limits = device.limits();
        self.limits = DeviceLimits {
            max_texture_units: limits.max_texture_units.min(MAX_TEXTURE_UNITS as u32),
            max_uniform_buffer_bindings: limits
                .max_uniform_buffer_bindings
                .min(MAX_UNIFORM_BUFFER_BINDINGS as u32),
        };

        self.current = RenderState::default();
        self.apply_state(device, self.current);

        engine_debug!(
            SOURCE,
            "Initialized ({} texture units, {} UBO binding points)",
            self.limits.max_texture_units,
            self.limits.max_uniform_buffer_bindings
        );
    }

    // ===== SNAPSHOT STACK =====

    /// Save the current snapshot and apply `state`
    pub fn push_state(&mut self, device: &mut dyn GraphicsDevice, state: RenderState) {
        self.stack.push(self.current);
        self.current = state;
        self.apply_state(device, state);
    }

    /// Restore and apply the most recently pushed snapshot
    ///
    /// Popping an empty stack is a logged no-op; the current state is
    /// left unchanged.
    pub fn pop_state(&mut self, device: &mut dyn GraphicsDevice) {
        match self.stack.pop() {
            Some(state) => {
                self.current = state;
                self.apply_state(device, state);
            }
            None => {
                engine_warn!(SOURCE, "pop_state called on empty state stack, ignoring");
            }
        }
    }

    /// Apply `state` to the device in full and make it current
    ///
    /// Every field is written unconditionally.
    pub fn apply_state(&mut self, device: &mut dyn GraphicsDevice, state: RenderState) {
        self.current = state;
        self.apply_rasterizer(device, &state);
        self.apply_depth(device, &state);
        self.apply_blend(device, &state);
        self.apply_cull(device, &state);
        self.apply_presentation(device, &state);
    }

    fn apply_rasterizer(&self, device: &mut dyn GraphicsDevice, state: &RenderState) {
        device.set_polygon_mode(state.polygon_mode);
        device.set_line_width(state.line_width);
        device.set_point_size(state.point_size);
    }

    fn apply_depth(&self, device: &mut dyn GraphicsDevice, state: &RenderState) {
        device.set_depth_test(state.depth_test, state.depth_func);
    }

    fn apply_blend(&self, device: &mut dyn GraphicsDevice, state: &RenderState) {
        device.set_blend(state.blending, state.src_blend, state.dst_blend);
    }

    fn apply_cull(&self, device: &mut dyn GraphicsDevice, state: &RenderState) {
        device.set_cull(state.culling, state.cull_face, state.front_face);
    }

    fn apply_presentation(&self, device: &mut dyn GraphicsDevice, state: &RenderState) {
        device.set_swap_interval(state.v_sync_interval);
        device.set_multisample(state.multisample);
    }

    // ===== BINDING CACHE =====

    /// Bind a texture to a unit, skipping the call if already bound
    pub fn bind_texture(
        &mut self,
        device: &mut dyn GraphicsDevice,
        unit: u32,
        target: TextureTarget,
        texture: TextureHandle,
    ) {
        if unit >= self.limits.max_texture_units {
            engine_error!(
                SOURCE,
                "Texture unit {} out of range (max {})",
                unit,
                self.limits.max_texture_units
            );
            return;
        }

        if self.bound_textures[unit as usize] == texture {
            return;
        }

        device.bind_texture(unit, target, texture);
        self.bound_textures[unit as usize] = texture;
    }

    /// Bind a uniform buffer to a binding point, skipping if already bound
    pub fn bind_uniform_buffer(
        &mut self,
        device: &mut dyn GraphicsDevice,
        binding_point: u32,
        buffer: BufferHandle,
    ) {
        if binding_point >= self.limits.max_uniform_buffer_bindings {
            engine_error!(
                SOURCE,
                "UBO binding point {} out of range (max {})",
                binding_point,
                self.limits.max_uniform_buffer_bindings
            );
            return;
        }

        if self.bound_uniform_buffers[binding_point as usize] == buffer {
            return;
        }

        device.bind_uniform_buffer(binding_point, buffer);
        self.bound_uniform_buffers[binding_point as usize] = buffer;
    }

    /// Bind a vertex array, skipping the call if already bound
    pub fn bind_vertex_array(&mut self, device: &mut dyn GraphicsDevice, vao: VertexArrayHandle) {
        if self.bound_vertex_array == vao {
            return;
        }

        device.bind_vertex_array(vao);
        self.bound_vertex_array = vao;
    }

    /// Unbind the current vertex array, if any
    pub fn unbind_vertex_array(&mut self, device: &mut dyn GraphicsDevice) {
        self.bind_vertex_array(device, VertexArrayHandle::NONE);
    }

    /// Unbind every texture unit that currently has a binding
    ///
    /// Units already at NONE are skipped.
    pub fn unbind_all_textures(&mut self, device: &mut dyn GraphicsDevice) {
        for unit in 0..self.limits.max_texture_units {
            if self.bound_textures[unit as usize] != TextureHandle::NONE {
                device.bind_texture(unit, TextureTarget::Texture2d, TextureHandle::NONE);
                self.bound_textures[unit as usize] = TextureHandle::NONE;
            }
        }
    }

    /// Unbind every UBO binding point that currently has a binding
    pub fn unbind_all_uniform_buffers(&mut self, device: &mut dyn GraphicsDevice) {
        for point in 0..self.limits.max_uniform_buffer_bindings {
            if self.bound_uniform_buffers[point as usize] != BufferHandle::NONE {
                device.bind_uniform_buffer(point, BufferHandle::NONE);
                self.bound_uniform_buffers[point as usize] = BufferHandle::NONE;
            }
        }
    }

    // ===== LIFECYCLE =====

    /// Drop all snapshots and release every cached binding
    pub fn terminate(&mut self, device: &mut dyn GraphicsDevice) {
        if !self.stack.is_empty() {
            engine_warn!(
                SOURCE,
                "Terminating with {} unpopped state snapshot(s)",
                self.stack.len()
            );
            self.stack.clear();
        }

        self.unbind_all_textures(device);
        self.unbind_all_uniform_buffers(device);
        self.unbind_vertex_array(device);
        self.current = RenderState::default();
    }

    // ===== ACCESSORS =====

    /// The snapshot currently applied to the device
    pub fn current_state(&self) -> &RenderState {
        &self.current
    }

    /// Number of saved snapshots on the stack
    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    /// Limits captured at initialization
    pub fn limits(&self) -> DeviceLimits {
        self.limits
    }
}

impl Default for StateManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "state_manager_tests.rs"]
mod tests;

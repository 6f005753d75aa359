//! GPU device abstraction
//!
//! The engine core never talks to a graphics API directly. All GPU
//! work goes through the [`GraphicsDevice`] trait so backend crates can
//! plug in an implementation, and tests can run against the recording
//! mock without a GPU.

pub mod graphics_device;

#[cfg(test)]
pub mod mock_graphics_device;

pub use graphics_device::*;

//! Error types for the Ember3D engine
//!
//! This module defines the error types used throughout the engine,
//! covering device operations, resource lookups, and initialization.

use std::fmt;

/// Result type for Ember3D engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Ember3D engine errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Device-level error (framebuffer creation, texture allocation, etc.)
    DeviceError(String),

    /// Invalid resource (texture, buffer, render target, etc.)
    InvalidResource(String),

    /// Initialization failed (renderer, framebuffer registry, subsystems)
    InitializationFailed(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DeviceError(msg) => write!(f, "Device error: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// Log an ERROR message and return `Err(Error::DeviceError)` in one step
///
/// Used at device-facing failure points where the error must both reach
/// the log and propagate to the caller.
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {{
        $crate::engine_error!($source, $($arg)*);
        return Err($crate::ember3d::Error::DeviceError(format!($($arg)*)));
    }};
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;

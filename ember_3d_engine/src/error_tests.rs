//! Unit tests for error.rs
//!
//! Tests all Error variants and their implementations (Display, Debug,
//! Clone, std::error::Error) plus the engine_bail! macro.

use crate::error::{Error, Result};

// ============================================================================
// ERROR DISPLAY TESTS
// ============================================================================

#[test]
fn test_device_error_display() {
    let err = Error::DeviceError("Framebuffer creation failed".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Device error"));
    assert!(display.contains("Framebuffer creation failed"));
}

#[test]
fn test_invalid_resource_display() {
    let err = Error::InvalidResource("Texture not found".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Invalid resource"));
    assert!(display.contains("Texture not found"));
}

#[test]
fn test_initialization_failed_display() {
    let err = Error::InitializationFailed("Zero-sized viewport".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Initialization failed"));
    assert!(display.contains("Zero-sized viewport"));
}

// ============================================================================
// ERROR TRAIT IMPLEMENTATIONS
// ============================================================================

#[test]
fn test_error_is_std_error() {
    let err = Error::DeviceError("test".to_string());
    // Verify Error implements std::error::Error trait
    let _: &dyn std::error::Error = &err;
}

#[test]
fn test_error_debug() {
    let err1 = Error::DeviceError("test".to_string());
    assert!(format!("{:?}", err1).contains("DeviceError"));

    let err2 = Error::InvalidResource("resource".to_string());
    assert!(format!("{:?}", err2).contains("InvalidResource"));

    let err3 = Error::InitializationFailed("init".to_string());
    assert!(format!("{:?}", err3).contains("InitializationFailed"));
}

#[test]
fn test_error_clone() {
    let err1 = Error::DeviceError("test".to_string());
    let err2 = err1.clone();
    assert_eq!(format!("{}", err1), format!("{}", err2));

    let err3 = Error::InitializationFailed("init".to_string());
    let err4 = err3.clone();
    assert_eq!(format!("{}", err3), format!("{}", err4));
}

// ============================================================================
// RESULT TYPE TESTS
// ============================================================================

#[test]
fn test_result_type_ok() {
    fn returns_ok() -> Result<i32> {
        Ok(42)
    }

    let result = returns_ok();
    assert!(result.is_ok());
    assert_eq!(result.unwrap(), 42);
}

#[test]
fn test_result_type_err() {
    fn returns_error() -> Result<i32> {
        Err(Error::InvalidResource("missing".to_string()))
    }

    let result = returns_error();
    assert!(result.is_err());
}

#[test]
fn test_error_propagation_with_question_mark() {
    fn inner() -> Result<i32> {
        Err(Error::DeviceError("inner failure".to_string()))
    }

    fn outer() -> Result<i32> {
        inner()?;
        Ok(42)
    }

    let result = outer();
    assert!(result.is_err());
}

// ============================================================================
// ENGINE_BAIL MACRO TESTS
// ============================================================================

#[test]
fn test_engine_bail_returns_device_error() {
    fn bails() -> Result<()> {
        crate::engine_bail!("ember3d::test", "bad dimensions {}x{}", 0, 600);
    }

    let result = bails();
    match result {
        Err(Error::DeviceError(msg)) => {
            assert!(msg.contains("bad dimensions 0x600"));
        }
        _ => panic!("Expected DeviceError"),
    }
}

#[test]
fn test_engine_bail_skips_remaining_body() {
    fn bails_early(fail: bool) -> Result<i32> {
        if fail {
            crate::engine_bail!("ember3d::test", "requested failure");
        }
        Ok(7)
    }

    assert!(bails_early(true).is_err());
    assert_eq!(bails_early(false).unwrap(), 7);
}

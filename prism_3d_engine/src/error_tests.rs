//! Unit tests for error.rs
//!
//! Tests all Error variants and their implementations (Display, Debug, Clone, std::error::Error).

use crate::error::{Error, Result};

// ============================================================================
// ERROR DISPLAY TESTS
// ============================================================================

#[test]
fn test_compilation_failure_display() {
    let err = Error::CompilationFailure("Main.vs.wgsl:3: expected ';'".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Shader compilation failed"));
    assert!(display.contains("expected ';'"));
}

#[test]
fn test_device_object_creation_failure_display() {
    let err = Error::DeviceObjectCreationFailure("input layout does not match shader".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Device object creation failed"));
    assert!(display.contains("input layout does not match shader"));
}

#[test]
fn test_invalid_resource_display() {
    let err = Error::InvalidResource("unknown profile 'gs_5_0'".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Invalid resource"));
    assert!(display.contains("gs_5_0"));
}

#[test]
fn test_initialization_failed_display() {
    let err = Error::InitializationFailed("Engine not initialized".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Initialization failed"));
    assert!(display.contains("Engine not initialized"));
}

#[test]
fn test_backend_error_display() {
    let err = Error::BackendError("lock poisoned".to_string());
    assert_eq!(format!("{}", err), "Backend error: lock poisoned");
}

// ============================================================================
// ERROR TRAIT IMPLEMENTATIONS
// ============================================================================

#[test]
fn test_error_is_std_error() {
    let err = Error::BackendError("test".to_string());
    let _: &dyn std::error::Error = &err;
}

#[test]
fn test_error_debug() {
    let debug1 = format!("{:?}", Error::CompilationFailure("a".to_string()));
    assert!(debug1.contains("CompilationFailure"));

    let debug2 = format!("{:?}", Error::DeviceObjectCreationFailure("b".to_string()));
    assert!(debug2.contains("DeviceObjectCreationFailure"));

    let debug3 = format!("{:?}", Error::InvalidResource("c".to_string()));
    assert!(debug3.contains("InvalidResource"));
}

#[test]
fn test_error_clone() {
    let err1 = Error::CompilationFailure("test".to_string());
    let err2 = err1.clone();
    assert_eq!(format!("{}", err1), format!("{}", err2));
}

// ============================================================================
// RESULT TYPE
// ============================================================================

#[test]
fn test_result_propagation() {
    fn inner() -> Result<u32> {
        Err(Error::InvalidResource("slot".to_string()))
    }

    fn outer() -> Result<u32> {
        let value = inner()?;
        Ok(value + 1)
    }

    assert!(matches!(outer(), Err(Error::InvalidResource(_))));
}

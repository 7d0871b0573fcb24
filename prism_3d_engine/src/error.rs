//! Error types for the Prism3D engine
//!
//! This module defines the error types used throughout the engine:
//! shader compilation, device object creation, resource description
//! validation and engine initialization.

use std::fmt;

/// Result type for Prism3D engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Prism3D engine errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Shader compiler rejected a source file (carries the compiler diagnostic)
    CompilationFailure(String),

    /// Device failed to create a GPU-side object (shader, input layout, ...)
    DeviceObjectCreationFailure(String),

    /// Invalid resource description (profile string, input layout, slot, ...)
    InvalidResource(String),

    /// Initialization failed (engine, device, subsystems)
    InitializationFailed(String),

    /// Backend-specific error (lock poisoning, reflection, ...)
    BackendError(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::CompilationFailure(msg) => write!(f, "Shader compilation failed: {}", msg),
            Error::DeviceObjectCreationFailure(msg) => write!(f, "Device object creation failed: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;

/*!
# Prism 3D Engine

Core traits and types for the Prism 3D engine's pipeline setup layer.

This crate provides the platform-agnostic API that turns shader sources into
a ready-to-bind pipeline. A backend supplies the shader compiler and the
graphics device through trait objects; the core never depends on a concrete
graphics API.

## Architecture

- **ShaderCompiler**: Turns a shader source file into a `ShaderBlob`
- **GraphicsDevice**: Factory trait for shaders, input layouts, textures, samplers and buffers
- **BindingRegistry**: Maps `(slot, kind)` to a non-owning resource handle
- **Pipeline**: Vertex shader, pixel shader, input layout and the bindings the pixel stage reads
- **load_pipeline**: The setup sequence, stopping at the first failure

Backend implementations provide concrete types that implement these traits.
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod graphics_device;
pub mod binding;
pub mod pipeline;
pub mod setup;

// Main prism3d namespace module
pub mod prism3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine singleton
    pub use crate::engine::Engine;

    // Pipeline and setup sequence
    pub use crate::pipeline::Pipeline;
    pub use crate::setup::{load_pipeline, PipelineSetup, DEFAULT_ENTRY_POINT};

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Render sub-module with device, shader and resource types
    pub mod render {
        pub use crate::graphics_device::*;
    }

    // Binding sub-module
    pub mod binding {
        pub use crate::binding::*;
    }
}

// Re-export math library at crate root
pub use glam;

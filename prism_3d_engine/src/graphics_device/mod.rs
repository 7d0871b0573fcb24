/// Graphics device module - device collaborator traits and resource descriptions

// Module declarations
pub mod graphics_device;
pub mod shader;
pub mod input_layout;
pub mod texture;
pub mod sampler;
pub mod buffer;

// Re-export everything from graphics_device.rs
pub use graphics_device::*;

// Re-export from other modules
pub use shader::*;
pub use input_layout::*;
pub use texture::*;
pub use sampler::*;
pub use buffer::*;

// Mock graphics device and shader compiler for tests (no GPU required)
#[cfg(test)]
pub mod mock_graphics_device;

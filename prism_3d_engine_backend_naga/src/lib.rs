/*!
# Prism 3D Engine - Naga Backend

Headless backend for the Prism 3D engine.

This crate provides the two collaborators the pipeline setup sequence needs:

- **NagaShaderCompiler**: compiles WGSL source files to SPIR-V blobs with naga
- **HeadlessGraphicsDevice**: validates SPIR-V blobs and input layouts using
  spirq reflection, and keeps textures, samplers and buffers in host memory

No GPU or window is required, so the whole setup sequence runs in tests and CI.
*/

mod naga_shader_compiler;
mod headless_graphics_device;

/// Backend types, mirroring the core crate's `prism3d` namespace
pub mod prism3d {
    pub use crate::naga_shader_compiler::NagaShaderCompiler;
    pub use crate::headless_graphics_device::{
        HeadlessGraphicsDevice,
        HeadlessShader,
        HeadlessInputLayout,
        HeadlessTexture,
        HeadlessSampler,
        HeadlessBuffer,
    };
}

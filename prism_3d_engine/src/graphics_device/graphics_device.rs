/// GraphicsDevice trait - device-object factory interface

use std::sync::Arc;

use crate::binding::ResourceKind;
use crate::error::Result;
use crate::graphics_device::{
    Shader, ShaderBlob, InputLayout, InputLayoutDesc,
    Texture, TextureDesc, Sampler, SamplerDesc, Buffer, BufferDesc,
};

// ============================================================================
// Configuration
// ============================================================================

/// Number of binding slots a device exposes per pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceLimits {
    /// Shader resource view slots
    pub max_texture_slots: u32,
    /// Sampler state slots
    pub max_sampler_slots: u32,
    /// Constant buffer slots
    pub max_buffer_slots: u32,
}

impl DeviceLimits {
    /// Slot count for one resource kind
    pub fn max_slots(&self, kind: ResourceKind) -> u32 {
        match kind {
            ResourceKind::Texture => self.max_texture_slots,
            ResourceKind::Sampler => self.max_sampler_slots,
            ResourceKind::Buffer => self.max_buffer_slots,
        }
    }
}

impl Default for DeviceLimits {
    fn default() -> Self {
        // D3D11 per-stage input resource, sampler and constant buffer counts
        Self {
            max_texture_slots: 128,
            max_sampler_slots: 16,
            max_buffer_slots: 14,
        }
    }
}

/// Graphics device configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Enable validation of blobs and layouts at creation time
    pub enable_validation: bool,
    /// Application name
    pub app_name: String,
    /// Application version (major, minor, patch)
    pub app_version: (u32, u32, u32),
    /// Binding slot limits reported by the device
    pub limits: DeviceLimits,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enable_validation: cfg!(debug_assertions),
            app_name: "Prism3D Application".to_string(),
            app_version: (1, 0, 0),
            limits: DeviceLimits::default(),
        }
    }
}

// ============================================================================
// GraphicsDevice trait
// ============================================================================

/// Device collaborator
///
/// Creates GPU-side objects from compiled shader blobs and resource
/// descriptions. Every creation failure is reported as
/// `Error::DeviceObjectCreationFailure`.
pub trait GraphicsDevice: Send + Sync {
    /// Create a shader object from a compiled blob
    ///
    /// The blob's stage decides whether a vertex, pixel or compute shader is created.
    fn create_shader(&mut self, blob: &ShaderBlob) -> Result<Arc<dyn Shader>>;

    /// Create an input layout, validated against the vertex shader blob
    fn create_input_layout(
        &mut self,
        desc: &InputLayoutDesc,
        vertex_shader_blob: &ShaderBlob,
    ) -> Result<Arc<dyn InputLayout>>;

    /// Create a texture (shader resource view)
    fn create_texture(&mut self, desc: TextureDesc) -> Result<Arc<dyn Texture>>;

    /// Create a sampler state
    fn create_sampler(&mut self, desc: SamplerDesc) -> Result<Arc<dyn Sampler>>;

    /// Create a buffer
    fn create_buffer(&mut self, desc: BufferDesc) -> Result<Arc<dyn Buffer>>;

    /// Binding slot limits of this device
    fn limits(&self) -> DeviceLimits;
}

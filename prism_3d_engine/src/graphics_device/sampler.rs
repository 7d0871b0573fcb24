/// Sampler trait and sampler descriptor

use glam::Vec4;

/// Texel filtering mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    Nearest,
    Linear,
}

/// Texture coordinate addressing outside [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressMode {
    Repeat,
    MirroredRepeat,
    ClampToEdge,
    ClampToBorder,
}

/// Descriptor for creating a sampler state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplerDesc {
    pub min_filter: Filter,
    pub mag_filter: Filter,
    pub mip_filter: Filter,
    pub address_u: AddressMode,
    pub address_v: AddressMode,
    pub address_w: AddressMode,
    /// 1 disables anisotropic filtering
    pub max_anisotropy: u32,
    /// Used with `AddressMode::ClampToBorder`
    pub border_color: Vec4,
}

impl Default for SamplerDesc {
    fn default() -> Self {
        Self {
            min_filter: Filter::Linear,
            mag_filter: Filter::Linear,
            mip_filter: Filter::Linear,
            address_u: AddressMode::Repeat,
            address_v: AddressMode::Repeat,
            address_w: AddressMode::Repeat,
            max_anisotropy: 1,
            border_color: Vec4::ZERO,
        }
    }
}

/// Sampler resource trait
///
/// Implemented by backend-specific sampler state objects.
pub trait Sampler: Send + Sync {
    /// Descriptor the sampler was created from
    fn desc(&self) -> &SamplerDesc;
}

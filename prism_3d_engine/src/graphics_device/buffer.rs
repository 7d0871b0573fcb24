/// Buffer trait and buffer descriptor

use bitflags::bitflags;
use crate::error::Result;

bitflags! {
    /// How a buffer may be bound
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BufferUsage: u32 {
        /// Vertex buffer
        const VERTEX = 0x01;
        /// Index buffer
        const INDEX = 0x02;
        /// Constant (uniform) buffer bound to a shader slot
        const CONSTANT = 0x04;
        /// Structured buffer read by shaders
        const STORAGE = 0x08;
    }
}

/// Descriptor for creating a buffer
#[derive(Debug, Clone)]
pub struct BufferDesc {
    /// Size in bytes
    pub size: u64,
    /// Usage flags
    pub usage: BufferUsage,
}

/// Buffer resource trait
///
/// Implemented by backend-specific buffer objects.
pub trait Buffer: Send + Sync {
    /// Size in bytes
    fn size(&self) -> u64;

    /// Usage flags the buffer was created with
    fn usage(&self) -> BufferUsage;

    /// Write `data` at `offset`
    fn update(&self, offset: u64, data: &[u8]) -> Result<()>;
}

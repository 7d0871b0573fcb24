/// Binding keys and bound values
///
/// A `ResourceDescriptor` names a binding point: a slot index plus the kind
/// of resource attached there. A `BoundResource` is the non-owning handle
/// stored at that point.

use std::fmt;
use std::sync::{Arc, Weak};

use crate::graphics_device::{Texture, Sampler, Buffer};

/// Category of resource bound at a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    /// Shader resource view
    Texture,
    /// Sampler state
    Sampler,
    /// Constant buffer
    Buffer,
}

/// Binding point key: (slot, kind)
///
/// Slots are numbered per kind, so texture slot 0 and sampler slot 0 are
/// two distinct binding points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceDescriptor {
    pub slot: u32,
    pub kind: ResourceKind,
}

impl ResourceDescriptor {
    pub fn new(slot: u32, kind: ResourceKind) -> Self {
        Self { slot, kind }
    }
}

impl fmt::Display for ResourceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}#{}", self.kind, self.slot)
    }
}

/// Non-owning handle to a bound graphics resource
///
/// The owner of the resource keeps the `Arc`; the binding only holds a
/// `Weak`. Once the owner drops the resource the handle is stale and every
/// accessor returns `None`.
#[derive(Clone)]
pub enum BoundResource {
    Texture(Weak<dyn Texture>),
    Sampler(Weak<dyn Sampler>),
    Buffer(Weak<dyn Buffer>),
}

impl BoundResource {
    pub fn from_texture(texture: &Arc<dyn Texture>) -> Self {
        BoundResource::Texture(Arc::downgrade(texture))
    }

    pub fn from_sampler(sampler: &Arc<dyn Sampler>) -> Self {
        BoundResource::Sampler(Arc::downgrade(sampler))
    }

    pub fn from_buffer(buffer: &Arc<dyn Buffer>) -> Self {
        BoundResource::Buffer(Arc::downgrade(buffer))
    }

    /// Kind of the referenced resource
    pub fn kind(&self) -> ResourceKind {
        match self {
            BoundResource::Texture(_) => ResourceKind::Texture,
            BoundResource::Sampler(_) => ResourceKind::Sampler,
            BoundResource::Buffer(_) => ResourceKind::Buffer,
        }
    }

    /// The texture, if this is a live texture binding
    pub fn texture(&self) -> Option<Arc<dyn Texture>> {
        match self {
            BoundResource::Texture(weak) => weak.upgrade(),
            _ => None,
        }
    }

    /// The sampler, if this is a live sampler binding
    pub fn sampler(&self) -> Option<Arc<dyn Sampler>> {
        match self {
            BoundResource::Sampler(weak) => weak.upgrade(),
            _ => None,
        }
    }

    /// The buffer, if this is a live buffer binding
    pub fn buffer(&self) -> Option<Arc<dyn Buffer>> {
        match self {
            BoundResource::Buffer(weak) => weak.upgrade(),
            _ => None,
        }
    }

    /// True once the owner has destroyed the resource
    pub fn is_stale(&self) -> bool {
        match self {
            BoundResource::Texture(weak) => weak.strong_count() == 0,
            BoundResource::Sampler(weak) => weak.strong_count() == 0,
            BoundResource::Buffer(weak) => weak.strong_count() == 0,
        }
    }
}

/// Same kind and same underlying allocation
impl PartialEq for BoundResource {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (BoundResource::Texture(a), BoundResource::Texture(b)) => Weak::ptr_eq(a, b),
            (BoundResource::Sampler(a), BoundResource::Sampler(b)) => Weak::ptr_eq(a, b),
            (BoundResource::Buffer(a), BoundResource::Buffer(b)) => Weak::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Eq for BoundResource {}

impl fmt::Debug for BoundResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundResource")
            .field("kind", &self.kind())
            .field("stale", &self.is_stale())
            .finish()
    }
}

//! Resource binding module
//!
//! Maps (slot, kind) binding points to non-owning resource handles.

mod descriptor;
mod registry;

pub use descriptor::{ResourceKind, ResourceDescriptor, BoundResource};
pub use registry::BindingRegistry;

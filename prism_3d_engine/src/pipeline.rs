/// Pipeline object: compiled shader stages, input layout and resource bindings.
///
/// A Pipeline is produced by the setup sequence (see `setup::load_pipeline`)
/// and then populated with texture, sampler and buffer bindings. It only
/// holds weak references to bound resources: the code that created a
/// texture keeps it alive, the pipeline just remembers where it is bound.

use std::sync::Arc;

use crate::binding::{BindingRegistry, BoundResource, ResourceKind};
use crate::error::{Error, Result};
use crate::graphics_device::{Shader, InputLayout, Texture, Sampler, Buffer, DeviceLimits};

pub struct Pipeline {
    vertex_shader: Arc<dyn Shader>,
    pixel_shader: Arc<dyn Shader>,
    input_layout: Arc<dyn InputLayout>,
    bindings: BindingRegistry,
}

impl Pipeline {
    /// Assemble a pipeline with no bindings
    pub fn new(
        vertex_shader: Arc<dyn Shader>,
        pixel_shader: Arc<dyn Shader>,
        input_layout: Arc<dyn InputLayout>,
    ) -> Self {
        Self {
            vertex_shader,
            pixel_shader,
            input_layout,
            bindings: BindingRegistry::new(),
        }
    }

    pub fn vertex_shader(&self) -> &Arc<dyn Shader> {
        &self.vertex_shader
    }

    pub fn pixel_shader(&self) -> &Arc<dyn Shader> {
        &self.pixel_shader
    }

    pub fn input_layout(&self) -> &Arc<dyn InputLayout> {
        &self.input_layout
    }

    // ===== BINDING =====

    /// Bind a texture at texture slot `slot`, replacing any previous texture there
    pub fn bind_texture(&mut self, slot: u32, texture: &Arc<dyn Texture>) {
        crate::engine_trace!("prism3d::Pipeline", "bind texture slot {}", slot);
        self.bindings.bind(slot, BoundResource::from_texture(texture));
    }

    /// Bind a sampler at sampler slot `slot`, replacing any previous sampler there
    pub fn bind_sampler(&mut self, slot: u32, sampler: &Arc<dyn Sampler>) {
        crate::engine_trace!("prism3d::Pipeline", "bind sampler slot {}", slot);
        self.bindings.bind(slot, BoundResource::from_sampler(sampler));
    }

    /// Bind a buffer at buffer slot `slot`, replacing any previous buffer there
    pub fn bind_buffer(&mut self, slot: u32, buffer: &Arc<dyn Buffer>) {
        crate::engine_trace!("prism3d::Pipeline", "bind buffer slot {}", slot);
        self.bindings.bind(slot, BoundResource::from_buffer(buffer));
    }

    /// Remove the binding at (slot, kind); no-op if nothing is bound there
    pub fn unbind(&mut self, slot: u32, kind: ResourceKind) {
        crate::engine_trace!("prism3d::Pipeline", "unbind {:?} slot {}", kind, slot);
        self.bindings.unbind(slot, kind);
    }

    /// Raw handle bound at (slot, kind)
    pub fn lookup(&self, slot: u32, kind: ResourceKind) -> Option<&BoundResource> {
        self.bindings.lookup(slot, kind)
    }

    /// Live texture at `slot` (None if unbound or destroyed)
    pub fn texture(&self, slot: u32) -> Option<Arc<dyn Texture>> {
        self.lookup(slot, ResourceKind::Texture).and_then(BoundResource::texture)
    }

    /// Live sampler at `slot` (None if unbound or destroyed)
    pub fn sampler(&self, slot: u32) -> Option<Arc<dyn Sampler>> {
        self.lookup(slot, ResourceKind::Sampler).and_then(BoundResource::sampler)
    }

    /// Live buffer at `slot` (None if unbound or destroyed)
    pub fn buffer(&self, slot: u32) -> Option<Arc<dyn Buffer>> {
        self.lookup(slot, ResourceKind::Buffer).and_then(BoundResource::buffer)
    }

    /// Current bindings, for the draw path
    pub fn bindings(&self) -> &BindingRegistry {
        &self.bindings
    }

    /// Check every bound slot against a device's slot limits
    ///
    /// Binding itself never checks slot ranges; the device layer calls this
    /// before submitting work that uses the pipeline.
    pub fn validate_bindings(&self, limits: &DeviceLimits) -> Result<()> {
        for (descriptor, _) in self.bindings.iter() {
            let max = limits.max_slots(descriptor.kind);
            if descriptor.slot >= max {
                return Err(Error::InvalidResource(format!(
                    "{} is out of range (device exposes {} {:?} slots)",
                    descriptor, max, descriptor.kind
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;

//! Unit tests for Pipeline
//!
//! Uses MockGraphicsDevice for shaders, layouts and resources.

use std::sync::Arc;

use crate::binding::{BoundResource, ResourceDescriptor, ResourceKind};
use crate::error::Error;
use crate::graphics_device::mock_graphics_device::MockGraphicsDevice;
use crate::graphics_device::{
    GraphicsDevice, DeviceLimits, ShaderBlob, ShaderStage,
    InputLayoutDesc, InputElement, VertexFormat,
    TextureDesc, TextureFormat, SamplerDesc, BufferDesc, BufferUsage,
    Texture, Sampler, Buffer,
};
use crate::pipeline::Pipeline;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

fn create_pipeline(device: &mut MockGraphicsDevice) -> Pipeline {
    let vs_blob = ShaderBlob::new(vec![0; 8], ShaderStage::Vertex, "Main");
    let ps_blob = ShaderBlob::new(vec![0; 8], ShaderStage::Fragment, "Main");
    let layout_desc = InputLayoutDesc::new(vec![
        InputElement::new("POSITION", VertexFormat::R32G32B32_FLOAT, 0),
        InputElement::new("COLOR", VertexFormat::R32G32B32_FLOAT, 12),
    ]);

    Pipeline::new(
        device.create_shader(&vs_blob).unwrap(),
        device.create_shader(&ps_blob).unwrap(),
        device.create_input_layout(&layout_desc, &vs_blob).unwrap(),
    )
}

fn create_texture(device: &mut MockGraphicsDevice) -> Arc<dyn Texture> {
    device.create_texture(TextureDesc {
        width: 64,
        height: 64,
        format: TextureFormat::R8G8B8A8_SRGB,
        mip_levels: 1,
        data: None,
    }).unwrap()
}

fn create_sampler(device: &mut MockGraphicsDevice) -> Arc<dyn Sampler> {
    device.create_sampler(SamplerDesc::default()).unwrap()
}

fn create_buffer(device: &mut MockGraphicsDevice) -> Arc<dyn Buffer> {
    device.create_buffer(BufferDesc { size: 64, usage: BufferUsage::CONSTANT }).unwrap()
}

// ============================================================================
// CONSTRUCTION
// ============================================================================

#[test]
fn test_new_pipeline_has_no_bindings() {
    let mut device = MockGraphicsDevice::new();
    let pipeline = create_pipeline(&mut device);

    assert!(pipeline.bindings().is_empty());
    assert_eq!(pipeline.vertex_shader().stage(), ShaderStage::Vertex);
    assert_eq!(pipeline.pixel_shader().stage(), ShaderStage::Fragment);
    assert_eq!(pipeline.input_layout().stride(), 24);
}

// ============================================================================
// BINDING
// ============================================================================

#[test]
fn test_bind_texture_and_sampler_same_slot() {
    let mut device = MockGraphicsDevice::new();
    let mut pipeline = create_pipeline(&mut device);
    let texture = create_texture(&mut device);
    let sampler = create_sampler(&mut device);

    pipeline.bind_texture(0, &texture);
    pipeline.bind_sampler(0, &sampler);

    assert!(Arc::ptr_eq(&pipeline.texture(0).unwrap(), &texture));
    assert!(Arc::ptr_eq(&pipeline.sampler(0).unwrap(), &sampler));
    assert_eq!(pipeline.bindings().len(), 2);

    pipeline.unbind(0, ResourceKind::Texture);
    assert!(pipeline.texture(0).is_none());
    assert!(Arc::ptr_eq(&pipeline.sampler(0).unwrap(), &sampler));
}

#[test]
fn test_bind_buffer_and_lookup() {
    let mut device = MockGraphicsDevice::new();
    let mut pipeline = create_pipeline(&mut device);
    let buffer = create_buffer(&mut device);

    pipeline.bind_buffer(1, &buffer);

    assert_eq!(pipeline.lookup(1, ResourceKind::Buffer), Some(&BoundResource::from_buffer(&buffer)));
    assert_eq!(pipeline.buffer(1).unwrap().size(), 64);
    assert!(pipeline.buffer(0).is_none());
}

#[test]
fn test_rebind_texture_replaces_previous() {
    let mut device = MockGraphicsDevice::new();
    let mut pipeline = create_pipeline(&mut device);
    let first = create_texture(&mut device);
    let second = create_texture(&mut device);

    pipeline.bind_texture(4, &first);
    pipeline.bind_texture(4, &second);

    assert!(Arc::ptr_eq(&pipeline.texture(4).unwrap(), &second));
    assert_eq!(pipeline.bindings().len(), 1);
}

#[test]
fn test_texture_destroyed_by_owner_is_not_returned() {
    let mut device = MockGraphicsDevice::new();
    let mut pipeline = create_pipeline(&mut device);
    let texture = create_texture(&mut device);

    pipeline.bind_texture(0, &texture);
    drop(texture);

    assert!(pipeline.texture(0).is_none());
    assert!(pipeline.lookup(0, ResourceKind::Texture).is_some());
    assert_eq!(
        pipeline.bindings().stale_descriptors(),
        vec![ResourceDescriptor::new(0, ResourceKind::Texture)]
    );
}

// ============================================================================
// DEVICE LIMITS
// ============================================================================

#[test]
fn test_validate_bindings_within_limits() {
    let mut device = MockGraphicsDevice::new();
    let mut pipeline = create_pipeline(&mut device);
    let texture = create_texture(&mut device);
    let sampler = create_sampler(&mut device);

    pipeline.bind_texture(127, &texture);
    pipeline.bind_sampler(15, &sampler);

    assert!(pipeline.validate_bindings(&DeviceLimits::default()).is_ok());
}

#[test]
fn test_validate_bindings_rejects_slot_over_limit() {
    let mut device = MockGraphicsDevice::new();
    let mut pipeline = create_pipeline(&mut device);
    let sampler = create_sampler(&mut device);

    pipeline.bind_sampler(16, &sampler);

    let result = pipeline.validate_bindings(&DeviceLimits::default());
    assert!(matches!(result, Err(Error::InvalidResource(ref msg)) if msg.contains("Sampler#16")));
}

#[test]
fn test_validate_bindings_uses_per_kind_limits() {
    let mut device = MockGraphicsDevice::new();
    let mut pipeline = create_pipeline(&mut device);
    let buffer = create_buffer(&mut device);
    let texture = create_texture(&mut device);

    let limits = DeviceLimits { max_texture_slots: 1, max_sampler_slots: 1, max_buffer_slots: 4 };

    pipeline.bind_buffer(3, &buffer);
    assert!(pipeline.validate_bindings(&limits).is_ok());

    pipeline.bind_texture(1, &texture);
    assert!(pipeline.validate_bindings(&limits).is_err());
}

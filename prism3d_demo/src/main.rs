//! Headless triangle sample
//!
//! Compiles the sample's WGSL shaders with naga, creates the shader objects
//! and the vertex input layout on a headless device, uploads one triangle,
//! then binds a texture and a sampler at slot 0 of the pixel stage.
//!
//! Run with: cargo run -p prism3d_demo

use std::mem::{offset_of, size_of};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use prism_3d_engine::glam::Vec3;
use prism_3d_engine::prism3d::{Engine, Result, Pipeline, PipelineSetup, load_pipeline};
use prism_3d_engine::prism3d::binding::ResourceKind;
use prism_3d_engine::prism3d::log::LogSeverity;
use prism_3d_engine::prism3d::render::{
    Config, InputElement, InputLayoutDesc, VertexFormat,
    Buffer, BufferDesc, BufferUsage, SamplerDesc, Filter, TextureDesc, TextureFormat,
};
use prism_3d_engine_backend_naga::prism3d::{HeadlessGraphicsDevice, NagaShaderCompiler};

const SOURCE: &str = "prism3d::demo";

/// Vertex layout shared with `Main.vs.wgsl`
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct VertexPositionColor {
    position: Vec3,
    color: Vec3,
}

impl VertexPositionColor {
    /// POSITION at location 0, COLOR at location 1
    fn input_layout() -> InputLayoutDesc {
        InputLayoutDesc::new(vec![
            InputElement::new(
                "POSITION",
                VertexFormat::R32G32B32_FLOAT,
                offset_of!(VertexPositionColor, position) as u32,
            ),
            InputElement::new(
                "COLOR",
                VertexFormat::R32G32B32_FLOAT,
                offset_of!(VertexPositionColor, color) as u32,
            ),
        ])
    }
}

const TRIANGLE: [VertexPositionColor; 3] = [
    VertexPositionColor { position: Vec3::new(0.0, 0.5, 0.0), color: Vec3::new(0.25, 0.39, 0.19) },
    VertexPositionColor { position: Vec3::new(0.5, -0.5, 0.0), color: Vec3::new(0.44, 0.75, 0.35) },
    VertexPositionColor { position: Vec3::new(-0.5, -0.5, 0.0), color: Vec3::new(0.38, 0.55, 0.20) },
];

fn shader_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("assets")
        .join("shaders")
        .join(name)
}

/// 2x2 white/black checkerboard
fn checkerboard() -> TextureDesc {
    let white = [255u8, 255, 255, 255];
    let black = [0u8, 0, 0, 255];
    TextureDesc {
        width: 2,
        height: 2,
        format: TextureFormat::R8G8B8A8_SRGB,
        mip_levels: 1,
        data: Some([white, black, black, white].concat()),
    }
}

fn report(pipeline: &Pipeline) {
    for (descriptor, resource) in pipeline.bindings().iter() {
        let state = if resource.is_stale() { "stale" } else { "live" };
        prism_3d_engine::engine_info!(SOURCE, "  {} -> {} handle", descriptor, state);
    }
}

fn run() -> Result<()> {
    Engine::initialize()?;
    Engine::create_graphics_device(HeadlessGraphicsDevice::new(Config {
        app_name: "Prism3D Triangle".to_string(),
        ..Config::default()
    }))?;

    let compiler = NagaShaderCompiler::new();
    let setup = PipelineSetup::new(
        shader_path("Main.vs.wgsl"),
        shader_path("Main.ps.wgsl"),
        VertexPositionColor::input_layout(),
    );

    let device = Engine::graphics_device()?;
    let mut device = device
        .lock()
        .map_err(|_| prism_3d_engine::engine_err!(SOURCE, "GraphicsDevice lock poisoned"))?;

    let mut pipeline = load_pipeline(&compiler, &mut *device, &setup)?;

    let vertex_buffer: Arc<dyn Buffer> = device.create_buffer(BufferDesc {
        size: size_of::<[VertexPositionColor; 3]>() as u64,
        usage: BufferUsage::VERTEX,
    })?;
    vertex_buffer.update(0, bytemuck::cast_slice(&TRIANGLE))?;
    prism_3d_engine::engine_info!(SOURCE,
        "Uploaded {} vertices ({} bytes, stride {})",
        TRIANGLE.len(), vertex_buffer.size(), pipeline.input_layout().stride());

    let texture = device.create_texture(checkerboard())?;
    let sampler = device.create_sampler(SamplerDesc {
        min_filter: Filter::Nearest,
        mag_filter: Filter::Nearest,
        ..SamplerDesc::default()
    })?;

    pipeline.bind_texture(0, &texture);
    pipeline.bind_sampler(0, &sampler);
    pipeline.validate_bindings(&device.limits())?;

    prism_3d_engine::engine_info!(SOURCE, "Pixel stage bindings:");
    report(&pipeline);

    // Bindings do not keep the texture alive
    drop(texture);
    if pipeline.texture(0).is_none() {
        prism_3d_engine::engine_warn!(SOURCE,
            "Texture at slot 0 was released by its owner; rebinding required before drawing");
    }
    pipeline.unbind(0, ResourceKind::Texture);
    report(&pipeline);

    drop(device);
    Engine::shutdown();
    Ok(())
}

fn main() -> ExitCode {
    Engine::set_min_severity(LogSeverity::Debug);

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            prism_3d_engine::engine_error!(SOURCE, "Triangle sample failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

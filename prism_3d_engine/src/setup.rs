/// Pipeline setup sequence
///
/// Compiles the vertex and pixel shaders, creates their device objects and
/// the vertex input layout, then assembles a `Pipeline`. The sequence stops
/// at the first failing step; nothing is retried and no later step runs.

use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::graphics_device::{GraphicsDevice, InputLayoutDesc, ShaderCompiler, ShaderProfile, ShaderStage};
use crate::pipeline::Pipeline;

/// Entry point used when none is given
pub const DEFAULT_ENTRY_POINT: &str = "Main";

/// Everything needed to build a Pipeline
#[derive(Debug, Clone)]
pub struct PipelineSetup {
    pub vertex_shader_path: PathBuf,
    pub pixel_shader_path: PathBuf,
    pub entry_point: String,
    pub vertex_profile: ShaderProfile,
    pub pixel_profile: ShaderProfile,
    pub input_layout: InputLayoutDesc,
}

impl PipelineSetup {
    /// Setup with entry point `Main` and profiles `vs_5_0` / `ps_5_0`
    pub fn new(
        vertex_shader_path: impl Into<PathBuf>,
        pixel_shader_path: impl Into<PathBuf>,
        input_layout: InputLayoutDesc,
    ) -> Self {
        Self {
            vertex_shader_path: vertex_shader_path.into(),
            pixel_shader_path: pixel_shader_path.into(),
            entry_point: DEFAULT_ENTRY_POINT.to_string(),
            vertex_profile: ShaderProfile::vertex_5_0(),
            pixel_profile: ShaderProfile::pixel_5_0(),
            input_layout,
        }
    }

    pub fn with_entry_point(mut self, entry_point: impl Into<String>) -> Self {
        self.entry_point = entry_point.into();
        self
    }

    pub fn with_profiles(mut self, vertex_profile: ShaderProfile, pixel_profile: ShaderProfile) -> Self {
        self.vertex_profile = vertex_profile;
        self.pixel_profile = pixel_profile;
        self
    }
}

/// Log which setup step failed and pass the error on
fn step_failed(step: &str, error: Error) -> Error {
    crate::engine_error!("prism3d::setup", "{} failed: {}", step, error);
    error
}

/// Run the setup sequence
///
/// # Errors
///
/// - `Error::InvalidResource` if the profiles do not match their stage
/// - `Error::CompilationFailure` if either shader fails to compile
/// - `Error::DeviceObjectCreationFailure` if the device rejects a shader or the input layout
pub fn load_pipeline(
    compiler: &dyn ShaderCompiler,
    device: &mut dyn GraphicsDevice,
    setup: &PipelineSetup,
) -> Result<Pipeline> {
    if setup.vertex_profile.stage != ShaderStage::Vertex {
        return Err(step_failed("Profile check", Error::InvalidResource(format!(
            "vertex profile {} does not target the vertex stage", setup.vertex_profile
        ))));
    }
    if setup.pixel_profile.stage != ShaderStage::Fragment {
        return Err(step_failed("Profile check", Error::InvalidResource(format!(
            "pixel profile {} does not target the pixel stage", setup.pixel_profile
        ))));
    }

    let vertex_blob = compiler
        .compile(&setup.vertex_shader_path, &setup.entry_point, &setup.vertex_profile)
        .map_err(|e| step_failed("Vertex shader compilation", e))?;

    let vertex_shader = device
        .create_shader(&vertex_blob)
        .map_err(|e| step_failed("Vertex shader creation", e))?;

    let pixel_blob = compiler
        .compile(&setup.pixel_shader_path, &setup.entry_point, &setup.pixel_profile)
        .map_err(|e| step_failed("Pixel shader compilation", e))?;

    let pixel_shader = device
        .create_shader(&pixel_blob)
        .map_err(|e| step_failed("Pixel shader creation", e))?;

    let input_layout = device
        .create_input_layout(&setup.input_layout, &vertex_blob)
        .map_err(|e| step_failed("Input layout creation", e))?;

    crate::engine_info!("prism3d::setup",
        "Pipeline loaded ({} + {}, {} input elements, stride {})",
        setup.vertex_shader_path.display(),
        setup.pixel_shader_path.display(),
        input_layout.elements().len(),
        input_layout.stride());

    Ok(Pipeline::new(vertex_shader, pixel_shader, input_layout))
}

#[cfg(test)]
#[path = "setup_tests.rs"]
mod tests;

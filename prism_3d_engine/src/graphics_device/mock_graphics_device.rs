/// Mock graphics device and shader compiler for unit tests (no GPU required)
///
/// The mocks record every call so tests can check which collaborator steps
/// ran, and can be told to fail a given step.

use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::graphics_device::{
    GraphicsDevice, DeviceLimits, Shader, ShaderBlob, ShaderStage, ShaderProfile, ShaderCompiler,
    InputLayout, InputLayoutDesc, InputElement,
    Texture, TextureDesc, TextureInfo, TextureFormat,
    Sampler, SamplerDesc, Buffer, BufferDesc, BufferUsage,
};
use crate::error::Result;
use crate::engine_bail;

// ============================================================================
// Mock Texture
// ============================================================================

#[derive(Debug)]
pub struct MockTexture {
    pub info: TextureInfo,
    pub name: String,
}

impl MockTexture {
    pub fn new(width: u32, height: u32, name: String) -> Self {
        Self {
            info: TextureInfo {
                width,
                height,
                format: TextureFormat::R8G8B8A8_UNORM,
                mip_levels: 1,
            },
            name,
        }
    }
}

impl Texture for MockTexture {
    fn info(&self) -> &TextureInfo {
        &self.info
    }
}

// ============================================================================
// Mock Sampler
// ============================================================================

#[derive(Debug)]
pub struct MockSampler {
    pub desc: SamplerDesc,
}

impl MockSampler {
    pub fn new(desc: SamplerDesc) -> Self {
        Self { desc }
    }
}

impl Sampler for MockSampler {
    fn desc(&self) -> &SamplerDesc {
        &self.desc
    }
}

// ============================================================================
// Mock Buffer
// ============================================================================

#[derive(Debug)]
pub struct MockBuffer {
    pub size: u64,
    pub usage: BufferUsage,
    pub writes: Mutex<Vec<(u64, usize)>>,
}

impl MockBuffer {
    pub fn new(size: u64, usage: BufferUsage) -> Self {
        Self { size, usage, writes: Mutex::new(Vec::new()) }
    }
}

impl Buffer for MockBuffer {
    fn size(&self) -> u64 {
        self.size
    }

    fn usage(&self) -> BufferUsage {
        self.usage
    }

    fn update(&self, offset: u64, data: &[u8]) -> Result<()> {
        if offset + data.len() as u64 > self.size {
            engine_bail!("prism3d::mock", InvalidResource,
                "update of {} bytes at {} exceeds buffer size {}", data.len(), offset, self.size);
        }
        if let Ok(mut writes) = self.writes.lock() {
            writes.push((offset, data.len()));
        }
        Ok(())
    }
}

// ============================================================================
// Mock Shader / InputLayout
// ============================================================================

#[derive(Debug)]
pub struct MockShader {
    pub stage: ShaderStage,
    pub entry_point: String,
}

impl Shader for MockShader {
    fn stage(&self) -> ShaderStage {
        self.stage
    }

    fn entry_point(&self) -> &str {
        &self.entry_point
    }
}

#[derive(Debug)]
pub struct MockInputLayout {
    pub elements: Vec<InputElement>,
    pub stride: u32,
}

impl InputLayout for MockInputLayout {
    fn elements(&self) -> &[InputElement] {
        &self.elements
    }

    fn stride(&self) -> u32 {
        self.stride
    }
}

// ============================================================================
// Mock GraphicsDevice
// ============================================================================

/// Device step a MockGraphicsDevice can be told to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockDeviceFailure {
    VertexShader,
    PixelShader,
    InputLayout,
}

/// Mock device that tracks created objects without a GPU
#[derive(Debug, Default)]
pub struct MockGraphicsDevice {
    /// Names of created objects, in creation order
    pub created: Arc<Mutex<Vec<String>>>,
    /// Step to fail, if any
    pub fail_on: Option<MockDeviceFailure>,
    pub limits: DeviceLimits,
}

impl MockGraphicsDevice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(step: MockDeviceFailure) -> Self {
        Self { fail_on: Some(step), ..Self::default() }
    }

    pub fn get_created(&self) -> Vec<String> {
        self.created.lock().unwrap().clone()
    }

    fn record(&self, name: String) {
        self.created.lock().unwrap().push(name);
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    fn create_shader(&mut self, blob: &ShaderBlob) -> Result<Arc<dyn Shader>> {
        let failing = match blob.stage() {
            ShaderStage::Vertex => self.fail_on == Some(MockDeviceFailure::VertexShader),
            ShaderStage::Fragment => self.fail_on == Some(MockDeviceFailure::PixelShader),
            ShaderStage::Compute => false,
        };
        if failing {
            engine_bail!("prism3d::mock", DeviceObjectCreationFailure,
                "mock refused to create {:?} shader", blob.stage());
        }
        self.record(format!("shader_{:?}", blob.stage()));
        Ok(Arc::new(MockShader {
            stage: blob.stage(),
            entry_point: blob.entry_point().to_string(),
        }))
    }

    fn create_input_layout(
        &mut self,
        desc: &InputLayoutDesc,
        _vertex_shader_blob: &ShaderBlob,
    ) -> Result<Arc<dyn InputLayout>> {
        if self.fail_on == Some(MockDeviceFailure::InputLayout) {
            engine_bail!("prism3d::mock", DeviceObjectCreationFailure,
                "mock refused to create input layout");
        }
        self.record(format!("input_layout_{}", desc.elements.len()));
        Ok(Arc::new(MockInputLayout {
            elements: desc.elements.clone(),
            stride: desc.stride(),
        }))
    }

    fn create_texture(&mut self, desc: TextureDesc) -> Result<Arc<dyn Texture>> {
        let name = format!("texture_{}x{}", desc.width, desc.height);
        self.record(name.clone());
        Ok(Arc::new(MockTexture::new(desc.width, desc.height, name)))
    }

    fn create_sampler(&mut self, desc: SamplerDesc) -> Result<Arc<dyn Sampler>> {
        self.record("sampler".to_string());
        Ok(Arc::new(MockSampler::new(desc)))
    }

    fn create_buffer(&mut self, desc: BufferDesc) -> Result<Arc<dyn Buffer>> {
        self.record(format!("buffer_{}", desc.size));
        Ok(Arc::new(MockBuffer::new(desc.size, desc.usage)))
    }

    fn limits(&self) -> DeviceLimits {
        self.limits
    }
}

// ============================================================================
// Mock ShaderCompiler
// ============================================================================

/// Mock compiler that returns a fixed blob, or fails for one path
#[derive(Debug, Default)]
pub struct MockShaderCompiler {
    /// (path, entry point, profile) of every compile call
    pub calls: Mutex<Vec<(String, String, String)>>,
    /// Path whose compilation fails
    pub fail_path: Option<String>,
}

impl MockShaderCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_for(path: &str) -> Self {
        Self { fail_path: Some(path.to_string()), ..Self::default() }
    }

    pub fn get_calls(&self) -> Vec<(String, String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl ShaderCompiler for MockShaderCompiler {
    fn compile(&self, path: &Path, entry_point: &str, profile: &ShaderProfile) -> Result<ShaderBlob> {
        let path_str = path.display().to_string();
        self.calls.lock().unwrap().push((path_str.clone(), entry_point.to_string(), profile.to_string()));

        if self.fail_path.as_deref() == Some(path_str.as_str()) {
            engine_bail!("prism3d::mock", CompilationFailure,
                "{}: mock compile error", path_str);
        }

        Ok(ShaderBlob::from_words(&[0x0723_0203, 0x0001_0000], profile.stage, entry_point))
    }
}

#[cfg(test)]
#[path = "mock_graphics_device_tests.rs"]
mod tests;

/// HeadlessGraphicsDevice - GraphicsDevice implementation without a GPU
///
/// Shader and input layout creation check SPIR-V blobs the way a driver
/// would: the module header, the entry point, and the vertex inputs the
/// shader reads against the layout it is paired with. Textures, samplers and
/// buffers live in host memory.

use std::sync::{Arc, Mutex};

use rustc_hash::FxHashMap;
use prism_3d_engine::{engine_bail, engine_err};
use prism_3d_engine::prism3d::Result;
use prism_3d_engine::prism3d::render::{
    GraphicsDevice, Config, DeviceLimits,
    Shader, ShaderBlob, ShaderStage,
    InputLayout, InputLayoutDesc, InputElement,
    Texture, TextureDesc, TextureInfo,
    Sampler, SamplerDesc,
    Buffer, BufferDesc, BufferUsage,
};

/// SPIR-V module magic number (first word of every module)
const SPIRV_MAGIC: u32 = 0x0723_0203;

/// Largest texture width or height (D3D11 2D texture limit)
const MAX_TEXTURE_DIMENSION: u32 = 16384;

/// Highest anisotropy level a sampler may request
const MAX_ANISOTROPY: u32 = 16;

// ============================================================================
// Device objects
// ============================================================================

/// Shader object holding the validated SPIR-V words
pub struct HeadlessShader {
    stage: ShaderStage,
    entry_point: String,
    words: Vec<u32>,
}

impl HeadlessShader {
    /// SPIR-V words of the module
    pub fn words(&self) -> &[u32] {
        &self.words
    }
}

impl Shader for HeadlessShader {
    fn stage(&self) -> ShaderStage {
        self.stage
    }

    fn entry_point(&self) -> &str {
        &self.entry_point
    }
}

/// Input layout object
pub struct HeadlessInputLayout {
    elements: Vec<InputElement>,
    stride: u32,
}

impl InputLayout for HeadlessInputLayout {
    fn elements(&self) -> &[InputElement] {
        &self.elements
    }

    fn stride(&self) -> u32 {
        self.stride
    }
}

/// Texture stored in host memory (mip level 0 only)
pub struct HeadlessTexture {
    info: TextureInfo,
    data: Vec<u8>,
}

impl HeadlessTexture {
    /// Build a texture from its description, zero-filled when no data is given
    pub fn new(desc: TextureDesc) -> Result<Self> {
        if desc.width == 0 || desc.height == 0 {
            engine_bail!("prism3d::headless", DeviceObjectCreationFailure,
                "Texture size must be non-zero, got {}x{}", desc.width, desc.height);
        }
        if desc.width > MAX_TEXTURE_DIMENSION || desc.height > MAX_TEXTURE_DIMENSION {
            engine_bail!("prism3d::headless", DeviceObjectCreationFailure,
                "Texture size {}x{} exceeds the {} texel limit per dimension",
                desc.width, desc.height, MAX_TEXTURE_DIMENSION);
        }
        if desc.mip_levels == 0 {
            engine_bail!("prism3d::headless", DeviceObjectCreationFailure,
                "Texture needs at least one mip level");
        }

        let expected = (desc.width as usize)
            .checked_mul(desc.height as usize)
            .and_then(|texels| texels.checked_mul(desc.format.bytes_per_texel() as usize));
        let expected = match expected {
            Some(expected) => expected,
            None => engine_bail!("prism3d::headless", DeviceObjectCreationFailure,
                "Texture size {}x{} {:?} does not fit in host memory",
                desc.width, desc.height, desc.format),
        };

        let data = match desc.data {
            Some(data) if data.len() == expected => data,
            Some(data) => engine_bail!("prism3d::headless", DeviceObjectCreationFailure,
                "Texture data is {} bytes, {}x{} {:?} needs {}",
                data.len(), desc.width, desc.height, desc.format, expected),
            None => vec![0; expected],
        };

        prism_3d_engine::engine_debug!("prism3d::headless",
            "Created texture {}x{} {:?}", desc.width, desc.height, desc.format);

        Ok(Self {
            info: TextureInfo {
                width: desc.width,
                height: desc.height,
                format: desc.format,
                mip_levels: desc.mip_levels,
            },
            data,
        })
    }

    /// Texel bytes of mip level 0
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

impl Texture for HeadlessTexture {
    fn info(&self) -> &TextureInfo {
        &self.info
    }
}

/// Sampler state
pub struct HeadlessSampler {
    desc: SamplerDesc,
}

impl Sampler for HeadlessSampler {
    fn desc(&self) -> &SamplerDesc {
        &self.desc
    }
}

/// Buffer stored in host memory
pub struct HeadlessBuffer {
    usage: BufferUsage,
    data: Mutex<Vec<u8>>,
}

impl HeadlessBuffer {
    /// Copy of the current contents
    pub fn contents(&self) -> Result<Vec<u8>> {
        let data = self.data.lock()
            .map_err(|_| engine_err!("prism3d::headless", "Buffer lock poisoned"))?;
        Ok(data.clone())
    }
}

impl Buffer for HeadlessBuffer {
    fn size(&self) -> u64 {
        self.data.lock().map(|data| data.len() as u64).unwrap_or(0)
    }

    fn usage(&self) -> BufferUsage {
        self.usage
    }

    fn update(&self, offset: u64, data: &[u8]) -> Result<()> {
        let mut contents = self.data.lock()
            .map_err(|_| engine_err!("prism3d::headless", "Buffer lock poisoned"))?;

        let size = contents.len() as u64;
        let end = offset.checked_add(data.len() as u64);
        match end {
            Some(end) if end <= size => {
                // offset and end are bounded by the Vec length here
                contents[offset as usize..end as usize].copy_from_slice(data);
                Ok(())
            }
            _ => engine_bail!("prism3d::headless", InvalidResource,
                "Buffer update out of range: offset {} + {} bytes exceeds size {}",
                offset, data.len(), size),
        }
    }
}

// ============================================================================
// HeadlessGraphicsDevice
// ============================================================================

/// Headless device collaborator
pub struct HeadlessGraphicsDevice {
    config: Config,
}

impl HeadlessGraphicsDevice {
    /// Create a headless device
    ///
    /// With `config.enable_validation` off, shader blobs are only checked for
    /// the SPIR-V header and input layouts only for their own consistency.
    pub fn new(config: Config) -> Self {
        prism_3d_engine::engine_info!("prism3d::headless",
            "Headless graphics device created for '{}' {}.{}.{} (validation: {})",
            config.app_name,
            config.app_version.0, config.app_version.1, config.app_version.2,
            config.enable_validation);
        Self { config }
    }

    /// Configuration the device was created with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Decode the blob into SPIR-V words and check the module header
    fn spirv_words(blob: &ShaderBlob) -> Result<Vec<u32>> {
        let words = match blob.words() {
            Some(words) if !words.is_empty() => words,
            _ => engine_bail!("prism3d::headless", DeviceObjectCreationFailure,
                "{:?} shader blob is not a SPIR-V module ({} bytes)", blob.stage(), blob.len()),
        };
        if words[0] != SPIRV_MAGIC {
            engine_bail!("prism3d::headless", DeviceObjectCreationFailure,
                "{:?} shader blob has a bad SPIR-V magic number 0x{:08x}", blob.stage(), words[0]);
        }
        Ok(words)
    }

    /// Reflect the blob and return the variables of the entry point matching its name
    fn reflect_entry_point(blob: &ShaderBlob, words: &[u32]) -> Result<Vec<spirq::var::Variable>> {
        let entry_points = spirq::ReflectConfig::new()
            .spv(words)
            .ref_all_rscs(true)
            .reflect()
            .map_err(|e| engine_err!("prism3d::headless", DeviceObjectCreationFailure,
                "SPIR-V reflection failed: {:?}", e))?;

        match entry_points.into_iter().find(|ep| ep.name == blob.entry_point()) {
            Some(entry_point) => Ok(entry_point.vars),
            None => engine_bail!("prism3d::headless", DeviceObjectCreationFailure,
                "{:?} shader blob has no entry point named '{}'", blob.stage(), blob.entry_point()),
        }
    }

    /// Component count of every vertex input the shader reads, keyed by location
    fn shader_inputs(vars: &[spirq::var::Variable]) -> Result<FxHashMap<u32, u32>> {
        use spirq::ty::Type;

        let mut inputs = FxHashMap::default();
        for var in vars {
            if let spirq::var::Variable::Input { location, ty, .. } = var {
                let components = match ty {
                    Type::Scalar(_) => 1,
                    Type::Vector(v) => v.nscalar,
                    other => engine_bail!("prism3d::headless", DeviceObjectCreationFailure,
                        "Unsupported vertex input type at location {}: {:?}", location.loc(), other),
                };
                inputs.insert(location.loc(), components);
            }
        }
        Ok(inputs)
    }

    /// Check that the layout feeds every input the vertex shader reads
    fn match_signature(desc: &InputLayoutDesc, inputs: &FxHashMap<u32, u32>) -> Result<()> {
        let mut locations: Vec<(&u32, &u32)> = inputs.iter().collect();
        locations.sort();

        for (&location, &components) in locations {
            let element = match desc.elements.get(location as usize) {
                Some(element) => element,
                None => engine_bail!("prism3d::headless", DeviceObjectCreationFailure,
                    "Vertex shader reads input location {} but the layout has {} elements",
                    location, desc.elements.len()),
            };
            if element.format.component_count() < components {
                engine_bail!("prism3d::headless", DeviceObjectCreationFailure,
                    "Layout element {}{} ({:?}) provides {} components, shader location {} reads {}",
                    element.semantic_name, element.semantic_index, element.format,
                    element.format.component_count(), location, components);
            }
        }
        Ok(())
    }
}

impl GraphicsDevice for HeadlessGraphicsDevice {
    fn create_shader(&mut self, blob: &ShaderBlob) -> Result<Arc<dyn Shader>> {
        let words = Self::spirv_words(blob)?;
        if self.config.enable_validation {
            Self::reflect_entry_point(blob, &words)?;
        }

        prism_3d_engine::engine_debug!("prism3d::headless",
            "Created {:?} shader '{}' ({} words)", blob.stage(), blob.entry_point(), words.len());

        Ok(Arc::new(HeadlessShader {
            stage: blob.stage(),
            entry_point: blob.entry_point().to_string(),
            words,
        }))
    }

    fn create_input_layout(
        &mut self,
        desc: &InputLayoutDesc,
        vertex_shader_blob: &ShaderBlob,
    ) -> Result<Arc<dyn InputLayout>> {
        if vertex_shader_blob.stage() != ShaderStage::Vertex {
            engine_bail!("prism3d::headless", DeviceObjectCreationFailure,
                "Input layout needs a vertex shader blob, got {:?}", vertex_shader_blob.stage());
        }
        desc.validate()
            .map_err(|e| engine_err!("prism3d::headless", DeviceObjectCreationFailure,
                "Input layout rejected: {}", e))?;

        let words = Self::spirv_words(vertex_shader_blob)?;
        if self.config.enable_validation {
            let vars = Self::reflect_entry_point(vertex_shader_blob, &words)?;
            let inputs = Self::shader_inputs(&vars)?;
            Self::match_signature(desc, &inputs)?;
        }

        let stride = desc.stride();
        prism_3d_engine::engine_debug!("prism3d::headless",
            "Created input layout ({} elements, stride {})", desc.elements.len(), stride);

        Ok(Arc::new(HeadlessInputLayout {
            elements: desc.elements.clone(),
            stride,
        }))
    }

    fn create_texture(&mut self, desc: TextureDesc) -> Result<Arc<dyn Texture>> {
        Ok(Arc::new(HeadlessTexture::new(desc)?))
    }

    fn create_sampler(&mut self, desc: SamplerDesc) -> Result<Arc<dyn Sampler>> {
        if desc.max_anisotropy == 0 || desc.max_anisotropy > MAX_ANISOTROPY {
            engine_bail!("prism3d::headless", DeviceObjectCreationFailure,
                "Sampler anisotropy must be in 1..={}, got {}", MAX_ANISOTROPY, desc.max_anisotropy);
        }

        prism_3d_engine::engine_debug!("prism3d::headless",
            "Created sampler ({:?}/{:?})", desc.min_filter, desc.mag_filter);

        Ok(Arc::new(HeadlessSampler { desc }))
    }

    fn create_buffer(&mut self, desc: BufferDesc) -> Result<Arc<dyn Buffer>> {
        if desc.size == 0 {
            engine_bail!("prism3d::headless", DeviceObjectCreationFailure,
                "Buffer size must be non-zero");
        }
        if desc.usage.is_empty() {
            engine_bail!("prism3d::headless", DeviceObjectCreationFailure,
                "Buffer of {} bytes has no usage flags", desc.size);
        }
        let size = match usize::try_from(desc.size) {
            Ok(size) => size,
            Err(_) => engine_bail!("prism3d::headless", DeviceObjectCreationFailure,
                "Buffer size {} does not fit in host memory", desc.size),
        };

        prism_3d_engine::engine_debug!("prism3d::headless",
            "Created buffer ({} bytes, {:?})", desc.size, desc.usage);

        Ok(Arc::new(HeadlessBuffer {
            usage: desc.usage,
            data: Mutex::new(vec![0; size]),
        }))
    }

    fn limits(&self) -> DeviceLimits {
        self.config.limits
    }
}

#[cfg(test)]
#[path = "headless_graphics_device_tests.rs"]
mod tests;

/// Shader trait, shader profiles, compiled blobs and the ShaderCompiler trait

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use crate::error::{Error, Result};

/// Shader stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Vertex shader
    Vertex,
    /// Fragment/Pixel shader
    Fragment,
    /// Compute shader
    Compute,
}

impl ShaderStage {
    /// Profile prefix of this stage (`vs`, `ps`, `cs`)
    pub fn profile_prefix(&self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vs",
            ShaderStage::Fragment => "ps",
            ShaderStage::Compute => "cs",
        }
    }
}

// ===== SHADER PROFILE =====

/// Target profile of a shader compilation (e.g. `vs_5_0`, `ps_5_0`)
///
/// A profile names the pipeline stage and the shader model the source is
/// compiled for. It is parsed from and printed as `<stage>_<major>_<minor>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderProfile {
    pub stage: ShaderStage,
    pub major: u32,
    pub minor: u32,
}

impl ShaderProfile {
    /// Create a profile from its parts
    pub fn new(stage: ShaderStage, major: u32, minor: u32) -> Self {
        Self { stage, major, minor }
    }

    /// `vs_5_0`
    pub fn vertex_5_0() -> Self {
        Self::new(ShaderStage::Vertex, 5, 0)
    }

    /// `ps_5_0`
    pub fn pixel_5_0() -> Self {
        Self::new(ShaderStage::Fragment, 5, 0)
    }
}

impl FromStr for ShaderProfile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidResource(format!(
            "Invalid shader profile '{}' (expected <vs|ps|cs>_<major>_<minor>)", s
        ));

        let mut parts = s.split('_');
        let (Some(prefix), Some(major), Some(minor), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };

        let stage = match prefix {
            "vs" => ShaderStage::Vertex,
            "ps" => ShaderStage::Fragment,
            "cs" => ShaderStage::Compute,
            _ => return Err(invalid()),
        };
        let version = |part: &str| {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            part.parse::<u32>().map_err(|_| invalid())
        };
        let major = version(major)?;
        let minor = version(minor)?;

        Ok(Self { stage, major, minor })
    }
}

impl fmt::Display for ShaderProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_{}", self.stage.profile_prefix(), self.major, self.minor)
    }
}

// ===== SHADER BLOB =====

/// Compiled shader bytecode produced by a ShaderCompiler
///
/// The bytes are opaque to the engine; only the device that consumes the
/// blob interprets them (SPIR-V words for the naga backend).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderBlob {
    code: Vec<u8>,
    stage: ShaderStage,
    entry_point: String,
}

impl ShaderBlob {
    /// Wrap raw bytecode
    pub fn new(code: Vec<u8>, stage: ShaderStage, entry_point: impl Into<String>) -> Self {
        Self { code, stage, entry_point: entry_point.into() }
    }

    /// Wrap 32-bit words (SPIR-V), stored as native-endian bytes
    pub fn from_words(words: &[u32], stage: ShaderStage, entry_point: impl Into<String>) -> Self {
        Self::new(bytemuck::cast_slice(words).to_vec(), stage, entry_point)
    }

    /// Raw bytecode
    pub fn code(&self) -> &[u8] {
        &self.code
    }

    /// Bytecode reinterpreted as 32-bit words, `None` if the length is not a multiple of 4
    pub fn words(&self) -> Option<Vec<u32>> {
        if self.code.len() % 4 != 0 {
            return None;
        }
        Some(
            self.code
                .chunks_exact(4)
                .map(|chunk| u32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
                .collect(),
        )
    }

    /// Size in bytes
    pub fn len(&self) -> usize {
        self.code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    /// Stage the blob was compiled for
    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    /// Entry point the blob was compiled for
    pub fn entry_point(&self) -> &str {
        &self.entry_point
    }
}

// ===== TRAITS =====

/// Shader resource trait
///
/// Implemented by backend-specific shader objects. The shader is destroyed
/// when the last `Arc` is dropped.
pub trait Shader: Send + Sync {
    /// Stage this shader runs in
    fn stage(&self) -> ShaderStage;

    /// Entry point function name
    fn entry_point(&self) -> &str;
}

/// Shader compiler collaborator
///
/// Turns a shader source file into a compiled blob. Failures are reported as
/// `Error::CompilationFailure` carrying the compiler's diagnostic text.
pub trait ShaderCompiler {
    /// Compile `path` for `profile`, starting at `entry_point`
    fn compile(&self, path: &Path, entry_point: &str, profile: &ShaderProfile) -> Result<ShaderBlob>;
}

#[cfg(test)]
#[path = "shader_tests.rs"]
mod tests;

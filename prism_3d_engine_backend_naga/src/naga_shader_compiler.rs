/// NagaShaderCompiler - WGSL to SPIR-V implementation of ShaderCompiler
///
/// Reads a WGSL source file, validates the module, checks that the requested
/// entry point exists for the profile's stage, then writes a SPIR-V module
/// containing only that entry point.

use std::path::Path;

use prism_3d_engine::engine_bail;
use prism_3d_engine::prism3d::Result;
use prism_3d_engine::prism3d::render::{ShaderBlob, ShaderCompiler, ShaderProfile, ShaderStage};

/// Shader models accepted in profile strings (`vs_4_0` .. `ps_5_1`)
const SUPPORTED_SHADER_MODELS: std::ops::RangeInclusive<u32> = 4..=5;

/// WGSL shader compiler backed by naga
#[derive(Debug, Clone)]
pub struct NagaShaderCompiler {
    validation_flags: naga::valid::ValidationFlags,
}

impl NagaShaderCompiler {
    /// Compiler running every naga validation pass
    pub fn new() -> Self {
        Self {
            validation_flags: naga::valid::ValidationFlags::all(),
        }
    }

    /// Restrict naga validation to the given passes
    pub fn with_validation_flags(mut self, flags: naga::valid::ValidationFlags) -> Self {
        self.validation_flags = flags;
        self
    }

    fn naga_stage(stage: ShaderStage) -> naga::ShaderStage {
        match stage {
            ShaderStage::Vertex => naga::ShaderStage::Vertex,
            ShaderStage::Fragment => naga::ShaderStage::Fragment,
            ShaderStage::Compute => naga::ShaderStage::Compute,
        }
    }

    /// Compile WGSL source text already loaded in memory
    ///
    /// `label` names the source in diagnostics (usually the file path).
    pub fn compile_source(
        &self,
        source: &str,
        label: &str,
        entry_point: &str,
        profile: &ShaderProfile,
    ) -> Result<ShaderBlob> {
        if !SUPPORTED_SHADER_MODELS.contains(&profile.major) {
            engine_bail!("prism3d::naga", CompilationFailure,
                "{}: unsupported shader model in profile {}", label, profile);
        }

        let module = match naga::front::wgsl::parse_str(source) {
            Ok(module) => module,
            Err(e) => engine_bail!("prism3d::naga", CompilationFailure,
                "{}: {}", label, e.emit_to_string_with_path(source, label)),
        };

        let mut validator = naga::valid::Validator::new(
            self.validation_flags,
            naga::valid::Capabilities::all(),
        );
        let info = match validator.validate(&module) {
            Ok(info) => info,
            Err(e) => engine_bail!("prism3d::naga", CompilationFailure,
                "{}: {}", label, e.emit_to_string_with_path(source, label)),
        };

        let stage = Self::naga_stage(profile.stage);
        let found = module.entry_points.iter()
            .any(|ep| ep.name == entry_point && ep.stage == stage);
        if !found {
            let available: Vec<&str> = module.entry_points.iter()
                .map(|ep| ep.name.as_str())
                .collect();
            engine_bail!("prism3d::naga", CompilationFailure,
                "{}: no {:?} entry point named '{}' (module declares {:?})",
                label, profile.stage, entry_point, available);
        }

        let pipeline_options = naga::back::spv::PipelineOptions {
            shader_stage: stage,
            entry_point: entry_point.to_string(),
        };
        let words = match naga::back::spv::write_vec(
            &module,
            &info,
            &naga::back::spv::Options::default(),
            Some(&pipeline_options),
        ) {
            Ok(words) => words,
            Err(e) => engine_bail!("prism3d::naga", CompilationFailure,
                "{}: SPIR-V generation failed: {}", label, e),
        };

        prism_3d_engine::engine_debug!("prism3d::naga",
            "Compiled {} ({}, entry '{}', {} words)", label, profile, entry_point, words.len());

        Ok(ShaderBlob::from_words(&words, profile.stage, entry_point))
    }
}

impl Default for NagaShaderCompiler {
    fn default() -> Self {
        Self::new()
    }
}

impl ShaderCompiler for NagaShaderCompiler {
    fn compile(&self, path: &Path, entry_point: &str, profile: &ShaderProfile) -> Result<ShaderBlob> {
        let label = path.display().to_string();
        let source = match std::fs::read_to_string(path) {
            Ok(source) => source,
            Err(e) => engine_bail!("prism3d::naga", CompilationFailure,
                "{}: failed to read shader source: {}", label, e),
        };
        self.compile_source(&source, &label, entry_point, profile)
    }
}

#[cfg(test)]
#[path = "naga_shader_compiler_tests.rs"]
mod tests;

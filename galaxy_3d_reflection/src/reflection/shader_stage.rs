/// Shader stage tag, stage bitmask and shader descriptor

/// Shader stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Vertex shader
    Vertex,
    /// Tessellation control (hull) shader
    TessellationControl,
    /// Tessellation evaluation (domain) shader
    TessellationEvaluation,
    /// Geometry shader
    Geometry,
    /// Fragment/Pixel shader
    Fragment,
    /// Compute shader
    Compute,
    /// Any ray tracing stage (raygen, hit, miss, ...)
    RayTracing,
}

impl ShaderStage {
    /// Every stage, in bit order
    pub const ALL: [ShaderStage; 7] = [
        ShaderStage::Vertex,
        ShaderStage::TessellationControl,
        ShaderStage::TessellationEvaluation,
        ShaderStage::Geometry,
        ShaderStage::Fragment,
        ShaderStage::Compute,
        ShaderStage::RayTracing,
    ];
}

/// Shader stage visibility flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ShaderStageFlags(u32);

impl ShaderStageFlags {
    pub const NONE: Self = Self(0);
    pub const VERTEX: Self = Self(0x01);
    pub const TESSELLATION_CONTROL: Self = Self(0x02);
    pub const TESSELLATION_EVALUATION: Self = Self(0x04);
    pub const GEOMETRY: Self = Self(0x08);
    pub const FRAGMENT: Self = Self(0x10);
    pub const COMPUTE: Self = Self(0x20);
    pub const RAY_TRACING: Self = Self(0x40);
    pub const ALL_GRAPHICS: Self = Self(0x1f);

    /// Flag of a single stage
    pub fn from_stage(stage: ShaderStage) -> Self {
        match stage {
            ShaderStage::Vertex => Self::VERTEX,
            ShaderStage::TessellationControl => Self::TESSELLATION_CONTROL,
            ShaderStage::TessellationEvaluation => Self::TESSELLATION_EVALUATION,
            ShaderStage::Geometry => Self::GEOMETRY,
            ShaderStage::Fragment => Self::FRAGMENT,
            ShaderStage::Compute => Self::COMPUTE,
            ShaderStage::RayTracing => Self::RAY_TRACING,
        }
    }

    /// Create from a slice of ShaderStage
    pub fn from_stages(stages: &[ShaderStage]) -> Self {
        stages.iter().fold(Self::NONE, |flags, &stage| flags | Self::from_stage(stage))
    }

    pub fn contains(&self, stage: ShaderStage) -> bool {
        self.0 & Self::from_stage(stage).0 != 0
    }

    pub fn is_empty(&self) -> bool { self.0 == 0 }
    pub fn bits(&self) -> u32 { self.0 }
}

impl std::ops::BitOr for ShaderStageFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl From<ShaderStage> for ShaderStageFlags {
    fn from(stage: ShaderStage) -> Self {
        Self::from_stage(stage)
    }
}

/// Descriptor for reflecting a shader from raw bytes
#[derive(Debug, Clone)]
pub struct ShaderDesc<'a> {
    /// Compiled SPIR-V bytecode (little-endian words)
    pub code: &'a [u8],
    /// Shader stage
    pub stage: ShaderStage,
}

#[cfg(test)]
#[path = "shader_stage_tests.rs"]
mod tests;

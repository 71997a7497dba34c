/// Raw reflector interface
///
/// A raw reflector parses SPIR-V and exposes the unfiltered resource and
/// member lists. Everything it hands out borrows from the reflector itself,
/// so the compactor must copy what it keeps before the reflector is dropped.

use crate::error::Result;

/// SPIR-V ids locating a binding's decorations (not retained after compaction)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RawType {
    /// Id of the declared variable
    pub id: u32,
    /// Id of the full type (pointer, arrays included)
    pub type_id: u32,
    /// Id of the element type with pointers and arrays stripped
    pub base_type_id: u32,
}

/// Resource kind as reported by the raw reflector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RawResourceKind {
    StageInput = 0,
    StageOutput,
    UniformBuffer,
    StorageBuffer,
    Texture,
    StorageTexture,
    Sampler,
    PushConstant,
    SubpassInput,
    UniformTexelBuffer,
    StorageTexelBuffer,
    AccelerationStructure,
    CombinedSampler,
}

impl RawResourceKind {
    pub const COUNT: usize = 13;

    /// Every kind, indexed by ordinal
    pub const ALL: [RawResourceKind; Self::COUNT] = [
        RawResourceKind::StageInput,
        RawResourceKind::StageOutput,
        RawResourceKind::UniformBuffer,
        RawResourceKind::StorageBuffer,
        RawResourceKind::Texture,
        RawResourceKind::StorageTexture,
        RawResourceKind::Sampler,
        RawResourceKind::PushConstant,
        RawResourceKind::SubpassInput,
        RawResourceKind::UniformTexelBuffer,
        RawResourceKind::StorageTexelBuffer,
        RawResourceKind::AccelerationStructure,
        RawResourceKind::CombinedSampler,
    ];

    pub fn ordinal(self) -> usize {
        self as usize
    }
}

/// Texture dimension as reported by the raw reflector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum RawTextureDimension {
    #[default]
    Undefined = 0,
    Buffer,
    Texture1D,
    Texture1DArray,
    Texture2D,
    Texture2DArray,
    Texture2DMS,
    Texture2DMSArray,
    Texture3D,
    TextureCube,
    TextureCubeArray,
}

impl RawTextureDimension {
    pub const COUNT: usize = 11;

    pub const ALL: [RawTextureDimension; Self::COUNT] = [
        RawTextureDimension::Undefined,
        RawTextureDimension::Buffer,
        RawTextureDimension::Texture1D,
        RawTextureDimension::Texture1DArray,
        RawTextureDimension::Texture2D,
        RawTextureDimension::Texture2DArray,
        RawTextureDimension::Texture2DMS,
        RawTextureDimension::Texture2DMSArray,
        RawTextureDimension::Texture3D,
        RawTextureDimension::TextureCube,
        RawTextureDimension::TextureCubeArray,
    ];

    pub fn ordinal(self) -> usize {
        self as usize
    }
}

/// Access mode as reported by the raw reflector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum RawAccess {
    ReadOnly = 0,
    WriteOnly,
    #[default]
    ReadWrite,
}

impl RawAccess {
    pub const COUNT: usize = 3;

    pub const ALL: [RawAccess; Self::COUNT] = [
        RawAccess::ReadOnly,
        RawAccess::WriteOnly,
        RawAccess::ReadWrite,
    ];

    pub fn ordinal(self) -> usize {
        self as usize
    }
}

/// Storage image format, ordinals follow the SPIR-V `ImageFormat` operand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum RawImageFormat {
    #[default]
    Unknown = 0,
    Rgba32f,
    Rgba16f,
    R32f,
    Rgba8,
    Rgba8Snorm,
    Rg32f,
    Rg16f,
    R11fG11fB10f,
    R16f,
    Rgba16,
    Rgb10A2,
    Rg16,
    Rg8,
    R16,
    R8,
    Rgba16Snorm,
    Rg16Snorm,
    Rg8Snorm,
    R16Snorm,
    R8Snorm,
    Rgba32i,
    Rgba16i,
    Rgba8i,
    R32i,
    Rg32i,
    Rg16i,
    Rg8i,
    R16i,
    R8i,
    Rgba32ui,
    Rgba16ui,
    Rgba8ui,
    R32ui,
    Rgb10a2ui,
    Rg32ui,
    Rg16ui,
    Rg8ui,
    R16ui,
    R8ui,
    R64ui,
    R64i,
}

impl RawImageFormat {
    pub const COUNT: usize = 42;

    pub const ALL: [RawImageFormat; Self::COUNT] = [
        RawImageFormat::Unknown,
        RawImageFormat::Rgba32f,
        RawImageFormat::Rgba16f,
        RawImageFormat::R32f,
        RawImageFormat::Rgba8,
        RawImageFormat::Rgba8Snorm,
        RawImageFormat::Rg32f,
        RawImageFormat::Rg16f,
        RawImageFormat::R11fG11fB10f,
        RawImageFormat::R16f,
        RawImageFormat::Rgba16,
        RawImageFormat::Rgb10A2,
        RawImageFormat::Rg16,
        RawImageFormat::Rg8,
        RawImageFormat::R16,
        RawImageFormat::R8,
        RawImageFormat::Rgba16Snorm,
        RawImageFormat::Rg16Snorm,
        RawImageFormat::Rg8Snorm,
        RawImageFormat::R16Snorm,
        RawImageFormat::R8Snorm,
        RawImageFormat::Rgba32i,
        RawImageFormat::Rgba16i,
        RawImageFormat::Rgba8i,
        RawImageFormat::R32i,
        RawImageFormat::Rg32i,
        RawImageFormat::Rg16i,
        RawImageFormat::Rg8i,
        RawImageFormat::R16i,
        RawImageFormat::R8i,
        RawImageFormat::Rgba32ui,
        RawImageFormat::Rgba16ui,
        RawImageFormat::Rgba8ui,
        RawImageFormat::R32ui,
        RawImageFormat::Rgb10a2ui,
        RawImageFormat::Rg32ui,
        RawImageFormat::Rg16ui,
        RawImageFormat::Rg8ui,
        RawImageFormat::R16ui,
        RawImageFormat::R8ui,
        RawImageFormat::R64ui,
        RawImageFormat::R64i,
    ];

    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// Convert a SPIR-V `ImageFormat` operand; unknown values yield `None`
    pub fn from_spirv(value: u32) -> Option<Self> {
        Self::ALL.get(value as usize).copied()
    }
}

/// One externally visible binding before filtering
#[derive(Debug, Clone, PartialEq)]
pub struct RawResource {
    pub name: String,
    pub ty: RawType,
    pub kind: RawResourceKind,
    pub dimension: RawTextureDimension,
    pub access: RawAccess,
    pub format: RawImageFormat,
    /// Descriptor set
    pub set: u32,
    /// Binding slot (location for stage inputs/outputs)
    pub binding: u32,
    /// Descriptor count, block size for push constants, element size for stage inputs
    pub size: u32,
    /// Whether the entry point references the resource
    pub is_used: bool,
}

/// One member of an aggregate resource
#[derive(Debug, Clone, PartialEq)]
pub struct RawVariable {
    pub name: String,
    /// Declared type id of the member
    pub type_id: u32,
    pub parent_ty: RawType,
    /// Index into the raw resource list
    pub parent_index: usize,
    pub is_used: bool,
    /// Byte offset inside the parent block
    pub offset: u32,
    /// Byte size (0 for unsized members)
    pub size: u32,
}

/// Raw reflector backend trait
///
/// Implemented by SPIR-V parsing backends (e.g., `SpirqReflector`).
/// Dropping the reflector releases everything it parsed.
pub trait RawReflector {
    /// Parse a SPIR-V module
    fn create(code: &[u32]) -> Result<Self>
    where
        Self: Sized;

    /// Name of the reflected entry point
    fn reflect_entry_point(&self) -> Result<&str>;

    /// Unfiltered resource list
    fn reflect_resources(&self) -> Result<&[RawResource]>;

    /// Unfiltered member list, `parent_index` pointing into `reflect_resources()`
    fn reflect_variables(&self) -> Result<&[RawVariable]>;

    /// Local workgroup size of a compute entry point
    fn reflect_compute_workgroup_size(&self) -> Result<[u32; 3]>;

    /// Output control-point count of a tessellation control entry point
    fn reflect_tess_control_point_count(&self) -> Result<u32>;
}

/// Engine-side enums and the static tables translating raw reflector enums into them
///
/// Tables are positional arrays indexed by the raw enum ordinal. Their length is
/// the raw enum's `COUNT`, so a raw value without an entry does not compile.

use bitflags::bitflags;
use crate::reflection::raw::{RawAccess, RawImageFormat, RawResourceKind, RawTextureDimension};

/// Descriptor kind used by the engine's binding layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DescriptorType {
    /// No bindable descriptor (stage inputs/outputs)
    Undefined,
    /// Standalone sampler
    Sampler,
    /// Sampled texture
    Texture,
    /// Storage (read/write) texture
    RwTexture,
    /// Storage buffer
    RwBuffer,
    /// Uniform buffer
    UniformBuffer,
    /// Push constant block
    RootConstant,
    /// Subpass input attachment
    InputAttachment,
    /// Uniform texel buffer
    TexelBuffer,
    /// Storage texel buffer
    RwTexelBuffer,
    /// Ray tracing acceleration structure
    AccelerationStructure,
    /// Combined image sampler (texture + sampler in one binding)
    CombinedImageSampler,
}

/// Texture dimension used by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureDimension {
    Undefined,
    Dim1D,
    Dim2D,
    Dim2DMS,
    Dim3D,
    DimCube,
    Dim1DArray,
    Dim2DArray,
    Dim2DMSArray,
    DimCubeArray,
}

bitflags! {
    /// How a shader may access a resource
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ResourceAccess: u32 {
        const READ = 0x01;
        const WRITE = 0x02;
        const READ_WRITE = Self::READ.bits() | Self::WRITE.bits();
    }
}

/// Canonical pixel format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum PixelFormat {
    UNDEFINED,
    // 32-bit float
    R32_SFLOAT,
    R32G32_SFLOAT,
    R32G32B32A32_SFLOAT,
    // 16-bit float
    R16_SFLOAT,
    R16G16_SFLOAT,
    R16G16B16A16_SFLOAT,
    B10G11R11_UFLOAT,
    // Normalized
    R8_UNORM,
    R8G8_UNORM,
    R8G8B8A8_UNORM,
    R16_UNORM,
    R16G16_UNORM,
    R16G16B16A16_UNORM,
    A2B10G10R10_UNORM,
    R8_SNORM,
    R8G8_SNORM,
    R8G8B8A8_SNORM,
    R16_SNORM,
    R16G16_SNORM,
    R16G16B16A16_SNORM,
    // Signed integer
    R8_SINT,
    R8G8_SINT,
    R8G8B8A8_SINT,
    R16_SINT,
    R16G16_SINT,
    R16G16B16A16_SINT,
    R32_SINT,
    R32G32_SINT,
    R32G32B32A32_SINT,
    R64_SINT,
    // Unsigned integer
    R8_UINT,
    R8G8_UINT,
    R8G8B8A8_UINT,
    R16_UINT,
    R16G16_UINT,
    R16G16B16A16_UINT,
    R32_UINT,
    R32G32_UINT,
    R32G32B32A32_UINT,
    A2B10G10R10_UINT,
    R64_UINT,
}

// ===== TRANSLATION TABLES =====

pub static DESCRIPTOR_TYPE_TABLE: [DescriptorType; RawResourceKind::COUNT] = [
    DescriptorType::Undefined,              // StageInput
    DescriptorType::Undefined,              // StageOutput
    DescriptorType::UniformBuffer,          // UniformBuffer
    DescriptorType::RwBuffer,               // StorageBuffer
    DescriptorType::Texture,                // Texture
    DescriptorType::RwTexture,              // StorageTexture
    DescriptorType::Sampler,                // Sampler
    DescriptorType::RootConstant,           // PushConstant
    DescriptorType::InputAttachment,        // SubpassInput
    DescriptorType::TexelBuffer,            // UniformTexelBuffer
    DescriptorType::RwTexelBuffer,          // StorageTexelBuffer
    DescriptorType::AccelerationStructure,  // AccelerationStructure
    DescriptorType::CombinedImageSampler,   // CombinedSampler
];

pub static TEXTURE_DIMENSION_TABLE: [TextureDimension; RawTextureDimension::COUNT] = [
    TextureDimension::Undefined,    // Undefined
    TextureDimension::Undefined,    // Buffer
    TextureDimension::Dim1D,        // Texture1D
    TextureDimension::Dim1DArray,   // Texture1DArray
    TextureDimension::Dim2D,        // Texture2D
    TextureDimension::Dim2DArray,   // Texture2DArray
    TextureDimension::Dim2DMS,      // Texture2DMS
    TextureDimension::Dim2DMSArray, // Texture2DMSArray
    TextureDimension::Dim3D,        // Texture3D
    TextureDimension::DimCube,      // TextureCube
    TextureDimension::DimCubeArray, // TextureCubeArray
];

pub static RESOURCE_ACCESS_TABLE: [ResourceAccess; RawAccess::COUNT] = [
    ResourceAccess::READ,       // ReadOnly
    ResourceAccess::WRITE,      // WriteOnly
    ResourceAccess::READ_WRITE, // ReadWrite
];

pub static PIXEL_FORMAT_TABLE: [PixelFormat; RawImageFormat::COUNT] = [
    PixelFormat::UNDEFINED,           // Unknown
    PixelFormat::R32G32B32A32_SFLOAT, // Rgba32f
    PixelFormat::R16G16B16A16_SFLOAT, // Rgba16f
    PixelFormat::R32_SFLOAT,          // R32f
    PixelFormat::R8G8B8A8_UNORM,      // Rgba8
    PixelFormat::R8G8B8A8_SNORM,      // Rgba8Snorm
    PixelFormat::R32G32_SFLOAT,       // Rg32f
    PixelFormat::R16G16_SFLOAT,       // Rg16f
    PixelFormat::B10G11R11_UFLOAT,    // R11fG11fB10f
    PixelFormat::R16_SFLOAT,          // R16f
    PixelFormat::R16G16B16A16_UNORM,  // Rgba16
    PixelFormat::A2B10G10R10_UNORM,   // Rgb10A2
    PixelFormat::R16G16_UNORM,        // Rg16
    PixelFormat::R8G8_UNORM,          // Rg8
    PixelFormat::R16_UNORM,           // R16
    PixelFormat::R8_UNORM,            // R8
    PixelFormat::R16G16B16A16_SNORM,  // Rgba16Snorm
    PixelFormat::R16G16_SNORM,        // Rg16Snorm
    PixelFormat::R8G8_SNORM,          // Rg8Snorm
    PixelFormat::R16_SNORM,           // R16Snorm
    PixelFormat::R8_SNORM,            // R8Snorm
    PixelFormat::R32G32B32A32_SINT,   // Rgba32i
    PixelFormat::R16G16B16A16_SINT,   // Rgba16i
    PixelFormat::R8G8B8A8_SINT,       // Rgba8i
    PixelFormat::R32_SINT,            // R32i
    PixelFormat::R32G32_SINT,         // Rg32i
    PixelFormat::R16G16_SINT,         // Rg16i
    PixelFormat::R8G8_SINT,           // Rg8i
    PixelFormat::R16_SINT,            // R16i
    PixelFormat::R8_SINT,             // R8i
    PixelFormat::R32G32B32A32_UINT,   // Rgba32ui
    PixelFormat::R16G16B16A16_UINT,   // Rgba16ui
    PixelFormat::R8G8B8A8_UINT,       // Rgba8ui
    PixelFormat::R32_UINT,            // R32ui
    PixelFormat::A2B10G10R10_UINT,    // Rgb10a2ui
    PixelFormat::R32G32_UINT,         // Rg32ui
    PixelFormat::R16G16_UINT,         // Rg16ui
    PixelFormat::R8G8_UINT,           // Rg8ui
    PixelFormat::R16_UINT,            // R16ui
    PixelFormat::R8_UINT,             // R8ui
    PixelFormat::R64_UINT,            // R64ui
    PixelFormat::R64_SINT,            // R64i
];

// ===== TRANSLATION FUNCTIONS =====

pub fn translate_kind(kind: RawResourceKind) -> DescriptorType {
    DESCRIPTOR_TYPE_TABLE[kind.ordinal()]
}

pub fn translate_dimension(dimension: RawTextureDimension) -> TextureDimension {
    TEXTURE_DIMENSION_TABLE[dimension.ordinal()]
}

/// Indexed by the resource's own access mode, not by its dimension
pub fn translate_access(access: RawAccess) -> ResourceAccess {
    RESOURCE_ACCESS_TABLE[access.ordinal()]
}

pub fn translate_format(format: RawImageFormat) -> PixelFormat {
    PIXEL_FORMAT_TABLE[format.ordinal()]
}

#[cfg(test)]
#[path = "translation_tests.rs"]
mod tests;

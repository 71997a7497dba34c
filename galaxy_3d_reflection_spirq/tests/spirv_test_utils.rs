//! SPIR-V assembly helpers for spirq backend tests
//!
//! Hand-assembled modules, small enough to read instruction by instruction.
//! Ids are fixed per module so tests can refer to them.

#![allow(dead_code)]

use spirq::parse::{Instruction, SpirvHeader};
use spirq::spirv::{
    AddressingModel, Capability, Decoration, Dim, ExecutionMode, ExecutionModel, ImageFormat,
    MemoryModel, Op, StorageClass,
};

// Operand shorthands
const UNIFORM_CONSTANT: u32 = StorageClass::UniformConstant as u32;
const INPUT: u32 = StorageClass::Input as u32;
const UNIFORM: u32 = StorageClass::Uniform as u32;
const OUTPUT: u32 = StorageClass::Output as u32;
const PUSH_CONSTANT: u32 = StorageClass::PushConstant as u32;
const SET: u32 = Decoration::DescriptorSet as u32;
const BINDING: u32 = Decoration::Binding as u32;
const LOCATION: u32 = Decoration::Location as u32;
const OFFSET: u32 = Decoration::Offset as u32;
const BLOCK: u32 = Decoration::Block as u32;
const LOCAL_SIZE: u32 = ExecutionMode::LocalSize as u32;
const ORIGIN_UPPER_LEFT: u32 = ExecutionMode::OriginUpperLeft as u32;
const DIM_2D: u32 = Dim::Dim2D as u32;
const DIM_BUFFER: u32 = Dim::DimBuffer as u32;
const FORMAT_UNKNOWN: u32 = ImageFormat::Unknown as u32;

pub const VERSION_1_0: u32 = 0x0001_0000;
pub const VERSION_1_4: u32 = 0x0001_0400;

// ============================================================================
// ASSEMBLER
// ============================================================================

/// Minimal SPIR-V assembler: instructions are appended in module order
pub struct SpirvBuilder {
    words: Vec<u32>,
    version: u32,
    bound: u32,
}

impl SpirvBuilder {
    /// `bound` must be greater than every id the module uses
    pub fn new(bound: u32) -> Self {
        Self::with_version(bound, VERSION_1_0)
    }

    pub fn with_version(bound: u32, version: u32) -> Self {
        Self { words: Vec::new(), version, bound }
    }

    pub fn op(&mut self, op: Op, operands: &[u32]) -> &mut Self {
        self.push(Instruction::builder(op).push_list(operands).build())
    }

    /// Instruction with a literal string between two operand lists
    pub fn op_str(&mut self, op: Op, prefix: &[u32], text: &str, suffix: &[u32]) -> &mut Self {
        self.push(
            Instruction::builder(op)
                .push_list(prefix)
                .push_str(text)
                .push_list(suffix)
                .build(),
        )
    }

    fn push(&mut self, instruction: Instruction) -> &mut Self {
        self.words.extend(instruction.into_words());
        self
    }

    /// `OpCapability Shader` + `OpMemoryModel Logical GLSL450`
    pub fn shader_preamble(&mut self) -> &mut Self {
        self.op(Op::Capability, &[Capability::Shader as u32]).op(
            Op::MemoryModel,
            &[AddressingModel::Logical as u32, MemoryModel::GLSL450 as u32],
        )
    }

    pub fn finish(&self) -> Vec<u32> {
        let header = SpirvHeader {
            bound: self.bound,
            ..SpirvHeader::new(self.version, 0)
        };
        let mut module = header.words().to_vec();
        module.extend_from_slice(&self.words);
        module
    }
}

/// Little-endian byte image of a module
pub fn to_bytes(words: &[u32]) -> Vec<u8> {
    words.iter().flat_map(|word| word.to_le_bytes()).collect()
}

// ============================================================================
// FIXTURE MODULES
// ============================================================================

/// Compute shader, local size 8x8x1:
///
/// - set 0 binding 1: anonymous uniform block `Block { vec4 color; }`, used
/// - set 0 binding 2: `unused_block` of type `Unused { float value; }`, unused
/// - set 0 binding 3: write-only `rgba8` storage image `out_image`, used
pub fn compute_module() -> Vec<u32> {
    let mut b = SpirvBuilder::new(24);
    b.shader_preamble()
        .op_str(Op::EntryPoint, &[ExecutionModel::GLCompute as u32, 1], "main", &[])
        .op(Op::ExecutionMode, &[1, LOCAL_SIZE, 8, 8, 1])
        .op_str(Op::Name, &[1], "main", &[])
        .op_str(Op::Name, &[6], "Block", &[])
        .op_str(Op::MemberName, &[6, 0], "color", &[])
        .op_str(Op::Name, &[9], "Unused", &[])
        .op_str(Op::MemberName, &[9, 0], "value", &[])
        .op_str(Op::Name, &[11], "unused_block", &[])
        .op_str(Op::Name, &[20], "out_image", &[])
        .op(Op::Decorate, &[6, BLOCK])
        .op(Op::MemberDecorate, &[6, 0, OFFSET, 0])
        .op(Op::Decorate, &[8, SET, 0])
        .op(Op::Decorate, &[8, BINDING, 1])
        .op(Op::Decorate, &[9, BLOCK])
        .op(Op::MemberDecorate, &[9, 0, OFFSET, 0])
        .op(Op::Decorate, &[11, SET, 0])
        .op(Op::Decorate, &[11, BINDING, 2])
        .op(Op::Decorate, &[20, SET, 0])
        .op(Op::Decorate, &[20, BINDING, 3])
        .op(Op::Decorate, &[20, Decoration::NonReadable as u32])
        .op(Op::TypeVoid, &[2])
        .op(Op::TypeFunction, &[3, 2])
        .op(Op::TypeFloat, &[4, 32])
        .op(Op::TypeVector, &[5, 4, 4])
        .op(Op::TypeStruct, &[6, 5])
        .op(Op::TypePointer, &[7, UNIFORM, 6])
        .op(Op::Variable, &[7, 8, UNIFORM])
        .op(Op::TypeStruct, &[9, 4])
        .op(Op::TypePointer, &[10, UNIFORM, 9])
        .op(Op::Variable, &[10, 11, UNIFORM])
        .op(Op::TypeInt, &[12, 32, 1])
        .op(Op::Constant, &[12, 13, 0])
        .op(Op::TypePointer, &[14, UNIFORM, 5])
        .op(Op::TypeImage, &[18, 4, DIM_2D, 0, 0, 0, 2, ImageFormat::Rgba8 as u32])
        .op(Op::TypePointer, &[19, UNIFORM_CONSTANT, 18])
        .op(Op::Variable, &[19, 20, UNIFORM_CONSTANT])
        .op(Op::TypeVector, &[22, 12, 2])
        .op(Op::ConstantComposite, &[22, 23, 13, 13])
        // void main()
        .op(Op::Function, &[2, 1, 0, 3])
        .op(Op::Label, &[15])
        .op(Op::AccessChain, &[14, 16, 8, 13])
        .op(Op::Load, &[5, 17, 16])
        .op(Op::Load, &[18, 21, 20])
        .op(Op::ImageWrite, &[21, 23, 17])
        .op(Op::Return, &[])
        .op(Op::FunctionEnd, &[]);
    b.finish()
}

/// Fragment shader:
///
/// - location 0 input `in_uv` (vec2), location 0 output `out_color` (vec4)
/// - set 1 binding 0: combined image sampler `albedo` (2D)
/// - push constants `push` of type `Push { vec4 tint; float strength; }`
pub fn fragment_module() -> Vec<u32> {
    let mut b = SpirvBuilder::new(40);
    b.shader_preamble()
        .op_str(Op::EntryPoint, &[ExecutionModel::Fragment as u32, 1], "main", &[10, 12])
        .op(Op::ExecutionMode, &[1, ORIGIN_UPPER_LEFT])
        .op_str(Op::Name, &[1], "main", &[])
        .op_str(Op::Name, &[10], "in_uv", &[])
        .op_str(Op::Name, &[12], "out_color", &[])
        .op_str(Op::Name, &[16], "albedo", &[])
        .op_str(Op::Name, &[17], "Push", &[])
        .op_str(Op::MemberName, &[17, 0], "tint", &[])
        .op_str(Op::MemberName, &[17, 1], "strength", &[])
        .op_str(Op::Name, &[19], "push", &[])
        .op(Op::Decorate, &[10, LOCATION, 0])
        .op(Op::Decorate, &[12, LOCATION, 0])
        .op(Op::Decorate, &[16, SET, 1])
        .op(Op::Decorate, &[16, BINDING, 0])
        .op(Op::Decorate, &[17, BLOCK])
        .op(Op::MemberDecorate, &[17, 0, OFFSET, 0])
        .op(Op::MemberDecorate, &[17, 1, OFFSET, 16])
        .op(Op::TypeVoid, &[2])
        .op(Op::TypeFunction, &[3, 2])
        .op(Op::TypeFloat, &[4, 32])
        .op(Op::TypeVector, &[5, 4, 2])
        .op(Op::TypeVector, &[6, 4, 4])
        .op(Op::TypePointer, &[9, INPUT, 5])
        .op(Op::Variable, &[9, 10, INPUT])
        .op(Op::TypePointer, &[11, OUTPUT, 6])
        .op(Op::Variable, &[11, 12, OUTPUT])
        .op(Op::TypeImage, &[13, 4, DIM_2D, 0, 0, 0, 1, FORMAT_UNKNOWN])
        .op(Op::TypeSampledImage, &[14, 13])
        .op(Op::TypePointer, &[15, UNIFORM_CONSTANT, 14])
        .op(Op::Variable, &[15, 16, UNIFORM_CONSTANT])
        .op(Op::TypeStruct, &[17, 6, 4])
        .op(Op::TypePointer, &[18, PUSH_CONSTANT, 17])
        .op(Op::Variable, &[18, 19, PUSH_CONSTANT])
        .op(Op::TypeInt, &[20, 32, 1])
        .op(Op::Constant, &[20, 21, 0])
        .op(Op::TypePointer, &[22, PUSH_CONSTANT, 6])
        // void main()
        .op(Op::Function, &[2, 1, 0, 3])
        .op(Op::Label, &[30])
        .op(Op::Load, &[5, 31, 10])
        .op(Op::Load, &[14, 32, 16])
        .op(Op::ImageSampleImplicitLod, &[6, 33, 32, 31])
        .op(Op::AccessChain, &[22, 34, 19, 21])
        .op(Op::Load, &[6, 35, 34])
        .op(Op::FMul, &[6, 36, 33, 35])
        .op(Op::Store, &[12, 36])
        .op(Op::Return, &[])
        .op(Op::FunctionEnd, &[]);
    b.finish()
}

/// Vertex shader: inputs `in_position` (vec3, location 0) and `in_uv`
/// (vec2, location 1), output `out_uv` (vec2, location 0)
pub fn vertex_module() -> Vec<u32> {
    let mut b = SpirvBuilder::new(30);
    b.shader_preamble()
        .op_str(Op::EntryPoint, &[ExecutionModel::Vertex as u32, 1], "main", &[10, 12, 14])
        .op_str(Op::Name, &[1], "main", &[])
        .op_str(Op::Name, &[10], "in_position", &[])
        .op_str(Op::Name, &[12], "in_uv", &[])
        .op_str(Op::Name, &[14], "out_uv", &[])
        .op(Op::Decorate, &[10, LOCATION, 0])
        .op(Op::Decorate, &[12, LOCATION, 1])
        .op(Op::Decorate, &[14, LOCATION, 0])
        .op(Op::TypeVoid, &[2])
        .op(Op::TypeFunction, &[3, 2])
        .op(Op::TypeFloat, &[4, 32])
        .op(Op::TypeVector, &[5, 4, 2])
        .op(Op::TypeVector, &[6, 4, 3])
        .op(Op::TypePointer, &[9, INPUT, 6])
        .op(Op::Variable, &[9, 10, INPUT])
        .op(Op::TypePointer, &[11, INPUT, 5])
        .op(Op::Variable, &[11, 12, INPUT])
        .op(Op::TypePointer, &[13, OUTPUT, 5])
        .op(Op::Variable, &[13, 14, OUTPUT])
        // void main()
        .op(Op::Function, &[2, 1, 0, 3])
        .op(Op::Label, &[20])
        .op(Op::Load, &[6, 21, 10])
        .op(Op::Load, &[5, 22, 12])
        .op(Op::Store, &[14, 22])
        .op(Op::Return, &[])
        .op(Op::FunctionEnd, &[]);
    b.finish()
}

/// Tessellation control shader producing 3 control points
pub fn tess_control_module() -> Vec<u32> {
    let mut b = SpirvBuilder::new(10);
    b.op(Op::Capability, &[Capability::Shader as u32])
        .op(Op::Capability, &[Capability::Tessellation as u32])
        .op(
            Op::MemoryModel,
            &[AddressingModel::Logical as u32, MemoryModel::GLSL450 as u32],
        )
        .op_str(Op::EntryPoint, &[ExecutionModel::TessellationControl as u32, 1], "main", &[])
        .op(Op::ExecutionMode, &[1, ExecutionMode::OutputVertices as u32, 3])
        .op(Op::TypeVoid, &[2])
        .op(Op::TypeFunction, &[3, 2])
        .op(Op::Function, &[2, 1, 0, 3])
        .op(Op::Label, &[4])
        .op(Op::Return, &[])
        .op(Op::FunctionEnd, &[]);
    b.finish()
}

/// Two compute entry points: `first` (1x1x1) then `second` (4x4x4)
pub fn two_entry_points_module() -> Vec<u32> {
    let mut b = SpirvBuilder::new(10);
    b.shader_preamble()
        .op_str(Op::EntryPoint, &[ExecutionModel::GLCompute as u32, 1], "first", &[])
        .op_str(Op::EntryPoint, &[ExecutionModel::GLCompute as u32, 4], "second", &[])
        .op(Op::ExecutionMode, &[1, LOCAL_SIZE, 1, 1, 1])
        .op(Op::ExecutionMode, &[4, LOCAL_SIZE, 4, 4, 4])
        .op(Op::TypeVoid, &[2])
        .op(Op::TypeFunction, &[3, 2])
        .op(Op::Function, &[2, 1, 0, 3])
        .op(Op::Label, &[5])
        .op(Op::Return, &[])
        .op(Op::FunctionEnd, &[])
        .op(Op::Function, &[2, 4, 0, 3])
        .op(Op::Label, &[6])
        .op(Op::Return, &[])
        .op(Op::FunctionEnd, &[]);
    b.finish()
}

/// Ray query compute shader: acceleration structure `tlas` (%7) at set 0
/// binding 0, loaded by `main`
pub fn acceleration_structure_module() -> Vec<u32> {
    let mut b = SpirvBuilder::new(12);
    b.op(Op::Capability, &[Capability::Shader as u32])
        .op(Op::Capability, &[Capability::RayQueryKHR as u32])
        .op_str(Op::Extension, &[], "SPV_KHR_ray_query", &[])
        .op(
            Op::MemoryModel,
            &[AddressingModel::Logical as u32, MemoryModel::GLSL450 as u32],
        )
        .op_str(Op::EntryPoint, &[ExecutionModel::GLCompute as u32, 1], "main", &[])
        .op(Op::ExecutionMode, &[1, LOCAL_SIZE, 1, 1, 1])
        .op_str(Op::Name, &[7], "tlas", &[])
        .op(Op::Decorate, &[7, SET, 0])
        .op(Op::Decorate, &[7, BINDING, 0])
        .op(Op::TypeVoid, &[2])
        .op(Op::TypeFunction, &[3, 2])
        .op(Op::TypeAccelerationStructureKHR, &[5])
        .op(Op::TypePointer, &[6, UNIFORM_CONSTANT, 5])
        .op(Op::Variable, &[6, 7, UNIFORM_CONSTANT])
        // void main()
        .op(Op::Function, &[2, 1, 0, 3])
        .op(Op::Label, &[8])
        .op(Op::Load, &[5, 9, 7])
        .op(Op::Return, &[])
        .op(Op::FunctionEnd, &[]);
    b.finish()
}

/// HLSL-style fragment shader: separate sampler `samp` (%11) declared before
/// 2D texture `tex` (%16), both at set 0 binding 0 and combined through
/// `OpSampledImage`; output `out_color` (%20) at location 0
pub fn separate_sampler_module() -> Vec<u32> {
    let mut b = SpirvBuilder::new(40);
    b.shader_preamble()
        .op_str(Op::EntryPoint, &[ExecutionModel::Fragment as u32, 1], "main", &[20])
        .op(Op::ExecutionMode, &[1, ORIGIN_UPPER_LEFT])
        .op_str(Op::Name, &[11], "samp", &[])
        .op_str(Op::Name, &[16], "tex", &[])
        .op_str(Op::Name, &[20], "out_color", &[])
        .op(Op::Decorate, &[11, SET, 0])
        .op(Op::Decorate, &[11, BINDING, 0])
        .op(Op::Decorate, &[16, SET, 0])
        .op(Op::Decorate, &[16, BINDING, 0])
        .op(Op::Decorate, &[20, LOCATION, 0])
        .op(Op::TypeVoid, &[2])
        .op(Op::TypeFunction, &[3, 2])
        .op(Op::TypeFloat, &[4, 32])
        .op(Op::TypeVector, &[5, 4, 4])
        .op(Op::TypeVector, &[6, 4, 2])
        .op(Op::TypeSampler, &[9])
        .op(Op::TypePointer, &[10, UNIFORM_CONSTANT, 9])
        .op(Op::Variable, &[10, 11, UNIFORM_CONSTANT])
        .op(Op::TypeImage, &[14, 4, DIM_2D, 0, 0, 0, 1, FORMAT_UNKNOWN])
        .op(Op::TypePointer, &[15, UNIFORM_CONSTANT, 14])
        .op(Op::Variable, &[15, 16, UNIFORM_CONSTANT])
        .op(Op::TypeSampledImage, &[17, 14])
        .op(Op::TypePointer, &[19, OUTPUT, 5])
        .op(Op::Variable, &[19, 20, OUTPUT])
        .op(Op::Constant, &[4, 21, 0])
        .op(Op::ConstantComposite, &[6, 22, 21, 21])
        // void main()
        .op(Op::Function, &[2, 1, 0, 3])
        .op(Op::Label, &[30])
        .op(Op::Load, &[14, 31, 16])
        .op(Op::Load, &[9, 32, 11])
        .op(Op::SampledImage, &[17, 33, 31, 32])
        .op(Op::ImageSampleImplicitLod, &[5, 34, 33, 22])
        .op(Op::Store, &[20, 34])
        .op(Op::Return, &[])
        .op(Op::FunctionEnd, &[]);
    b.finish()
}

/// Fragment shader loading one descriptor of each remaining kind, set 0:
///
/// - binding 0: sampler `samp` (%11)
/// - binding 1: uniform texel buffer `texels` (%14)
/// - binding 2: `r32f` storage texel buffer `rw_texels` (%17)
/// - binding 3: subpass input `gbuffer` (%20), input attachment 0
pub fn descriptor_kinds_module() -> Vec<u32> {
    let mut b = SpirvBuilder::new(40);
    b.op(Op::Capability, &[Capability::Shader as u32])
        .op(Op::Capability, &[Capability::SampledBuffer as u32])
        .op(Op::Capability, &[Capability::ImageBuffer as u32])
        .op(Op::Capability, &[Capability::InputAttachment as u32])
        .op(
            Op::MemoryModel,
            &[AddressingModel::Logical as u32, MemoryModel::GLSL450 as u32],
        )
        .op_str(Op::EntryPoint, &[ExecutionModel::Fragment as u32, 1], "main", &[])
        .op(Op::ExecutionMode, &[1, ORIGIN_UPPER_LEFT])
        .op_str(Op::Name, &[11], "samp", &[])
        .op_str(Op::Name, &[14], "texels", &[])
        .op_str(Op::Name, &[17], "rw_texels", &[])
        .op_str(Op::Name, &[20], "gbuffer", &[])
        .op(Op::Decorate, &[11, SET, 0])
        .op(Op::Decorate, &[11, BINDING, 0])
        .op(Op::Decorate, &[14, SET, 0])
        .op(Op::Decorate, &[14, BINDING, 1])
        .op(Op::Decorate, &[17, SET, 0])
        .op(Op::Decorate, &[17, BINDING, 2])
        .op(Op::Decorate, &[20, SET, 0])
        .op(Op::Decorate, &[20, BINDING, 3])
        .op(Op::Decorate, &[20, Decoration::InputAttachmentIndex as u32, 0])
        .op(Op::TypeVoid, &[2])
        .op(Op::TypeFunction, &[3, 2])
        .op(Op::TypeFloat, &[4, 32])
        .op(Op::TypeSampler, &[9])
        .op(Op::TypePointer, &[10, UNIFORM_CONSTANT, 9])
        .op(Op::Variable, &[10, 11, UNIFORM_CONSTANT])
        .op(Op::TypeImage, &[12, 4, DIM_BUFFER, 0, 0, 0, 1, FORMAT_UNKNOWN])
        .op(Op::TypePointer, &[13, UNIFORM_CONSTANT, 12])
        .op(Op::Variable, &[13, 14, UNIFORM_CONSTANT])
        .op(Op::TypeImage, &[15, 4, DIM_BUFFER, 0, 0, 0, 2, ImageFormat::R32f as u32])
        .op(Op::TypePointer, &[16, UNIFORM_CONSTANT, 15])
        .op(Op::Variable, &[16, 17, UNIFORM_CONSTANT])
        .op(Op::TypeImage, &[18, 4, Dim::DimSubpassData as u32, 0, 0, 0, 2, FORMAT_UNKNOWN])
        .op(Op::TypePointer, &[19, UNIFORM_CONSTANT, 18])
        .op(Op::Variable, &[19, 20, UNIFORM_CONSTANT])
        // void main()
        .op(Op::Function, &[2, 1, 0, 3])
        .op(Op::Label, &[30])
        .op(Op::Load, &[9, 31, 11])
        .op(Op::Load, &[12, 32, 14])
        .op(Op::Load, &[15, 33, 17])
        .op(Op::Load, &[18, 34, 20])
        .op(Op::Return, &[])
        .op(Op::FunctionEnd, &[]);
    b.finish()
}

/// SPIR-V 1.4 module with two compute entry points, each listing its own
/// push-constant block in its interface:
///
/// - `first` (%1) reads `push_a` (%20) of type `PushA { float scale; }`
/// - `second` (%2) reads `push_b` (%23) of type `PushB { float offset; int count; }`
pub fn per_entry_push_constants_module() -> Vec<u32> {
    let mut b = SpirvBuilder::with_version(40, VERSION_1_4);
    b.shader_preamble()
        .op_str(Op::EntryPoint, &[ExecutionModel::GLCompute as u32, 1], "first", &[20])
        .op_str(Op::EntryPoint, &[ExecutionModel::GLCompute as u32, 2], "second", &[23])
        .op(Op::ExecutionMode, &[1, LOCAL_SIZE, 1, 1, 1])
        .op(Op::ExecutionMode, &[2, LOCAL_SIZE, 1, 1, 1])
        .op_str(Op::Name, &[10], "PushA", &[])
        .op_str(Op::MemberName, &[10, 0], "scale", &[])
        .op_str(Op::Name, &[11], "PushB", &[])
        .op_str(Op::MemberName, &[11, 0], "offset", &[])
        .op_str(Op::MemberName, &[11, 1], "count", &[])
        .op_str(Op::Name, &[20], "push_a", &[])
        .op_str(Op::Name, &[23], "push_b", &[])
        .op(Op::Decorate, &[10, BLOCK])
        .op(Op::MemberDecorate, &[10, 0, OFFSET, 0])
        .op(Op::Decorate, &[11, BLOCK])
        .op(Op::MemberDecorate, &[11, 0, OFFSET, 0])
        .op(Op::MemberDecorate, &[11, 1, OFFSET, 4])
        .op(Op::TypeVoid, &[3])
        .op(Op::TypeFunction, &[4, 3])
        .op(Op::TypeFloat, &[5, 32])
        .op(Op::TypeInt, &[6, 32, 1])
        .op(Op::Constant, &[6, 7, 0])
        .op(Op::TypeStruct, &[10, 5])
        .op(Op::TypeStruct, &[11, 5, 6])
        .op(Op::TypePointer, &[19, PUSH_CONSTANT, 10])
        .op(Op::Variable, &[19, 20, PUSH_CONSTANT])
        .op(Op::TypePointer, &[22, PUSH_CONSTANT, 11])
        .op(Op::Variable, &[22, 23, PUSH_CONSTANT])
        .op(Op::TypePointer, &[24, PUSH_CONSTANT, 5])
        // void first()
        .op(Op::Function, &[3, 1, 0, 4])
        .op(Op::Label, &[30])
        .op(Op::AccessChain, &[24, 31, 20, 7])
        .op(Op::Load, &[5, 32, 31])
        .op(Op::Return, &[])
        .op(Op::FunctionEnd, &[])
        // void second()
        .op(Op::Function, &[3, 2, 0, 4])
        .op(Op::Label, &[33])
        .op(Op::AccessChain, &[24, 34, 23, 7])
        .op(Op::Load, &[5, 35, 34])
        .op(Op::Return, &[])
        .op(Op::FunctionEnd, &[]);
    b.finish()
}

/// Compute module the id scanner accepts but spirq rejects: it declares the
/// `Physical32` addressing model
pub fn physical_addressing_module() -> Vec<u32> {
    let mut b = SpirvBuilder::new(10);
    b.op(Op::Capability, &[Capability::Shader as u32])
        .op(Op::Capability, &[Capability::Addresses as u32])
        .op(
            Op::MemoryModel,
            &[AddressingModel::Physical32 as u32, MemoryModel::GLSL450 as u32],
        )
        .op_str(Op::EntryPoint, &[ExecutionModel::GLCompute as u32, 1], "main", &[])
        .op(Op::ExecutionMode, &[1, LOCAL_SIZE, 1, 1, 1])
        .op(Op::TypeVoid, &[2])
        .op(Op::TypeFunction, &[3, 2])
        .op(Op::Function, &[2, 1, 0, 3])
        .op(Op::Label, &[4])
        .op(Op::Return, &[])
        .op(Op::FunctionEnd, &[]);
    b.finish()
}

/// spirq-backed raw reflector
///
/// spirq provides everything it can resolve: descriptor types and access,
/// image dimensions and formats, binding counts, struct layouts and execution
/// modes. `SpirvModule` adds the result ids and the declaration order.
///
/// Everything is reflected once in `create`; the `reflect_*` calls only hand
/// out borrowed views.

use galaxy_3d_reflection::galaxy3d::reflection::{
    RawAccess, RawImageFormat, RawReflector, RawResource, RawResourceKind, RawTextureDimension,
    RawType, RawVariable,
};
use galaxy_3d_reflection::galaxy3d::Result;
use galaxy_3d_reflection::{engine_bail, engine_debug, engine_warn};
use rustc_hash::FxHashSet;
use spirq::constant::ConstantValue;
use spirq::entry_point::EntryPoint;
use spirq::spirv::{Dim, ExecutionMode, StorageClass};
use spirq::ty::{AccessType, DescriptorType, Type};
use spirq::var::Variable;

use crate::spirv_module::{SpirvEntryPoint, SpirvModule, SpirvVariable, TypeCategory};

const SOURCE: &str = "galaxy3d::spirq";

// ===== CONFIGURATION =====

/// Options for `SpirqReflector::with_config`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpirqReflectorConfig {
    /// Merge separate image and sampler bindings that share a slot into one
    /// combined image sampler (HLSL-style shaders)
    pub combine_image_samplers: bool,
    /// Entry point to reflect, the first one declared when `None`
    pub entry_point: Option<String>,
}

// ===== INTERFACE KEYS =====

/// Identity of a spirq variable across the two reflection runs
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum InterfaceKey {
    Descriptor { set: u32, binding: u32 },
    Input { location: u32, component: u32 },
    Output { location: u32, component: u32 },
    /// Blocks of different entry points differ by type
    PushConstant(Type),
}

fn interface_key(var: &Variable) -> Option<InterfaceKey> {
    match var {
        Variable::Descriptor { desc_bind, .. } => Some(InterfaceKey::Descriptor {
            set: desc_bind.set(),
            binding: desc_bind.bind(),
        }),
        Variable::Input { location, .. } => Some(InterfaceKey::Input {
            location: location.loc(),
            component: location.comp(),
        }),
        Variable::Output { location, .. } => Some(InterfaceKey::Output {
            location: location.loc(),
            component: location.comp(),
        }),
        Variable::PushConstant { ty, .. } => Some(InterfaceKey::PushConstant(ty.clone())),
        Variable::SpecConstant { .. } => None,
    }
}

// ===== SPIRQ TYPE MAPPING =====

fn descriptor_kind(desc_ty: &DescriptorType) -> RawResourceKind {
    match desc_ty {
        DescriptorType::UniformBuffer() => RawResourceKind::UniformBuffer,
        DescriptorType::StorageBuffer(_) => RawResourceKind::StorageBuffer,
        DescriptorType::SampledImage() => RawResourceKind::Texture,
        DescriptorType::StorageImage(_) => RawResourceKind::StorageTexture,
        DescriptorType::Sampler() => RawResourceKind::Sampler,
        DescriptorType::CombinedImageSampler() => RawResourceKind::CombinedSampler,
        DescriptorType::InputAttachment(_) => RawResourceKind::SubpassInput,
        DescriptorType::UniformTexelBuffer() => RawResourceKind::UniformTexelBuffer,
        DescriptorType::StorageTexelBuffer(_) => RawResourceKind::StorageTexelBuffer,
        DescriptorType::AccelStruct() => RawResourceKind::AccelerationStructure,
    }
}

fn raw_access(access: AccessType) -> RawAccess {
    match access {
        AccessType::ReadOnly => RawAccess::ReadOnly,
        AccessType::WriteOnly => RawAccess::WriteOnly,
        AccessType::ReadWrite => RawAccess::ReadWrite,
    }
}

/// Storage descriptors carry their access; blocks fold their members'
fn descriptor_access(desc_ty: &DescriptorType, ty: &Type) -> RawAccess {
    match desc_ty {
        DescriptorType::StorageImage(access)
        | DescriptorType::StorageBuffer(access)
        | DescriptorType::StorageTexelBuffer(access) => raw_access(*access),
        _ => ty.access_ty().map_or(RawAccess::ReadWrite, raw_access),
    }
}

/// Image shape, `Rect` images read as 2D
fn raw_dimension(dim: Dim, is_array: bool, is_multisampled: bool) -> RawTextureDimension {
    match (dim, is_array, is_multisampled) {
        (Dim::Dim1D, false, _) => RawTextureDimension::Texture1D,
        (Dim::Dim1D, true, _) => RawTextureDimension::Texture1DArray,
        (Dim::Dim2D | Dim::DimRect, false, false) => RawTextureDimension::Texture2D,
        (Dim::Dim2D | Dim::DimRect, true, false) => RawTextureDimension::Texture2DArray,
        (Dim::Dim2D | Dim::DimRect, false, true) => RawTextureDimension::Texture2DMS,
        (Dim::Dim2D | Dim::DimRect, true, true) => RawTextureDimension::Texture2DMSArray,
        (Dim::Dim3D, _, _) => RawTextureDimension::Texture3D,
        (Dim::DimCube, false, _) => RawTextureDimension::TextureCube,
        (Dim::DimCube, true, _) => RawTextureDimension::TextureCubeArray,
        (Dim::DimBuffer, _, _) => RawTextureDimension::Buffer,
        _ => RawTextureDimension::Undefined,
    }
}

/// Dimension and texel format of an image-like descriptor type
fn image_shape(ty: &Type) -> (RawTextureDimension, RawImageFormat) {
    match ty {
        Type::SampledImage(image) => (
            raw_dimension(image.dim, image.is_array, image.is_multisampled),
            RawImageFormat::Unknown,
        ),
        Type::CombinedImageSampler(combined) => {
            let image = &combined.sampled_image_ty;
            (
                raw_dimension(image.dim, image.is_array, image.is_multisampled),
                RawImageFormat::Unknown,
            )
        }
        Type::StorageImage(image) => (
            raw_dimension(image.dim, image.is_array, image.is_multisampled),
            RawImageFormat::from_spirv(image.fmt as u32).unwrap_or_default(),
        ),
        _ => (RawTextureDimension::Undefined, RawImageFormat::Unknown),
    }
}

fn type_category(ty: &Type) -> TypeCategory {
    match strip_arrays(ty) {
        Type::Image(_)
        | Type::SampledImage(_)
        | Type::StorageImage(_)
        | Type::CombinedImageSampler(_)
        | Type::SubpassData(_) => TypeCategory::Image,
        Type::Sampler(_) => TypeCategory::Sampler,
        Type::AccelStruct(_) => TypeCategory::AccelerationStructure,
        Type::Struct(_) => TypeCategory::Struct,
        _ => TypeCategory::Other,
    }
}

fn strip_arrays(ty: &Type) -> &Type {
    match ty {
        Type::Array(array) => strip_arrays(&array.element_ty),
        other => other,
    }
}

fn struct_name(ty: &Type) -> Option<&str> {
    match strip_arrays(ty) {
        Type::Struct(block) => block.name(),
        _ => None,
    }
}

fn nbyte(ty: &Type) -> u32 {
    ty.nbyte().map(|size| size as u32).unwrap_or(0)
}

// ===== EXECUTION MODES =====

fn constant_u32(value: &ConstantValue) -> u32 {
    match value {
        ConstantValue::U32(x) => *x,
        ConstantValue::S32(x) => u32::try_from(*x).unwrap_or(0),
        _ => 0,
    }
}

fn exec_mode_operands(entry: &EntryPoint, mode: ExecutionMode) -> Option<Vec<u32>> {
    entry
        .exec_modes
        .iter()
        .find(|exec_mode| exec_mode.exec_mode == mode)
        .map(|exec_mode| exec_mode.operands.iter().map(|c| constant_u32(&c.value)).collect())
}

/// `LocalSize`, else `LocalSizeId`, else zeros
fn workgroup_size(entry: &EntryPoint) -> [u32; 3] {
    let operands = exec_mode_operands(entry, ExecutionMode::LocalSize)
        .or_else(|| exec_mode_operands(entry, ExecutionMode::LocalSizeId));
    match operands.as_deref() {
        Some([x, y, z, ..]) => [*x, *y, *z],
        _ => [0; 3],
    }
}

fn control_points(entry: &EntryPoint) -> u32 {
    exec_mode_operands(entry, ExecutionMode::OutputVertices)
        .and_then(|operands| operands.first().copied())
        .unwrap_or(0)
}

// ===== SPIRQ REFLECTOR =====

/// Raw reflector over a SPIR-V module, built on spirq
#[derive(Debug, Clone)]
pub struct SpirqReflector {
    entry_point: String,
    resources: Vec<RawResource>,
    variables: Vec<RawVariable>,
    workgroup_size: [u32; 3],
    control_points: u32,
}

impl SpirqReflector {
    /// Reflect `code` with explicit options
    ///
    /// # Errors
    ///
    /// `ReflectorError` when the module cannot be scanned or reflected, has no
    /// entry point, or lacks the requested entry point.
    pub fn with_config(code: &[u32], config: &SpirqReflectorConfig) -> Result<Self> {
        let module = SpirvModule::parse(code)?;

        let name = match &config.entry_point {
            Some(name) => name.clone(),
            None => match module.entry_points().first() {
                Some(first) => first.name.clone(),
                None => engine_bail!(SOURCE, "SPIR-V module declares no entry point"),
            },
        };
        let module_entry = match module.entry_point(&name) {
            Some(module_entry) => module_entry,
            None => engine_bail!(SOURCE, "Entry point '{}' not found", name),
        };
        if config.entry_point.is_none() && module.entry_points().len() > 1 {
            engine_warn!(
                SOURCE,
                "Module declares {} entry points, reflecting '{}'",
                module.entry_points().len(),
                name
            );
        }

        // Every declared resource, then only those the entry point references
        let reflect = |ref_all_rscs: bool| {
            spirq::ReflectConfig::new()
                .spv(code)
                .ref_all_rscs(ref_all_rscs)
                .combine_img_samplers(config.combine_image_samplers)
                .reflect()
        };
        let (all, used) = match reflect(true).and_then(|all| reflect(false).map(|used| (all, used))) {
            Ok(pair) => pair,
            Err(e) => engine_bail!(SOURCE, "SPIR-V reflection failed: {}", e),
        };

        let entry = match all.iter().find(|candidate| candidate.name == name) {
            Some(entry) => entry,
            None => engine_bail!(SOURCE, "Entry point '{}' missing from spirq reflection", name),
        };

        let used_keys: FxHashSet<InterfaceKey> = used
            .iter()
            .find(|candidate| candidate.name == name)
            .map(|candidate| candidate.vars.iter().filter_map(interface_key).collect())
            .unwrap_or_default();

        let mut builder = ResourceBuilder {
            module: &module,
            entry: module_entry,
            claimed: FxHashSet::default(),
            resources: Vec::new(),
            variables: Vec::new(),
        };

        // Declaration order keeps the output independent of spirq's ordering
        let mut vars: Vec<(usize, Option<&SpirvVariable>, &Variable)> = entry
            .vars
            .iter()
            .map(|var| {
                let found = builder.find_variable(var);
                let index = found
                    .and_then(|found| module.variable_index(found.id))
                    .unwrap_or(usize::MAX);
                (index, found, var)
            })
            .collect();
        vars.sort_by_key(|(index, _, _)| *index);

        for (_, found, var) in vars {
            let is_used = interface_key(var).map_or(false, |key| used_keys.contains(&key));
            builder.add(var, found, is_used);
        }

        let reflector = SpirqReflector {
            entry_point: name,
            workgroup_size: workgroup_size(entry),
            control_points: control_points(entry),
            resources: builder.resources,
            variables: builder.variables,
        };

        engine_debug!(
            SOURCE,
            "Reflected entry point '{}': {} raw resources, {} raw variables",
            reflector.entry_point,
            reflector.resources.len(),
            reflector.variables.len()
        );

        Ok(reflector)
    }
}

impl RawReflector for SpirqReflector {
    fn create(code: &[u32]) -> Result<Self> {
        Self::with_config(code, &SpirqReflectorConfig::default())
    }

    fn reflect_entry_point(&self) -> Result<&str> {
        Ok(&self.entry_point)
    }

    fn reflect_resources(&self) -> Result<&[RawResource]> {
        Ok(&self.resources)
    }

    fn reflect_variables(&self) -> Result<&[RawVariable]> {
        Ok(&self.variables)
    }

    fn reflect_compute_workgroup_size(&self) -> Result<[u32; 3]> {
        Ok(self.workgroup_size)
    }

    fn reflect_tess_control_point_count(&self) -> Result<u32> {
        Ok(self.control_points)
    }
}

// ===== RESOURCE BUILDER =====

struct ResourceBuilder<'a> {
    module: &'a SpirvModule,
    entry: &'a SpirvEntryPoint,
    /// Variable ids already turned into resources
    claimed: FxHashSet<u32>,
    resources: Vec<RawResource>,
    variables: Vec<RawVariable>,
}

/// What spirq resolved for one resource
struct Resolved<'v> {
    name: Option<&'v str>,
    kind: RawResourceKind,
    dimension: RawTextureDimension,
    format: RawImageFormat,
    access: RawAccess,
    set: u32,
    binding: u32,
    size: u32,
}

impl<'a> ResourceBuilder<'a> {
    fn find_variable(&self, var: &Variable) -> Option<&'a SpirvVariable> {
        let module = self.module;
        match var {
            Variable::Descriptor { desc_bind, ty, .. } => {
                module.descriptor_variable(desc_bind.set(), desc_bind.bind(), type_category(ty))
            }
            Variable::Input { name, location, .. } => module.interface_variable(
                self.entry,
                StorageClass::Input,
                location.loc(),
                location.comp(),
                name.as_deref(),
            ),
            Variable::Output { name, location, .. } => module.interface_variable(
                self.entry,
                StorageClass::Output,
                location.loc(),
                location.comp(),
                name.as_deref(),
            ),
            Variable::PushConstant { name, ty } => {
                module.push_constant_variable(self.entry, name.as_deref(), struct_name(ty))
            }
            Variable::SpecConstant { .. } => None,
        }
    }

    fn add(&mut self, var: &Variable, found: Option<&SpirvVariable>, is_used: bool) {
        if let Some(found) = found {
            if !self.claimed.insert(found.id) {
                engine_debug!(SOURCE, "Variable %{} already reflected, skipping {:?}", found.id, var.name());
                return;
            }
        }

        match var {
            Variable::Descriptor { name, desc_bind, desc_ty, ty, nbind } => {
                let kind = descriptor_kind(desc_ty);
                let (dimension, format) = image_shape(ty);
                let resolved = Resolved {
                    name: name.as_deref().or_else(|| struct_name(ty)),
                    kind,
                    dimension,
                    format,
                    access: descriptor_access(desc_ty, ty),
                    set: desc_bind.set(),
                    binding: desc_bind.bind(),
                    size: *nbind,
                };
                let index = self.push_resource(resolved, found, is_used);
                if matches!(kind, RawResourceKind::UniformBuffer | RawResourceKind::StorageBuffer) {
                    self.push_members(index, ty);
                }
            }
            Variable::PushConstant { name, ty } => {
                let resolved = Resolved {
                    name: name.as_deref().or_else(|| struct_name(ty)),
                    kind: RawResourceKind::PushConstant,
                    dimension: RawTextureDimension::Undefined,
                    format: RawImageFormat::Unknown,
                    access: ty.access_ty().map_or(RawAccess::ReadWrite, raw_access),
                    set: 0,
                    binding: 0,
                    size: nbyte(ty),
                };
                let index = self.push_resource(resolved, found, is_used);
                self.push_members(index, ty);
            }
            Variable::Input { name, location, ty } | Variable::Output { name, location, ty } => {
                // Other entry points' interfaces do not resolve
                if found.is_none() {
                    return;
                }
                let kind = if matches!(var, Variable::Input { .. }) {
                    RawResourceKind::StageInput
                } else {
                    RawResourceKind::StageOutput
                };
                let resolved = Resolved {
                    name: name.as_deref(),
                    kind,
                    dimension: RawTextureDimension::Undefined,
                    format: RawImageFormat::Unknown,
                    access: RawAccess::ReadWrite,
                    set: 0,
                    binding: location.loc(),
                    size: nbyte(strip_arrays(ty)),
                };
                self.push_resource(resolved, found, is_used);
            }
            // Specialization constants are not bindable
            Variable::SpecConstant { .. } => {}
        }
    }

    fn push_resource(&mut self, resolved: Resolved<'_>, found: Option<&SpirvVariable>, is_used: bool) -> usize {
        let module = self.module;
        let (id, type_id) = found.map_or((0, 0), |found| {
            (found.id, module.pointee_type_id(found.pointer_type_id))
        });
        let base_type_id = module.base_type_id(type_id);

        self.resources.push(RawResource {
            name: resolved.name.unwrap_or_default().to_string(),
            ty: RawType { id, type_id, base_type_id },
            kind: resolved.kind,
            dimension: resolved.dimension,
            access: resolved.access,
            format: resolved.format,
            set: resolved.set,
            binding: resolved.binding,
            size: resolved.size,
            is_used,
        });
        self.resources.len() - 1
    }

    /// Record the members of a block resource; members inherit the block's usage
    fn push_members(&mut self, parent_index: usize, ty: &Type) {
        let module = self.module;
        let parent = &self.resources[parent_index];
        let parent_ty = parent.ty;
        let is_used = parent.is_used;
        let member_types = module.struct_members(parent_ty.base_type_id);

        if let Type::Struct(block) = strip_arrays(ty) {
            for (i, member) in block.members.iter().enumerate() {
                self.variables.push(RawVariable {
                    name: member.name.clone().unwrap_or_default(),
                    type_id: member_types.get(i).copied().unwrap_or(0),
                    parent_ty,
                    parent_index,
                    is_used,
                    offset: member.offset.unwrap_or(0) as u32,
                    size: nbyte(&member.ty),
                });
            }
        }
    }
}

#[cfg(test)]
#[path = "spirq_reflector_tests.rs"]
mod tests;

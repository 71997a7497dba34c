/// Compacted, self-contained reflection of one shader
///
/// A `ShaderReflection` owns a single name pool. Every record refers to its
/// name through a `NameRef` (offset + length into the pool), so the whole
/// structure holds exactly four allocations regardless of how many names it
/// contains, and never points back into the raw reflector.

use crate::reflection::shader_stage::{ShaderStage, ShaderStageFlags};
use crate::reflection::translation::{DescriptorType, PixelFormat, ResourceAccess, TextureDimension};

/// Reference to a name stored in the reflection's name pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NameRef {
    /// Byte offset of the first character
    pub offset: u32,
    /// Length in bytes, terminator excluded
    pub len: u32,
}

impl NameRef {
    pub fn range(&self) -> std::ops::Range<usize> {
        let start = self.offset as usize;
        start..start + self.len as usize
    }
}

/// Vertex stage input attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompactedVertexInput {
    pub name: NameRef,
    /// Element size in bytes
    pub size: u32,
}

/// Bindable resource that survived filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompactedResource {
    pub descriptor_type: DescriptorType,
    /// Descriptor set
    pub set: u32,
    /// Binding register
    pub reg: u32,
    /// Descriptor count (block size for root constants)
    pub size: u32,
    /// Stages using this resource (a single stage until reflections are merged)
    pub used_stages: ShaderStageFlags,
    pub dimension: TextureDimension,
    pub access: ResourceAccess,
    pub format: PixelFormat,
    pub name: NameRef,
}

/// Member of an aggregate resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompactedVariable {
    /// Byte offset inside the parent block
    pub offset: u32,
    /// Byte size
    pub size: u32,
    /// Index into `ShaderReflection::resources()`
    pub parent_index: usize,
    pub name: NameRef,
}

/// Immutable reflection record handed to the descriptor layout builder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderReflection {
    pub(crate) stage: ShaderStage,
    pub(crate) name_pool: Box<[u8]>,
    pub(crate) entry_point: NameRef,
    pub(crate) vertex_inputs: Box<[CompactedVertexInput]>,
    pub(crate) resources: Box<[CompactedResource]>,
    pub(crate) variables: Box<[CompactedVariable]>,
    pub(crate) num_threads_per_group: [u32; 3],
    pub(crate) num_control_points: u32,
}

impl ShaderReflection {
    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    /// Resolve a name reference against this reflection's pool
    ///
    /// Names are copied from `&str` values, so a reference produced by this
    /// reflection always resolves; a foreign reference yields an empty string.
    pub fn name(&self, name: NameRef) -> &str {
        self.name_pool
            .get(name.range())
            .and_then(|bytes| std::str::from_utf8(bytes).ok())
            .unwrap_or("")
    }

    pub fn entry_point(&self) -> &str {
        self.name(self.entry_point)
    }

    /// Raw name pool, every name followed by a NUL byte
    pub fn name_pool(&self) -> &[u8] {
        &self.name_pool
    }

    pub fn name_pool_size(&self) -> usize {
        self.name_pool.len()
    }

    pub fn vertex_inputs(&self) -> &[CompactedVertexInput] {
        &self.vertex_inputs
    }

    pub fn resources(&self) -> &[CompactedResource] {
        &self.resources
    }

    pub fn variables(&self) -> &[CompactedVariable] {
        &self.variables
    }

    /// Local workgroup size (compute only, zero otherwise)
    pub fn num_threads_per_group(&self) -> [u32; 3] {
        self.num_threads_per_group
    }

    /// Output control-point count (tessellation control only, zero otherwise)
    pub fn num_control_points(&self) -> u32 {
        self.num_control_points
    }

    /// Find a resource by name, returning its index and record
    pub fn find_resource(&self, name: &str) -> Option<(usize, &CompactedResource)> {
        self.resources
            .iter()
            .enumerate()
            .find(|(_, resource)| self.name(resource.name) == name)
    }

    /// Members of the resource at `resource_index`
    pub fn variables_of(&self, resource_index: usize) -> impl Iterator<Item = &CompactedVariable> + '_ {
        self.variables
            .iter()
            .filter(move |variable| variable.parent_index == resource_index)
    }
}

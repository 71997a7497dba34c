/// Reflection compactor
///
/// Turns the unfiltered output of a raw reflector into a `ShaderReflection`
/// in two passes over the raw lists:
///
/// 1. a read-only pass computing the exact name pool size and record counts,
/// 2. an allocating pass filling the pool and the three record arrays.
///
/// Both passes go through the same retention predicates and visit resources
/// in the same order, so the sizes computed by pass 1 are exactly what pass 2
/// writes. Any disagreement is reported as `Error::InvariantViolation`.

use crate::error::{Error, Result};
use crate::reflection::raw::{RawReflector, RawResource, RawResourceKind, RawVariable};
use crate::reflection::shader_reflection::{
    CompactedResource, CompactedVariable, CompactedVertexInput, NameRef, ShaderReflection,
};
use crate::reflection::shader_stage::{ShaderDesc, ShaderStage, ShaderStageFlags};
use crate::reflection::translation::{
    translate_access, translate_dimension, translate_format, translate_kind,
};
use crate::{engine_debug, engine_error, engine_trace};

const SOURCE: &str = "galaxy3d::reflection";

// ===== RETENTION PREDICATES =====

/// Why a raw resource does not make it into the reflection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// Never referenced by the entry point
    Unused,
    /// Stage outputs are never bound
    StageOutput,
    /// Only vertex stage inputs are addressable
    NonVertexStageInput,
}

/// Filtering predicate shared by both passes
pub fn resource_drop_reason(resource: &RawResource, stage: ShaderStage) -> Option<DropReason> {
    if !resource.is_used {
        return Some(DropReason::Unused);
    }
    match resource.kind {
        RawResourceKind::StageOutput => Some(DropReason::StageOutput),
        RawResourceKind::StageInput if stage != ShaderStage::Vertex => {
            Some(DropReason::NonVertexStageInput)
        }
        _ => None,
    }
}

fn is_retained(resource: &RawResource, stage: ShaderStage) -> bool {
    resource_drop_reason(resource, stage).is_none()
}

fn is_vertex_input(resource: &RawResource) -> bool {
    resource.kind == RawResourceKind::StageInput
}

/// A variable survives when used and its parent is a retained general resource.
/// Stage inputs never enter the remap table, so their members are dropped too.
fn is_variable_retained(
    variable: &RawVariable,
    resources: &[RawResource],
    stage: ShaderStage,
) -> bool {
    if !variable.is_used {
        return false;
    }
    match resources.get(variable.parent_index) {
        Some(parent) => is_retained(parent, stage) && !is_vertex_input(parent),
        None => false,
    }
}

// ===== PASS 1: SIZE ACCOUNTING =====

/// Exact sizes needed by the compaction pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompactionSizes {
    /// Name pool bytes, one terminator per name included
    pub name_pool_size: usize,
    pub vertex_input_count: usize,
    pub resource_count: usize,
    pub variable_count: usize,
}

/// Pass 1: walk the raw lists without allocating
pub fn measure(
    stage: ShaderStage,
    entry_point: &str,
    resources: &[RawResource],
    variables: &[RawVariable],
) -> CompactionSizes {
    let mut sizes = CompactionSizes {
        name_pool_size: entry_point.len() + 1,
        ..Default::default()
    };

    for resource in resources.iter().filter(|r| is_retained(r, stage)) {
        sizes.name_pool_size += resource.name.len() + 1;
        if is_vertex_input(resource) {
            sizes.vertex_input_count += 1;
        } else {
            sizes.resource_count += 1;
        }
    }

    for variable in variables
        .iter()
        .filter(|v| is_variable_retained(v, resources, stage))
    {
        sizes.name_pool_size += variable.name.len() + 1;
        sizes.variable_count += 1;
    }

    sizes
}

// ===== PASS 2: COMPACTION =====

/// Append-only writer over a pool allocated to its final size
struct NamePoolWriter {
    bytes: Vec<u8>,
}

impl NamePoolWriter {
    fn with_size(size: usize) -> Self {
        Self { bytes: Vec::with_capacity(size) }
    }

    fn push(&mut self, name: &str) -> NameRef {
        let name_ref = NameRef {
            offset: self.bytes.len() as u32,
            len: name.len() as u32,
        };
        self.bytes.extend_from_slice(name.as_bytes());
        self.bytes.push(0);
        name_ref
    }
}

fn invariant_violation(message: String) -> Error {
    engine_error!(SOURCE, "{}", message);
    Error::InvariantViolation(message)
}

/// Compact the output of an existing raw reflector
///
/// # Errors
///
/// - Any error returned by the reflector is propagated unchanged
/// - `Error::InvalidInput` if the names do not fit a 32-bit addressed pool
/// - `Error::InvariantViolation` if pass 2 disagrees with pass 1
pub fn compact_reflection<R: RawReflector + ?Sized>(
    stage: ShaderStage,
    reflector: &R,
) -> Result<ShaderReflection> {
    let entry_point = reflector.reflect_entry_point()?;
    let resources = reflector.reflect_resources()?;
    let variables = reflector.reflect_variables()?;

    let sizes = measure(stage, entry_point, resources, variables);
    if sizes.name_pool_size > u32::MAX as usize {
        return Err(Error::InvalidInput(format!(
            "Name pool of {} bytes exceeds the 32-bit addressable range",
            sizes.name_pool_size
        )));
    }

    let mut pool = NamePoolWriter::with_size(sizes.name_pool_size);
    let entry_point_ref = pool.push(entry_point);

    // Vertex inputs
    let mut vertex_inputs = Vec::with_capacity(sizes.vertex_input_count);
    if stage == ShaderStage::Vertex {
        for resource in resources
            .iter()
            .filter(|r| is_vertex_input(r) && is_retained(r, stage))
        {
            vertex_inputs.push(CompactedVertexInput {
                name: pool.push(&resource.name),
                size: resource.size,
            });
        }
    }

    // General resources, recording where each raw index landed
    let used_stages = ShaderStageFlags::from_stage(stage);
    let mut remap: Vec<Option<usize>> = vec![None; resources.len()];
    let mut compacted = Vec::with_capacity(sizes.resource_count);
    for (raw_index, resource) in resources.iter().enumerate() {
        if is_vertex_input(resource) {
            if let Some(reason) = resource_drop_reason(resource, stage) {
                engine_trace!(SOURCE, "Dropped stage input '{}': {:?}", resource.name, reason);
            }
            continue;
        }
        if let Some(reason) = resource_drop_reason(resource, stage) {
            engine_trace!(SOURCE, "Dropped resource '{}': {:?}", resource.name, reason);
            continue;
        }

        remap[raw_index] = Some(compacted.len());
        compacted.push(CompactedResource {
            descriptor_type: translate_kind(resource.kind),
            set: resource.set,
            reg: resource.binding,
            size: resource.size,
            used_stages,
            dimension: translate_dimension(resource.dimension),
            access: translate_access(resource.access),
            format: translate_format(resource.format),
            name: pool.push(&resource.name),
        });
    }

    // Members, re-parented onto the compacted resource array
    let mut compacted_variables = Vec::with_capacity(sizes.variable_count);
    for variable in variables.iter().filter(|v| v.is_used) {
        let parent_index = match remap.get(variable.parent_index).copied().flatten() {
            Some(index) => index,
            None => continue,
        };
        compacted_variables.push(CompactedVariable {
            offset: variable.offset,
            size: variable.size,
            parent_index,
            name: pool.push(&variable.name),
        });
    }
    drop(remap);

    if vertex_inputs.len() != sizes.vertex_input_count
        || compacted.len() != sizes.resource_count
        || compacted_variables.len() != sizes.variable_count
    {
        return Err(invariant_violation(format!(
            "Record counts ({}, {}, {}) differ from the size pass ({}, {}, {})",
            vertex_inputs.len(),
            compacted.len(),
            compacted_variables.len(),
            sizes.vertex_input_count,
            sizes.resource_count,
            sizes.variable_count
        )));
    }
    if pool.bytes.len() != sizes.name_pool_size {
        return Err(invariant_violation(format!(
            "Name pool holds {} bytes, size pass reserved {}",
            pool.bytes.len(),
            sizes.name_pool_size
        )));
    }

    let num_threads_per_group = match stage {
        ShaderStage::Compute => reflector.reflect_compute_workgroup_size()?,
        _ => [0; 3],
    };
    let num_control_points = match stage {
        ShaderStage::TessellationControl => reflector.reflect_tess_control_point_count()?,
        _ => 0,
    };

    engine_debug!(
        SOURCE,
        "Reflected {:?} entry point '{}': {} vertex inputs, {} resources, {} variables, {} name bytes",
        stage,
        entry_point,
        vertex_inputs.len(),
        compacted.len(),
        compacted_variables.len(),
        pool.bytes.len()
    );

    Ok(ShaderReflection {
        stage,
        name_pool: pool.bytes.into_boxed_slice(),
        entry_point: entry_point_ref,
        vertex_inputs: vertex_inputs.into_boxed_slice(),
        resources: compacted.into_boxed_slice(),
        variables: compacted_variables.into_boxed_slice(),
        num_threads_per_group,
        num_control_points,
    })
}

/// Create a raw reflector over `code`, compact it, then release the reflector
///
/// # Example
///
/// ```ignore
/// use galaxy_3d_reflection::galaxy3d::reflection::{reflect_shader, ShaderStage};
/// use galaxy_3d_reflection_spirq::SpirqReflector;
///
/// let reflection = reflect_shader::<SpirqReflector>(&words, ShaderStage::Fragment)?;
/// println!("entry point: {}", reflection.entry_point());
/// ```
pub fn reflect_shader<R: RawReflector>(code: &[u32], stage: ShaderStage) -> Result<ShaderReflection> {
    if code.is_empty() {
        return Err(Error::InvalidInput("Shader bytecode is empty".to_string()));
    }

    let reflector = R::create(code)?;
    let reflection = compact_reflection(stage, &reflector);
    drop(reflector);
    reflection
}

/// Same as `reflect_shader`, starting from little-endian bytes
pub fn reflect_shader_bytes<R: RawReflector>(desc: &ShaderDesc<'_>) -> Result<ShaderReflection> {
    if desc.code.is_empty() {
        return Err(Error::InvalidInput("Shader bytecode is empty".to_string()));
    }
    if desc.code.len() % 4 != 0 {
        return Err(Error::InvalidInput(format!(
            "Shader bytecode length {} is not a multiple of 4",
            desc.code.len()
        )));
    }

    if cfg!(target_endian = "little") {
        if let Ok(words) = bytemuck::try_cast_slice::<u8, u32>(desc.code) {
            return reflect_shader::<R>(words, desc.stage);
        }
    }

    // Misaligned (or big-endian host): decode word by word
    let words: Vec<u32> = desc
        .code
        .chunks_exact(4)
        .map(|chunk| u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect();
    reflect_shader::<R>(&words, desc.stage)
}

#[cfg(test)]
#[path = "compactor_tests.rs"]
mod tests;

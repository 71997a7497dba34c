/// Mock raw reflector for unit tests (no SPIR-V required)
///
/// Lets the compactor be exercised with hand-built resource and member lists.

use crate::error::{Error, Result};
use crate::reflection::raw::{
    RawAccess, RawImageFormat, RawReflector, RawResource, RawResourceKind, RawTextureDimension,
    RawType, RawVariable,
};

// ============================================================================
// Mock Reflector
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct MockReflector {
    pub entry_point: String,
    pub resources: Vec<RawResource>,
    pub variables: Vec<RawVariable>,
    pub workgroup_size: [u32; 3],
    pub control_points: u32,
    /// When set, every reflect_* call fails with this message
    pub failure: Option<String>,
}

impl MockReflector {
    pub fn new(entry_point: &str) -> Self {
        Self {
            entry_point: entry_point.to_string(),
            ..Default::default()
        }
    }

    /// Append a resource and return its raw index
    pub fn add_resource(&mut self, resource: RawResource) -> usize {
        self.resources.push(resource);
        self.resources.len() - 1
    }

    /// Append a member of the resource at `parent_index`
    pub fn add_variable(&mut self, parent_index: usize, name: &str, offset: u32, size: u32, is_used: bool) {
        let parent_ty = self.resources[parent_index].ty;
        self.variables.push(RawVariable {
            name: name.to_string(),
            type_id: 100 + self.variables.len() as u32,
            parent_ty,
            parent_index,
            is_used,
            offset,
            size,
        });
    }

    fn check(&self) -> Result<()> {
        match &self.failure {
            Some(message) => Err(Error::ReflectorError(message.clone())),
            None => Ok(()),
        }
    }
}

/// Build a raw resource with neutral defaults
pub fn raw_resource(name: &str, kind: RawResourceKind, set: u32, binding: u32, is_used: bool) -> RawResource {
    RawResource {
        name: name.to_string(),
        ty: RawType {
            id: binding + 1,
            type_id: binding + 1000,
            base_type_id: binding + 2000,
        },
        kind,
        dimension: RawTextureDimension::Undefined,
        access: RawAccess::ReadWrite,
        format: RawImageFormat::Unknown,
        set,
        binding,
        size: 1,
        is_used,
    }
}

impl RawReflector for MockReflector {
    fn create(code: &[u32]) -> Result<Self> {
        // The first word selects a canned module, anything else is a parse failure
        match code.first() {
            Some(0x0723_0203) => {
                let mut mock = MockReflector::new("main");
                let block = mock.add_resource(raw_resource("Block", RawResourceKind::UniformBuffer, 0, 1, true));
                mock.add_variable(block, "color", 0, 16, true);
                Ok(mock)
            }
            _ => Err(Error::ReflectorError("invalid magic number".to_string())),
        }
    }

    fn reflect_entry_point(&self) -> Result<&str> {
        self.check()?;
        Ok(&self.entry_point)
    }

    fn reflect_resources(&self) -> Result<&[RawResource]> {
        self.check()?;
        Ok(&self.resources)
    }

    fn reflect_variables(&self) -> Result<&[RawVariable]> {
        self.check()?;
        Ok(&self.variables)
    }

    fn reflect_compute_workgroup_size(&self) -> Result<[u32; 3]> {
        self.check()?;
        Ok(self.workgroup_size)
    }

    fn reflect_tess_control_point_count(&self) -> Result<u32> {
        self.check()?;
        Ok(self.control_points)
    }
}

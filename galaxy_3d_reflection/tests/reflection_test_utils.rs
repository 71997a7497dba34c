//! Shared helpers for reflection integration tests
//!
//! `FixtureReflector` is a plain in-memory raw reflector. It lives here rather
//! than in the crate so that integration tests exercise the public trait only.

#![allow(dead_code)]

use galaxy_3d_reflection::galaxy3d::reflection::{
    RawAccess, RawImageFormat, RawReflector, RawResource, RawResourceKind, RawTextureDimension,
    RawType, RawVariable,
};
use galaxy_3d_reflection::galaxy3d::{Error, Result};

/// Raw reflector backed by hand-written lists
#[derive(Debug, Clone, Default)]
pub struct FixtureReflector {
    pub entry_point: String,
    pub resources: Vec<RawResource>,
    pub variables: Vec<RawVariable>,
    pub workgroup_size: [u32; 3],
    pub control_points: u32,
}

impl FixtureReflector {
    pub fn new(entry_point: &str) -> Self {
        Self {
            entry_point: entry_point.to_string(),
            ..Default::default()
        }
    }

    /// Append a resource and return its raw index
    pub fn push_resource(&mut self, resource: RawResource) -> usize {
        self.resources.push(resource);
        self.resources.len() - 1
    }

    /// Append a member of the resource at `parent_index`
    pub fn push_member(&mut self, parent_index: usize, name: &str, offset: u32, size: u32) {
        let parent = &self.resources[parent_index];
        self.variables.push(RawVariable {
            name: name.to_string(),
            type_id: 500 + self.variables.len() as u32,
            parent_ty: parent.ty,
            parent_index,
            is_used: parent.is_used,
            offset,
            size,
        });
    }
}

impl RawReflector for FixtureReflector {
    fn create(code: &[u32]) -> Result<Self> {
        if code.first() == Some(&0x0723_0203) {
            Ok(FixtureReflector::new("main"))
        } else {
            Err(Error::ReflectorError("Not a SPIR-V module".to_string()))
        }
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

/// Build a raw resource with neutral texture fields
pub fn resource(name: &str, kind: RawResourceKind, set: u32, binding: u32, is_used: bool) -> RawResource {
    let id = set * 100 + binding + 1;
    RawResource {
        name: name.to_string(),
        ty: RawType {
            id,
            type_id: id + 1000,
            base_type_id: id + 2000,
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

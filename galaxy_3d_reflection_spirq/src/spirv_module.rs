/// SPIR-V id scanner
///
/// spirq reports resolved variables but neither the result ids behind them nor
/// the order they were declared in. This scanner walks the module once with
/// spirq's own instruction reader and records just that: entry-point
/// interfaces, binding decorations, the pointer/array/struct type graph and
/// module-scope variables.
///
/// The walk also rejects modules spirq's reader cannot take: a short or
/// foreign header, opcodes outside the SPIR-V grammar, and a last instruction
/// running past the end of the words.

use galaxy_3d_reflection::galaxy3d::Result;
use galaxy_3d_reflection::{engine_bail, engine_err};
use rustc_hash::FxHashMap;
use spirq::error::anyhow;
use spirq::parse::{Instr, Instrs};
use spirq::spirv::{Decoration, ExecutionModel, Op, StorageClass};

const SOURCE: &str = "galaxy3d::spirq";

const MAGIC_NUMBER: u32 = 0x0723_0203;
const HEADER_WORDS: usize = 5;

/// Pointer/array chains longer than this are treated as malformed
const MAX_TYPE_DEPTH: usize = 32;

// ===== MODULE RECORDS =====

/// `OpEntryPoint` record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpirvEntryPoint {
    pub execution_model: ExecutionModel,
    pub function_id: u32,
    pub name: String,
    /// Interface variable ids
    pub interface: Vec<u32>,
}

/// Module-scope `OpVariable`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpirvVariable {
    pub id: u32,
    /// Pointer type of the variable
    pub pointer_type_id: u32,
    pub storage_class: StorageClass,
}

/// What a variable holds once pointers and arrays are stripped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeCategory {
    /// Image or sampled image
    Image,
    Sampler,
    AccelerationStructure,
    Struct,
    Other,
}

#[derive(Debug, Clone, Default)]
struct Decorations {
    set: Option<u32>,
    binding: Option<u32>,
    location: Option<u32>,
    component: Option<u32>,
}

#[derive(Debug, Clone)]
enum TypeDecl {
    Image,
    Sampler,
    AccelerationStructure,
    Array { element: u32 },
    Pointer { pointee: u32 },
    Struct { members: Vec<u32> },
}

// ===== SPIRV MODULE =====

/// Ids and declaration order of a SPIR-V module
#[derive(Debug, Clone, Default)]
pub struct SpirvModule {
    entry_points: Vec<SpirvEntryPoint>,
    names: FxHashMap<u32, String>,
    decorations: FxHashMap<u32, Decorations>,
    types: FxHashMap<u32, TypeDecl>,
    variables: Vec<SpirvVariable>,
}

impl SpirvModule {
    /// Scan a module
    ///
    /// # Errors
    ///
    /// `ReflectorError` when the header is short or carries the wrong magic
    /// number, or when an instruction is malformed.
    pub fn parse(words: &[u32]) -> Result<Self> {
        if words.len() < HEADER_WORDS {
            engine_bail!(
                SOURCE,
                "SPIR-V module is {} words long, shorter than its header",
                words.len()
            );
        }
        if words[0] != MAGIC_NUMBER {
            engine_bail!(SOURCE, "Invalid SPIR-V magic number: {:#010x}", words[0]);
        }

        let body = &words[HEADER_WORDS..];
        let mut instrs = Instrs::new(body)
            .map_err(|e| engine_err!(SOURCE, "Malformed SPIR-V module at word {}: {}", HEADER_WORDS, e))?;

        let mut module = SpirvModule::default();
        let mut consumed = 0;
        let mut in_function = false;

        loop {
            let at = HEADER_WORDS + consumed;
            let instr = match instrs.next() {
                Ok(Some(instr)) => instr,
                Ok(None) => break,
                Err(e) => engine_bail!(SOURCE, "Malformed SPIR-V module after word {}: {}", at, e),
            };
            let op = match Op::from_u32(instr.opcode()) {
                Some(op) => op,
                None => engine_bail!(SOURCE, "Unknown opcode {} at word {}", instr.opcode(), at),
            };
            consumed += instr.word_count();

            match op {
                Op::Function => in_function = true,
                Op::FunctionEnd => in_function = false,
                // Function-local variables are never bindable
                Op::Variable if in_function => {}
                _ => module
                    .visit(op, instr)
                    .map_err(|e| engine_err!(SOURCE, "Malformed {:?} at word {}: {}", op, at, e))?,
            }
        }

        // The reader stops quietly on a last instruction longer than the module
        if consumed != body.len() {
            engine_bail!(
                SOURCE,
                "Instruction at word {} runs past the end of the module",
                HEADER_WORDS + consumed
            );
        }

        Ok(module)
    }

    fn visit(&mut self, op: Op, instr: &Instr) -> spirq::error::Result<()> {
        let mut operands = instr.operands();
        match op {
            Op::EntryPoint => {
                let model = operands.read_u32()?;
                let execution_model = ExecutionModel::from_u32(model)
                    .ok_or_else(|| anyhow!("unknown execution model {}", model))?;
                let function_id = operands.read_id()?;
                let name = operands.read_str()?.to_string();
                let interface = operands.read_list()?.to_vec();
                self.entry_points.push(SpirvEntryPoint {
                    execution_model,
                    function_id,
                    name,
                    interface,
                });
            }
            Op::Name => {
                let target = operands.read_id()?;
                let name = operands.read_str()?;
                self.names.insert(target, name.to_string());
            }
            Op::Decorate => {
                let target = operands.read_id()?;
                let decoration = operands.read_u32()?;
                let slot = match Decoration::from_u32(decoration) {
                    Some(Decoration::DescriptorSet) => &mut self.decorations.entry(target).or_default().set,
                    Some(Decoration::Binding) => &mut self.decorations.entry(target).or_default().binding,
                    Some(Decoration::Location) => &mut self.decorations.entry(target).or_default().location,
                    Some(Decoration::Component) => &mut self.decorations.entry(target).or_default().component,
                    _ => return Ok(()),
                };
                *slot = Some(operands.read_u32()?);
            }
            Op::TypeImage | Op::TypeSampledImage => {
                self.types.insert(operands.read_id()?, TypeDecl::Image);
            }
            Op::TypeSampler => {
                self.types.insert(operands.read_id()?, TypeDecl::Sampler);
            }
            Op::TypeAccelerationStructureKHR => {
                self.types.insert(operands.read_id()?, TypeDecl::AccelerationStructure);
            }
            Op::TypeArray | Op::TypeRuntimeArray => {
                let id = operands.read_id()?;
                let element = operands.read_id()?;
                self.types.insert(id, TypeDecl::Array { element });
            }
            Op::TypePointer => {
                let id = operands.read_id()?;
                let _storage_class = operands.read_u32()?;
                let pointee = operands.read_id()?;
                self.types.insert(id, TypeDecl::Pointer { pointee });
            }
            Op::TypeStruct => {
                let id = operands.read_id()?;
                let members = operands.read_list()?.to_vec();
                self.types.insert(id, TypeDecl::Struct { members });
            }
            Op::Variable => {
                let pointer_type_id = operands.read_id()?;
                let id = operands.read_id()?;
                let class = operands.read_u32()?;
                let storage_class = StorageClass::from_u32(class)
                    .ok_or_else(|| anyhow!("unknown storage class {}", class))?;
                self.variables.push(SpirvVariable {
                    id,
                    pointer_type_id,
                    storage_class,
                });
            }
            _ => {}
        }
        Ok(())
    }

    // ===== QUERIES =====

    /// Entry points in declaration order
    pub fn entry_points(&self) -> &[SpirvEntryPoint] {
        &self.entry_points
    }

    pub fn entry_point(&self, name: &str) -> Option<&SpirvEntryPoint> {
        self.entry_points.iter().find(|entry| entry.name == name)
    }

    /// Module-scope variables in declaration order
    pub fn variables(&self) -> &[SpirvVariable] {
        &self.variables
    }

    /// Position of a variable in declaration order
    pub fn variable_index(&self, id: u32) -> Option<usize> {
        self.variables.iter().position(|variable| variable.id == id)
    }

    /// Descriptor variable bound at `set`/`binding`
    ///
    /// Separate images and samplers may share a slot; the one holding
    /// `category` wins, then the first declared. Missing decorations read as 0.
    pub fn descriptor_variable(&self, set: u32, binding: u32, category: TypeCategory) -> Option<&SpirvVariable> {
        let candidates: Vec<&SpirvVariable> = self
            .variables
            .iter()
            .filter(|variable| {
                matches!(
                    variable.storage_class,
                    StorageClass::UniformConstant | StorageClass::Uniform | StorageClass::StorageBuffer
                )
            })
            .filter(|variable| {
                let decorations = self.decorations.get(&variable.id);
                let slot = decorations.map_or((0, 0), |d| (d.set.unwrap_or(0), d.binding.unwrap_or(0)));
                slot == (set, binding)
            })
            .collect();

        candidates
            .iter()
            .find(|variable| self.type_category(variable.pointer_type_id) == category)
            .or_else(|| candidates.first())
            .copied()
    }

    /// Stage input or output of `entry` at `location`/`component`
    ///
    /// When `name` is given, a differently named candidate does not match.
    pub fn interface_variable(
        &self,
        entry: &SpirvEntryPoint,
        storage_class: StorageClass,
        location: u32,
        component: u32,
        name: Option<&str>,
    ) -> Option<&SpirvVariable> {
        self.variables.iter().find(|variable| {
            if variable.storage_class != storage_class || !entry.interface.contains(&variable.id) {
                return false;
            }
            let decorations = self.decorations.get(&variable.id);
            let at = decorations.map_or((None, 0), |d| (d.location, d.component.unwrap_or(0)));
            let same_name = match (name, self.name(variable.id)) {
                (Some(wanted), Some(declared)) => wanted == declared,
                _ => true,
            };
            at == (Some(location), component) && same_name
        })
    }

    /// Push-constant variable of `entry`
    ///
    /// The variable named `name` wins, then the one whose block type is named
    /// `block_name`. Unnamed blocks fall back to the first one `entry` lists
    /// among its interface ids (SPIR-V 1.4 and later), then to the first
    /// declared.
    pub fn push_constant_variable(
        &self,
        entry: &SpirvEntryPoint,
        name: Option<&str>,
        block_name: Option<&str>,
    ) -> Option<&SpirvVariable> {
        let blocks = self
            .variables
            .iter()
            .filter(|variable| variable.storage_class == StorageClass::PushConstant);

        let by_name = name.and_then(|name| {
            blocks.clone().find(|variable| self.name(variable.id) == Some(name))
        });
        let by_block = || {
            block_name.and_then(|block_name| {
                blocks.clone().find(|variable| {
                    self.name(self.base_type_id(variable.pointer_type_id)) == Some(block_name)
                })
            })
        };
        let listed = || blocks.clone().find(|variable| entry.interface.contains(&variable.id));

        by_name
            .or_else(by_block)
            .or_else(listed)
            .or_else(|| blocks.clone().next())
    }

    /// `OpName` of an id
    pub fn name(&self, id: u32) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    /// Pointee of a pointer type, `type_id` itself otherwise
    pub fn pointee_type_id(&self, type_id: u32) -> u32 {
        match self.types.get(&type_id) {
            Some(TypeDecl::Pointer { pointee }) => *pointee,
            _ => type_id,
        }
    }

    /// Strip pointers and arrays down to the element type
    pub fn base_type_id(&self, type_id: u32) -> u32 {
        let mut current = type_id;
        for _ in 0..MAX_TYPE_DEPTH {
            match self.types.get(&current) {
                Some(TypeDecl::Pointer { pointee }) => current = *pointee,
                Some(TypeDecl::Array { element }) => current = *element,
                _ => return current,
            }
        }
        current
    }

    /// Member type ids of a struct, empty for anything else
    pub fn struct_members(&self, type_id: u32) -> &[u32] {
        match self.types.get(&type_id) {
            Some(TypeDecl::Struct { members }) => members,
            _ => &[],
        }
    }

    /// Category of a type once pointers and arrays are stripped
    pub fn type_category(&self, type_id: u32) -> TypeCategory {
        match self.types.get(&self.base_type_id(type_id)) {
            Some(TypeDecl::Image) => TypeCategory::Image,
            Some(TypeDecl::Sampler) => TypeCategory::Sampler,
            Some(TypeDecl::AccelerationStructure) => TypeCategory::AccelerationStructure,
            Some(TypeDecl::Struct { .. }) => TypeCategory::Struct,
            _ => TypeCategory::Other,
        }
    }
}

#[cfg(test)]
#[path = "spirv_module_tests.rs"]
mod tests;

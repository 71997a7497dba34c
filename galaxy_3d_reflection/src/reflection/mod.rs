/// Reflection module - raw reflector interface, translation tables and the compactor

// Module declarations
pub mod shader_stage;
pub mod raw;
pub mod translation;
pub mod shader_reflection;
pub mod compactor;
#[cfg(test)]
pub(crate) mod mock_reflector;

// Re-export everything
pub use shader_stage::*;
pub use raw::*;
pub use translation::*;
pub use shader_reflection::*;
pub use compactor::*;

/*!
# Galaxy 3D Reflection

Shader reflection compactor for the Galaxy 3D rendering engine.

Given SPIR-V bytecode and its pipeline stage, this crate produces a
`ShaderReflection`: a self-contained description of every resource the entry
point actually uses, the members of its uniform-like blocks, the entry point
name and stage metadata. All names live in one pool owned by the reflection.

Parsing is delegated to a raw reflector backend implementing `RawReflector`
(see `galaxy_3d_reflection_spirq`).

## Architecture

- **RawReflector**: Backend trait yielding unfiltered resources and members
- **compact_reflection**: Two-pass filter, remap and pool layout
- **Translation tables**: Static raw-enum to engine-enum lookups
- **ShaderReflection**: Immutable output record
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod reflection;

// Main galaxy3d namespace module
pub mod galaxy3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Logging hub
    pub use crate::engine::Engine;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger, format_entry};
    }

    // Reflection sub-module
    pub mod reflection {
        pub use crate::reflection::*;
    }
}

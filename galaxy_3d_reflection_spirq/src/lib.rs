/*!
# Galaxy 3D Reflection - spirq Backend

SPIR-V raw reflector for the Galaxy 3D reflection compactor.

This crate implements `RawReflector` on top of spirq. spirq resolves the
variables of each entry point; a small scanner built on spirq's instruction
reader supplies the result ids and declaration order it does not expose.

## Example

```no_run
use galaxy_3d_reflection::galaxy3d::reflection::{reflect_shader, ShaderStage};
use galaxy_3d_reflection_spirq::SpirqReflector;

fn reflect(words: &[u32]) -> galaxy_3d_reflection::galaxy3d::Result<()> {
    let reflection = reflect_shader::<SpirqReflector>(words, ShaderStage::Compute)?;
    println!("{:?}", reflection.num_threads_per_group());
    Ok(())
}
```
*/

// spirq backend modules
mod spirv_module;
mod spirq_reflector;

pub use spirv_module::{SpirvEntryPoint, SpirvModule, SpirvVariable, TypeCategory};
pub use spirq_reflector::{SpirqReflector, SpirqReflectorConfig};

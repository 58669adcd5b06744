//! Emission backends: where generated implementations end up

mod file;
mod memory;
mod render;

pub use file::FileEmitter;
pub use memory::MemoryEmitter;
pub use render::{format_source, render_artifact, render_file, GENERATED_HEADER};

use crate::codegen::GeneratedArtifact;
use crate::error::Result;

/// Persists generated artifacts.
///
/// `emit` is called once per artifact, in generation order; `finish` once
/// after the last one. Emission failures are fatal to the run.
pub trait Emitter {
    fn emit(&mut self, artifact: &GeneratedArtifact) -> Result<()>;

    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

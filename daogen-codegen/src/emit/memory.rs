//! In-memory emitter

use std::collections::BTreeMap;

use crate::codegen::{module_name, GeneratedArtifact};
use crate::error::{CodegenError, Result};

use super::render::render_file;
use super::Emitter;

/// Keeps rendered sources keyed by module name
#[derive(Debug, Default)]
pub struct MemoryEmitter {
    files: BTreeMap<String, String>,
}

impl MemoryEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rendered source of a module, e.g. `get("user_dao_impl")`
    pub fn get(&self, module: &str) -> Option<&str> {
        self.files.get(module).map(String::as_str)
    }

    pub fn files(&self) -> &BTreeMap<String, String> {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl Emitter for MemoryEmitter {
    fn emit(&mut self, artifact: &GeneratedArtifact) -> Result<()> {
        let module = module_name(&artifact.implementation_name);
        if self.files.contains_key(&module) {
            return Err(CodegenError::Emit(format!(
                "module `{}` is already emitted; `{}` would overwrite it",
                module, artifact.implementation_name
            )));
        }
        let source = render_file(artifact)?;
        self.files.insert(module, source);
        Ok(())
    }
}

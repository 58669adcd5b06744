//! File emitter: one source file per implementation plus a `mod.rs`

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::codegen::{module_name, GeneratedArtifact};
use crate::error::{CodegenError, Result};

use super::render::{render_file, GENERATED_HEADER};
use super::Emitter;

/// Writes `<output_dir>/<module>.rs` per artifact and a `mod.rs` that
/// declares and re-exports them all.
///
/// In dry-run mode sources are still rendered and validated, but nothing is
/// written; the paths that would have been written are recorded instead.
#[derive(Debug)]
pub struct FileEmitter {
    output_dir: PathBuf,
    dry_run: bool,
    modules: Vec<String>,
    written: Vec<PathBuf>,
}

impl FileEmitter {
    pub fn new(output_dir: impl AsRef<Path>) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            dry_run: false,
            modules: Vec::new(),
            written: Vec::new(),
        }
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Files written so far, or planned in dry-run mode
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn write(&mut self, path: PathBuf, content: &str) -> Result<()> {
        if self.dry_run {
            info!("Would write {}", path.display());
        } else {
            fs::create_dir_all(&self.output_dir)?;
            fs::write(&path, content)?;
            debug!("Wrote {}", path.display());
        }
        self.written.push(path);
        Ok(())
    }
}

impl Emitter for FileEmitter {
    fn emit(&mut self, artifact: &GeneratedArtifact) -> Result<()> {
        let module = module_name(&artifact.implementation_name);
        if self.modules.contains(&module) {
            return Err(CodegenError::Emit(format!(
                "module `{}` is already emitted; `{}` would overwrite it",
                module, artifact.implementation_name
            )));
        }
        let source = render_file(artifact)?;
        let path = self.output_dir.join(format!("{}.rs", module));
        self.write(path, &source)?;
        self.modules.push(module);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        let content = module_index(&self.modules);
        let path = self.output_dir.join("mod.rs");
        self.write(path, &content)
    }
}

/// `mod.rs` contents.
///
/// Each module body is pulled in with `include!` so the index works both
/// as a regular `mod.rs` and when itself `include!`d from `OUT_DIR`.
fn module_index(modules: &[String]) -> String {
    let mut content = format!("{}\n", GENERATED_HEADER);
    for module in modules {
        content.push('\n');
        content.push_str(&format!("mod {} {{\n", module));
        content.push_str(&format!("    include!(\"{}.rs\");\n", module));
        content.push_str("}\n");
        content.push_str(&format!("pub use {}::*;\n", module));
    }
    content
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::{GenerationContext, GenerationSession};
    use crate::diagnostics::CollectingReporter;
    use crate::model::DaoInterfaceDefinition;
    use tempfile::TempDir;

    fn make_artifact(name: &str) -> GeneratedArtifact {
        let reporter = CollectingReporter::new();
        let session = GenerationSession::new(GenerationContext::new(&[]), &reporter);
        session
            .generate_interface(&DaoInterfaceDefinition {
                name: name.to_string(),
                namespace: "crate::dao".to_string(),
                methods: vec![],
            })
            .unwrap()
    }

    #[test]
    fn test_writes_files_and_index() {
        let dir = TempDir::new().unwrap();
        let mut emitter = FileEmitter::new(dir.path().join("dao"));
        emitter.emit(&make_artifact("UserDao")).unwrap();
        emitter.emit(&make_artifact("NoteDao")).unwrap();
        emitter.finish().unwrap();

        let user = fs::read_to_string(dir.path().join("dao/user_dao_impl.rs")).unwrap();
        assert!(user.starts_with(GENERATED_HEADER));
        assert!(user.contains("pub struct UserDao_Impl"));

        let index = fs::read_to_string(dir.path().join("dao/mod.rs")).unwrap();
        assert!(index.contains("mod user_dao_impl {\n    include!(\"user_dao_impl.rs\");\n}"));
        assert!(index.contains("pub use note_dao_impl::*;"));
        assert!(index.find("user_dao_impl").unwrap() < index.find("note_dao_impl").unwrap());
        assert_eq!(emitter.written().len(), 3);
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("dao");
        let mut emitter = FileEmitter::new(&output).dry_run(true);
        emitter.emit(&make_artifact("UserDao")).unwrap();
        emitter.finish().unwrap();

        assert!(!output.exists());
        assert_eq!(
            emitter.written(),
            &[output.join("user_dao_impl.rs"), output.join("mod.rs")]
        );
    }

    #[test]
    fn test_same_module_twice_is_an_error() {
        let dir = TempDir::new().unwrap();
        let mut emitter = FileEmitter::new(dir.path()).dry_run(true);
        emitter.emit(&make_artifact("UserDao")).unwrap();
        let err = emitter.emit(&make_artifact("UserDAO")).unwrap_err();
        assert!(matches!(err, CodegenError::Emit(_)));
        assert_eq!(emitter.written().len(), 1);
    }

    #[test]
    fn test_empty_index() {
        assert_eq!(module_index(&[]), format!("{}\n", GENERATED_HEADER));
    }
}

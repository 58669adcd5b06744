//! daogen-codegen: Generate DAO trait implementations from declarative interface models
//!
//! A declaration file lists entities (plain value types mapped onto stored
//! records) and DAO interfaces whose methods carry query markers. For every
//! interface this crate generates an `<Interface>_Impl<S: daogen::Session>`
//! type that implements the trait by preparing one statement per method,
//! binding arguments and converting results.
//!
//! Recognized markers (a method carrying more than one is rejected):
//!
//! - `persist` - insert every field of one entity
//! - `query` - run literal query text with the parameters bound positionally
//!
//! Methods with no recognized marker are left alone; methods with a malformed
//! shape are reported as diagnostics and skipped. Both must have a default
//! body in the trait for the generated implementation to compile.
//!
//! # Usage in build.rs (Recommended)
//!
//! Configure in your `Cargo.toml`:
//!
//! ```toml
//! [package.metadata.daogen-codegen]
//! declarations_file = "daos.toml"
//! models_module = "models"
//! ```
//!
//! Then use a minimal `build.rs`:
//!
//! ```rust,ignore
//! fn main() {
//!     daogen_codegen::generate_from_cargo_metadata()
//!         .expect("Failed to generate DAO implementations");
//! }
//! ```
//!
//! Include the generated code next to the traits it implements:
//!
//! ```rust,ignore
//! mod dao {
//!     pub trait UserDao { /* ... */ }
//!
//!     include!(concat!(env!("OUT_DIR"), "/dao/mod.rs"));
//! }
//! ```
//!
//! # Alternative: Programmatic Configuration
//!
//! ```rust,ignore
//! fn main() {
//!     let out_dir = std::env::var("OUT_DIR").unwrap();
//!     daogen_codegen::CodegenBuilder::new("daos.toml")
//!         .output_dir(std::path::Path::new(&out_dir).join("dao"))
//!         .generate()
//!         .expect("Failed to generate DAO implementations");
//!
//!     println!("cargo:rerun-if-changed=daos.toml");
//! }
//! ```
//!
//! # CLI Usage
//!
//! ```bash
//! daogen-codegen --declarations daos.toml --output ./src/generated/dao generate
//! ```

pub mod codegen;
pub mod config;
pub mod diagnostics;
pub mod emit;
pub mod error;
pub mod model;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

pub use config::CodegenConfig;
pub use diagnostics::{CollectingReporter, Diagnostic, DiagnosticKind, DiagnosticReporter};
pub use error::{CodegenError, Result};

use codegen::{GenerationContext, GenerationSession};
use emit::{Emitter, FileEmitter};
use model::{extract_interface, DaoInterfaceDefinition, DeclarationSet, RawInterface};

/// Outcome of a generation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationSummary {
    /// Implementation names, in emission order
    pub generated: Vec<String>,
    /// Interfaces skipped because their implementation name was already taken
    pub skipped_interfaces: Vec<String>,
    /// Total number of generated methods
    pub methods_generated: usize,
    /// Every diagnostic filed during the run
    pub diagnostics: Vec<Diagnostic>,
    /// Files written (or planned, in dry-run mode)
    pub files: Vec<PathBuf>,
}

impl GenerationSummary {
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Main entry point for code generation
pub fn generate(config: &CodegenConfig) -> Result<GenerationSummary> {
    info!("Reading declarations: {:?}", config.declarations_file);
    let declarations = DeclarationSet::from_file(&config.declarations_file)?;
    info!(
        "Found {} entities and {} interfaces",
        declarations.entities.len(),
        declarations.interfaces.len()
    );

    let mut emitter = FileEmitter::new(&config.output_dir).dry_run(config.dry_run);
    let mut summary = generate_with(&declarations, config, &mut emitter)?;
    summary.files = emitter.written().to_vec();

    info!(
        "Code generation complete: {} implementation(s), {} method(s), {} diagnostic(s)",
        summary.generated.len(),
        summary.methods_generated,
        summary.diagnostics.len()
    );
    Ok(summary)
}

/// Run the pipeline over already-loaded declarations into any emitter
pub fn generate_with(
    declarations: &DeclarationSet,
    config: &CodegenConfig,
    emitter: &mut dyn Emitter,
) -> Result<GenerationSummary> {
    declarations.validate()?;
    let interfaces = filter_interfaces(
        &declarations.interfaces,
        &config.include_interfaces,
        &config.exclude_interfaces,
    );
    debug!(
        "After filtering: {} interfaces (include={}, exclude={})",
        interfaces.len(),
        config.include_interfaces,
        config.exclude_interfaces
    );

    let interfaces: Vec<DaoInterfaceDefinition> =
        interfaces.into_iter().map(extract_interface).collect();

    let reporter = CollectingReporter::new();
    let context = GenerationContext::from_config(&declarations.entities, config);
    let session = GenerationSession::new(context, &reporter).parallel(config.parallel);

    let mut summary = GenerationSummary::default();
    for (interface, result) in interfaces.iter().zip(session.generate_all(&interfaces)) {
        match result {
            Ok(artifact) => {
                emitter.emit(&artifact)?;
                summary.methods_generated += artifact.methods().count();
                summary.generated.push(artifact.implementation_name);
            }
            Err(CodegenError::NamingCollision { .. }) => {
                summary.skipped_interfaces.push(interface.qualified_name());
            }
            Err(err) => return Err(err),
        }
    }
    emitter.finish()?;

    summary.diagnostics = reporter.diagnostics();
    Ok(summary)
}

/// Filter interfaces based on include/exclude patterns
fn filter_interfaces<'a>(
    interfaces: &'a [RawInterface],
    include: &str,
    exclude: &str,
) -> Vec<&'a RawInterface> {
    let include_all = include.trim() == "*" || include.trim().is_empty();
    let include_set: HashSet<&str> = if include_all {
        HashSet::new()
    } else {
        include.split(',').map(str::trim).collect()
    };
    let exclude_set: HashSet<&str> = exclude
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    interfaces
        .iter()
        .filter(|i| {
            let name = i.name.as_str();
            let included = include_all || include_set.contains(name);
            let excluded = exclude_set.contains(name);
            included && !excluded
        })
        .collect()
}

/// Builder pattern for easy configuration in build.rs
pub struct CodegenBuilder {
    config: CodegenConfig,
}

impl CodegenBuilder {
    /// Create a new builder with the given declaration file
    pub fn new(declarations_file: impl AsRef<Path>) -> Self {
        Self {
            config: CodegenConfig::default_with_declarations(
                declarations_file.as_ref().to_path_buf(),
            ),
        }
    }

    /// Set the directory generated files are written to
    pub fn output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.config.output_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Set interfaces to include
    pub fn include_interfaces(mut self, interfaces: &[&str]) -> Self {
        self.config.include_interfaces = interfaces.join(",");
        self
    }

    /// Set interfaces to exclude
    pub fn exclude_interfaces(mut self, interfaces: &[&str]) -> Self {
        self.config.exclude_interfaces = interfaces.join(",");
        self
    }

    /// Set the module path of entity types
    pub fn models_module(mut self, path: &str) -> Self {
        self.config.models_module = path.to_string();
        self
    }

    /// Set the path of the runtime crate
    pub fn runtime_crate(mut self, path: &str) -> Self {
        self.config.runtime_crate = path.to_string();
        self
    }

    /// Generate interfaces on scoped threads
    pub fn parallel(mut self) -> Self {
        self.config.parallel = true;
        self
    }

    /// Enable dry run mode (preview without writing files)
    pub fn dry_run(mut self) -> Self {
        self.config.dry_run = true;
        self
    }

    /// Get the assembled configuration
    pub fn config(&self) -> &CodegenConfig {
        &self.config
    }

    /// Generate the code
    pub fn generate(self) -> Result<GenerationSummary> {
        self.config.validate()?;
        generate(&self.config)
    }
}

/// Configuration for `[package.metadata.daogen-codegen]` in Cargo.toml
#[derive(Debug, Clone, Default, serde::Deserialize)]
struct CargoMetadataConfig {
    /// Path to the declaration file (required)
    declarations_file: Option<String>,

    /// Interfaces to include (optional, defaults to all)
    #[serde(default)]
    include_interfaces: Vec<String>,

    /// Interfaces to exclude (optional)
    #[serde(default)]
    exclude_interfaces: Vec<String>,

    /// Output directory, relative to the manifest (default: `$OUT_DIR/dao`)
    output_dir: Option<String>,

    /// Module path of entity types (default: "models")
    models_module: Option<String>,

    /// Path of the runtime crate (default: "daogen")
    runtime_crate: Option<String>,

    /// Generate interfaces on scoped threads (default: false)
    parallel: Option<bool>,
}

#[derive(Debug, serde::Deserialize)]
struct CargoToml {
    package: Option<CargoPackage>,
}

#[derive(Debug, serde::Deserialize)]
struct CargoPackage {
    metadata: Option<CargoPackageMetadata>,
}

#[derive(Debug, serde::Deserialize)]
struct CargoPackageMetadata {
    #[serde(rename = "daogen-codegen")]
    daogen_codegen: Option<CargoMetadataConfig>,
}

/// Generate code from `[package.metadata.daogen-codegen]` in Cargo.toml
///
/// This function reads configuration from the downstream project's Cargo.toml,
/// making build.rs minimal:
///
/// ```rust,ignore
/// // build.rs
/// fn main() {
///     daogen_codegen::generate_from_cargo_metadata()
///         .expect("Failed to generate DAO implementations");
/// }
/// ```
///
/// Configure in Cargo.toml:
///
/// ```toml
/// [package.metadata.daogen-codegen]
/// declarations_file = "daos.toml"
/// include_interfaces = ["UserDao", "NoteDao"]
/// ```
pub fn generate_from_cargo_metadata() -> Result<GenerationSummary> {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").map_err(|_| {
        CodegenError::ConfigError(
            "CARGO_MANIFEST_DIR not set - are you running from build.rs?".into(),
        )
    })?;

    let cargo_toml_path = PathBuf::from(&manifest_dir).join("Cargo.toml");
    let cargo_toml_content = std::fs::read_to_string(&cargo_toml_path)?;

    let cargo_toml: CargoToml = toml::from_str(&cargo_toml_content).map_err(|e| {
        CodegenError::ConfigError(format!(
            "Failed to parse {}: {}",
            cargo_toml_path.display(),
            e
        ))
    })?;

    let metadata_config = cargo_toml
        .package
        .and_then(|p| p.metadata)
        .and_then(|m| m.daogen_codegen)
        .ok_or_else(|| {
            CodegenError::ConfigError(
                "Missing [package.metadata.daogen-codegen] section in Cargo.toml".into(),
            )
        })?;

    let declarations_file = metadata_config.declarations_file.ok_or_else(|| {
        CodegenError::ConfigError(
            "declarations_file is required in [package.metadata.daogen-codegen]".into(),
        )
    })?;

    let declarations_path = PathBuf::from(&manifest_dir).join(&declarations_file);

    let mut builder = CodegenBuilder::new(&declarations_path);

    if let Some(dir) = metadata_config.output_dir {
        builder = builder.output_dir(PathBuf::from(&manifest_dir).join(dir));
    } else {
        let out_dir = std::env::var("OUT_DIR").map(PathBuf::from).map_err(|_| {
            CodegenError::ConfigError("OUT_DIR not set - are you running from build.rs?".into())
        })?;
        builder = builder.output_dir(out_dir.join("dao"));
    }

    if !metadata_config.include_interfaces.is_empty() {
        let interfaces: Vec<&str> = metadata_config
            .include_interfaces
            .iter()
            .map(|s| s.as_str())
            .collect();
        builder = builder.include_interfaces(&interfaces);
    }
    if !metadata_config.exclude_interfaces.is_empty() {
        let interfaces: Vec<&str> = metadata_config
            .exclude_interfaces
            .iter()
            .map(|s| s.as_str())
            .collect();
        builder = builder.exclude_interfaces(&interfaces);
    }

    if let Some(module) = metadata_config.models_module {
        builder = builder.models_module(&module);
    }
    if let Some(runtime) = metadata_config.runtime_crate {
        builder = builder.runtime_crate(&runtime);
    }
    if let Some(true) = metadata_config.parallel {
        builder = builder.parallel();
    }

    println!("cargo:rerun-if-changed={}", declarations_path.display());
    println!("cargo:rerun-if-changed={}", cargo_toml_path.display());

    let summary = builder.generate()?;
    for diagnostic in &summary.diagnostics {
        println!("cargo:warning={}", diagnostic);
    }
    Ok(summary)
}

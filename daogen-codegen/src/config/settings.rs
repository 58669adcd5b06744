//! Configuration settings for daogen-codegen

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::defaults;
use crate::error::{CodegenError, Result};

/// Main configuration struct for code generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodegenConfig {
    /// Path to the TOML declaration file (entities and DAO interfaces)
    #[serde(default)]
    pub declarations_file: PathBuf,

    /// Interfaces to include (comma-separated, or "*" for all)
    #[serde(default = "default_include_interfaces")]
    pub include_interfaces: String,

    /// Interfaces to exclude (comma-separated)
    #[serde(default = "default_exclude_interfaces")]
    pub exclude_interfaces: String,

    /// Output directory for generated implementations
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Module path of entity types, relative to the crate root
    /// (`models` and `crate::models` are equivalent)
    #[serde(default = "default_models_module")]
    pub models_module: String,

    /// Path of the runtime crate generated code refers to
    #[serde(default = "default_runtime_crate")]
    pub runtime_crate: String,

    /// Generate interfaces on scoped threads
    #[serde(default = "default_parallel")]
    pub parallel: bool,

    /// Dry run mode - preview without writing files
    #[serde(default = "default_dry_run")]
    pub dry_run: bool,

    /// Log level (trace, debug, info, warn, error)
    /// Can be overridden by RUST_LOG env var
    #[serde(default)]
    pub log_level: Option<String>,
}

fn default_include_interfaces() -> String {
    defaults::INCLUDE_INTERFACES.to_string()
}
fn default_exclude_interfaces() -> String {
    defaults::EXCLUDE_INTERFACES.to_string()
}
fn default_output_dir() -> PathBuf {
    PathBuf::from(defaults::OUTPUT_DIR)
}
fn default_models_module() -> String {
    defaults::MODELS_MODULE.to_string()
}
fn default_runtime_crate() -> String {
    defaults::RUNTIME_CRATE.to_string()
}
fn default_parallel() -> bool {
    defaults::PARALLEL
}
fn default_dry_run() -> bool {
    defaults::DRY_RUN
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            declarations_file: PathBuf::new(),
            include_interfaces: default_include_interfaces(),
            exclude_interfaces: default_exclude_interfaces(),
            output_dir: default_output_dir(),
            models_module: default_models_module(),
            runtime_crate: default_runtime_crate(),
            parallel: default_parallel(),
            dry_run: default_dry_run(),
            log_level: None,
        }
    }
}

impl CodegenConfig {
    /// Create a default config with the given declaration file
    pub fn default_with_declarations(declarations_file: PathBuf) -> Self {
        Self {
            declarations_file,
            ..Default::default()
        }
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: CodegenConfig = toml::from_str(&content).map_err(|e| {
            CodegenError::ConfigError(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(config)
    }

    /// Load configuration using config-rs (file + environment variables)
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path));
        } else {
            builder =
                builder.add_source(File::with_name(defaults::CONFIG_FILE_NAME).required(false));
        }

        // Override with environment variables (DAOGEN_CODEGEN_*)
        builder = builder.add_source(
            Environment::with_prefix(defaults::ENV_PREFIX)
                .prefix_separator("_")
                .try_parsing(true),
        );

        let config: CodegenConfig = builder.build()?.try_deserialize()?;

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.declarations_file.as_os_str().is_empty() {
            return Err(CodegenError::ValidationError(
                "declarations_file is required".into(),
            ));
        }

        if !self.declarations_file.exists() {
            return Err(CodegenError::ValidationError(format!(
                "Declaration file not found: {}",
                self.declarations_file.display()
            )));
        }

        if self.output_dir.as_os_str().is_empty() {
            return Err(CodegenError::ValidationError(
                "output_dir must not be empty".into(),
            ));
        }

        for (key, path) in [
            ("models_module", &self.models_module),
            ("runtime_crate", &self.runtime_crate),
        ] {
            if syn::parse_str::<syn::Path>(path).is_err() {
                return Err(CodegenError::ValidationError(format!(
                    "{} must be a Rust path, got `{}`",
                    key, path
                )));
            }
        }

        Ok(())
    }
}

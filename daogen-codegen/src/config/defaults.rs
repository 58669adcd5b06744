//! Default configuration values - single source of truth

/// Default include interfaces pattern (all interfaces)
pub const INCLUDE_INTERFACES: &str = "*";

/// Default exclude interfaces pattern (none)
pub const EXCLUDE_INTERFACES: &str = "";

/// Default output directory for generated implementations
pub const OUTPUT_DIR: &str = "./generated/dao";

/// Default module path of entity types, relative to the crate root
pub const MODELS_MODULE: &str = "models";

/// Default path of the runtime crate generated code refers to
pub const RUNTIME_CRATE: &str = "daogen";

/// Whether to generate interfaces on scoped threads by default
pub const PARALLEL: bool = false;

/// Whether to run in dry-run mode by default
pub const DRY_RUN: bool = false;

/// Config file looked up when none is given
pub const CONFIG_FILE_NAME: &str = "daogen-codegen";

/// Prefix of environment variable overrides (`DAOGEN_CODEGEN_*`)
pub const ENV_PREFIX: &str = "DAOGEN_CODEGEN";

//! Error types for daogen-codegen

use thiserror::Error;

/// Result type alias for daogen-codegen operations
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Errors that can occur during code generation
///
/// Per-method problems never show up here: they are filed with the
/// [`DiagnosticReporter`](crate::diagnostics::DiagnosticReporter) and the
/// method is dropped. `NamingCollision` aborts a single interface; the
/// remaining variants abort the run.
#[derive(Error, Debug)]
pub enum CodegenError {
    #[error("Failed to parse declarations: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Implementation `{implementation}` for interface `{interface}` collides with an existing registration")]
    NamingCollision {
        interface: String,
        implementation: String,
    },

    #[error("Emission failed: {0}")]
    Emit(String),
}

impl From<toml::de::Error> for CodegenError {
    fn from(err: toml::de::Error) -> Self {
        CodegenError::ParseError(err.to_string())
    }
}

impl From<config::ConfigError> for CodegenError {
    fn from(err: config::ConfigError) -> Self {
        CodegenError::ConfigError(err.to_string())
    }
}

impl From<syn::Error> for CodegenError {
    fn from(err: syn::Error) -> Self {
        CodegenError::Emit(format!("generated code does not parse: {}", err))
    }
}

//! Shared, read-only context handed to every method generator

use std::collections::HashMap;

use crate::config::{defaults, CodegenConfig};
use crate::model::EntityDefinition;

use super::naming::SESSION_FIELD;

/// Entities and output settings visible to method generators.
///
/// Borrowed from the caller's declaration set; never mutated during a run.
#[derive(Debug, Clone)]
pub struct GenerationContext<'a> {
    entities: HashMap<&'a str, &'a EntityDefinition>,
    runtime_crate: String,
    models_module: String,
}

impl<'a> GenerationContext<'a> {
    /// Build a context with default module settings
    pub fn new(entities: &'a [EntityDefinition]) -> Self {
        Self {
            entities: entities.iter().map(|e| (e.name.as_str(), e)).collect(),
            runtime_crate: defaults::RUNTIME_CRATE.to_string(),
            models_module: defaults::MODELS_MODULE.to_string(),
        }
    }

    /// Build a context using the module settings of `config`
    pub fn from_config(entities: &'a [EntityDefinition], config: &CodegenConfig) -> Self {
        Self::new(entities)
            .with_runtime_crate(&config.runtime_crate)
            .with_models_module(&config.models_module)
    }

    pub fn with_runtime_crate(mut self, runtime_crate: &str) -> Self {
        self.runtime_crate = runtime_crate.to_string();
        self
    }

    /// Models module relative to the crate root; a leading `crate::` is
    /// accepted and dropped
    pub fn with_models_module(mut self, models_module: &str) -> Self {
        let models_module = models_module.trim();
        self.models_module = models_module
            .strip_prefix("crate::")
            .unwrap_or(models_module)
            .to_string();
        self
    }

    /// Look up an entity by name
    pub fn entity(&self, name: &str) -> Option<&'a EntityDefinition> {
        self.entities.get(name).copied()
    }

    /// Path of the runtime crate generated code refers to (e.g. `daogen`)
    pub fn runtime(&self) -> &str {
        &self.runtime_crate
    }

    /// Path of a runtime item, e.g. `runtime_path("Session")` -> `daogen::Session`
    pub fn runtime_path(&self, item: &str) -> String {
        format!("{}::{}", self.runtime_crate, item)
    }

    /// Import path of an entity type, e.g. `crate::models::User`
    pub fn entity_path(&self, entity_name: &str) -> String {
        format!("crate::{}::{}", self.models_module, entity_name)
    }

    pub fn session_field_name(&self) -> &'static str {
        SESSION_FIELD
    }
}

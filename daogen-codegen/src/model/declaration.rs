//! Raw declaration input, as resolved by the host tooling

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::entity::EntityDefinition;
use super::interface::Parameter;
use crate::codegen::is_identifier;
use crate::error::{CodegenError, Result};

/// Everything one generation run reads: entities and DAO interfaces
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarationSet {
    #[serde(default)]
    pub entities: Vec<EntityDefinition>,

    #[serde(default)]
    pub interfaces: Vec<RawInterface>,
}

/// An interface declaration before intent extraction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInterface {
    pub name: String,

    #[serde(default)]
    pub namespace: String,

    #[serde(default)]
    pub methods: Vec<RawMethod>,
}

/// A method declaration with its uninterpreted markers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMethod {
    pub name: String,

    #[serde(default)]
    pub parameters: Vec<Parameter>,

    #[serde(default = "default_return_type")]
    pub return_type: String,

    #[serde(default)]
    pub markers: Vec<RawMarker>,
}

/// A declared marker, e.g. `{ name = "query", text = "..." }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMarker {
    pub name: String,

    #[serde(flatten)]
    pub arguments: BTreeMap<String, String>,
}

fn default_return_type() -> String {
    "()".to_string()
}

impl RawMarker {
    pub fn argument(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).map(String::as_str)
    }
}

impl RawInterface {
    fn validate(&self) -> Result<()> {
        if !is_identifier(&self.name) {
            return Err(CodegenError::ValidationError(format!(
                "interface name `{}` is not a valid identifier",
                self.name
            )));
        }
        if !self.namespace.is_empty() && syn::parse_str::<syn::Path>(&self.namespace).is_err() {
            return Err(CodegenError::ValidationError(format!(
                "interface `{}` namespace `{}` is not a module path",
                self.name, self.namespace
            )));
        }
        Ok(())
    }
}

impl DeclarationSet {
    /// Parse a TOML declaration document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let declarations: DeclarationSet = toml::from_str(content)?;
        declarations.validate()?;
        Ok(declarations)
    }

    /// Load and validate a TOML declaration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|e| match e {
            CodegenError::ParseError(msg) => {
                CodegenError::ParseError(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// Look up an entity by name
    pub fn entity(&self, name: &str) -> Option<&EntityDefinition> {
        self.entities.iter().find(|e| e.name == name)
    }

    /// Entity names are unique, each entity is internally consistent, and
    /// every interface has a usable name and namespace.
    ///
    /// Method-level problems are not checked here; they are reported per
    /// method during generation.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for entity in &self.entities {
            entity.validate()?;
            if !seen.insert(entity.name.as_str()) {
                return Err(CodegenError::ValidationError(format!(
                    "entity `{}` is declared more than once",
                    entity.name
                )));
            }
        }
        for interface in &self.interfaces {
            interface.validate()?;
        }
        Ok(())
    }
}

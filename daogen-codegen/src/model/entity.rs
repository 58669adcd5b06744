//! Entity model: plain value types mapped onto stored records

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::codegen::{default_table_name, is_identifier, is_type};
use crate::error::{CodegenError, Result};

/// A mapped value type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityDefinition {
    /// Type name as visible in the models module (e.g. `User`)
    pub name: String,

    /// Record name used by persist writes (defaults to snake_case of `name`)
    #[serde(default)]
    pub table: Option<String>,

    /// Fields in declaration order
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
}

/// A single entity field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Rust field name
    pub name: String,

    /// Rust type of the field (e.g. `Option<String>`)
    #[serde(rename = "type")]
    pub ty: String,

    /// Column name in the stored record (defaults to `name`)
    #[serde(default)]
    pub column: Option<String>,

    #[serde(flatten)]
    pub accessors: AccessorNames,
}

/// How generated code reads and writes a field.
///
/// Absent accessors mean direct field access, which requires the field to be
/// visible from the generated module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessorNames {
    #[serde(default)]
    pub getter: Option<String>,
    #[serde(default)]
    pub setter: Option<String>,
}

impl EntityDefinition {
    /// Get a field by name
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Record name used by persist writes
    pub fn table_name(&self) -> String {
        self.table
            .clone()
            .unwrap_or_else(|| default_table_name(&self.name))
    }

    /// Whether mapping a row into this entity needs `Default` + setters
    pub fn uses_setters(&self) -> bool {
        self.fields.iter().any(|f| f.accessors.setter.is_some())
    }

    /// Check that the entity can be named and mapped by generated code:
    /// valid identifiers and types, and unique field names
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(CodegenError::ValidationError(
                "entity name must not be empty".into(),
            ));
        }
        if !is_identifier(&self.name) {
            return Err(CodegenError::ValidationError(format!(
                "entity name `{}` is not a valid identifier",
                self.name
            )));
        }
        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(CodegenError::ValidationError(format!(
                    "entity `{}` declares field `{}` more than once",
                    self.name, field.name
                )));
            }
            field.validate(&self.name)?;
        }
        Ok(())
    }
}

impl FieldDefinition {
    /// Column name in the stored record
    pub fn column_name(&self) -> &str {
        self.column.as_deref().unwrap_or(&self.name)
    }

    fn validate(&self, entity: &str) -> Result<()> {
        let invalid = |what: &str, value: &str| {
            Err(CodegenError::ValidationError(format!(
                "entity `{}` field `{}`: {} `{}` is not valid Rust",
                entity, self.name, what, value
            )))
        };
        if !is_identifier(&self.name) {
            return invalid("name", &self.name);
        }
        if !is_type(&self.ty) {
            return invalid("type", &self.ty);
        }
        for accessor in [&self.accessors.getter, &self.accessors.setter]
            .into_iter()
            .flatten()
        {
            if !is_identifier(accessor) {
                return invalid("accessor", accessor);
            }
        }
        Ok(())
    }
}

//! Typed DAO interface model produced by the extractor

use std::fmt;

use serde::{Deserialize, Serialize};

/// A method parameter or other name/type pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

/// A DAO interface with its recognized methods
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaoInterfaceDefinition {
    /// Trait name (e.g. `UserDao`)
    pub name: String,
    /// Module path the trait lives in (e.g. `crate::dao`)
    pub namespace: String,
    /// Methods carrying a recognized intent, in declaration order
    pub methods: Vec<DaoMethodDefinition>,
}

impl DaoInterfaceDefinition {
    /// Full path of the trait
    pub fn qualified_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}::{}", self.namespace, self.name)
        }
    }

    /// Get a method by name
    pub fn method(&self, name: &str) -> Option<&DaoMethodDefinition> {
        self.methods.iter().find(|m| m.name == name)
    }
}

/// A single DAO method with its query intent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaoMethodDefinition {
    pub name: String,
    pub parameters: Vec<Parameter>,
    /// Success type; generated signatures wrap it in the runtime `Result`
    pub return_type: String,
    pub intent: QueryIntent,
    /// Recognized markers beyond the one that determined `intent`
    pub conflicting_markers: Vec<String>,
}

/// Recognized per-method generation strategy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryIntent {
    /// Write one record per call. The entity is inferred from the single
    /// parameter when not given.
    Persist { entity: Option<String> },
    /// Run literal query text with the method parameters bound positionally.
    AdHocQuery {
        query_text: String,
        result_shape: Option<String>,
    },
}

/// Discriminant of [`QueryIntent`], used as the dispatch key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntentKind {
    Persist,
    AdHocQuery,
}

impl QueryIntent {
    pub fn kind(&self) -> IntentKind {
        match self {
            QueryIntent::Persist { .. } => IntentKind::Persist,
            QueryIntent::AdHocQuery { .. } => IntentKind::AdHocQuery,
        }
    }
}

impl fmt::Display for IntentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntentKind::Persist => f.write_str("persist"),
            IntentKind::AdHocQuery => f.write_str("query"),
        }
    }
}

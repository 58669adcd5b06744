//! Method generators: one variant per query intent
//!
//! A generator is built from one [`DaoMethodDefinition`] and validates the
//! method's shape at construction. Invalid methods are reported to the
//! [`DiagnosticReporter`] and come back as [`Skip`]; the caller drops them
//! and moves on to the next method.

mod ad_hoc_query;
mod persist;

pub use ad_hoc_query::AdHocQueryGenerator;
pub use persist::PersistGenerator;

use std::collections::HashSet;

use tracing::trace;

use crate::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticReporter};
use crate::model::{DaoMethodDefinition, EntityDefinition, IntentKind};

use super::artifact::{ConstructorStatement, MemberDeclaration, MethodFragment};
use super::context::GenerationContext;
use super::naming::{escape_ident, is_identifier, is_type, string_literal};

/// The method was rejected and a diagnostic has already been filed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Skip;

/// Code contribution of one DAO method
pub trait MethodGenerator: Send {
    /// Name of the DAO method this generator implements
    fn method_name(&self) -> &str;

    /// Statements to run once when the implementation is constructed
    fn contribute_constructor_init(&self) -> Vec<ConstructorStatement>;

    /// Field and method declarations implementing the DAO method
    fn contribute_members(&self) -> Vec<MemberDeclaration>;

    /// Entity types the generated code refers to
    fn referenced_entities(&self) -> Vec<String>;

    /// All contributions as one immutable fragment
    fn fragment(&self) -> MethodFragment {
        MethodFragment {
            constructor_statements: self.contribute_constructor_init(),
            members: self.contribute_members(),
            entities: self.referenced_entities(),
        }
    }
}

/// Everything a generator constructor needs to validate and build
pub struct MethodScope<'a> {
    pub interface: &'a str,
    pub method: &'a DaoMethodDefinition,
    pub context: &'a GenerationContext<'a>,
    pub reporter: &'a dyn DiagnosticReporter,
}

impl MethodScope<'_> {
    /// File a malformed-method diagnostic and return the skip marker
    pub fn reject(&self, message: impl Into<String>) -> Skip {
        self.reject_with(DiagnosticKind::MalformedMethod, message)
    }

    pub fn reject_with(&self, kind: DiagnosticKind, message: impl Into<String>) -> Skip {
        self.reporter.report(Diagnostic::for_method(
            kind,
            self.interface,
            &self.method.name,
            message,
        ));
        Skip
    }
}

type GeneratorConstructor = fn(&MethodScope<'_>) -> Result<Box<dyn MethodGenerator>, Skip>;

/// Dispatch table from intent to generator variant
const GENERATORS: &[(IntentKind, GeneratorConstructor)] = &[
    (IntentKind::Persist, PersistGenerator::build),
    (IntentKind::AdHocQuery, AdHocQueryGenerator::build),
];

/// Classify a method and build its generator.
///
/// Methods carrying more than one recognized marker are rejected as
/// ambiguous before dispatch, and methods whose names or types could not be
/// spelled in Rust are rejected before any code is produced for them.
pub fn build_method_generator(scope: &MethodScope<'_>) -> Result<Box<dyn MethodGenerator>, Skip> {
    let method = scope.method;
    if !method.conflicting_markers.is_empty() {
        return Err(scope.reject_with(
            DiagnosticKind::AmbiguousIntent,
            format!(
                "carries `{}` and also {}; a method may carry only one query marker",
                method.intent.kind(),
                method
                    .conflicting_markers
                    .iter()
                    .map(|m| format!("`{}`", m))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        ));
    }

    check_signature(scope)?;

    let kind = method.intent.kind();
    trace!("{}::{} classified as {}", scope.interface, method.name, kind);
    let (_, build) = GENERATORS
        .iter()
        .find(|(k, _)| *k == kind)
        .ok_or_else(|| scope.reject(format!("no generator registered for `{}`", kind)))?;
    build(scope)
}

/// Method name, parameter names and parameter types must all be valid Rust
fn check_signature(scope: &MethodScope<'_>) -> Result<(), Skip> {
    let method = scope.method;
    if !is_identifier(&method.name) {
        return Err(scope.reject(format!("`{}` is not a valid method name", method.name)));
    }
    for parameter in &method.parameters {
        if !is_identifier(&parameter.name) {
            return Err(scope.reject(format!(
                "parameter `{}` is not a valid identifier",
                parameter.name
            )));
        }
        if !is_type(&parameter.ty) {
            return Err(scope.reject(format!(
                "parameter `{}` has invalid type `{}`",
                parameter.name, parameter.ty
            )));
        }
    }
    if !is_type(&method.return_type) {
        return Err(scope.reject(format!(
            "invalid return type `{}`",
            method.return_type
        )));
    }
    Ok(())
}

/// `let statement = self.<field>.statement().bind(..)...;` over `arguments`
pub(crate) fn statement_lines(field: &str, arguments: &[String]) -> Vec<String> {
    let mut lines = vec![format!("let statement = self.{}", field), "    .statement()".to_string()];
    lines.extend(arguments.iter().map(|arg| format!("    .bind({})", arg)));
    if let Some(last) = lines.last_mut() {
        last.push(';');
    }
    lines
}

/// Prepared-statement field plus the constructor init that fills it
pub(crate) fn prepared_statement(
    context: &GenerationContext<'_>,
    field: &str,
    text: &str,
) -> (ConstructorStatement, MemberDeclaration) {
    let prepared = context.runtime_path("PreparedStatement");
    (
        ConstructorStatement {
            target: field.to_string(),
            expr: format!("{}::new({})", prepared, string_literal(text)),
        },
        MemberDeclaration::Field(super::artifact::FieldDeclaration {
            name: field.to_string(),
            ty: prepared,
        }),
    )
}

/// Closure mapping one result row into `entity`.
///
/// Uses a struct literal when no setters are declared, otherwise starts from
/// `Default` and assigns field by field.
pub(crate) fn row_mapper(context: &GenerationContext<'_>, entity: &EntityDefinition) -> Vec<String> {
    let row_ext = context.runtime_path("RowExt");
    let read = |ty: &str, column: &str| {
        format!("{}::get::<{}>(row, {})?", row_ext, ty, string_literal(column))
    };

    let mut lines = vec!["|row| {".to_string()];
    if entity.uses_setters() {
        lines.push(format!(
            "    let mut entity = <{} as ::std::default::Default>::default();",
            entity.name
        ));
        for field in &entity.fields {
            let value = read(&field.ty, field.column_name());
            match &field.accessors.setter {
                Some(setter) => lines.push(format!("    entity.{}({});", escape_ident(setter), value)),
                None => lines.push(format!("    entity.{} = {};", escape_ident(&field.name), value)),
            }
        }
        lines.push("    Ok(entity)".to_string());
    } else {
        lines.push(format!("    Ok({} {{", entity.name));
        for field in &entity.fields {
            lines.push(format!(
                "        {}: {},",
                escape_ident(&field.name),
                read(&field.ty, field.column_name())
            ));
        }
        lines.push("    })".to_string());
    }
    lines.push("}".to_string());
    lines
}

/// Names of parameters that appear more than once
pub(crate) fn duplicate_parameters(method: &DaoMethodDefinition) -> Vec<&str> {
    let mut seen = HashSet::new();
    method
        .parameters
        .iter()
        .filter(|p| !seen.insert(p.name.as_str()))
        .map(|p| p.name.as_str())
        .collect()
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::model::{
        AccessorNames, DaoMethodDefinition, EntityDefinition, FieldDefinition, Parameter,
        QueryIntent,
    };

    pub fn make_user() -> EntityDefinition {
        EntityDefinition {
            name: "User".to_string(),
            table: Some("users".to_string()),
            fields: vec![
                FieldDefinition {
                    name: "id".to_string(),
                    ty: "i64".to_string(),
                    column: None,
                    accessors: AccessorNames::default(),
                },
                FieldDefinition {
                    name: "name".to_string(),
                    ty: "String".to_string(),
                    column: Some("user_name".to_string()),
                    accessors: AccessorNames {
                        getter: Some("name".to_string()),
                        setter: None,
                    },
                },
            ],
        }
    }

    pub fn make_method(
        name: &str,
        parameters: &[(&str, &str)],
        return_type: &str,
        intent: QueryIntent,
    ) -> DaoMethodDefinition {
        DaoMethodDefinition {
            name: name.to_string(),
            parameters: parameters
                .iter()
                .map(|(n, t)| Parameter {
                    name: n.to_string(),
                    ty: t.to_string(),
                })
                .collect(),
            return_type: return_type.to_string(),
            intent,
            conflicting_markers: vec![],
        }
    }
}

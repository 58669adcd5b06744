//! Persist: write one entity per call

use tracing::trace;

use crate::codegen::artifact::{ConstructorStatement, MemberDeclaration, MethodDeclaration};
use crate::codegen::naming::{escape_ident, statement_field_name, SESSION_FIELD};
use crate::codegen::return_shape::{entity_name_of, ReturnShape};
use crate::model::{EntityDefinition, Parameter, QueryIntent};

use super::{prepared_statement, statement_lines, MethodGenerator, MethodScope, Skip};

/// Generates an insert of every entity field, bound in declaration order
#[derive(Debug)]
pub struct PersistGenerator {
    method_name: String,
    parameter: Parameter,
    return_type: String,
    shape: ReturnShape,
    entity: String,
    statement_field: String,
    insert_text: String,
    bind_arguments: Vec<String>,
    prepared: (ConstructorStatement, MemberDeclaration),
}

impl PersistGenerator {
    pub fn build(scope: &MethodScope<'_>) -> Result<Box<dyn MethodGenerator>, Skip> {
        let method = scope.method;
        let QueryIntent::Persist { entity } = &method.intent else {
            return Err(scope.reject("not a persist method"));
        };

        let [parameter] = method.parameters.as_slice() else {
            return Err(scope.reject(format!(
                "persist takes exactly one entity parameter, found {}",
                method.parameters.len()
            )));
        };

        let parameter_entity = entity_name_of(&parameter.ty);
        let target = match entity.as_deref().map(str::trim).filter(|e| !e.is_empty()) {
            Some(explicit) => explicit.to_string(),
            None => parameter_entity.clone().ok_or_else(|| {
                scope.reject(format!(
                    "cannot infer the entity from parameter type `{}`",
                    parameter.ty
                ))
            })?,
        };

        let definition = scope
            .context
            .entity(&target)
            .ok_or_else(|| scope.reject(format!("unknown entity `{}`", target)))?;

        if parameter_entity.as_deref() != Some(target.as_str()) {
            return Err(scope.reject(format!(
                "parameter `{}: {}` does not match persisted entity `{}`",
                parameter.name, parameter.ty, target
            )));
        }

        let shape = ReturnShape::resolve(&method.return_type);
        if !matches!(
            shape,
            ReturnShape::Unit | ReturnShape::WriteOutcome | ReturnShape::Applied
        ) {
            return Err(scope.reject(format!(
                "persist must return `()`, `bool` or `WriteOutcome`, found `{}`",
                method.return_type
            )));
        }

        if definition.fields.is_empty() {
            return Err(scope.reject(format!("entity `{}` has no fields to persist", target)));
        }

        let statement_field = statement_field_name(&method.name);
        let insert_text = insert_statement(definition);
        let bind_arguments = bind_arguments(&escape_ident(&parameter.name), definition);
        let prepared = prepared_statement(scope.context, &statement_field, &insert_text);

        trace!(
            "{}::{} persists {} into {}",
            scope.interface,
            method.name,
            target,
            definition.table_name()
        );

        Ok(Box::new(Self {
            method_name: method.name.clone(),
            parameter: parameter.clone(),
            return_type: method.return_type.clone(),
            shape,
            entity: target,
            statement_field,
            insert_text,
            bind_arguments,
            prepared,
        }))
    }

    /// Prepared insert text
    pub fn insert_text(&self) -> &str {
        &self.insert_text
    }

    fn body(&self) -> Vec<String> {
        // Arguments are bound before the session handle takes its local name,
        // so a parameter called `session` is never shadowed.
        let mut body = statement_lines(&self.statement_field, &self.bind_arguments);
        body.push(format!("let session = &self.{};", SESSION_FIELD));
        match self.shape {
            ReturnShape::WriteOutcome => body.push("statement.execute(session).await".to_string()),
            ReturnShape::Applied => {
                body.push("Ok(statement.execute(session).await?.applied())".to_string())
            }
            _ => {
                body.push("statement.execute(session).await?;".to_string());
                body.push("Ok(())".to_string());
            }
        }
        body
    }
}

impl MethodGenerator for PersistGenerator {
    fn method_name(&self) -> &str {
        &self.method_name
    }

    fn contribute_constructor_init(&self) -> Vec<ConstructorStatement> {
        vec![self.prepared.0.clone()]
    }

    fn contribute_members(&self) -> Vec<MemberDeclaration> {
        vec![
            self.prepared.1.clone(),
            MemberDeclaration::Method(MethodDeclaration {
                name: self.method_name.clone(),
                parameters: vec![self.parameter.clone()],
                return_type: self.return_type.clone(),
                body: self.body(),
            }),
        ]
    }

    fn referenced_entities(&self) -> Vec<String> {
        vec![self.entity.clone()]
    }
}

/// `INSERT INTO <table> (<columns>) VALUES (?, ...)`
fn insert_statement(entity: &EntityDefinition) -> String {
    let columns: Vec<&str> = entity.fields.iter().map(|f| f.column_name()).collect();
    let placeholders = vec!["?"; columns.len()];
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        entity.table_name(),
        columns.join(", "),
        placeholders.join(", ")
    )
}

fn bind_arguments(receiver: &str, entity: &EntityDefinition) -> Vec<String> {
    entity
        .fields
        .iter()
        .map(|field| match &field.accessors.getter {
            Some(getter) => format!("{}.{}()", receiver, escape_ident(getter)),
            None => format!("&{}.{}", receiver, escape_ident(&field.name)),
        })
        .collect()
}

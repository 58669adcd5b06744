//! Ad-hoc query: run literal query text with parameters bound positionally

use tracing::trace;

use crate::codegen::artifact::{ConstructorStatement, MemberDeclaration, MethodDeclaration};
use crate::codegen::context::GenerationContext;
use crate::codegen::naming::{escape_ident, statement_field_name, SESSION_FIELD};
use crate::codegen::return_shape::{entity_name_of, ReturnShape};
use crate::model::{EntityDefinition, Parameter, QueryIntent};

use super::{
    duplicate_parameters, prepared_statement, row_mapper, statement_lines, MethodGenerator,
    MethodScope, Skip,
};

#[derive(Debug)]
pub struct AdHocQueryGenerator {
    method_name: String,
    parameters: Vec<Parameter>,
    return_type: String,
    shape: ReturnShape,
    statement_field: String,
    /// Row mapping closure, present for entity shapes
    mapper: Option<Vec<String>>,
    /// Known entities named by parameter or result types
    entities: Vec<String>,
    prepared: (ConstructorStatement, MemberDeclaration),
}

impl AdHocQueryGenerator {
    pub fn build(scope: &MethodScope<'_>) -> Result<Box<dyn MethodGenerator>, Skip> {
        let method = scope.method;
        let QueryIntent::AdHocQuery {
            query_text,
            result_shape,
        } = &method.intent
        else {
            return Err(scope.reject("not an ad-hoc query method"));
        };

        if query_text.trim().is_empty() {
            return Err(scope.reject("query text must not be empty"));
        }

        let duplicates = duplicate_parameters(method);
        if !duplicates.is_empty() {
            return Err(scope.reject(format!(
                "parameter `{}` is declared more than once",
                duplicates.join("`, `")
            )));
        }

        let result_entity = match result_shape {
            Some(name) => Some(
                scope
                    .context
                    .entity(name)
                    .ok_or_else(|| scope.reject(format!("unknown result entity `{}`", name)))?,
            ),
            None => None,
        };

        let shape = ReturnShape::resolve(&method.return_type);
        let mapped = match (&shape, result_entity) {
            (ReturnShape::Unit | ReturnShape::ResultSet, _) => None,
            (
                ReturnShape::Entity(name)
                | ReturnShape::OptionalEntity(name)
                | ReturnShape::EntityList(name),
                Some(entity),
            ) if *name == entity.name => Some(entity),
            (
                ReturnShape::Entity(name)
                | ReturnShape::OptionalEntity(name)
                | ReturnShape::EntityList(name),
                Some(entity),
            ) => {
                return Err(scope.reject(format!(
                    "return type maps `{}` but the query result is `{}`",
                    name, entity.name
                )))
            }
            (
                ReturnShape::Entity(_) | ReturnShape::OptionalEntity(_) | ReturnShape::EntityList(_),
                None,
            ) => {
                return Err(scope.reject(format!(
                    "return type `{}` maps rows but the query declares no result entity",
                    method.return_type
                )))
            }
            _ => {
                return Err(scope.reject(format!(
                    "unsupported return type `{}` for a query",
                    method.return_type
                )))
            }
        };

        let mut entities: Vec<String> = method
            .parameters
            .iter()
            .filter_map(|p| entity_name_of(&p.ty))
            .filter(|name| scope.context.entity(name).is_some())
            .collect();
        entities.extend(mapped.map(|entity| entity.name.clone()));
        let mapper = mapped.map(|entity| mapping_call(scope.context, &shape, entity));
        let statement_field = statement_field_name(&method.name);
        let prepared = prepared_statement(scope.context, &statement_field, query_text.trim());
        trace!(
            "{}::{} runs {:?} with {} parameter(s)",
            scope.interface,
            method.name,
            query_text.trim(),
            method.parameters.len()
        );

        Ok(Box::new(Self {
            method_name: method.name.clone(),
            parameters: method.parameters.clone(),
            return_type: method.return_type.clone(),
            shape,
            statement_field,
            mapper,
            entities,
            prepared,
        }))
    }

    fn body(&self) -> Vec<String> {
        let arguments: Vec<String> = self
            .parameters
            .iter()
            .map(|p| escape_ident(&p.name))
            .collect();

        // Arguments are bound before the session handle takes its local name,
        // so a parameter called `session` is never shadowed.
        let mut body = statement_lines(&self.statement_field, &arguments);
        body.push(format!("let session = &self.{};", SESSION_FIELD));
        match (&self.shape, &self.mapper) {
            (ReturnShape::Unit, _) => {
                body.push("statement.execute(session).await?;".to_string());
                body.push("Ok(())".to_string());
            }
            (_, Some(mapper)) => {
                body.push("let result = statement.fetch(session).await?;".to_string());
                body.extend(mapper.iter().cloned());
            }
            _ => body.push("statement.fetch(session).await".to_string()),
        }
        body
    }
}

impl MethodGenerator for AdHocQueryGenerator {
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
                parameters: self.parameters.clone(),
                return_type: self.return_type.clone(),
                body: self.body(),
            }),
        ]
    }

    fn referenced_entities(&self) -> Vec<String> {
        self.entities.clone()
    }
}

/// `result.map_one(|row| { ... })` and friends, per element shape
fn mapping_call(
    context: &GenerationContext<'_>,
    shape: &ReturnShape,
    entity: &EntityDefinition,
) -> Vec<String> {
    let call = match shape {
        ReturnShape::OptionalEntity(_) => "map_optional",
        ReturnShape::EntityList(_) => "map_all",
        _ => "map_one",
    };
    let mut lines = row_mapper(context, entity);
    if let Some(first) = lines.first_mut() {
        *first = format!("result.{}({}", call, first);
    }
    if let Some(last) = lines.last_mut() {
        last.push(')');
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::method::test_support::*;
    use crate::diagnostics::{CollectingReporter, DiagnosticKind};
    use crate::model::DaoMethodDefinition;

    fn build(
        method: &DaoMethodDefinition,
        entities: &[EntityDefinition],
        reporter: &CollectingReporter,
    ) -> Result<Box<dyn MethodGenerator>, Skip> {
        let context = GenerationContext::new(entities);
        let scope = MethodScope {
            interface: "UserDao",
            method,
            context: &context,
            reporter,
        };
        AdHocQueryGenerator::build(&scope)
    }

    fn query(
        parameters: &[(&str, &str)],
        return_type: &str,
        text: &str,
        result: Option<&str>,
    ) -> DaoMethodDefinition {
        make_method(
            "find",
            parameters,
            return_type,
            QueryIntent::AdHocQuery {
                query_text: text.to_string(),
                result_shape: result.map(str::to_string),
            },
        )
    }

    fn method_body(generator: &dyn MethodGenerator) -> String {
        generator
            .contribute_members()
            .into_iter()
            .find_map(|m| match m {
                MemberDeclaration::Method(method) => Some(method.body.join("\n")),
                MemberDeclaration::Field(_) => None,
            })
            .unwrap()
    }

    #[test]
    fn test_parameters_bound_in_order() {
        let entities = vec![make_user()];
        let reporter = CollectingReporter::new();
        let method = query(
            &[("min", "i64"), ("max", "i64"), ("type", "&str")],
            "()",
            "DELETE FROM users WHERE id BETWEEN ? AND ? AND kind = ?",
            None,
        );
        let generator = build(&method, &entities, &reporter).unwrap();
        let body = method_body(generator.as_ref());

        let min = body.find(".bind(min)").unwrap();
        let max = body.find(".bind(max)").unwrap();
        let kind = body.find(".bind(r#type);").unwrap();
        assert!(min < max && max < kind);
        assert!(body.ends_with("statement.execute(session).await?;\nOk(())"));
        assert!(generator.referenced_entities().is_empty());
    }

    #[test]
    fn test_parameter_named_session_is_bound_before_the_handle() {
        let entities = vec![make_user()];
        let reporter = CollectingReporter::new();
        let method = query(
            &[("session", "&str")],
            "()",
            "DELETE FROM logins WHERE token = ?",
            None,
        );
        let generator = build(&method, &entities, &reporter).unwrap();
        let body = method_body(generator.as_ref());

        let bind = body.find(".bind(session);").unwrap();
        let handle = body.find("let session = &self.session;").unwrap();
        assert!(bind < handle);
        assert!(reporter.is_empty());
    }

    #[test]
    fn test_entity_shapes() {
        let entities = vec![make_user()];
        let reporter = CollectingReporter::new();
        let text = "SELECT id, user_name FROM users WHERE id = ?";

        let cases = [
            ("User", "result.map_one(|row| {"),
            ("Option<User>", "result.map_optional(|row| {"),
            ("Vec<User>", "result.map_all(|row| {"),
        ];
        for (return_type, call) in cases {
            let method = query(&[("id", "i64")], return_type, text, Some("User"));
            let generator = build(&method, &entities, &reporter).unwrap();
            let body = method_body(generator.as_ref());
            assert!(body.contains("let result = statement.fetch(session).await?;"));
            assert!(body.contains(call), "{} should use {}", return_type, call);
            assert!(body.ends_with("})"));
            assert_eq!(generator.referenced_entities(), vec!["User".to_string()]);
        }
        assert!(reporter.is_empty());
    }

    #[test]
    fn test_raw_result_set() {
        let entities = vec![make_user()];
        let reporter = CollectingReporter::new();
        let method = query(&[], "daogen::ResultSet", "SELECT 1", Some("User"));
        let generator = build(&method, &entities, &reporter).unwrap();
        assert!(method_body(generator.as_ref()).ends_with("statement.fetch(session).await"));
        assert!(generator.referenced_entities().is_empty());

        let init = generator.contribute_constructor_init();
        assert_eq!(init[0].target, "find_statement");
        assert_eq!(init[0].expr, "daogen::PreparedStatement::new(\"SELECT 1\")");
    }

    #[test]
    fn test_parameter_entities_are_referenced() {
        let entities = vec![make_user()];
        let reporter = CollectingReporter::new();
        let method = query(
            &[("u", "&User"), ("limit", "i64")],
            "()",
            "UPDATE users SET user_name = ? LIMIT ?",
            None,
        );
        let generator = build(&method, &entities, &reporter).unwrap();
        assert_eq!(generator.referenced_entities(), vec!["User".to_string()]);
    }

    #[test]
    fn test_malformed_queries() {
        let entities = vec![make_user()];
        let cases = [
            query(&[], "()", "   ", None),
            query(&[], "Vec<User>", "SELECT id FROM users", None),
            query(&[], "Vec<User>", "SELECT id FROM users", Some("Widget")),
            query(&[], "Vec<Order>", "SELECT id FROM users", Some("User")),
            query(&[], "bool", "SELECT 1", None),
            query(&[("a", "i64"), ("a", "i64")], "()", "SELECT ?, ?", None),
        ];
        for method in &cases {
            let reporter = CollectingReporter::new();
            assert_eq!(build(method, &entities, &reporter).err(), Some(Skip));
            let diagnostics = reporter.diagnostics();
            assert_eq!(diagnostics.len(), 1, "{:?}", method);
            assert_eq!(diagnostics[0].kind, DiagnosticKind::MalformedMethod);
        }
    }
}

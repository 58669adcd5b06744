//! Rendering of a generated artifact into Rust source

use crate::codegen::{escape_ident, GeneratedArtifact, MemberDeclaration, MethodDeclaration};
use crate::error::Result;

/// First line of every generated file
pub const GENERATED_HEADER: &str = "// @generated by daogen-codegen. Do not edit by hand.";

/// Render and format the full contents of one generated file
pub fn render_file(artifact: &GeneratedArtifact) -> Result<String> {
    let formatted = format_source(&render_artifact(artifact))?;
    Ok(format!("{}\n\n{}", GENERATED_HEADER, formatted))
}

/// Parse `source` as a Rust file and pretty-print it.
///
/// Fails with [`crate::CodegenError::Emit`] when the source does not parse.
pub fn format_source(source: &str) -> Result<String> {
    let file = syn::parse_file(source)?;
    Ok(prettyplease::unparse(&file))
}

/// Render an artifact as unformatted Rust source
pub fn render_artifact(artifact: &GeneratedArtifact) -> String {
    let runtime = &artifact.runtime_crate;
    let name = &artifact.implementation_name;
    let bound = &artifact.session_trait;
    let mut code = String::new();

    code.push_str("#[allow(unused_imports)]\n");
    code.push_str(&format!("use {}::{{ResultSet, WriteOutcome}};\n", runtime));
    for import in &artifact.entity_imports {
        code.push_str("#[allow(unused_imports)]\n");
        code.push_str(&format!("use {};\n", import));
    }
    code.push('\n');

    code.push_str(&format!(
        "/// Implementation of [`{}`] over a [`{}`].\n",
        trait_path(artifact),
        bound
    ));
    code.push_str("///\n/// Generated by daogen-codegen; regenerate instead of editing.\n");
    code.push_str("#[allow(non_camel_case_types, dead_code)]\n");
    code.push_str(&format!("pub struct {}<S: {}> {{\n", name, bound));
    code.push_str(&format!("    {}: S,\n", artifact.session_field_name));
    for field in artifact.fields() {
        code.push_str(&format!("    {}: {},\n", field.name, field.ty));
    }
    code.push_str("}\n\n");

    code.push_str(&format!("impl<S: {}> {}<S> {{\n", bound, name));
    code.push_str(&format!(
        "    pub fn new({}: S) -> Self {{\n",
        artifact.session_field_name
    ));
    for statement in &artifact.constructor_statements {
        code.push_str(&format!(
            "        let {} = {};\n",
            statement.target, statement.expr
        ));
    }
    let mut initialisers = vec![artifact.session_field_name.clone()];
    initialisers.extend(artifact.fields().map(|f| f.name.clone()));
    code.push_str(&format!("        Self {{ {} }}\n", initialisers.join(", ")));
    code.push_str("    }\n}\n\n");

    code.push_str(&format!(
        "impl<S: {}> {} for {}<S> {{\n",
        bound,
        trait_path(artifact),
        name
    ));
    for member in &artifact.members {
        if let MemberDeclaration::Method(method) = member {
            code.push_str(&render_method(runtime, method));
        }
    }
    code.push_str("}\n");
    code
}

fn render_method(runtime: &str, method: &MethodDeclaration) -> String {
    let mut parameters = vec!["&self".to_string()];
    parameters.extend(
        method
            .parameters
            .iter()
            .map(|p| format!("{}: {}", escape_ident(&p.name), p.ty)),
    );

    let mut code = format!(
        "    async fn {}({}) -> {}::Result<{}> {{\n",
        escape_ident(&method.name),
        parameters.join(", "),
        runtime,
        method.return_type
    );
    for line in &method.body {
        code.push_str("        ");
        code.push_str(line);
        code.push('\n');
    }
    code.push_str("    }\n");
    code
}

/// Path of the implemented trait as seen from the generated module.
///
/// Interfaces declared without a namespace are expected in the module that
/// includes the generated code.
fn trait_path(artifact: &GeneratedArtifact) -> String {
    if artifact.namespace.is_empty() {
        format!("super::{}", artifact.interface_name())
    } else {
        artifact.implemented_interface.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::{ConstructorStatement, FieldDeclaration};
    use crate::model::Parameter;

    fn make_artifact(members: Vec<MemberDeclaration>) -> GeneratedArtifact {
        let constructor_statements = members
            .iter()
            .filter_map(|m| match m {
                MemberDeclaration::Field(f) => Some(ConstructorStatement {
                    target: f.name.clone(),
                    expr: "daogen::PreparedStatement::new(\"SELECT 1\")".to_string(),
                }),
                MemberDeclaration::Method(_) => None,
            })
            .collect();
        GeneratedArtifact {
            implementation_name: "UserDao_Impl".to_string(),
            namespace: "crate::dao".to_string(),
            implemented_interface: "crate::dao::UserDao".to_string(),
            runtime_crate: "daogen".to_string(),
            session_trait: "daogen::Session".to_string(),
            session_field_name: "session".to_string(),
            constructor_statements,
            members,
            entity_imports: vec!["crate::models::User".to_string()],
        }
    }

    #[test]
    fn test_empty_implementation_renders() {
        let source = render_file(&make_artifact(vec![])).unwrap();
        assert!(source.starts_with(GENERATED_HEADER));
        assert!(source.contains("pub struct UserDao_Impl<S: daogen::Session> {"));
        assert!(source.contains("impl<S: daogen::Session> crate::dao::UserDao for UserDao_Impl<S>"));
        assert!(source.contains("use crate::models::User;"));
        assert!(syn::parse_file(&source).is_ok());
    }

    #[test]
    fn test_method_renders() {
        let artifact = make_artifact(vec![
            MemberDeclaration::Field(FieldDeclaration {
                name: "ping_statement".to_string(),
                ty: "daogen::PreparedStatement".to_string(),
            }),
            MemberDeclaration::Method(MethodDeclaration {
                name: "ping".to_string(),
                parameters: vec![Parameter {
                    name: "type".to_string(),
                    ty: "&str".to_string(),
                }],
                return_type: "ResultSet".to_string(),
                body: vec![
                    "let session = &self.session;".to_string(),
                    "let statement = self.ping_statement.statement().bind(r#type);".to_string(),
                    "statement.fetch(session).await".to_string(),
                ],
            }),
        ]);
        let source = render_file(&artifact).unwrap();
        assert!(source.contains(
            "async fn ping(&self, r#type: &str) -> daogen::Result<ResultSet> {"
        ));
        assert!(source.contains(
            "let ping_statement = daogen::PreparedStatement::new(\"SELECT 1\");"
        ));
    }

    #[test]
    fn test_unparseable_output_is_an_emit_error() {
        let err = format_source("fn broken( {").unwrap_err();
        assert!(matches!(err, crate::CodegenError::Emit(_)));
    }

    #[test]
    fn test_empty_namespace_uses_parent_module() {
        let mut artifact = make_artifact(vec![]);
        artifact.namespace = String::new();
        artifact.implemented_interface = "UserDao".to_string();
        let source = render_artifact(&artifact);
        assert!(source.contains("super::UserDao for UserDao_Impl<S>"));
    }
}

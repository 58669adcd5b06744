//! Generated artifact: the assembled implementation of one DAO interface

use crate::model::Parameter;

/// A statement executed once when an implementation instance is constructed.
///
/// Rendered as `let <target> = <expr>;`. A target that names a field member
/// initialises that field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorStatement {
    pub target: String,
    pub expr: String,
}

/// A private field of the implementation type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDeclaration {
    pub name: String,
    pub ty: String,
}

/// A trait method implemented by the generated type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDeclaration {
    pub name: String,
    pub parameters: Vec<Parameter>,
    /// Success type; rendered wrapped in the runtime `Result`
    pub return_type: String,
    /// Body lines, without the surrounding braces
    pub body: Vec<String>,
}

/// A member contributed by a method generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberDeclaration {
    Field(FieldDeclaration),
    Method(MethodDeclaration),
}

/// Everything one method generator contributes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MethodFragment {
    pub constructor_statements: Vec<ConstructorStatement>,
    pub members: Vec<MemberDeclaration>,
    /// Entity type names the generated code refers to
    pub entities: Vec<String>,
}

/// The fully assembled implementation of one DAO interface.
///
/// Immutable once built: the orchestrator folds every method fragment into
/// it in a single pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    /// `<Interface>_Impl`
    pub implementation_name: String,
    /// Module path shared with the implemented interface
    pub namespace: String,
    /// Full path of the implemented trait
    pub implemented_interface: String,
    /// Path of the runtime crate (e.g. `daogen`)
    pub runtime_crate: String,
    /// Trait bound of the session type parameter (e.g. `daogen::Session`)
    pub session_trait: String,
    pub session_field_name: String,
    pub constructor_statements: Vec<ConstructorStatement>,
    pub members: Vec<MemberDeclaration>,
    /// Full paths of entity types to import, sorted and unique
    pub entity_imports: Vec<String>,
}

impl GeneratedArtifact {
    /// Generated trait methods, in fold order
    pub fn methods(&self) -> impl Iterator<Item = &MethodDeclaration> {
        self.members.iter().filter_map(|m| match m {
            MemberDeclaration::Method(method) => Some(method),
            MemberDeclaration::Field(_) => None,
        })
    }

    /// Fields beyond the session field, in fold order
    pub fn fields(&self) -> impl Iterator<Item = &FieldDeclaration> {
        self.members.iter().filter_map(|m| match m {
            MemberDeclaration::Field(field) => Some(field),
            MemberDeclaration::Method(_) => None,
        })
    }

    /// Get a generated method by name
    pub fn method(&self, name: &str) -> Option<&MethodDeclaration> {
        self.methods().find(|m| m.name == name)
    }

    /// Trait name without its module path
    pub fn interface_name(&self) -> &str {
        self.implemented_interface
            .rsplit("::")
            .next()
            .unwrap_or(&self.implemented_interface)
    }
}

//! Per-interface orchestration: classify methods, collect fragments, assemble

use std::collections::{BTreeSet, HashSet};

use tracing::debug;

use crate::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticReporter};
use crate::error::{CodegenError, Result};
use crate::model::DaoInterfaceDefinition;

use super::artifact::{GeneratedArtifact, MethodFragment};
use super::context::GenerationContext;
use super::method::{build_method_generator, MethodScope};
use super::naming::{implementation_name, module_name};
use super::registry::ImplementationRegistry;

/// Generates the implementation of one DAO interface
pub struct DaoImplementationGenerator<'a> {
    interface: &'a DaoInterfaceDefinition,
    context: &'a GenerationContext<'a>,
    implementation_name: String,
}

impl<'a> DaoImplementationGenerator<'a> {
    pub fn new(interface: &'a DaoInterfaceDefinition, context: &'a GenerationContext<'a>) -> Self {
        Self {
            interface,
            context,
            implementation_name: implementation_name(&interface.name),
        }
    }

    pub fn implementation_name(&self) -> &str {
        &self.implementation_name
    }

    /// Run the full pass for this interface.
    ///
    /// Malformed methods are reported and left out of the artifact. A naming
    /// collision is reported and returned as an error; nothing is generated
    /// for the interface in that case.
    pub fn generate(
        &self,
        registry: &ImplementationRegistry,
        reporter: &dyn DiagnosticReporter,
    ) -> Result<GeneratedArtifact> {
        let interface = self.interface;
        if let Err(err) = registry.register(&interface.name, &self.implementation_name) {
            if let CodegenError::NamingCollision { .. } = err {
                reporter.report(Diagnostic::for_interface(
                    DiagnosticKind::NamingCollision,
                    &interface.name,
                    format!(
                        "`{}` or its module `{}` is already claimed; skipping interface",
                        self.implementation_name,
                        module_name(&self.implementation_name)
                    ),
                ));
            }
            return Err(err);
        }

        debug!(
            "Generating {} for {} ({} methods)",
            self.implementation_name,
            interface.qualified_name(),
            interface.methods.len()
        );

        let mut seen = HashSet::new();
        let mut fragments = Vec::with_capacity(interface.methods.len());
        for method in &interface.methods {
            if !seen.insert(method.name.as_str()) {
                reporter.report(Diagnostic::for_method(
                    DiagnosticKind::MalformedMethod,
                    &interface.name,
                    &method.name,
                    "method is declared more than once",
                ));
                continue;
            }

            let scope = MethodScope {
                interface: &interface.name,
                method,
                context: self.context,
                reporter,
            };
            if let Ok(generator) = build_method_generator(&scope) {
                fragments.push(generator.fragment());
            }
        }

        let artifact = self.assemble(fragments);
        debug!(
            "{}: {} of {} methods generated",
            self.implementation_name,
            artifact.methods().count(),
            interface.methods.len()
        );
        Ok(artifact)
    }

    /// Fold fragments, in order, into the finished artifact
    fn assemble(&self, fragments: Vec<MethodFragment>) -> GeneratedArtifact {
        let mut constructor_statements = Vec::new();
        let mut members = Vec::new();
        let mut entities = BTreeSet::new();
        for fragment in fragments {
            constructor_statements.extend(fragment.constructor_statements);
            members.extend(fragment.members);
            entities.extend(fragment.entities);
        }

        GeneratedArtifact {
            implementation_name: self.implementation_name.clone(),
            namespace: self.interface.namespace.clone(),
            implemented_interface: self.interface.qualified_name(),
            runtime_crate: self.context.runtime().to_string(),
            session_trait: self.context.runtime_path("Session"),
            session_field_name: self.context.session_field_name().to_string(),
            constructor_statements,
            members,
            entity_imports: entities
                .into_iter()
                .map(|entity| self.context.entity_path(&entity))
                .collect(),
        }
    }
}

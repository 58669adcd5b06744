//! Generation session: runs the orchestrator over many interfaces

use std::panic;
use std::thread;

use tracing::{debug, info};

use crate::diagnostics::DiagnosticReporter;
use crate::error::Result;
use crate::model::DaoInterfaceDefinition;

use super::artifact::GeneratedArtifact;
use super::context::GenerationContext;
use super::orchestrator::DaoImplementationGenerator;
use super::registry::ImplementationRegistry;

/// One generation run: shared context, name registry and diagnostics sink
pub struct GenerationSession<'a> {
    context: GenerationContext<'a>,
    registry: ImplementationRegistry,
    reporter: &'a dyn DiagnosticReporter,
    parallel: bool,
}

impl<'a> GenerationSession<'a> {
    /// Create a new session with an empty registry
    pub fn new(context: GenerationContext<'a>, reporter: &'a dyn DiagnosticReporter) -> Self {
        Self {
            context,
            registry: ImplementationRegistry::new(),
            reporter,
            parallel: false,
        }
    }

    /// Process interfaces on scoped threads
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn context(&self) -> &GenerationContext<'a> {
        &self.context
    }

    pub fn registry(&self) -> &ImplementationRegistry {
        &self.registry
    }

    /// Generate the implementation of a single interface
    pub fn generate_interface(
        &self,
        interface: &DaoInterfaceDefinition,
    ) -> Result<GeneratedArtifact> {
        DaoImplementationGenerator::new(interface, &self.context)
            .generate(&self.registry, self.reporter)
    }

    /// Generate every interface; results come back in input order
    pub fn generate_all(
        &self,
        interfaces: &[DaoInterfaceDefinition],
    ) -> Vec<Result<GeneratedArtifact>> {
        info!(
            "Generating {} interface(s){}",
            interfaces.len(),
            if self.parallel { " in parallel" } else { "" }
        );

        if !self.parallel || interfaces.len() < 2 {
            return interfaces
                .iter()
                .map(|interface| self.generate_interface(interface))
                .collect();
        }

        thread::scope(|scope| {
            let handles: Vec<_> = interfaces
                .iter()
                .map(|interface| scope.spawn(move || self.generate_interface(interface)))
                .collect();
            debug!("Spawned {} generation threads", handles.len());
            handles
                .into_iter()
                .map(|handle| handle.join().unwrap_or_else(|p| panic::resume_unwind(p)))
                .collect()
        })
    }
}

//! User-facing diagnostics filed during generation

use std::fmt;
use std::sync::{Mutex, PoisonError};

use tracing::warn;

/// What kind of problem a diagnostic describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// A method's shape does not satisfy its intent
    MalformedMethod,
    /// A method carries more than one recognized intent marker
    AmbiguousIntent,
    /// The implementation name for an interface is already claimed
    NamingCollision,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DiagnosticKind::MalformedMethod => "malformed method",
            DiagnosticKind::AmbiguousIntent => "ambiguous intent",
            DiagnosticKind::NamingCollision => "naming collision",
        };
        f.write_str(label)
    }
}

/// A single user-facing message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Interface the problem was found in
    pub interface: String,
    /// Method the problem was found in, if method-scoped
    pub method: Option<String>,
    pub message: String,
}

impl Diagnostic {
    pub fn for_method(
        kind: DiagnosticKind,
        interface: &str,
        method: &str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            interface: interface.to_string(),
            method: Some(method.to_string()),
            message: message.into(),
        }
    }

    pub fn for_interface(kind: DiagnosticKind, interface: &str, message: impl Into<String>) -> Self {
        Self {
            kind,
            interface: interface.to_string(),
            method: None,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.method {
            Some(method) => write!(
                f,
                "{}: {}::{}: {}",
                self.kind, self.interface, method, self.message
            ),
            None => write!(f, "{}: {}: {}", self.kind, self.interface, self.message),
        }
    }
}

/// Receives diagnostics from the generator.
///
/// Implementations must be shareable across interface passes that run on
/// different threads.
pub trait DiagnosticReporter: Send + Sync {
    fn report(&self, diagnostic: Diagnostic);
}

/// Logs every diagnostic as a `tracing` warning and keeps nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl DiagnosticReporter for TracingReporter {
    fn report(&self, diagnostic: Diagnostic) {
        warn!("{}", diagnostic);
    }
}

/// Logs (through [`TracingReporter`]) and retains every diagnostic, in the
/// order received.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all diagnostics filed so far
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DiagnosticReporter for CollectingReporter {
    fn report(&self, diagnostic: Diagnostic) {
        TracingReporter.report(diagnostic.clone());
        self.diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collecting_reporter_keeps_order() {
        let reporter = CollectingReporter::new();
        assert!(reporter.is_empty());

        reporter.report(Diagnostic::for_method(
            DiagnosticKind::MalformedMethod,
            "UserDao",
            "save",
            "first",
        ));
        reporter.report(Diagnostic::for_interface(
            DiagnosticKind::NamingCollision,
            "UserDao",
            "second",
        ));

        let diagnostics = reporter.diagnostics();
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].message, "first");
        assert_eq!(diagnostics[1].method, None);
    }

    #[test]
    fn test_display() {
        let diagnostic = Diagnostic::for_method(
            DiagnosticKind::AmbiguousIntent,
            "UserDao",
            "save",
            "carries both `persist` and `query`",
        );
        assert_eq!(
            diagnostic.to_string(),
            "ambiguous intent: UserDao::save: carries both `persist` and `query`"
        );
    }
}

//! Statement builders for daogen

use std::sync::Arc;

use crate::error::Result;
use crate::result::{ResultSet, WriteOutcome};
use crate::traits::{Session, ToValue};
use crate::value::Value;

/// A reusable statement template bound to literal text.
///
/// Generated implementations create one per DAO method at construction time
/// and derive a fresh [`Statement`] per invocation. Cloning is cheap: the
/// text is shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedStatement {
    text: Arc<str>,
}

impl PreparedStatement {
    /// Prepare a template for the given text.
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        Self { text: text.into() }
    }

    /// Get the statement text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Start a new statement with no parameters bound.
    pub fn statement(&self) -> Statement {
        Statement {
            text: Arc::clone(&self.text),
            params: Vec::new(),
        }
    }
}

/// A statement request that supports fluent parameter binding.
///
/// # Example
///
/// ```ignore
/// use daogen::{PreparedStatement, Session};
///
/// async fn count(session: &impl Session, prepared: &PreparedStatement) -> daogen::Result<usize> {
///     let rows = prepared.statement().bind(42).fetch(session).await?;
///     Ok(rows.len())
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    text: Arc<str>,
    params: Vec<Value>,
}

impl Statement {
    /// Create a one-off statement with the given text.
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        Self {
            text: text.into(),
            params: Vec::new(),
        }
    }

    /// Bind a single value.
    ///
    /// Values are bound positionally, in call order.
    pub fn bind<T: ToValue>(mut self, value: T) -> Self {
        self.params.push(value.to_value());
        self
    }

    /// Bind multiple values.
    pub fn bind_all<T: ToValue>(mut self, values: &[T]) -> Self {
        self.params.extend(values.iter().map(ToValue::to_value));
        self
    }

    /// Get the statement text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the bound parameters.
    pub fn params(&self) -> &[Value] {
        &self.params
    }

    /// Take ownership of the parameters.
    pub fn into_params(self) -> Vec<Value> {
        self.params
    }

    /// Execute as a write.
    pub async fn execute<S: Session + ?Sized>(self, session: &S) -> Result<WriteOutcome> {
        session.execute(self).await
    }

    /// Execute as a read and return the raw result.
    pub async fn fetch<S: Session + ?Sized>(self, session: &S) -> Result<ResultSet> {
        session.query(self).await
    }
}

//! Session trait: the query-execution handle generated DAOs are wired to

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::result::{ResultSet, WriteOutcome};
use crate::statement::Statement;

/// A live query-execution handle supplied by the host application.
///
/// Generated `*_Impl` types own one session and route every method through
/// it. Statements carry literal text plus positional parameters; how the
/// text is interpreted is entirely up to the implementation.
#[async_trait]
pub trait Session: Send + Sync {
    /// Execute a write and report its outcome.
    async fn execute(&self, statement: Statement) -> Result<WriteOutcome>;

    /// Execute a read and return every row.
    async fn query(&self, statement: Statement) -> Result<ResultSet>;
}

#[async_trait]
impl<'a, S: Session + ?Sized> Session for &'a S {
    async fn execute(&self, statement: Statement) -> Result<WriteOutcome> {
        (**self).execute(statement).await
    }

    async fn query(&self, statement: Statement) -> Result<ResultSet> {
        (**self).query(statement).await
    }
}

#[async_trait]
impl<S: Session + ?Sized> Session for Arc<S> {
    async fn execute(&self, statement: Statement) -> Result<WriteOutcome> {
        (**self).execute(statement).await
    }

    async fn query(&self, statement: Statement) -> Result<ResultSet> {
        (**self).query(statement).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::ResultRow;
    use crate::value::Value;
    use std::sync::Mutex;

    /// Answers every read with one row echoing the statement text
    #[derive(Default)]
    struct EchoSession {
        seen: Mutex<Vec<Statement>>,
    }

    #[async_trait]
    impl Session for EchoSession {
        async fn execute(&self, statement: Statement) -> Result<WriteOutcome> {
            let rows_affected = statement.params().len() as u64;
            self.seen.lock().unwrap().push(statement);
            Ok(WriteOutcome {
                rows_affected,
                last_insert_id: None,
            })
        }

        async fn query(&self, statement: Statement) -> Result<ResultSet> {
            let row = ResultRow::new().with("text", statement.text());
            self.seen.lock().unwrap().push(statement);
            Ok(ResultSet::new(vec![row]))
        }
    }

    #[tokio::test]
    async fn test_statement_routes_through_session() {
        let session = EchoSession::default();

        let outcome = Statement::new("DELETE FROM t WHERE a = ? AND b = ?")
            .bind(1i64)
            .bind("x")
            .execute(&session)
            .await
            .unwrap();
        assert_eq!(outcome.rows_affected, 2);
        assert!(outcome.applied());

        let result = Statement::new("SELECT 1").fetch(&session).await.unwrap();
        assert_eq!(result.len(), 1);

        let seen = session.seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].params(), &[Value::Int(1), Value::Text("x".into())]);
        assert_eq!(seen[1].text(), "SELECT 1");
    }

    #[tokio::test]
    async fn test_forwarding_impls() {
        let session = Arc::new(EchoSession::default());
        let by_ref: &EchoSession = &session;
        let shared: Arc<dyn Session> = session.clone();

        Statement::new("a").execute(&by_ref).await.unwrap();
        Statement::new("b").execute(&shared).await.unwrap();
        Statement::new("c").fetch(shared.as_ref()).await.unwrap();

        let texts: Vec<String> = session
            .seen
            .lock()
            .unwrap()
            .iter()
            .map(|s| s.text().to_string())
            .collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
    }
}

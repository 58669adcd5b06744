//! Integration tests for generated DAO implementations
//!
//! `build.rs` runs the generator over `declarations.toml`; the generated
//! implementations are included next to the traits they implement and driven
//! through a recording in-memory session. This verifies that the generated
//! code compiles against the runtime crate and that each method prepares,
//! binds, executes and maps the way it was declared.

use std::sync::Mutex;

use async_trait::async_trait;
use daogen::{Error, ResultRow, ResultSet, Session, Statement, Value, WriteOutcome};

#[allow(dead_code)]
mod models {
    #[derive(Debug, Clone, PartialEq)]
    pub struct User {
        pub id: i64,
        pub name: String,
        pub email: Option<String>,
    }

    impl User {
        pub fn name(&self) -> &str {
            &self.name
        }
    }

    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct Note {
        pub id: i64,
        body: String,
    }

    impl Note {
        pub fn new(id: i64, body: &str) -> Self {
            Self {
                id,
                body: body.to_string(),
            }
        }

        pub fn body(&self) -> &str {
            &self.body
        }

        pub fn set_body(&mut self, body: String) {
            self.body = body;
        }
    }

    /// Declared nowhere; only used by a malformed method
    #[derive(Debug, Clone)]
    pub struct Widget {
        pub id: i64,
    }
}

#[allow(dead_code)]
#[allow(async_fn_in_trait)]
mod dao {
    use crate::models::{Note, User, Widget};
    use daogen::{ResultSet, WriteOutcome};

    pub trait UserDao {
        async fn save(&self, u: &User) -> daogen::Result<()>;
        async fn insert(&self, u: &User) -> daogen::Result<bool>;
        async fn insert_outcome(&self, u: &User) -> daogen::Result<WriteOutcome>;
        async fn find_by_id(&self, id: i64) -> daogen::Result<Option<User>>;
        async fn get(&self, id: i64) -> daogen::Result<User>;
        async fn find_all(&self) -> daogen::Result<Vec<User>>;
        async fn rename(&self, name: &str, id: i64) -> daogen::Result<()>;
        async fn forget_login(&self, session: &str) -> daogen::Result<()>;
        async fn raw(&self, min_id: i64) -> daogen::Result<ResultSet>;

        // not generated: unrecognized marker
        async fn ping(&self) -> daogen::Result<()> {
            Ok(())
        }

        // not generated: unknown entity
        async fn save_widget(&self, _w: &Widget) -> daogen::Result<()> {
            Err(daogen::Error::Session("not generated".into()))
        }

        // not generated: ambiguous markers
        async fn purge(&self) -> daogen::Result<()> {
            Err(daogen::Error::Session("not generated".into()))
        }
    }

    pub trait NoteDao {
        async fn find_all(&self) -> daogen::Result<Vec<Note>>;
        async fn save(&self, note: &Note) -> daogen::Result<()>;
    }

    pub trait AuditDao {}

    include!(concat!(env!("OUT_DIR"), "/dao/mod.rs"));
}

use dao::{AuditDao_Impl, NoteDao, NoteDao_Impl, UserDao, UserDao_Impl};
use models::{Note, User};

/// Session that records every statement and answers reads with canned rows
#[derive(Default)]
struct RecordingSession {
    executed: Mutex<Vec<Statement>>,
    queried: Mutex<Vec<Statement>>,
    rows: Vec<ResultRow>,
    rows_affected: u64,
}

impl RecordingSession {
    fn with_rows(rows: Vec<ResultRow>) -> Self {
        Self {
            rows,
            ..Default::default()
        }
    }

    fn affecting(rows_affected: u64) -> Self {
        Self {
            rows_affected,
            ..Default::default()
        }
    }

    fn executed(&self) -> Vec<Statement> {
        self.executed.lock().unwrap().clone()
    }

    fn queried(&self) -> Vec<Statement> {
        self.queried.lock().unwrap().clone()
    }
}

#[async_trait]
impl Session for RecordingSession {
    async fn execute(&self, statement: Statement) -> daogen::Result<WriteOutcome> {
        self.executed.lock().unwrap().push(statement);
        Ok(WriteOutcome {
            rows_affected: self.rows_affected,
            last_insert_id: Some(7),
        })
    }

    async fn query(&self, statement: Statement) -> daogen::Result<ResultSet> {
        self.queried.lock().unwrap().push(statement);
        Ok(ResultSet::new(self.rows.clone()))
    }
}

fn make_user() -> User {
    User {
        id: 1,
        name: "ada".to_string(),
        email: None,
    }
}

fn user_row(id: i64, name: &str, email: Option<&str>) -> ResultRow {
    ResultRow::new()
        .with("id", id)
        .with("user_name", name)
        .with("email", email)
}

// ============================================================================
// Persist
// ============================================================================

#[tokio::test]
async fn test_persist_binds_every_field_in_order() {
    let session = RecordingSession::affecting(1);
    let dao = UserDao_Impl::new(&session);

    dao.save(&make_user()).await.unwrap();

    let executed = session.executed();
    assert_eq!(executed.len(), 1);
    assert_eq!(
        executed[0].text(),
        "INSERT INTO users (id, user_name, email) VALUES (?, ?, ?)"
    );
    assert_eq!(
        executed[0].params(),
        &[Value::Int(1), Value::Text("ada".into()), Value::Null]
    );
    assert!(session.queried().is_empty());
}

#[tokio::test]
async fn test_persist_applied_flag() {
    let session = RecordingSession::affecting(1);
    assert!(UserDao_Impl::new(&session).insert(&make_user()).await.unwrap());

    let session = RecordingSession::affecting(0);
    assert!(!UserDao_Impl::new(&session).insert(&make_user()).await.unwrap());
}

#[tokio::test]
async fn test_persist_raw_outcome() {
    let session = RecordingSession::affecting(1);
    let outcome = UserDao_Impl::new(&session)
        .insert_outcome(&make_user())
        .await
        .unwrap();
    assert_eq!(outcome.rows_affected, 1);
    assert_eq!(outcome.last_insert_id, Some(7));
}

#[tokio::test]
async fn test_persist_with_default_table_name() {
    let session = RecordingSession::affecting(1);
    NoteDao_Impl::new(&session)
        .save(&Note::new(3, "hello"))
        .await
        .unwrap();

    let executed = session.executed();
    assert_eq!(executed[0].text(), "INSERT INTO note (id, body) VALUES (?, ?)");
    assert_eq!(
        executed[0].params(),
        &[Value::Int(3), Value::Text("hello".into())]
    );
}

// ============================================================================
// Ad-hoc queries
// ============================================================================

#[tokio::test]
async fn test_query_optional_entity() {
    let session = RecordingSession::with_rows(vec![user_row(5, "grace", Some("g@x"))]);
    let dao = UserDao_Impl::new(&session);

    let user = dao.find_by_id(5).await.unwrap();
    assert_eq!(
        user,
        Some(User {
            id: 5,
            name: "grace".to_string(),
            email: Some("g@x".to_string()),
        })
    );

    let queried = session.queried();
    assert_eq!(
        queried[0].text(),
        "SELECT id, user_name, email FROM users WHERE id = ?"
    );
    assert_eq!(queried[0].params(), &[Value::Int(5)]);
}

#[tokio::test]
async fn test_query_optional_entity_no_rows() {
    let session = RecordingSession::default();
    assert_eq!(UserDao_Impl::new(&session).find_by_id(9).await.unwrap(), None);
}

#[tokio::test]
async fn test_query_single_entity_requires_a_row() {
    let session = RecordingSession::default();
    let err = UserDao_Impl::new(&session).get(9).await.unwrap_err();
    assert!(matches!(err, Error::RowNotFound));

    let session = RecordingSession::with_rows(vec![user_row(9, "linus", None)]);
    let user = UserDao_Impl::new(&session).get(9).await.unwrap();
    assert_eq!(user.name, "linus");
}

#[tokio::test]
async fn test_query_entity_list() {
    let session = RecordingSession::with_rows(vec![
        user_row(1, "ada", None),
        user_row(2, "grace", Some("g@x")),
    ]);
    let users = UserDao_Impl::new(&session).find_all().await.unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[1].email.as_deref(), Some("g@x"));
    assert!(session.queried()[0].params().is_empty());
}

#[tokio::test]
async fn test_query_maps_through_setters() {
    let session = RecordingSession::with_rows(vec![ResultRow::new()
        .with("id", 4i64)
        .with("body", "remember")]);
    let notes = NoteDao_Impl::new(&session).find_all().await.unwrap();
    assert_eq!(notes, vec![Note::new(4, "remember")]);
    assert_eq!(notes[0].body(), "remember");
}

#[tokio::test]
async fn test_query_binds_parameters_positionally() {
    let session = RecordingSession::affecting(1);
    UserDao_Impl::new(&session).rename("bob", 2).await.unwrap();

    let executed = session.executed();
    assert_eq!(executed[0].text(), "UPDATE users SET user_name = ? WHERE id = ?");
    assert_eq!(
        executed[0].params(),
        &[Value::Text("bob".into()), Value::Int(2)]
    );
}

#[tokio::test]
async fn test_parameter_named_session_binds_the_argument() {
    let session = RecordingSession::affecting(1);
    UserDao_Impl::new(&session)
        .forget_login("tok-42")
        .await
        .unwrap();

    let executed = session.executed();
    assert_eq!(executed[0].text(), "DELETE FROM logins WHERE token = ?");
    assert_eq!(executed[0].params(), &[Value::Text("tok-42".into())]);
}

#[tokio::test]
async fn test_query_raw_result_set() {
    let session = RecordingSession::with_rows(vec![ResultRow::new().with("id", 1i64)]);
    let result = UserDao_Impl::new(&session).raw(1).await.unwrap();
    assert_eq!(result.len(), 1);
}

#[tokio::test]
async fn test_mapping_errors_propagate() {
    let session = RecordingSession::with_rows(vec![ResultRow::new().with("id", 1i64)]);
    let err = UserDao_Impl::new(&session).find_all().await.unwrap_err();
    assert!(matches!(err, Error::ColumnNotFound(ref column) if column == "user_name"));

    let session = RecordingSession::with_rows(vec![ResultRow::new()
        .with("id", 1i64)
        .with("user_name", None::<String>)
        .with("email", None::<String>)]);
    let err = UserDao_Impl::new(&session).find_all().await.unwrap_err();
    assert!(matches!(err, Error::UnexpectedNull { .. }));
}

// ============================================================================
// Skipped methods and interfaces
// ============================================================================

#[tokio::test]
async fn test_unmarked_and_malformed_methods_keep_trait_defaults() {
    let session = RecordingSession::default();
    let dao = UserDao_Impl::new(&session);

    dao.ping().await.unwrap();
    assert!(dao
        .save_widget(&models::Widget { id: 1 })
        .await
        .is_err());
    assert!(dao.purge().await.is_err());
    assert!(session.executed().is_empty());
    assert!(session.queried().is_empty());
}

#[test]
fn test_zero_method_interface_generates_constructor() {
    fn assert_audit_dao<T: dao::AuditDao>(_: &T) {}

    let session = RecordingSession::default();
    let audit = AuditDao_Impl::new(&session);
    assert_audit_dao(&audit);
}

#[test]
fn test_implementations_share_one_session_type() {
    let session = std::sync::Arc::new(RecordingSession::default());
    let _users = UserDao_Impl::new(session.clone());
    let _notes = NoteDao_Impl::new(session.clone());
    assert_eq!(std::sync::Arc::strong_count(&session), 3);
}

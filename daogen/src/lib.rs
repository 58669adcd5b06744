//! daogen - runtime contract for generated DAO implementations
//!
//! `daogen-codegen` turns DAO trait declarations into `*_Impl` types. The
//! generated code targets the small surface exported here:
//!
//! - **Session**: the query-execution handle the host application supplies
//! - **Statements**: `PreparedStatement` templates created once per DAO
//!   method, and per-call `Statement`s with positional `.bind()` chaining
//! - **Results**: `ResultSet` rows mapped to entities by generated code,
//!   `WriteOutcome` for persist methods
//! - **Values**: `Value`, `ToValue`, `FromValue` for parameter and column
//!   conversion
//!
//! No driver ships with this crate; any backend implementing [`Session`]
//! can run generated DAOs.
//!
//! # Example
//!
//! ```ignore
//! use daogen::{ResultSet, Session, Statement, WriteOutcome};
//!
//! struct Loopback;
//!
//! #[async_trait::async_trait]
//! impl Session for Loopback {
//!     async fn execute(&self, _statement: Statement) -> daogen::Result<WriteOutcome> {
//!         Ok(WriteOutcome { rows_affected: 1, last_insert_id: None })
//!     }
//!
//!     async fn query(&self, _statement: Statement) -> daogen::Result<ResultSet> {
//!         Ok(ResultSet::default())
//!     }
//! }
//!
//! let dao = dao::UserDao_Impl::new(Loopback);
//! ```

pub mod error;
pub mod result;
pub mod statement;
pub mod traits;
pub mod value;

pub use error::{Error, Result};
pub use result::{ResultRow, ResultSet, WriteOutcome};
pub use statement::{PreparedStatement, Statement};
pub use traits::{FromValue, Row, RowExt, Session, ToValue};
pub use value::Value;

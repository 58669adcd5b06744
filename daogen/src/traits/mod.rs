//! Core traits for daogen

mod from_value;
mod row;
mod session;
mod to_value;

pub use from_value::FromValue;
pub use row::{Row, RowExt};
pub use session::Session;
pub use to_value::ToValue;

//! Row access traits used by generated row mappers

use crate::error::Result;
use crate::value::Value;

/// A result row that can be queried by column name.
pub trait Row {
    /// Get a value from the row by column name as a dynamic Value.
    ///
    /// Returns an error if the column doesn't exist.
    fn get_value(&self, column: &str) -> Result<Value>;
}

/// Extension trait for typed access to row values.
///
/// Generated code calls this fully qualified, e.g.
/// `daogen::RowExt::get::<i64>(row, "id")?`, so no import is required.
pub trait RowExt: Row {
    /// Get a typed value from the row by column name.
    fn get<T: crate::FromValue>(&self, column: &str) -> Result<T> {
        let value = self.get_value(column)?;
        T::from_value(value)
    }
}

impl<R: Row + ?Sized> RowExt for R {}

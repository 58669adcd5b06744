//! Result types returned by a [`Session`](crate::Session)

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::traits::Row;
use crate::value::Value;

/// Outcome of a write statement
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOutcome {
    /// Number of records affected by the write
    pub rows_affected: u64,
    /// Identifier assigned to the written record, if the backend reports one
    pub last_insert_id: Option<u64>,
}

impl WriteOutcome {
    /// Whether the write touched at least one record.
    pub fn applied(&self) -> bool {
        self.rows_affected > 0
    }
}

/// A single result row addressed by column name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultRow {
    values: HashMap<String, Value>,
}

impl ResultRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style column insertion.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(column.into(), value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for ResultRow {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl Row for ResultRow {
    fn get_value(&self, column: &str) -> Result<Value> {
        self.values
            .get(column)
            .cloned()
            .ok_or_else(|| Error::ColumnNotFound(column.to_string()))
    }
}

/// Raw result handle of a read statement.
///
/// The `map_*` helpers are what generated methods use to turn rows into
/// entities according to the declared return type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    rows: Vec<ResultRow>,
}

impl ResultSet {
    pub fn new(rows: Vec<ResultRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<ResultRow> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Map every row.
    pub fn map_all<T, F>(&self, f: F) -> Result<Vec<T>>
    where
        F: FnMut(&ResultRow) -> Result<T>,
    {
        self.rows.iter().map(f).collect()
    }

    /// Map the first row, if any.
    pub fn map_optional<T, F>(&self, f: F) -> Result<Option<T>>
    where
        F: FnOnce(&ResultRow) -> Result<T>,
    {
        self.rows.first().map(f).transpose()
    }

    /// Map the first row, failing with [`Error::RowNotFound`] when empty.
    pub fn map_one<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&ResultRow) -> Result<T>,
    {
        self.map_optional(f)?.ok_or(Error::RowNotFound)
    }
}

impl From<Vec<ResultRow>> for ResultSet {
    fn from(rows: Vec<ResultRow>) -> Self {
        Self::new(rows)
    }
}

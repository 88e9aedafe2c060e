//! In-memory tables: an ordered column list plus ordered rows of JSON cells.

use serde_json::{Map, Value};

use crate::error::{TableError, TableResult};

/// A single table row, column name to cell value.
pub type Row = Map<String, Value>;

/// Ordered collection of rows sharing a declared set of columns.
///
/// Columns are declared explicitly so an empty table still knows its schema.
/// A declared column that a particular row lacks reads as `null`.
///
/// # Examples
///
/// ```
/// use transit_tables::core::Table;
/// use serde_json::json;
///
/// let table = Table::from_records(vec![
///     json!({"id_1": 1, "id_2": 2, "car": 3.0}),
///     json!({"id_1": 2, "id_2": 1}),
/// ])
/// .unwrap();
///
/// assert_eq!(table.height(), 2);
/// assert!(table.has_column("car"));
/// assert!(table.value(1, "car").unwrap().is_null());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Creates an empty table declaring `columns`.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::default();
        for column in columns {
            table.declare(column.into());
        }
        table
    }

    /// Builds a table from JSON objects. Columns are the union of keys in
    /// first-appearance order.
    pub fn from_records(records: Vec<Value>) -> TableResult<Self> {
        let mut table = Self::default();
        for (position, record) in records.into_iter().enumerate() {
            match record {
                Value::Object(row) => table.push_row(row),
                _ => return Err(TableError::InvalidRecord { position }),
            }
        }
        Ok(table)
    }

    /// Parses a JSON array of objects.
    pub fn from_json_str(json: &str) -> TableResult<Self> {
        let records: Vec<Value> = serde_json::from_str(json)?;
        Self::from_records(records)
    }

    /// Appends a row, declaring any columns it introduces.
    pub fn push_row(&mut self, row: Row) {
        for name in row.keys() {
            if !self.has_column(name) {
                self.columns.push(name.clone());
            }
        }
        self.rows.push(row);
    }

    fn declare(&mut self, column: String) {
        if !self.has_column(&column) {
            self.columns.push(column);
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Fails with [`TableError::MissingColumn`] on the first absent column.
    pub fn require_columns(&self, required: &[&str]) -> TableResult<()> {
        match required.iter().find(|c| !self.has_column(c)) {
            Some(column) => Err(TableError::missing_column(*column)),
            None => Ok(()),
        }
    }

    /// Cell at `row`/`column`; `None` if either is out of range or undeclared.
    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        if !self.has_column(column) {
            return None;
        }
        self.rows
            .get(row)
            .map(|r| r.get(column).unwrap_or(&Value::Null))
    }
}

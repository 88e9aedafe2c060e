//! Typed row schemas and boundary validation.
//!
//! Each transformation reads a few named columns. Rather than looking cells up
//! by string throughout, the table is decoded once into a typed record per row.
//! Missing columns and badly typed cells surface as distinct errors here.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use super::key::Key;
use super::table::Table;
use crate::error::{TableError, TableResult};

/// Pair of ids with the recorded car count between them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CarRecord {
    pub id_1: Key,
    pub id_2: Key,
    /// `null` means no value was recorded for the pair.
    pub car: Option<f64>,
}

impl CarRecord {
    pub const COLUMNS: &'static [&'static str] = &["id_1", "id_2", "car"];
}

/// Categorical `car` value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CarTypeRecord {
    pub car: Key,
}

impl CarTypeRecord {
    pub const COLUMNS: &'static [&'static str] = &["car"];
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BusRecord {
    pub bus: f64,
}

impl BusRecord {
    pub const COLUMNS: &'static [&'static str] = &["bus"];
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TruckRecord {
    pub route: Key,
    pub truck: f64,
}

impl TruckRecord {
    pub const COLUMNS: &'static [&'static str] = &["route", "truck"];
}

/// Raw timestamp observation for an (`id`, `id_2`) pair. The timestamp text
/// is parsed by [`crate::time::parse_timestamp`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TimestampRecord {
    pub id: Key,
    pub id_2: Key,
    pub timestamp: String,
}

impl TimestampRecord {
    pub const COLUMNS: &'static [&'static str] = &["id", "id_2", "timestamp"];
}

/// Decodes every row of `table` into `T`, reading only `columns`.
///
/// All `columns` must be declared on the table, otherwise
/// [`TableError::MissingColumn`] is returned before any row is read. A cell
/// that does not deserialize into its field yields
/// [`TableError::TypeMismatch`] naming the row and column.
pub fn decode_rows<T: DeserializeOwned>(table: &Table, columns: &[&str]) -> TableResult<Vec<T>> {
    table.require_columns(columns)?;

    table
        .rows()
        .iter()
        .enumerate()
        .map(|(row, cells)| {
            let projected: Map<String, Value> = columns
                .iter()
                .map(|c| (c.to_string(), cells.get(*c).cloned().unwrap_or(Value::Null)))
                .collect();

            serde_path_to_error::deserialize(Value::Object(projected)).map_err(|err| {
                let column = err.path().to_string();
                TableError::TypeMismatch {
                    row,
                    column,
                    message: err.into_inner().to_string(),
                }
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_car_records() {
        let table = Table::from_records(vec![
            json!({"id_1": 1, "id_2": 2, "car": 3}),
            json!({"id_1": "x", "id_2": 2.0, "car": null}),
        ])
        .unwrap();

        let rows: Vec<CarRecord> = decode_rows(&table, CarRecord::COLUMNS).unwrap();
        assert_eq!(rows[0].car, Some(3.0));
        assert_eq!(rows[1].id_1, Key::from("x"));
        assert_eq!(rows[1].id_2, Key::Int(2));
        assert_eq!(rows[1].car, None);
    }

    #[test]
    fn test_missing_column_checked_before_rows() {
        let table = Table::new(["route"]);
        let err = decode_rows::<TruckRecord>(&table, TruckRecord::COLUMNS).unwrap_err();
        assert!(matches!(err, TableError::MissingColumn { ref column } if column == "truck"));
    }

    #[test]
    fn test_type_mismatch_names_row_and_column() {
        let table = Table::from_records(vec![
            json!({"bus": 1.5}),
            json!({"bus": "many"}),
        ])
        .unwrap();

        let err = decode_rows::<BusRecord>(&table, BusRecord::COLUMNS).unwrap_err();
        match err {
            TableError::TypeMismatch { row, column, .. } => {
                assert_eq!(row, 1);
                assert_eq!(column, "bus");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_absent_cell_in_declared_column_is_type_error() {
        let table = Table::from_records(vec![
            json!({"route": "A", "truck": 8}),
            json!({"route": "B"}),
        ])
        .unwrap();

        let err = decode_rows::<TruckRecord>(&table, TruckRecord::COLUMNS).unwrap_err();
        assert!(err.is_schema_error());
        assert!(matches!(err, TableError::TypeMismatch { row: 1, .. }));
    }
}

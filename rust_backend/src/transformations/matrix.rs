use std::collections::{BTreeSet, HashSet};

use crate::config::{MultiplySettings, TaskConfig};
use crate::core::{decode_rows, CarRecord, Cell, Key, Matrix, Table};
use crate::error::{TableError, TableResult};

/// Pivot `car` values into a square id-by-id matrix.
///
/// Both axes are the sorted union of ids seen in `id_1` and `id_2`. Cell
/// `(i, j)` holds the `car` value of the row with `id_1 = i, id_2 = j`, or
/// [`Cell::Empty`] when no such row exists. The diagonal is always `0`.
///
/// # Errors
/// * [`TableError::MissingColumn`] if `id_1`, `id_2` or `car` is absent
/// * [`TableError::TypeMismatch`] if an id or `car` cell has the wrong type
/// * [`TableError::DuplicateEntry`] if an `(id_1, id_2)` pair repeats
pub fn generate_car_matrix(table: &Table) -> TableResult<Matrix> {
    let records: Vec<CarRecord> = decode_rows(table, CarRecord::COLUMNS)?;

    let ids: Vec<Key> = records
        .iter()
        .flat_map(|r| [r.id_1.clone(), r.id_2.clone()])
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut matrix = Matrix::new(ids.clone(), ids);
    let placements: Vec<(usize, usize, Cell)> = {
        let (row_pos, col_pos) = matrix.positions();
        records
            .iter()
            .map(|r| (row_pos[&r.id_1], col_pos[&r.id_2], Cell::from(r.car)))
            .collect()
    };

    let mut seen = HashSet::with_capacity(placements.len());
    for (record, (r, c, cell)) in records.iter().zip(placements) {
        if !seen.insert((r, c)) {
            return Err(TableError::DuplicateEntry {
                index: record.id_1.to_string(),
                column: record.id_2.to_string(),
            });
        }
        *matrix.cell_mut(r, c) = cell;
    }

    let size = matrix.shape().0;
    for i in 0..size {
        *matrix.cell_mut(i, i) = Cell::Value(0.0);
    }

    log::debug!(
        "Built {}x{} car matrix from {} rows",
        size,
        size,
        records.len()
    );
    Ok(matrix)
}

/// Banded multiplication of every numeric cell, using the default bands.
///
/// `v < 5` doubles, `5 <= v < 10` triples, `v >= 10` is unchanged.
/// [`Cell::Empty`] placeholders pass through untouched. The input matrix is
/// not modified.
pub fn multiply_matrix(matrix: &Matrix) -> Matrix {
    multiply_matrix_with_config(matrix, &TaskConfig::default())
}

pub fn multiply_matrix_with_config(matrix: &Matrix, config: &TaskConfig) -> Matrix {
    let bands = &config.multiply;
    let mut empty = 0usize;
    let result = matrix.map(|cell| match cell {
        Cell::Empty => {
            empty += 1;
            Cell::Empty
        }
        Cell::Value(v) => Cell::Value(multiply_value(v, bands)),
    });

    let (rows, cols) = result.shape();
    log::debug!(
        "Multiplied {}x{} matrix ({} empty cells passed through)",
        rows,
        cols,
        empty
    );
    result
}

/// Apply the multiplication band that `value` falls in.
///
/// NaN falls in no band and is returned unchanged.
pub fn multiply_value(value: f64, bands: &MultiplySettings) -> f64 {
    if value < bands.low_limit {
        value * bands.low_factor
    } else if value >= bands.low_limit && value < bands.high_limit {
        value * bands.mid_factor
    } else {
        value
    }
}

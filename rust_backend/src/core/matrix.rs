//! Labelled numeric matrices.

use std::collections::HashMap;

use serde::{Serialize, Serializer};

use super::key::Key;

/// A matrix cell: either a number or the empty placeholder used where no
/// value was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Value(f64),
}

impl Cell {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Empty => None,
            Cell::Value(v) => Some(*v),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Value(value)
    }
}

impl From<Option<f64>> for Cell {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Cell::Empty, Cell::Value)
    }
}

// Empty cells render as "" to match the tabular export convention.
impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Cell::Empty => serializer.serialize_str(""),
            Cell::Value(v) => serializer.serialize_f64(*v),
        }
    }
}

/// A table indexed by row labels and columned by column labels.
///
/// # Examples
///
/// ```
/// use transit_tables::core::{Cell, Key, Matrix};
///
/// let mut m = Matrix::new(vec![Key::Int(1), Key::Int(2)], vec![Key::Int(1), Key::Int(2)]);
/// m.set(&Key::Int(1), &Key::Int(2), Cell::Value(3.0));
///
/// assert!(m.is_square());
/// assert_eq!(m.get(&Key::Int(1), &Key::Int(2)), Some(Cell::Value(3.0)));
/// assert_eq!(m.get(&Key::Int(2), &Key::Int(1)), Some(Cell::Empty));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Matrix {
    index: Vec<Key>,
    columns: Vec<Key>,
    cells: Vec<Vec<Cell>>,
}

impl Matrix {
    /// Creates a matrix with every cell [`Cell::Empty`].
    pub fn new(index: Vec<Key>, columns: Vec<Key>) -> Self {
        let cells = vec![vec![Cell::Empty; columns.len()]; index.len()];
        Self {
            index,
            columns,
            cells,
        }
    }

    /// Builds a matrix from row-major cells.
    ///
    /// Returns `None` if the number of rows does not match `index` or any row
    /// length does not match `columns`.
    pub fn from_cells(index: Vec<Key>, columns: Vec<Key>, cells: Vec<Vec<Cell>>) -> Option<Self> {
        let shape_ok = cells.len() == index.len() && cells.iter().all(|r| r.len() == columns.len());
        shape_ok.then_some(Self {
            index,
            columns,
            cells,
        })
    }

    pub fn index(&self) -> &[Key] {
        &self.index
    }

    pub fn columns(&self) -> &[Key] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.cells
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.index.len(), self.columns.len())
    }

    /// Same labels on both axes, in the same order.
    pub fn is_square(&self) -> bool {
        self.index == self.columns
    }

    pub fn get(&self, row: &Key, column: &Key) -> Option<Cell> {
        let r = self.index.iter().position(|k| k == row)?;
        let c = self.columns.iter().position(|k| k == column)?;
        Some(self.cells[r][c])
    }

    /// Sets a cell; returns `false` when either label is unknown.
    pub fn set(&mut self, row: &Key, column: &Key, cell: Cell) -> bool {
        let r = self.index.iter().position(|k| k == row);
        let c = self.columns.iter().position(|k| k == column);
        match (r, c) {
            (Some(r), Some(c)) => {
                self.cells[r][c] = cell;
                true
            }
            _ => false,
        }
    }

    /// Applies `f` to every cell exactly once, producing a new matrix.
    pub fn map(&self, mut f: impl FnMut(Cell) -> Cell) -> Matrix {
        let cells = self
            .cells
            .iter()
            .map(|row| row.iter().map(|cell| f(*cell)).collect())
            .collect();
        Matrix {
            index: self.index.clone(),
            columns: self.columns.clone(),
            cells,
        }
    }

    /// Position lookup for both axes, for bulk writes.
    pub(crate) fn positions(&self) -> (HashMap<&Key, usize>, HashMap<&Key, usize>) {
        let rows = self.index.iter().enumerate().map(|(i, k)| (k, i)).collect();
        let cols = self.columns.iter().enumerate().map(|(i, k)| (k, i)).collect();
        (rows, cols)
    }

    pub(crate) fn cell_mut(&mut self, row: usize, column: usize) -> &mut Cell {
        &mut self.cells[row][column]
    }
}

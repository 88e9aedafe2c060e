//! Core data model for tabular transportation data.
//!
//! This module defines the table representation consumed by every
//! transformation, the typed row schemas it is decoded into, and the
//! labelled matrix produced by the pivot operations.

pub mod key;
pub mod matrix;
pub mod schema;
pub mod table;

pub use key::Key;
pub use matrix::{Cell, Matrix};
pub use schema::{
    decode_rows, BusRecord, CarRecord, CarTypeRecord, TimestampRecord, TruckRecord,
};
pub use table::{Row, Table};

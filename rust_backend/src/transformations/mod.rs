//! Table transformations over transportation data.
//!
//! Each function takes a borrowed [`Table`](crate::core::Table) (or a
//! [`Matrix`](crate::core::Matrix)) and returns a freshly allocated result.
//! None of them share state, so they can run concurrently on separate inputs.
//!
//! # Modules
//!
//! - [`matrix`]: Pivot `car` values into an id matrix, banded multiplication
//! - [`counting`]: Distinct `car` value counts and size buckets
//! - [`filtering`]: `bus` outlier rows and high-`truck` routes
//! - [`coverage`]: Weekly timestamp coverage per (`id`, `id_2`) group
//!
//! # Example
//!
//! ```
//! use transit_tables::core::{Cell, Key, Table};
//! use transit_tables::transformations::{generate_car_matrix, multiply_matrix};
//! use serde_json::json;
//!
//! let table = Table::from_records(vec![
//!     json!({"id_1": 1, "id_2": 1, "car": 5.0}),
//!     json!({"id_1": 1, "id_2": 2, "car": 3.0}),
//! ])?;
//!
//! let matrix = generate_car_matrix(&table)?;
//! assert_eq!(matrix.get(&Key::Int(1), &Key::Int(1)), Some(Cell::Value(0.0)));
//! assert_eq!(matrix.get(&Key::Int(1), &Key::Int(2)), Some(Cell::Value(3.0)));
//!
//! let scaled = multiply_matrix(&matrix);
//! assert_eq!(scaled.get(&Key::Int(1), &Key::Int(2)), Some(Cell::Value(6.0)));
//! # Ok::<(), transit_tables::TableError>(())
//! ```

pub mod counting;
pub mod coverage;
pub mod filtering;
pub mod matrix;


pub use counting::{
    get_car_type_count, get_car_type_count_with_config, get_type_count, CarType, ValueCount,
    ValueCounts,
};
pub use coverage::{time_check, time_check_with_config, CoverageSeries, GroupKey};
pub use filtering::{
    filter_routes, filter_routes_with_config, get_bus_indexes, get_bus_indexes_with_config,
};
pub use matrix::{
    generate_car_matrix, multiply_matrix, multiply_matrix_with_config, multiply_value,
};

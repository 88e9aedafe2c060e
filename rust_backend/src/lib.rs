//! Stateless transformations over tabular vehicle-count data.
//!
//! Tables are decoded into typed rows at the boundary ([`core::schema`]), then
//! each transformation in [`transformations`] derives a new matrix, count
//! mapping, index list or per-group series from them.

pub mod config;
pub mod core;
pub mod error;
pub mod time;
pub mod transformations;

pub use config::TaskConfig;
pub use error::{TableError, TableResult};

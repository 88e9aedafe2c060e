//! Timestamp handling for the coverage check.

pub mod timestamp;

pub use timestamp::{parse_timestamp, week_bucket, DAYS_PER_WEEK, HOURS_PER_DAY};

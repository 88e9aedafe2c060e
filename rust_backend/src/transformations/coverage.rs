use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::config::{CoverageGranularity, TaskConfig};
use crate::core::{decode_rows, Key, Table, TimestampRecord};
use crate::error::{TableError, TableResult};
use crate::time::{parse_timestamp, week_bucket, DAYS_PER_WEEK, HOURS_PER_DAY};

/// Grouping key for the coverage check.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct GroupKey {
    pub id: Key,
    pub id_2: Key,
}

impl GroupKey {
    pub fn new(id: impl Into<Key>, id_2: impl Into<Key>) -> Self {
        Self {
            id: id.into(),
            id_2: id_2.into(),
        }
    }
}

/// One completeness flag per (`id`, `id_2`) group, ordered by group.
pub type CoverageSeries = BTreeMap<GroupKey, bool>;

/// Check whether each (`id`, `id_2`) group covers a full week at hourly
/// resolution.
pub fn time_check(table: &Table) -> TableResult<CoverageSeries> {
    time_check_with_config(table, &TaskConfig::default())
}

/// Per-group coverage check.
///
/// A group is complete when its timestamps fall into every weekday bucket
/// (Monday through Sunday) and, for [`CoverageGranularity::Hour`], into every
/// hour 00 through 23 of each weekday. The bucket is taken from the wall-clock
/// time of each timestamp.
///
/// # Errors
/// * [`TableError::MissingColumn`] if `id`, `id_2` or `timestamp` is absent
/// * [`TableError::TypeMismatch`] for non-string timestamps or bad ids
/// * [`TableError::InvalidTimestamp`] for unparseable timestamp text
pub fn time_check_with_config(table: &Table, config: &TaskConfig) -> TableResult<CoverageSeries> {
    let records: Vec<TimestampRecord> = decode_rows(table, TimestampRecord::COLUMNS)?;
    let granularity = config.coverage.granularity;

    let mut buckets: BTreeMap<GroupKey, HashSet<(usize, usize)>> = BTreeMap::new();
    for (row, record) in records.into_iter().enumerate() {
        let ts = parse_timestamp(&record.timestamp).ok_or_else(|| TableError::InvalidTimestamp {
            row,
            value: record.timestamp.clone(),
        })?;

        let (day, hour) = week_bucket(&ts);
        let bucket = match granularity {
            CoverageGranularity::Day => (day, 0),
            CoverageGranularity::Hour => (day, hour),
        };

        buckets
            .entry(GroupKey {
                id: record.id,
                id_2: record.id_2,
            })
            .or_default()
            .insert(bucket);
    }

    let required = required_buckets(granularity);
    let series: CoverageSeries = buckets
        .into_iter()
        .map(|(group, seen)| {
            let complete = seen.len() == required;
            if !complete {
                log::warn!(
                    "Group ({}, {}) covers {} of {} buckets",
                    group.id,
                    group.id_2,
                    seen.len(),
                    required
                );
            }
            (group, complete)
        })
        .collect();

    log::debug!(
        "Coverage checked for {} groups, {} complete",
        series.len(),
        series.values().filter(|c| **c).count()
    );
    Ok(series)
}

fn required_buckets(granularity: CoverageGranularity) -> usize {
    match granularity {
        CoverageGranularity::Day => DAYS_PER_WEEK,
        CoverageGranularity::Hour => DAYS_PER_WEEK * HOURS_PER_DAY,
    }
}

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::{CarTypeSettings, TaskConfig};
use crate::core::{decode_rows, CarTypeRecord, Key, Table};
use crate::error::TableResult;

/// Occurrence count of one distinct value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueCount {
    pub value: Key,
    pub count: usize,
}

/// Distinct values with their counts, ordered by descending count and then
/// ascending value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValueCounts {
    entries: Vec<ValueCount>,
}

impl ValueCounts {
    fn from_counts(counts: HashMap<Key, usize>) -> Self {
        let mut entries: Vec<ValueCount> = counts
            .into_iter()
            .map(|(value, count)| ValueCount { value, count })
            .collect();
        entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
        Self { entries }
    }

    pub fn get(&self, value: &Key) -> Option<usize> {
        self.entries
            .iter()
            .find(|e| &e.value == value)
            .map(|e| e.count)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValueCount> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts; equals the number of counted rows.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    pub fn to_map(&self) -> HashMap<Key, usize> {
        self.entries
            .iter()
            .map(|e| (e.value.clone(), e.count))
            .collect()
    }
}

/// Count occurrences of each distinct `car` value.
///
/// # Errors
/// * [`crate::TableError::MissingColumn`] if `car` is absent
/// * [`crate::TableError::TypeMismatch`] for `null` or non-scalar cells
pub fn get_type_count(table: &Table) -> TableResult<ValueCounts> {
    let records: Vec<CarTypeRecord> = decode_rows(table, CarTypeRecord::COLUMNS)?;

    let mut counts: HashMap<Key, usize> = HashMap::new();
    for record in records {
        *counts.entry(record.car).or_insert(0) += 1;
    }

    let result = ValueCounts::from_counts(counts);
    log::debug!(
        "Counted {} distinct car values over {} rows",
        result.len(),
        table.height()
    );
    Ok(result)
}

/// Size bucket for a numeric `car` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CarType {
    Low,
    Medium,
    High,
}

impl CarType {
    pub fn classify(value: f64, bounds: &CarTypeSettings) -> Self {
        if value <= bounds.low_max {
            CarType::Low
        } else if value <= bounds.medium_max {
            CarType::Medium
        } else {
            CarType::High
        }
    }
}

impl fmt::Display for CarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CarType::Low => "low",
            CarType::Medium => "medium",
            CarType::High => "high",
        };
        f.write_str(name)
    }
}

/// Bucket numeric `car` values into [`CarType`]s and count each bucket.
///
/// Only buckets that occur appear in the result.
pub fn get_car_type_count(table: &Table) -> TableResult<BTreeMap<CarType, usize>> {
    get_car_type_count_with_config(table, &TaskConfig::default())
}

pub fn get_car_type_count_with_config(
    table: &Table,
    config: &TaskConfig,
) -> TableResult<BTreeMap<CarType, usize>> {
    #[derive(Deserialize)]
    struct NumericCar {
        car: f64,
    }

    let records: Vec<NumericCar> = decode_rows(table, CarTypeRecord::COLUMNS)?;

    let mut counts = BTreeMap::new();
    for record in &records {
        *counts
            .entry(CarType::classify(record.car, &config.car_types))
            .or_insert(0) += 1;
    }

    log::debug!("Bucketed {} car values into {:?}", records.len(), counts);
    Ok(counts)
}

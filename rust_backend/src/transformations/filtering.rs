use std::collections::BTreeMap;

use crate::config::TaskConfig;
use crate::core::{decode_rows, BusRecord, Key, Table, TruckRecord};
use crate::error::TableResult;

/// Row positions whose `bus` value exceeds twice the column mean
pub fn get_bus_indexes(table: &Table) -> TableResult<Vec<usize>> {
    get_bus_indexes_with_config(table, &TaskConfig::default())
}

/// Row positions whose `bus` value exceeds `bus.mean_factor` times the mean.
///
/// Positions are 0-based and ascending. An empty table yields an empty list.
pub fn get_bus_indexes_with_config(table: &Table, config: &TaskConfig) -> TableResult<Vec<usize>> {
    let records: Vec<BusRecord> = decode_rows(table, BusRecord::COLUMNS)?;
    if records.is_empty() {
        return Ok(Vec::new());
    }

    let mean = records.iter().map(|r| r.bus).sum::<f64>() / records.len() as f64;
    let threshold = config.bus.mean_factor * mean;

    let indexes: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.bus > threshold)
        .map(|(i, _)| i)
        .collect();

    log::debug!(
        "{} of {} rows have bus > {:.3} (mean {:.3})",
        indexes.len(),
        records.len(),
        threshold,
        mean
    );
    Ok(indexes)
}

/// Routes whose average `truck` value is greater than 7
pub fn filter_routes(table: &Table) -> TableResult<Vec<Key>> {
    filter_routes_with_config(table, &TaskConfig::default())
}

/// Routes whose average `truck` value is strictly greater than
/// `routes.truck_mean_threshold`, in ascending route order.
pub fn filter_routes_with_config(table: &Table, config: &TaskConfig) -> TableResult<Vec<Key>> {
    let records: Vec<TruckRecord> = decode_rows(table, TruckRecord::COLUMNS)?;

    // route -> (sum, count)
    let mut groups: BTreeMap<Key, (f64, usize)> = BTreeMap::new();
    for record in records {
        let entry = groups.entry(record.route).or_insert((0.0, 0));
        entry.0 += record.truck;
        entry.1 += 1;
    }

    let threshold = config.routes.truck_mean_threshold;
    let total_routes = groups.len();
    let routes: Vec<Key> = groups
        .into_iter()
        .filter(|(_, (sum, count))| sum / *count as f64 > threshold)
        .map(|(route, _)| route)
        .collect();

    log::debug!(
        "{} of {} routes have mean truck > {}",
        routes.len(),
        total_routes,
        threshold
    );
    Ok(routes)
}

//! Property and end-to-end tests for the table transformations.
//!
//! These tests check that:
//! 1. The car matrix is square with a zero diagonal and the recorded values
//! 2. Type counts always sum to the row count
//! 3. Bus indexes are exactly the rows above the threshold
//! 4. Route filtering is strict at the threshold
//! 5. Banded multiplication is a one-shot mapping
//! 6. Coverage is decided per weekday/hour bucket

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use serde_json::{json, Value};
use transit_tables::core::{Cell, Key, Matrix, Table};
use transit_tables::transformations::{
    filter_routes, generate_car_matrix, get_bus_indexes, get_type_count, multiply_matrix,
    time_check, GroupKey,
};

// ==================== Helper Functions ====================

fn table(records: Vec<Value>) -> Table {
    Table::from_records(records).expect("records are objects")
}

/// Like [`table`], but declares `columns` so zero-row inputs keep their schema.
fn table_with(columns: &[&str], records: Vec<Value>) -> Table {
    let mut t = Table::new(columns.iter().copied());
    for record in records {
        if let Value::Object(row) = record {
            t.push_row(row);
        }
    }
    t
}

/// Unique (id_1, id_2) pairs with a car value each.
fn car_rows() -> impl Strategy<Value = BTreeMap<(i64, i64), f64>> {
    prop::collection::btree_map((0i64..8, 0i64..8), 0.0..50.0f64, 0..30)
}

// ==================== End-to-end ====================

#[test]
fn end_to_end_matrix_example() {
    let t = table(vec![
        json!({"id_1": 1, "id_2": 1, "car": 5.0}),
        json!({"id_1": 1, "id_2": 2, "car": 3.0}),
    ]);
    let matrix = generate_car_matrix(&t).unwrap();
    assert_eq!(matrix.get(&Key::Int(1), &Key::Int(1)), Some(Cell::Value(0.0)));
    assert_eq!(matrix.get(&Key::Int(1), &Key::Int(2)), Some(Cell::Value(3.0)));

    let json = serde_json::to_value(&matrix).unwrap();
    assert_eq!(json["index"], json!([1, 2]));
    assert_eq!(json["cells"], json!([[0.0, 3.0], ["", 0.0]]));
}

#[test]
fn multiply_examples() {
    let keys = vec![Key::Int(1), Key::Int(2), Key::Int(3)];
    let m = Matrix::from_cells(
        keys.clone(),
        keys.clone(),
        vec![
            vec![Cell::Value(4.0), Cell::Value(7.0), Cell::Value(12.0)],
            vec![Cell::Value(3.0), Cell::Empty, Cell::Value(9.5)],
            vec![Cell::Value(0.0), Cell::Value(5.0), Cell::Value(10.0)],
        ],
    )
    .unwrap();

    let out = multiply_matrix(&m);
    let values: Vec<Vec<Option<f64>>> = out
        .rows()
        .iter()
        .map(|r| r.iter().map(Cell::as_f64).collect())
        .collect();
    assert_eq!(
        values,
        vec![
            vec![Some(8.0), Some(21.0), Some(12.0)],
            vec![Some(6.0), None, Some(28.5)],
            vec![Some(0.0), Some(15.0), Some(10.0)],
        ]
    );
    // 3 -> 6 -> 18: the second pass uses the tripling band.
    assert_eq!(multiply_matrix(&out).rows()[1][0], Cell::Value(18.0));
}

#[test]
fn coverage_monday_through_sunday() {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let end = start + Duration::days(7) - Duration::seconds(1);

    // Every hour of the week, ending on Sunday 23:59:59 inclusive.
    let mut records: Vec<Value> = (0..168)
        .map(|h| {
            let ts = start + Duration::hours(h);
            let timestamp = ts.format("%Y-%m-%dT%H:%M:%S").to_string();
            json!({"id": "A", "id_2": 7, "timestamp": timestamp})
        })
        .collect();
    let last = end.format("%Y-%m-%d %H:%M:%S").to_string();
    records.push(json!({"id": "A", "id_2": 7, "timestamp": last}));

    // Same coverage except Thursday.
    let partial: Vec<Value> = records
        .iter()
        .filter(|r| !r["timestamp"].as_str().unwrap().starts_with("2024-01-04"))
        .map(|r| {
            let mut r = r.clone();
            r["id"] = json!("B");
            r
        })
        .collect();
    records.extend(partial);

    let series = time_check(&table(records)).unwrap();
    assert_eq!(series.get(&GroupKey::new("A", 7)), Some(&true));
    assert_eq!(series.get(&GroupKey::new("B", 7)), Some(&false));
}

// ==================== Properties ====================

proptest! {
    #[test]
    fn prop_car_matrix_square_zero_diagonal(rows in car_rows()) {
        let records: Vec<Value> = rows
            .iter()
            .map(|((a, b), car)| json!({"id_1": a, "id_2": b, "car": car}))
            .collect();
        let matrix = generate_car_matrix(&table_with(&["id_1", "id_2", "car"], records)).unwrap();

        prop_assert!(matrix.is_square());
        for id in matrix.index() {
            prop_assert_eq!(matrix.get(id, id), Some(Cell::Value(0.0)));
        }
        for ((a, b), car) in &rows {
            if a != b {
                prop_assert_eq!(
                    matrix.get(&Key::Int(*a), &Key::Int(*b)),
                    Some(Cell::Value(*car))
                );
            }
        }
    }

    #[test]
    fn prop_type_counts_sum_to_rows(values in prop::collection::vec(0i64..6, 0..60)) {
        let records: Vec<Value> = values.iter().map(|v| json!({"car": v})).collect();
        let counts = get_type_count(&table_with(&["car"], records)).unwrap();

        prop_assert_eq!(counts.total(), values.len());
        let pairs: Vec<usize> = counts.iter().map(|e| e.count).collect();
        prop_assert!(pairs.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn prop_bus_indexes_exact(values in prop::collection::vec(0.0..100.0f64, 0..40)) {
        let records: Vec<Value> = values.iter().map(|v| json!({"bus": v})).collect();
        let indexes = get_bus_indexes(&table_with(&["bus"], records)).unwrap();

        let mean = if values.is_empty() {
            0.0
        } else {
            values.iter().sum::<f64>() / values.len() as f64
        };
        let expected: Vec<usize> = values
            .iter()
            .enumerate()
            .filter(|(_, v)| **v > 2.0 * mean)
            .map(|(i, _)| i)
            .collect();
        prop_assert_eq!(indexes, expected);
    }

    #[test]
    fn prop_routes_strictly_above_seven(
        rows in prop::collection::vec((0i64..5, 0i64..15), 0..50)
    ) {
        let records: Vec<Value> = rows
            .iter()
            .map(|(route, truck)| json!({"route": route, "truck": truck}))
            .collect();
        let routes = filter_routes(&table_with(&["route", "truck"], records)).unwrap();

        let mut sums: BTreeMap<i64, (i64, i64)> = BTreeMap::new();
        for (route, truck) in &rows {
            let e = sums.entry(*route).or_insert((0, 0));
            e.0 += truck;
            e.1 += 1;
        }
        // Integer comparison avoids float rounding at exactly 7.
        let expected: Vec<Key> = sums
            .into_iter()
            .filter(|(_, (sum, count))| *sum > 7 * *count)
            .map(|(route, _)| Key::Int(route))
            .collect();
        prop_assert_eq!(routes, expected);
    }
}

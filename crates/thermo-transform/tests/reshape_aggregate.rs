//! Reshape and binning behavior on small wide tables.

use std::collections::{BTreeMap, BTreeSet};

use proptest::prelude::*;
use thermo_model::{LongRecord, ReshapeOptions, SkipReason, WideTable};
use thermo_transform::{aggregate, pivot_wide, reshape};

fn wide(headers: &[&str], rows: &[&[&str]]) -> WideTable {
    let mut table = WideTable::new(headers.iter().map(|h| (*h).to_string()).collect());
    for row in rows {
        table.push_row(row.iter().map(|c| (*c).to_string()).collect());
    }
    table
}

fn grid_table(grid: &[Vec<Option<f64>>], columns: usize) -> WideTable {
    let mut table = WideTable::new((0..columns).map(|c| format!("s{c}")).collect());
    for row in grid {
        table.push_row(
            row.iter()
                .map(|cell| cell.map(|v| v.to_string()).unwrap_or_default())
                .collect(),
        );
    }
    table
}

fn grid_strategy() -> impl Strategy<Value = (usize, Vec<Vec<Option<f64>>>)> {
    (1usize..5, 1usize..12).prop_flat_map(|(columns, rows)| {
        let row = prop::collection::vec(prop::option::weighted(0.8, 30.0..42.0f64), columns);
        (Just(columns), prop::collection::vec(row, rows))
    })
}

#[test]
fn mixed_input_scenario() {
    let table = wide(
        &["A", "B"],
        &[&["37.1", "36.9"], &["37.3", ""], &["bad", "37.0"]],
    );
    let reshaped = reshape(&table, &ReshapeOptions::default());

    assert_eq!(
        reshaped.records,
        vec![
            LongRecord::new("A", 0, 37.1),
            LongRecord::new("B", 0, 36.9),
            LongRecord::new("A", 1, 37.3),
            LongRecord::new("B", 2, 37.0),
        ]
    );
    let counts = reshaped.skip_counts();
    assert_eq!(counts[&SkipReason::Empty], 1);
    assert_eq!(counts[&SkipReason::NonNumeric], 1);

    let binned = aggregate(&reshaped.records, 2).unwrap();
    let summary: Vec<(&str, u64, f64)> = binned
        .iter()
        .map(|r| (r.subject_id.as_str(), r.bin_index, r.mean_value))
        .collect();
    assert_eq!(summary.len(), 3);
    assert_eq!((summary[0].0, summary[0].1), ("A", 0));
    assert!((summary[0].2 - 37.2).abs() < 1e-9);
    assert_eq!(summary[1], ("B", 0, 36.9));
    assert_eq!(summary[2], ("B", 1, 37.0));
    assert_eq!(binned[0].sample_count, 2);
}

#[test]
fn subject_without_valid_values_produces_nothing() {
    let table = wide(&["A", "B"], &[&["37.0", "x"], &["37.5", ""], &["36.5", "NaN"]]);
    let reshaped = reshape(&table, &ReshapeOptions::default());

    assert!(reshaped.records.iter().all(|r| r.subject_id == "A"));
    assert_eq!(reshaped.subjects, vec!["A", "B"]);
    let binned = aggregate(&reshaped.records, 2).unwrap();
    assert!(binned.iter().all(|r| r.subject_id == "A" && r.mean_value.is_finite()));
}

#[test]
fn empty_table_reshapes_to_nothing() {
    let table = WideTable::new(vec!["A".to_string()]);
    let reshaped = reshape(&table, &ReshapeOptions::default());
    assert!(reshaped.records.is_empty());
    assert!(aggregate(&reshaped.records, 5).unwrap().is_empty());
}

proptest! {
    #[test]
    fn prop_full_grid_yields_one_record_per_cell(
        (columns, grid) in (1usize..5, 1usize..12).prop_flat_map(|(columns, rows)| {
            let row = prop::collection::vec((30.0..42.0f64).prop_map(Some), columns);
            (Just(columns), prop::collection::vec(row, rows))
        })
    ) {
        let table = grid_table(&grid, columns);
        let reshaped = reshape(&table, &ReshapeOptions::default());
        prop_assert_eq!(reshaped.records.len(), grid.len() * columns);
        let pairs: BTreeSet<(String, u64)> = reshaped
            .records
            .iter()
            .map(|r| (r.subject_id.clone(), r.time))
            .collect();
        prop_assert_eq!(pairs.len(), reshaped.records.len());
    }

    #[test]
    fn prop_pivot_reproduces_grid((columns, grid) in grid_strategy()) {
        let table = grid_table(&grid, columns);
        let reshaped = reshape(&table, &ReshapeOptions::default());

        let mut expected: BTreeMap<u64, BTreeMap<String, f64>> = BTreeMap::new();
        for (time, row) in grid.iter().enumerate() {
            for (col, cell) in row.iter().enumerate() {
                if let Some(value) = cell {
                    expected.entry(time as u64).or_default().insert(format!("s{col}"), *value);
                }
            }
        }
        prop_assert_eq!(pivot_wide(&reshaped.records), expected);
        let present = grid.iter().flatten().filter(|cell| cell.is_some()).count();
        prop_assert_eq!(reshaped.skipped.len(), grid.len() * columns - present);
    }

    #[test]
    fn prop_bin_means_are_bounded((columns, grid) in grid_strategy(), bin_size in 1i64..8) {
        let records = reshape(&grid_table(&grid, columns), &ReshapeOptions::default()).records;
        let binned = aggregate(&records, bin_size).unwrap();
        for bin in &binned {
            let members: Vec<f64> = records
                .iter()
                .filter(|r| r.subject_id == bin.subject_id && r.time as i64 / bin_size == bin.bin_index as i64)
                .map(|r| r.value)
                .collect();
            prop_assert_eq!(members.len(), bin.sample_count);
            let min = members.iter().copied().fold(f64::INFINITY, f64::min);
            let max = members.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            prop_assert!(bin.mean_value >= min && bin.mean_value <= max);
        }
        let indices: Vec<u64> = binned.iter().map(|b| b.bin_index).collect();
        let mut sorted = indices.clone();
        sorted.sort_unstable();
        prop_assert_eq!(indices, sorted);
    }

    #[test]
    fn prop_unit_bins_are_identity((columns, grid) in grid_strategy()) {
        let records = reshape(&grid_table(&grid, columns), &ReshapeOptions::default()).records;
        let binned = aggregate(&records, 1).unwrap();
        prop_assert_eq!(binned.len(), records.len());
        let by_pair: BTreeMap<(String, u64), f64> = records
            .iter()
            .map(|r| ((r.subject_id.clone(), r.time), r.value))
            .collect();
        for bin in &binned {
            prop_assert_eq!(bin.sample_count, 1);
            prop_assert_eq!(bin.bin_start, bin.bin_index);
            prop_assert_eq!(by_pair[&(bin.subject_id.clone(), bin.bin_index)], bin.mean_value);
        }
    }

    #[test]
    fn prop_aggregate_is_idempotent((columns, grid) in grid_strategy(), bin_size in 1i64..8) {
        let records = reshape(&grid_table(&grid, columns), &ReshapeOptions::default()).records;
        prop_assert_eq!(aggregate(&records, bin_size).unwrap(), aggregate(&records, bin_size).unwrap());
    }
}

//! Wide-to-long reshaping.
//!
//! Every `(row, subject column)` pair is classified into a [`CellOutcome`].
//! Parsed cells become [`LongRecord`]s with `time` set to the row index;
//! skipped cells are listed with their reason and never defaulted.

use std::collections::BTreeMap;

use tracing::debug;

use thermo_model::{
    CellOutcome, LongRecord, ReshapeOptions, SkipReason, SkippedCell, WideTable,
};

/// Output of [`reshape`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reshaped {
    /// Subject columns in header order, including subjects without data.
    pub subjects: Vec<String>,
    /// Long records in row-major order.
    pub records: Vec<LongRecord>,
    pub skipped: Vec<SkippedCell>,
    pub row_count: usize,
}

impl Reshaped {
    /// Number of skipped cells per reason. Every reason is present.
    pub fn skip_counts(&self) -> BTreeMap<SkipReason, usize> {
        let mut counts: BTreeMap<SkipReason, usize> =
            SkipReason::ALL.iter().map(|reason| (*reason, 0)).collect();
        for cell in &self.skipped {
            *counts.entry(cell.reason).or_insert(0) += 1;
        }
        counts
    }
}

/// Classify one raw cell. `None` means the row ended before the column.
///
/// The trimmed text must parse as a whole; there is no prefix parsing, so
/// `"37.1abc"` is non-numeric.
pub fn classify_cell(raw: Option<&str>) -> CellOutcome {
    let Some(raw) = raw else {
        return CellOutcome::Skipped(SkipReason::Missing);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return CellOutcome::Skipped(SkipReason::Empty);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => CellOutcome::Parsed(value),
        Ok(_) => CellOutcome::Skipped(SkipReason::NonFinite),
        Err(_) => CellOutcome::Skipped(SkipReason::NonNumeric),
    }
}

/// Convert a wide table into long records.
///
/// Malformed cells never fail the reshape; they only reduce the record count.
pub fn reshape(table: &WideTable, options: &ReshapeOptions) -> Reshaped {
    let columns = table.subject_columns(options.index_column.as_deref());
    let mut records = Vec::with_capacity(table.row_count() * columns.len());
    let mut skipped = Vec::new();

    for (row_idx, _) in table.rows.iter().enumerate() {
        let time = row_idx as u64;
        for (col_idx, subject) in &columns {
            match classify_cell(table.cell(row_idx, *col_idx)) {
                CellOutcome::Parsed(value) => {
                    records.push(LongRecord::new(*subject, time, value));
                }
                CellOutcome::Skipped(reason) => skipped.push(SkippedCell {
                    subject_id: (*subject).to_string(),
                    time,
                    reason,
                }),
            }
        }
    }

    let reshaped = Reshaped {
        subjects: columns.iter().map(|(_, name)| (*name).to_string()).collect(),
        records,
        skipped,
        row_count: table.row_count(),
    };
    debug!(
        subject_count = reshaped.subjects.len(),
        row_count = reshaped.row_count,
        record_count = reshaped.records.len(),
        skipped = reshaped.skipped.len(),
        "reshape complete"
    );
    reshaped
}

/// Pivot long records back into a `time -> subject -> value` grid.
///
/// When two records share a `(time, subject)` pair the later one wins.
pub fn pivot_wide(records: &[LongRecord]) -> BTreeMap<u64, BTreeMap<String, f64>> {
    let mut grid: BTreeMap<u64, BTreeMap<String, f64>> = BTreeMap::new();
    for record in records {
        grid.entry(record.time)
            .or_default()
            .insert(record.subject_id.clone(), record.value);
    }
    grid
}

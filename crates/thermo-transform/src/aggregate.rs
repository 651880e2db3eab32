//! Fixed-width temporal binning.

use std::collections::HashMap;

use tracing::debug;

use thermo_model::{BinSize, BinnedRecord, LongRecord};

use crate::error::Result;

/// Mean value per `(subject, time / bin_size)` partition.
///
/// Output is sorted by bin index; records in the same bin keep the order in
/// which their partition first appeared in the input.
///
/// # Errors
///
/// Returns an invalid-configuration error when `bin_size <= 0`.
pub fn aggregate(records: &[LongRecord], bin_size: i64) -> Result<Vec<BinnedRecord>> {
    let bin_size = BinSize::new(bin_size)?;
    Ok(aggregate_bins(records, bin_size))
}

/// [`aggregate`] for an already validated bin size.
///
/// Non-finite values are ignored, so a partition holding only such values
/// produces no output.
pub fn aggregate_bins(records: &[LongRecord], bin_size: BinSize) -> Vec<BinnedRecord> {
    let mut slots: HashMap<(&str, u64), usize> = HashMap::new();
    let mut partitions: Vec<Partition<'_>> = Vec::new();
    let mut ignored = 0usize;

    for record in records {
        if !record.value.is_finite() {
            ignored += 1;
            continue;
        }
        let bin_index = bin_size.bin_index(record.time);
        let key = (record.subject_id.as_str(), bin_index);
        let slot = *slots.entry(key).or_insert_with(|| {
            partitions.push(Partition::new(key.0, bin_index));
            partitions.len() - 1
        });
        partitions[slot].push(record.value);
    }

    let mut binned: Vec<BinnedRecord> = partitions
        .into_iter()
        .map(|partition| partition.finish(bin_size))
        .collect();
    binned.sort_by_key(|record| record.bin_index);

    debug!(
        bin_size = bin_size.get(),
        input_count = records.len(),
        ignored,
        bin_count = binned.len(),
        "aggregation complete"
    );
    binned
}

struct Partition<'a> {
    subject_id: &'a str,
    bin_index: u64,
    sum: f64,
    count: usize,
    min: f64,
    max: f64,
}

impl<'a> Partition<'a> {
    fn new(subject_id: &'a str, bin_index: u64) -> Self {
        Self {
            subject_id,
            bin_index,
            sum: 0.0,
            count: 0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    fn finish(self, bin_size: BinSize) -> BinnedRecord {
        // Rounding in the running sum may push the quotient just past the
        // extremes; the mean always lies within them.
        let mean = (self.sum / self.count as f64).clamp(self.min, self.max);
        BinnedRecord {
            subject_id: self.subject_id.to_string(),
            bin_index: self.bin_index,
            bin_start: bin_size.bin_start(self.bin_index),
            mean_value: mean,
            sample_count: self.count,
        }
    }
}

//! Load-to-records pipeline as an explicit value.
//!
//! [`build_dataset`] turns a wide table into a [`Dataset`]; later steps
//! (binning, plans, exports) take the dataset by reference and return new
//! values. Nothing is cached between calls.

use std::time::Instant;

use tracing::{debug, info};

use thermo_model::{BinnedRecord, LongRecord, PipelineOptions, WideTable};

use crate::aggregate::aggregate;
use crate::error::Result;
use crate::reshape::{Reshaped, reshape};
use crate::selection::SubjectSelection;
use crate::stats::{SubjectStats, subject_stats};

/// Full long-format dataset plus the options it was built with.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub reshaped: Reshaped,
    pub options: PipelineOptions,
}

impl Dataset {
    pub fn subjects(&self) -> &[String] {
        &self.reshaped.subjects
    }

    pub fn records(&self) -> &[LongRecord] {
        &self.reshaped.records
    }

    /// Records of the selected subjects only.
    pub fn select(&self, selection: &SubjectSelection) -> Vec<LongRecord> {
        selection.filter(self.records()).cloned().collect()
    }

    /// Bin the selected subjects' records.
    pub fn binned(&self, selection: &SubjectSelection, bin_size: i64) -> Result<Vec<BinnedRecord>> {
        aggregate(&self.select(selection), bin_size)
    }

    pub fn stats(&self) -> Vec<SubjectStats> {
        subject_stats(&self.reshaped, &self.options.derivation)
    }
}

/// Validate options and reshape `table`.
///
/// # Errors
///
/// Fails only on invalid derivation rules; malformed cells are skipped.
pub fn build_dataset(table: &WideTable, options: &PipelineOptions) -> Result<Dataset> {
    options.derivation.validate()?;
    let start = Instant::now();
    let reshaped = reshape(table, &options.reshape);
    for (reason, count) in reshaped.skip_counts() {
        if count > 0 {
            debug!(%reason, count, "cells skipped");
        }
    }
    info!(
        subject_count = reshaped.subjects.len(),
        row_count = reshaped.row_count,
        record_count = reshaped.records.len(),
        skipped = reshaped.skipped.len(),
        duration_ms = start.elapsed().as_millis(),
        "dataset built"
    );
    Ok(Dataset {
        reshaped,
        options: options.clone(),
    })
}

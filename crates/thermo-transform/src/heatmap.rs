//! Heatmap feed: one cell per (subject, bin) mean.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use thermo_model::BinnedRecord;

use crate::selection::{SubjectSelection, distinct_subjects};
use crate::series::{Extent, RenderPlan};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatCell {
    pub subject_id: String,
    pub bin_index: u64,
    pub bin_start: u64,
    pub mean_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapGrid {
    /// Row labels in first-seen order.
    pub subjects: Vec<String>,
    /// Column labels: distinct bin indices, ascending.
    pub bins: Vec<u64>,
    /// Only bins with data; the grid is sparse.
    pub cells: Vec<HeatCell>,
    /// Domain of the sequential color scale.
    pub value_extent: Extent,
}

/// Build the heatmap grid for the selected subjects, or `None` when no
/// binned record survives the selection.
pub fn heatmap(binned: &[BinnedRecord], selection: &SubjectSelection) -> Option<HeatmapGrid> {
    let selected: Vec<BinnedRecord> = selection.filter(binned).cloned().collect();
    let value_extent = Extent::of(selected.iter().map(|record| record.mean_value))?;
    let bins: BTreeSet<u64> = selected.iter().map(|record| record.bin_index).collect();
    Some(HeatmapGrid {
        subjects: distinct_subjects(&selected),
        bins: bins.into_iter().collect(),
        cells: selected
            .into_iter()
            .map(|record| HeatCell {
                subject_id: record.subject_id,
                bin_index: record.bin_index,
                bin_start: record.bin_start,
                mean_value: record.mean_value,
            })
            .collect(),
        value_extent,
    })
}

/// [`heatmap`] as a render plan: a placeholder when there is nothing to draw.
pub fn heatmap_plan(
    binned: &[BinnedRecord],
    selection: &SubjectSelection,
) -> RenderPlan<HeatmapGrid> {
    match heatmap(binned, selection) {
        Some(grid) => RenderPlan::Chart(grid),
        None => RenderPlan::empty_selection(selection),
    }
}

//! Load a source file and build each command's output from the dataset.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use tracing::{error, info, info_span};

use thermo_ingest::{SourceFile, load_source};
use thermo_model::PipelineOptions;
use thermo_transform::frame::{
    annotated_binned_frame, annotated_long_frame, binned_frame, long_frame,
};
use thermo_transform::series::full_time_extent;
use thermo_transform::{
    Dataset, HeatmapGrid, PeriodChart, RenderPlan, SubjectSelection, TimeWindow, annotate,
    annotate_records, build_dataset, heatmap_plan, period_plan, plan_series,
};

/// A parsed source file and the dataset built from it.
#[derive(Debug)]
pub struct Loaded {
    pub source: SourceFile,
    pub dataset: Dataset,
}

/// Read `input` and reshape it with `options`.
///
/// # Errors
///
/// Fails when the file cannot be loaded or the options are invalid. Nothing
/// is partially loaded on failure.
pub fn load(input: &Path, options: &PipelineOptions) -> Result<Loaded> {
    let span = info_span!("load", path = %input.display());
    let _guard = span.enter();
    let start = Instant::now();
    let source = match load_source(input) {
        Ok(source) => source,
        Err(err) => {
            error!(error = %err, "failed to load source");
            return Err(err).with_context(|| format!("load {}", input.display()));
        }
    };
    let dataset = build_dataset(&source.table, options).context("invalid pipeline options")?;
    info!(
        subjects = dataset.subjects().len(),
        records = dataset.records().len(),
        duration_ms = start.elapsed().as_millis(),
        "load complete"
    );
    Ok(Loaded { source, dataset })
}

/// Long records, optionally with derived attribute columns.
pub fn reshape_frame(dataset: &Dataset, annotated: bool) -> Result<DataFrame> {
    let frame = if annotated {
        let records = annotate_records(dataset.records(), &dataset.options.derivation)?;
        annotated_long_frame(&records)?
    } else {
        long_frame(dataset.records())?
    };
    Ok(frame)
}

/// Binned means of the selected subjects.
pub fn bin_frame(
    dataset: &Dataset,
    selection: &SubjectSelection,
    bin_size: i64,
    annotated: bool,
) -> Result<DataFrame> {
    let binned = dataset.binned(selection, bin_size)?;
    info!(bins = binned.len(), bin_size, "binning complete");
    let frame = if annotated {
        annotated_binned_frame(&annotate(&binned, &dataset.options.derivation)?)?
    } else {
        binned_frame(&binned)?
    };
    Ok(frame)
}

/// Line-chart plan over raw samples, or over bin means when `bin_size` is set.
///
/// `from`/`to` define the zoom window; an open side extends to the data.
pub fn series_plan(
    dataset: &Dataset,
    selection: &SubjectSelection,
    bin_size: Option<i64>,
    from: Option<u64>,
    to: Option<u64>,
) -> Result<RenderPlan> {
    let plan = match bin_size {
        Some(size) => {
            let binned = dataset.binned(selection, size)?;
            let window = full_time_extent(&binned, selection)
                .and_then(|full| TimeWindow::from_bounds(from, to, full));
            plan_series(&binned, selection, window)
        }
        None => {
            let records = dataset.records();
            let window = full_time_extent(records, selection)
                .and_then(|full| TimeWindow::from_bounds(from, to, full));
            plan_series(records, selection, window)
        }
    };
    Ok(plan)
}

/// Heatmap plan of bin means.
pub fn heatmap_grid(
    dataset: &Dataset,
    selection: &SubjectSelection,
    bin_size: i64,
) -> Result<RenderPlan<HeatmapGrid>> {
    let binned = dataset.binned(selection, bin_size)?;
    Ok(heatmap_plan(&binned, selection))
}

/// Per-period bar plan of the selected subjects.
pub fn period_feed(
    dataset: &Dataset,
    selection: &SubjectSelection,
) -> Result<RenderPlan<PeriodChart>> {
    Ok(period_plan(
        dataset.records(),
        &dataset.options.derivation,
        selection,
    )?)
}

use std::time::Instant;

use anyhow::Result;
use tracing::{info, info_span};

use thermo_cli::output::{emit_csv, emit_json};
use thermo_cli::pipeline::{
    Loaded, bin_frame, heatmap_grid, load, period_feed, reshape_frame, series_plan,
};
use thermo_transform::SubjectSelection;

use crate::cli::{
    BinArgs, HeatmapArgs, PeriodsArgs, ReshapeArgs, SelectionArgs, SeriesArgs, SourceArgs,
};

fn load_from(args: &SourceArgs) -> Result<Loaded> {
    load(&args.input, &args.pipeline.to_options())
}

fn selection(args: &SelectionArgs) -> SubjectSelection {
    SubjectSelection::from_list(&args.subjects)
}

pub fn run_summary(args: &SourceArgs) -> Result<Loaded> {
    load_from(args)
}

pub fn run_reshape(args: &ReshapeArgs) -> Result<()> {
    let span = info_span!("reshape", annotate = args.annotate);
    let _guard = span.enter();
    let start = Instant::now();
    let loaded = load_from(&args.source)?;
    let mut frame = reshape_frame(&loaded.dataset, args.annotate)?;
    emit_csv(&mut frame, args.output.output.as_deref())?;
    info!(
        rows = frame.height(),
        duration_ms = start.elapsed().as_millis(),
        "reshape complete"
    );
    Ok(())
}

pub fn run_bin(args: &BinArgs) -> Result<()> {
    let span = info_span!("bin", bin_size = args.bin_size);
    let _guard = span.enter();
    let loaded = load_from(&args.source)?;
    let mut frame = bin_frame(
        &loaded.dataset,
        &selection(&args.selection),
        args.bin_size,
        args.annotate,
    )?;
    emit_csv(&mut frame, args.output.output.as_deref())
}

pub fn run_series(args: &SeriesArgs) -> Result<()> {
    let span = info_span!("series");
    let _guard = span.enter();
    let loaded = load_from(&args.source)?;
    let plan = series_plan(
        &loaded.dataset,
        &selection(&args.selection),
        args.bin_size,
        args.from,
        args.to,
    )?;
    emit_json(&plan, args.output.output.as_deref())
}

pub fn run_heatmap(args: &HeatmapArgs) -> Result<()> {
    let span = info_span!("heatmap", bin_size = args.bin_size);
    let _guard = span.enter();
    let loaded = load_from(&args.source)?;
    let plan = heatmap_grid(&loaded.dataset, &selection(&args.selection), args.bin_size)?;
    emit_json(&plan, args.output.output.as_deref())
}

pub fn run_periods(args: &PeriodsArgs) -> Result<()> {
    let span = info_span!("periods");
    let _guard = span.enter();
    let loaded = load_from(&args.source)?;
    let plan = period_feed(&loaded.dataset, &selection(&args.selection))?;
    emit_json(&plan, args.output.output.as_deref())
}

//! Body-temperature time-series transformations.
//!
//! - **reshape**: wide rows to long `(subject, time, value)` records with
//!   explicit per-cell skip outcomes
//! - **aggregate**: fixed-width time binning with per-bin means
//! - **derive**: category, period index and special-period flag
//! - **selection**: subject filtering shared by every chart feed
//! - **series / heatmap / periods**: chart-ready plans
//! - **frame**: Polars DataFrames for tabular export
//! - **pipeline**: table-to-dataset entry point

pub mod aggregate;
pub mod derive;
pub mod error;
pub mod frame;
pub mod heatmap;
pub mod periods;
pub mod pipeline;
pub mod reshape;
pub mod selection;
pub mod series;
pub mod stats;

pub use aggregate::{aggregate, aggregate_bins};
pub use derive::{
    AnnotatedBin, AnnotatedRecord, annotate, annotate_records, category_of, derive_attributes,
};
pub use error::{Result, TransformError};
pub use heatmap::{HeatCell, HeatmapGrid, heatmap, heatmap_plan};
pub use periods::{PeriodBar, PeriodChart, period_bars, period_plan};
pub use pipeline::{Dataset, build_dataset};
pub use reshape::{Reshaped, classify_cell, pivot_wide, reshape};
pub use selection::{SubjectSelection, TimedValue, distinct_subjects};
pub use series::{ChartData, Extent, Point, RenderPlan, Series, TimeWindow, plan_series};
pub use stats::{SubjectStats, subject_stats};

//! CLI argument definitions for the thermo tool.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use thermo_cli::logging::LogFormat;
use thermo_model::{DerivationRules, MINUTES_PER_DAY, PipelineOptions, ReshapeOptions};
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(
    name = "thermo",
    version,
    about = "Reshape and bin body-temperature time series",
    long_about = "Reshape a wide body-temperature CSV (one column per subject, one row per \
                  minute) into long records, bin it into fixed time windows, and export \
                  chart-ready series, heatmap grids and per-period bars."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print per-subject statistics and skipped-cell counts.
    Summary(SourceArgs),

    /// Write long-format records as CSV.
    Reshape(ReshapeArgs),

    /// Write fixed-width binned means as CSV.
    Bin(BinArgs),

    /// Write the line-chart plan for the selected subjects as JSON.
    Series(SeriesArgs),

    /// Write the heatmap grid of binned means as JSON.
    Heatmap(HeatmapArgs),

    /// Write per-period (daily by default) bars as JSON.
    Periods(PeriodsArgs),
}

/// Input file and the options that shape how it is read.
#[derive(Args)]
pub struct SourceArgs {
    /// Wide-format CSV: header of subject IDs, one row per time step.
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    #[command(flatten)]
    pub pipeline: PipelineArgs,
}

#[derive(Args)]
pub struct PipelineArgs {
    /// Column holding an explicit time index; excluded from the subjects.
    #[arg(long = "index-column", value_name = "NAME")]
    pub index_column: Option<String>,

    /// Subject IDs starting with this prefix are category A.
    #[arg(long = "category-prefix", value_name = "PREFIX", default_value = "f")]
    pub category_prefix: String,

    /// Time steps per period (day index).
    #[arg(long = "period-length", value_name = "STEPS", default_value_t = MINUTES_PER_DAY)]
    pub period_length: u64,

    /// Periods per special-period cycle.
    #[arg(long = "special-cycle", value_name = "N", default_value_t = 4)]
    pub special_cycle: u64,

    /// Flagged position within the special-period cycle.
    #[arg(long = "special-phase", value_name = "N", default_value_t = 2)]
    pub special_phase: u64,
}

impl PipelineArgs {
    pub fn to_options(&self) -> PipelineOptions {
        PipelineOptions::new()
            .with_reshape(ReshapeOptions::new().with_index_column(self.index_column.clone()))
            .with_derivation(
                DerivationRules::new()
                    .with_category_prefix(self.category_prefix.clone())
                    .with_period_length(self.period_length)
                    .with_special_cadence(self.special_cycle, self.special_phase),
            )
    }
}

#[derive(Args)]
pub struct OutputArgs {
    /// Output file (default: stdout).
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct SelectionArgs {
    /// Subject to include; repeat for several. All subjects when omitted.
    #[arg(long = "subject", value_name = "ID")]
    pub subjects: Vec<String>,
}

#[derive(Args)]
pub struct ReshapeArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Add category, period index and special-period columns.
    #[arg(long = "annotate")]
    pub annotate: bool,
}

#[derive(Args)]
pub struct BinArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Bin width in time steps.
    #[arg(long = "bin-size", value_name = "STEPS", allow_negative_numbers = true)]
    pub bin_size: i64,

    /// Add attribute columns derived from each bin's start time.
    #[arg(long = "annotate")]
    pub annotate: bool,
}

#[derive(Args)]
pub struct SeriesArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Plot binned means instead of raw samples.
    #[arg(long = "bin-size", value_name = "STEPS", allow_negative_numbers = true)]
    pub bin_size: Option<i64>,

    /// First time step of the zoom window.
    #[arg(long = "from", value_name = "T")]
    pub from: Option<u64>,

    /// Last time step of the zoom window.
    #[arg(long = "to", value_name = "T")]
    pub to: Option<u64>,
}

#[derive(Args)]
pub struct HeatmapArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Bin width in time steps.
    #[arg(long = "bin-size", value_name = "STEPS", allow_negative_numbers = true)]
    pub bin_size: i64,
}

#[derive(Args)]
pub struct PeriodsArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    #[command(flatten)]
    pub selection: SelectionArgs,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        }
    }
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

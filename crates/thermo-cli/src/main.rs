//! `thermo`: reshape and bin body-temperature time series.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use thermo_cli::logging::{LogConfig, init_logging};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command};
use crate::commands::{run_bin, run_heatmap, run_periods, run_reshape, run_series, run_summary};
use crate::summary::print_summary;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let result = match &cli.command {
        Command::Summary(args) => run_summary(args).map(|loaded| print_summary(&loaded)),
        Command::Reshape(args) => run_reshape(args),
        Command::Bin(args) => run_bin(args),
        Command::Series(args) => run_series(args),
        Command::Heatmap(args) => run_heatmap(args),
        Command::Periods(args) => run_periods(args),
    };
    let exit_code = match result {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// Logging setup for this run. An explicit `-v`/`-q` or `--log-level`
/// wins over `RUST_LOG`; ANSI follows `--color`, or the terminal on auto.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let explicit_level = cli.log_level.map(LevelFilter::from);
    let ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    LogConfig {
        use_env_filter: explicit_level.is_none() && !cli.verbosity.is_present(),
        with_ansi: ansi,
        ..LogConfig::default()
    }
    .with_level_filter(explicit_level.unwrap_or_else(|| cli.verbosity.tracing_level_filter()))
    .with_format(cli.log_format.into())
    .with_log_file(cli.log_file.clone())
}

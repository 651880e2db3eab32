//! Writers for command output: CSV through Polars, JSON through serde.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::{CsvWriter, DataFrame, SerWriter};
use serde::Serialize;
use tracing::info;

/// Write `frame` as CSV with a header row.
pub fn write_csv<W: Write>(frame: &mut DataFrame, writer: W) -> Result<()> {
    CsvWriter::new(writer)
        .include_header(true)
        .finish(frame)
        .context("write csv")
}

/// Write `value` as pretty JSON followed by a newline.
pub fn write_json<T: Serialize, W: Write>(value: &T, mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, value).context("serialize json")?;
    writeln!(writer).context("write json")?;
    Ok(())
}

/// Write a frame to `path`, or to stdout when `path` is `None`.
pub fn emit_csv(frame: &mut DataFrame, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            write_csv(frame, &mut writer)?;
            writer.flush().context("flush csv")?;
            info!(path = %path.display(), rows = frame.height(), "csv written");
        }
        None => write_csv(frame, io::stdout().lock())?,
    }
    Ok(())
}

/// Write JSON to `path`, or to stdout when `path` is `None`.
pub fn emit_json<T: Serialize>(value: &T, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            write_json(value, &mut writer)?;
            writer.flush().context("flush json")?;
            info!(path = %path.display(), "json written");
        }
        None => write_json(value, io::stdout().lock())?,
    }
    Ok(())
}

//! Wide-format CSV loading.
//!
//! The first line names the subjects; every following line is one time
//! step. Cells are kept as text so the reshaper can decide, per cell, whether
//! a reading exists.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Instant;

use csv::{ByteRecord, ReaderBuilder};
use tracing::{debug, info};

use thermo_model::WideTable;

use crate::error::{IngestError, Result};
use crate::fingerprint::sha256_hex;

/// A loaded source file.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub table: WideTable,
    /// SHA-256 of the file contents.
    pub fingerprint: String,
    pub byte_len: usize,
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Read and parse a wide-format CSV file.
///
/// # Errors
///
/// Fails when the file cannot be read, is not valid CSV, has no header, or
/// the header holds blank or duplicate subject names.
pub fn load_source(path: &Path) -> Result<SourceFile> {
    let start = Instant::now();
    let bytes = std::fs::read(path).map_err(|e| IngestError::from_io(path, e))?;
    let table = parse_wide_table(&bytes, path)?;
    let fingerprint = sha256_hex(&bytes);
    info!(
        path = %path.display(),
        subject_count = table.headers.len(),
        row_count = table.row_count(),
        duration_ms = start.elapsed().as_millis(),
        "source loaded"
    );
    Ok(SourceFile {
        path: path.to_path_buf(),
        table,
        fingerprint,
        byte_len: bytes.len(),
    })
}

/// Read a wide-format CSV file, discarding provenance.
pub fn read_wide_table(path: &Path) -> Result<WideTable> {
    load_source(path).map(|source| source.table)
}

/// Parse wide-format CSV content. `path` is only used for error messages.
///
/// The header must be valid UTF-8. Data cells are decoded lossily, so a
/// stray byte only makes its cell non-numeric. An empty line is a time step
/// whose first cell is blank; empty lines after the last record are dropped.
pub fn parse_wide_table(bytes: &[u8], path: &Path) -> Result<WideTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);
    let mut records = reader.byte_records();

    let header_record = match records.next() {
        Some(record) => record.map_err(|e| csv_error(path, &e))?,
        None => {
            return Err(IngestError::EmptyCsv {
                path: path.to_path_buf(),
            });
        }
    };
    let headers = header_record
        .iter()
        .map(|field| {
            std::str::from_utf8(field)
                .map(normalize_header)
                .map_err(|e| IngestError::CsvParse {
                    path: path.to_path_buf(),
                    message: format!("header is not valid UTF-8: {e}"),
                })
        })
        .collect::<Result<Vec<String>>>()?;
    validate_headers(&headers, path)?;

    let mut table = WideTable::new(headers);
    for record in records {
        let record = record.map_err(|e| csv_error(path, &e))?;
        for _ in 0..skipped_empty_lines(bytes, &record) {
            table.push_row(vec![String::new()]);
        }

        let row: Vec<String> = record
            .iter()
            .map(|field| normalize_cell(&String::from_utf8_lossy(field)))
            .collect();
        if row.len() > table.headers.len() {
            debug!(
                path = %path.display(),
                time = table.row_count(),
                extra = row.len() - table.headers.len(),
                "row has more cells than the header; extras ignored"
            );
        }
        table.push_row(row);
    }
    Ok(table)
}

/// Empty lines the reader passed over before `record`.
///
/// The record's position is where the reader resumed, which is before any
/// skipped empty lines. A `\n` still pending from the previous terminator
/// is not a line of its own.
fn skipped_empty_lines(bytes: &[u8], record: &ByteRecord) -> usize {
    let Some(start) = record.position().map(|p| p.byte() as usize) else {
        return 0;
    };
    let Some(rest) = bytes.get(start..) else {
        return 0;
    };
    let newlines = rest
        .iter()
        .take_while(|b| matches!(b, b'\r' | b'\n'))
        .filter(|b| **b == b'\n')
        .count();
    let terminator_pending = start > 0 && bytes.get(start - 1) != Some(&b'\n');
    newlines.saturating_sub(usize::from(terminator_pending))
}

fn validate_headers(headers: &[String], path: &Path) -> Result<()> {
    if headers.iter().all(String::is_empty) {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    let mut seen = BTreeSet::new();
    for (position, header) in headers.iter().enumerate() {
        if header.is_empty() {
            return Err(IngestError::EmptyColumnName {
                path: path.to_path_buf(),
                position,
            });
        }
        if !seen.insert(header.as_str()) {
            return Err(IngestError::DuplicateColumn {
                path: path.to_path_buf(),
                column: header.clone(),
            });
        }
    }
    Ok(())
}

fn csv_error(path: &Path, error: &csv::Error) -> IngestError {
    IngestError::CsvParse {
        path: path.to_path_buf(),
        message: error.to_string(),
    }
}
